pub mod client;
pub mod config;
mod wire;

pub use client::HttpQueryClient;
pub use config::ClientConfig;

pub mod prelude {
    pub use super::{ClientConfig, HttpQueryClient};
    pub use sw_core::{QueryService, RelatedOutcome, SummaryOutcome};
}
