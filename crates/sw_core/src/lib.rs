pub mod error;
pub mod outcome;
pub mod query;
pub mod sanitize;
pub mod service;
pub mod types;

pub use error::{Error, Result};
pub use outcome::{Outcome, RelatedOutcome, SummaryOutcome};
pub use query::{Query, QueryError, MAX_QUERY_CHARS};
pub use sanitize::{escape, Markup};
pub use service::QueryService;
pub use types::{Article, CorrelationId, RelatedResult, SearchRequest, SummaryResult};

pub mod prelude {
    pub use super::{
        Article, CorrelationId, Error, Outcome, Query, QueryService, RelatedResult, Result,
        SearchRequest, SummaryResult,
    };
}
