pub mod config;
pub mod controller;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_utils;

pub use config::{WidgetConfig, WidgetLabels};
pub use controller::Controller;
pub use state::{Effect, Event, Machine, Phase, WidgetState};
pub use view::{mount, ResultContainer, ViewTree};

pub mod prelude {
    pub use super::{mount, Controller, ViewTree, WidgetConfig, WidgetState};
    pub use sw_core::{Error, Outcome, Result};
    pub use sw_render::{DisplayEntry, EntryKind};
}
