pub mod entry;
pub mod renderer;
pub mod target;

pub use entry::{ArticleCard, DisplayEntry, EntryContent, EntryKind};
pub use renderer::{DescriptionPolicy, RenderConfig, Renderer};
pub use target::{HtmlTarget, RenderTarget, TextTarget};

pub mod prelude {
    pub use super::{DisplayEntry, EntryKind, HtmlTarget, RenderTarget, Renderer, TextTarget};
}
