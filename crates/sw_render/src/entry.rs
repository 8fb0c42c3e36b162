use serde::Serialize;
use sw_core::Markup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    ErrorMessage,
    ArticleCard,
    SummaryHeader,
    SummaryBody,
}

/// Everything a target needs to draw one article.
///
/// `title` and `url` are plain text and get escaped by the target;
/// `description` is already safe markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleCard {
    pub title: String,
    pub url: String,
    pub date: Option<String>,
    pub description: Markup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EntryContent {
    Message { text: String },
    ArticleCard(ArticleCard),
    SummaryHeader { heading: String, disclaimer: String },
    SummaryBody { markup: Markup },
}

/// One renderable unit of the result area.
///
/// Entries are regenerated on every submission and never diffed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayEntry {
    kind: EntryKind,
    content: EntryContent,
}

impl DisplayEntry {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::ErrorMessage,
            content: EntryContent::Message { text: text.into() },
        }
    }

    pub fn article(card: ArticleCard) -> Self {
        Self {
            kind: EntryKind::ArticleCard,
            content: EntryContent::ArticleCard(card),
        }
    }

    pub fn summary_header(heading: impl Into<String>, disclaimer: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::SummaryHeader,
            content: EntryContent::SummaryHeader {
                heading: heading.into(),
                disclaimer: disclaimer.into(),
            },
        }
    }

    pub fn summary_body(markup: Markup) -> Self {
        Self {
            kind: EntryKind::SummaryBody,
            content: EntryContent::SummaryBody { markup },
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn content(&self) -> &EntryContent {
        &self.content
    }
}
