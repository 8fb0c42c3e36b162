use sw_core::types::format_long_date;
use sw_core::{Article, Markup, Outcome, RelatedResult, SummaryResult};

use crate::entry::{ArticleCard, DisplayEntry};

pub const EMPTY_QUERY_MESSAGE: &str = "Please type a question into the text box above.";
pub const QUERY_TOO_LONG_MESSAGE: &str =
    "Please shorten your question to 300 characters or fewer.";
pub const NO_RESULTS_MESSAGE: &str = "No articles found. Please reword your question.";
pub const NO_SUMMARY_MESSAGE: &str =
    "No computer-generated summary found. Please reword your question.";
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Our team is investigating some issues with the search assistant. Please try again later.";

pub const SUMMARY_HEADING: &str = "Computer-generated summary";
pub const SUMMARY_DISCLAIMER: &str = "A computer attempted to answer your question with the most \
    relevant article found. This content is not human-verified, so double-check specific claims, \
    especially numerical statistics or personal advice.";

/// How article descriptions from the backend are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptionPolicy {
    /// Escape descriptions like any other untrusted text.
    #[default]
    Escape,
    /// Insert descriptions as markup. Only for a backend known to be trusted.
    Trusted,
}

#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub description_policy: DescriptionPolicy,
}

/// Maps outcomes to display entries.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, outcome: &Outcome) -> Vec<DisplayEntry> {
        match outcome {
            Outcome::EmptyQuery => vec![DisplayEntry::message(EMPTY_QUERY_MESSAGE)],
            Outcome::QueryTooLong => vec![DisplayEntry::message(QUERY_TOO_LONG_MESSAGE)],
            Outcome::NoResults => vec![DisplayEntry::message(NO_RESULTS_MESSAGE)],
            Outcome::NoSummary => vec![DisplayEntry::message(NO_SUMMARY_MESSAGE)],
            Outcome::NetworkFailure => {
                // Details were logged where the failure happened; the user
                // always sees the same apology.
                tracing::warn!("Showing network failure notice");
                vec![DisplayEntry::message(NETWORK_FAILURE_MESSAGE)]
            }
            Outcome::Related(result) => self.render_related(result),
            Outcome::Summary(summary) => render_summary(summary),
        }
    }

    fn render_related(&self, result: &RelatedResult) -> Vec<DisplayEntry> {
        if result.articles.is_empty() {
            return vec![DisplayEntry::message(NO_RESULTS_MESSAGE)];
        }

        result
            .articles
            .iter()
            .map(|article| DisplayEntry::article(self.card(article)))
            .collect()
    }

    fn card(&self, article: &Article) -> ArticleCard {
        let description = match self.config.description_policy {
            DescriptionPolicy::Escape => Markup::escaped(&article.description),
            DescriptionPolicy::Trusted => Markup::trusted(article.description.clone()),
        };

        ArticleCard {
            title: article.title.clone(),
            url: article.url.clone(),
            date: article.published.map(format_long_date),
            description,
        }
    }
}

fn render_summary(summary: &SummaryResult) -> Vec<DisplayEntry> {
    vec![
        DisplayEntry::summary_header(SUMMARY_HEADING, SUMMARY_DISCLAIMER),
        DisplayEntry::summary_body(Markup::escaped(&summary.text)),
    ]
}
