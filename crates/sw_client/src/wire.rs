use serde::Deserialize;
use sw_core::{Article, CorrelationId, RelatedResult};

/// Body of `GET /api/related`.
#[derive(Debug, Deserialize)]
pub(crate) struct RelatedResponse {
    pub links: Vec<Article>,
    #[serde(default)]
    pub id: Option<CorrelationId>,
}

impl From<RelatedResponse> for RelatedResult {
    fn from(response: RelatedResponse) -> Self {
        Self {
            articles: response.links,
            correlation_id: response.id,
        }
    }
}

/// Body of `GET /api/answer`.
#[derive(Debug, Deserialize)]
pub(crate) struct AnswerResponse {
    pub answer: String,
}
