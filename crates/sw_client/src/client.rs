use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use sw_core::{
    CorrelationId, Error, QueryService, RelatedOutcome, Result, SearchRequest, SummaryOutcome,
    SummaryResult,
};
use url::Url;

use crate::config::ClientConfig;
use crate::wire::{AnswerResponse, RelatedResponse};

const RELATED_PATH: &str = "/api/related";
const ANSWER_PATH: &str = "/api/answer";

/// HTTP client for the related-articles and summary endpoints.
///
/// No retries are performed. Every failure is logged and folded into an
/// outcome before it leaves this type.
#[derive(Clone)]
pub struct HttpQueryClient {
    client: Arc<Client>,
    base_url: Url,
}

impl fmt::Debug for HttpQueryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpQueryClient")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl HttpQueryClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!(
                "{} cannot be used as a base origin",
                config.base_url
            )));
        }

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client: Arc::new(client),
            base_url,
        })
    }

    pub(crate) fn related_url(&self, request: &SearchRequest) -> Result<Url> {
        let mut url = self.base_url.join(RELATED_PATH)?;
        url.query_pairs_mut()
            .append_pair("cache", if request.use_cache() { "TRUE" } else { "FALSE" })
            .append_pair("query", request.query().as_str());
        Ok(url)
    }

    pub(crate) fn answer_url(&self, id: &CorrelationId) -> Result<Url> {
        let mut url = self.base_url.join(ANSWER_PATH)?;
        url.query_pairs_mut().append_pair("id", id.as_str());
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url, endpoint: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn try_fetch_related(&self, request: &SearchRequest) -> Result<RelatedResponse> {
        let url = self.related_url(request)?;
        tracing::debug!(%url, "Fetching related articles");
        self.get_json(url, RELATED_PATH).await
    }

    async fn try_fetch_summary(&self, id: &CorrelationId) -> Result<AnswerResponse> {
        let url = self.answer_url(id)?;
        tracing::debug!(%url, "Fetching summary");
        self.get_json(url, ANSWER_PATH).await
    }
}

#[async_trait]
impl QueryService for HttpQueryClient {
    async fn fetch_related(&self, request: &SearchRequest) -> RelatedOutcome {
        match self.try_fetch_related(request).await {
            Ok(response) if response.links.is_empty() => {
                tracing::info!(query = %request.query(), "No related articles found");
                RelatedOutcome::NoResults
            }
            Ok(response) => {
                tracing::info!(
                    query = %request.query(),
                    count = response.links.len(),
                    "Related articles found"
                );
                RelatedOutcome::Found(response.into())
            }
            Err(err) => {
                log_failure(RELATED_PATH, &err);
                RelatedOutcome::NetworkFailure
            }
        }
    }

    async fn fetch_summary(&self, id: &CorrelationId) -> SummaryOutcome {
        match self.try_fetch_summary(id).await {
            Ok(response) if response.answer.trim().is_empty() => {
                tracing::warn!(%id, "Summary endpoint returned a blank answer");
                SummaryOutcome::NoSummary
            }
            Ok(response) => SummaryOutcome::Found(SummaryResult {
                text: response.answer,
            }),
            Err(Error::HttpStatus { status, endpoint }) => {
                tracing::warn!(%id, status, endpoint = %endpoint, "No summary available");
                SummaryOutcome::NoSummary
            }
            Err(err) => {
                log_failure(ANSWER_PATH, &err);
                SummaryOutcome::NetworkFailure
            }
        }
    }
}

fn log_failure(endpoint: &str, err: &Error) {
    match err {
        Error::HttpStatus { status, .. } => {
            tracing::error!(endpoint, status, "Backend returned an error status");
        }
        other => {
            tracing::error!(endpoint, error = %other, "Backend request failed");
        }
    }
}
