use async_trait::async_trait;

use crate::outcome::{RelatedOutcome, SummaryOutcome};
use crate::types::{CorrelationId, SearchRequest};

/// The backend seam used by the widget controller.
///
/// Implementations never return errors: every failure is folded into the
/// outcome value at this boundary and diagnostics go to the log.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Look up articles related to the request's question
    async fn fetch_related(&self, request: &SearchRequest) -> RelatedOutcome;

    /// Fetch the computer-generated summary for a previous lookup
    async fn fetch_summary(&self, id: &CorrelationId) -> SummaryOutcome;
}
