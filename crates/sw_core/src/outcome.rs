use crate::query::QueryError;
use crate::types::{RelatedResult, SummaryResult};

/// The closed set of terminal results a submitted question can produce.
///
/// Exactly one outcome is produced per resolved step; outcomes are never
/// merged.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Related(RelatedResult),
    Summary(SummaryResult),
    EmptyQuery,
    QueryTooLong,
    NoResults,
    NoSummary,
    NetworkFailure,
}

impl From<QueryError> for Outcome {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Empty => Outcome::EmptyQuery,
            QueryError::TooLong { .. } => Outcome::QueryTooLong,
        }
    }
}

/// Result of the related-articles lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum RelatedOutcome {
    Found(RelatedResult),
    NoResults,
    NetworkFailure,
}

impl From<RelatedOutcome> for Outcome {
    fn from(outcome: RelatedOutcome) -> Self {
        match outcome {
            RelatedOutcome::Found(result) => Outcome::Related(result),
            RelatedOutcome::NoResults => Outcome::NoResults,
            RelatedOutcome::NetworkFailure => Outcome::NetworkFailure,
        }
    }
}

/// Result of the summary lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Found(SummaryResult),
    NoSummary,
    NetworkFailure,
}

impl From<SummaryOutcome> for Outcome {
    fn from(outcome: SummaryOutcome) -> Self {
        match outcome {
            SummaryOutcome::Found(result) => Outcome::Summary(result),
            SummaryOutcome::NoSummary => Outcome::NoSummary,
            SummaryOutcome::NetworkFailure => Outcome::NetworkFailure,
        }
    }
}
