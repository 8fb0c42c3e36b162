use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::query::Query;

/// An article suggested by the backend.
///
/// `description` is markup as delivered by the backend; whether it is
/// rendered raw or escaped is decided by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        rename = "date",
        default,
        deserialize_with = "deserialize_published",
        serialize_with = "serialize_published"
    )]
    pub published: Option<NaiveDate>,
}

/// Opaque identifier linking a related-articles response to its summary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One submit action: what to ask and whether a summary is wanted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: Query,
    want_summary: bool,
}

impl SearchRequest {
    pub fn new(query: Query, want_summary: bool) -> Self {
        Self { query, want_summary }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn want_summary(&self) -> bool {
        self.want_summary
    }

    /// Cached results are requested only when no summary is wanted.
    pub fn use_cache(&self) -> bool {
        !self.want_summary
    }
}

/// Articles in backend relevance order, plus the id used to fetch a summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedResult {
    pub articles: Vec<Article>,
    pub correlation_id: Option<CorrelationId>,
}

/// Computer-generated summary text. Untrusted: escape before display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub text: String,
}

/// Parses the backend `date` field.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and RFC 2822 / HTTP dates.
pub fn parse_published(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts.date_naive());
    }
    // Flask serializes datetimes as "Tue, 05 Mar 2024 00:00:00 GMT"
    if let Ok(ts) = chrono::NaiveDateTime::parse_from_str(raw, "%a, %d %b %Y %H:%M:%S GMT") {
        return Some(ts.date());
    }

    tracing::warn!(date = raw, "Unrecognized article date, omitting it");
    None
}

/// Long-form en-US date, e.g. `March 5, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn deserialize_published<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_published))
}

fn serialize_published<S>(date: &Option<NaiveDate>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
        None => serializer.serialize_none(),
    }
}
