use std::fmt;
use thiserror::Error;

/// Upper bound on the length of a question, in characters.
pub const MAX_QUERY_CHARS: usize = 300;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("query is empty")]
    Empty,

    #[error("query is {len} characters long (maximum {})", MAX_QUERY_CHARS)]
    TooLong { len: usize },
}

/// A validated, trimmed question ready to be sent to the backend.
///
/// A `Query` is never empty and never longer than [`MAX_QUERY_CHARS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trims surrounding whitespace and checks the length bound.
    ///
    /// No other normalization is applied: inner whitespace and casing are
    /// sent as typed.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }

        let len = trimmed.chars().count();
        if len > MAX_QUERY_CHARS {
            return Err(QueryError::TooLong { len });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
