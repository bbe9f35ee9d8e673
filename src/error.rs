// src/error.rs
//! Error types for catalog access, table decoding and export.

use thiserror::Error;

/// A fixed-width slice that could not be coerced to its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column '{column}': cannot parse {value:?}")]
pub struct DecodeError {
    /// 1-based line number within the decoded text.
    pub line: usize,
    /// Column name from the layout.
    pub column: String,
    /// The trimmed slice that failed.
    pub value: String,
}

/// Errors raised by the CDMS client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CdmsError {
    /// HTTP request failed (connect, timeout, non-success status, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An expected HTML element was absent.
    #[error("no element matching `{selector}` in {context}")]
    ElementNotFound {
        selector: &'static str,
        context: String,
    },

    /// A link or base URL could not be parsed or joined.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Fixed-width decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A `Q(T)` row of a partition-function page could not be coerced.
    #[error("partition function row {label:?}: cannot parse {value:?}")]
    PartitionValue { label: String, value: String },

    /// Nothing in the catalog cleared the similarity threshold.
    #[error("no catalog entry matches {query:?} at limit {limit}")]
    NoMatch { query: String, limit: f64 },

    /// Query parameters rejected before anything was sent.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Spline could not be built from the given points.
    #[error("spline: {0}")]
    Spline(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CdmsError {
    /// Whether a retry could plausibly succeed. Network failures qualify,
    /// except 4xx responses.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => !crate::core::net::is_client_error(e),
            _ => false,
        }
    }

    pub(crate) fn not_found(selector: &'static str, context: impl Into<String>) -> Self {
        Self::ElementNotFound { selector, context: context.into() }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CdmsError>;
