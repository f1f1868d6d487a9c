//! Error types for the LLMCrawl client.

use std::fmt;

use thiserror::Error;

/// Result type for LLMCrawl client operations.
pub type Result<T> = std::result::Result<T, LlmCrawlError>;

/// LLMCrawl client errors.
///
/// Service-level failures (the API answering `{"success": false, ...}`) are
/// not errors in this sense; they come back as the `Failure` arm of the
/// typed response. This enum covers everything that prevents a well-formed
/// exchange from happening at all.
#[derive(Debug, Error)]
pub enum LlmCrawlError {
    /// Configuration error (missing API key, unset env var)
    #[error("configuration error: {0}")]
    Config(String),

    /// Request options violated the schema; carries every violated field
    #[error(transparent)]
    Validation(#[from] Violations),

    /// Network error (connection failed, TLS, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response whose body is not a service error envelope
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Response body is not valid JSON or does not match the expected shape
    #[error("decode error: {0}")]
    Decode(String),

    /// Response body has no boolean `success` discriminator
    #[error("response body has no boolean `success` discriminator")]
    MissingDiscriminator,
}

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the offending field, e.g. `formats` or `scrapeOptions.timeout`.
    pub field: String,
    pub message: String,
}

/// Every constraint a request violated, collected before any network I/O.
///
/// Validation never stops at the first problem; callers get the full list.
#[derive(Debug, Clone, Default)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(Violation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    /// Resolve the collected checks: the validated value on success,
    /// the full violation list otherwise.
    pub(crate) fn into_result<T>(self, value: T) -> std::result::Result<T, Violations> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: ")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}
