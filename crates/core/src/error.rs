//! Domain error model.

use thiserror::Error;

/// Primitive-level error.
///
/// Only identifier parsing fails at this layer. Token and authorization
/// failures have their own types in `orgscope-auth`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
