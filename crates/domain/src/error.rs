//! Unified error types for the domain layer
//!
//! Value objects report conversion failures with [`DomainError`], so adapters
//! can wrap them without falling back to String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Legacy body part key outside the fixed table
    #[error("Invalid body part legacy id {0}")]
    UnknownLegacyId(String),

    /// Numeric body part code outside the fixed table
    #[error("Invalid body part token {0}")]
    UnknownToken(i64),
}

impl DomainError {
    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for Side {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "left" => Ok(Self::Left),
    ///             _ => Err(DomainError::parse(format!("Invalid side: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an unknown legacy id error
    pub fn unknown_legacy_id(legacy_id: impl Into<String>) -> Self {
        Self::UnknownLegacyId(legacy_id.into())
    }
}
