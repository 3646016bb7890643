//! Error types for the configurable library.
//!
//! This module provides the error hierarchy for all configuration
//! operations, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a configuration error.
///
/// # Examples
///
/// ```
/// use configurable::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the configurable library.
///
/// Both variants signal programmer errors (a typo'd key or a missing
/// declaration) and are raised synchronously at the offending call. They
/// are not retryable with the same input and are never caught internally.
#[derive(Debug, Error)]
pub enum Error {
    /// A key was read or written that is absent from the schema locked at
    /// construction time.
    #[error("configuration parameter '{key}' is not found")]
    KeyNotFound {
        /// The key that is not part of the locked schema.
        key: String,
    },

    /// An owner was accessed before declaring its default configuration.
    #[error("'{owner}' is not configured")]
    NotConfigured {
        /// The owning type that has no declared defaults.
        owner: String,
    },
}

impl Error {
    /// Check if error indicates a key outside the locked schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use configurable::Error;
    ///
    /// let err = Error::KeyNotFound { key: "param_four".to_string() };
    /// assert!(err.is_key_not_found());
    /// ```
    #[must_use]
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }

    /// Check if error indicates an owner without declared defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use configurable::Error;
    ///
    /// let err = Error::NotConfigured { owner: "MyClass".to_string() };
    /// assert!(err.is_not_configured());
    /// ```
    #[must_use]
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_found_error() {
        let err = Error::KeyNotFound {
            key: "param_four".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("configuration parameter"));
        assert!(display.contains("param_four"));
        assert!(display.contains("is not found"));
    }

    #[test]
    fn test_not_configured_error() {
        let err = Error::NotConfigured {
            owner: "my_crate::Database".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("my_crate::Database"));
        assert!(display.contains("is not configured"));
    }

    #[test]
    fn test_error_predicates() {
        let key = Error::KeyNotFound {
            key: "x".to_string(),
        };
        assert!(key.is_key_not_found());
        assert!(!key.is_not_configured());

        let owner = Error::NotConfigured {
            owner: "X".to_string(),
        };
        assert!(owner.is_not_configured());
        assert!(!owner.is_key_not_found());
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i64> {
            Err(Error::KeyNotFound {
                key: "test".to_string(),
            })
        }

        assert!(returns_result().is_err());
    }
}
