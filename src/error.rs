//! Error types for client configuration and type registration.
//!
//! This module contains error types raised while constructing a connection
//! or registering resource types. All of these are fail-fast errors: they
//! surface during setup, never mid-request.
//!
//! # Example
//!
//! ```rust
//! use comm_api::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during configuration or type registration.
///
/// Each variant provides a clear, actionable error message. Registration
/// errors (`IrregularPlural`, `DuplicateType`) are configuration mistakes
/// and are reported when the registry is built, not on first use.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API token cannot be empty.
    #[error("API token cannot be empty. Please provide a valid API token.")]
    EmptyToken,

    /// API password cannot be empty.
    #[error("API password cannot be empty. Please provide a valid API password.")]
    EmptyPassword,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The naming convention cannot round-trip this resource name.
    #[error("Resource name '{name}' pluralizes to '{collection}', which singularizes back to '{round_trip}'. Register it with an explicit collection name instead.")]
    IrregularPlural {
        /// The singular resource name that was registered.
        name: String,
        /// The derived collection name.
        collection: String,
        /// What the collection name singularizes back to.
        round_trip: String,
    },

    /// A resource name or collection name is already registered.
    #[error("Resource type '{name}' is already registered.")]
    DuplicateType {
        /// The conflicting name.
        name: String,
    },

    /// A resource name is not a usable URL segment.
    #[error("Invalid resource name '{name}'. Expected a non-empty lowercase identifier (e.g., 'message').")]
    InvalidResourceName {
        /// The invalid name that was provided.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_error_message() {
        let error = ConfigError::EmptyToken;
        let message = error.to_string();
        assert!(message.contains("API token cannot be empty"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("scheme"));
    }

    #[test]
    fn test_irregular_plural_error_names_all_three_forms() {
        let error = ConfigError::IrregularPlural {
            name: "person".to_string(),
            collection: "persons".to_string(),
            round_trip: "person".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("person"));
        assert!(message.contains("persons"));
        assert!(message.contains("explicit collection name"));
    }

    #[test]
    fn test_duplicate_type_error_message() {
        let error = ConfigError::DuplicateType {
            name: "message".to_string(),
        };
        assert!(error.to_string().contains("already registered"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyToken;
        let _: &dyn std::error::Error = &error;
    }
}
