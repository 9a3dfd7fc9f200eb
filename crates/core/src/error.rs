//! Error types for the LappyBot domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all LappyBot operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Catalog errors ---
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed catalog at {} (row {row}): {reason}", path.display())]
    Malformed {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("Invalid {field} format: '{value}' is not a number")]
    InvalidNumericInput { field: String, value: String },

    #[error("Laptop dataset is not available")]
    Unavailable,
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn malformed_catalog_names_row() {
        let err = Error::Catalog(CatalogError::Malformed {
            path: PathBuf::from("laptops.csv"),
            row: 7,
            reason: "missing field `ram_memory`".into(),
        });
        let text = err.to_string();
        assert!(text.contains("laptops.csv"));
        assert!(text.contains("row 7"));
        assert!(text.contains("ram_memory"));
    }

    #[test]
    fn invalid_numeric_input_echoes_value() {
        let err = CatalogError::InvalidNumericInput {
            field: "budget".into(),
            value: "cheap".into(),
        };
        assert!(err.to_string().contains("budget"));
        assert!(err.to_string().contains("cheap"));
    }
}
