//! Promolist - build discounted product lists for a promotion
//!
//! The library holds the editing core. Products and variants are picked from
//! a paged remote catalog into an ordered list, where each line and variant
//! carries its own discount. A terminal frontend drives it from the
//! `promolist` binary.

use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod config;
pub mod editor;
pub mod list;
pub mod logging;
pub mod output;
pub mod picker;
pub mod reorder;
pub mod selection;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum PromoError {
    /// Catalog error
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON output error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PromoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_keeps_message() {
        let err: PromoError = catalog::CatalogError::MissingApiKey.into();
        assert!(err.to_string().starts_with("Catalog error: "));

        let err: PromoError = ::config::ConfigError::Message("bad".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: bad");
    }
}
