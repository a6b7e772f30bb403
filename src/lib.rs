//! Bookscrape: a catalog scraper for books.toscrape.com
//!
//! This crate walks the demo bookstore's paginated category listings,
//! extracts each book's detail page into a typed record, and persists
//! records as CSV rows, optionally downloading cover images.

pub mod config;
pub mod fetch;
pub mod model;
pub mod output;
pub mod runner;
pub mod scrape;
pub mod url;

use thiserror::Error;

/// Main error type for bookscrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} for {url}")]
    BadStatus { url: String, status: u16 },

    #[error("Network error for {url}: {error}")]
    Network { url: String, error: String },

    #[error("Extraction failed for {url}: {source}")]
    Extract { url: String, source: ExtractError },

    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    #[error("No categories found on the landing page")]
    NoCategories,

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Non-fatal failures while mapping a detail page into a record.
///
/// Each variant names the structural landmark the page was missing; the
/// caller logs a warning, skips the item, and keeps going.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("missing <h1> title")]
    MissingTitle,

    #[error("product table has {found} cells, expected at least {expected}")]
    ShortProductTable { found: usize, expected: usize },

    #[error("breadcrumb has {found} links, expected at least 3")]
    ShortBreadcrumb { found: usize },

    #[error("missing star-rating element")]
    MissingRating,

    #[error("unparseable price text: {text:?}")]
    BadPrice { text: String },

    #[error("invalid selector: {0}")]
    Selector(String),
}

/// Result type alias for bookscrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{Book, Category, Rating};
pub use runner::{RunStats, Runner};
