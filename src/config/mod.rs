//! Configuration module for bookscrape
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. All settings have defaults tuned for books.toscrape.com, so a
//! config file is only needed to override them.
//!
//! # Example
//!
//! ```no_run
//! use bookscrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("bookscrape.toml")).unwrap();
//! println!("Scraping site: {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, OutputConfig, SiteConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::validate;
