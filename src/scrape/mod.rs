//! Core extraction logic
//!
//! This module contains the scraping pipeline:
//! - Category directory extraction from the landing page
//! - Pagination across a category's listing pages
//! - Per-item detail page extraction into a [`Book`](crate::model::Book)
//!
//! Every function takes the shared HTTP client explicitly; parsing functions
//! are split out from fetching so they can be tested on raw HTML.

mod categories;
mod detail;
mod paginate;

pub use categories::{list_categories, parse_categories};
pub use detail::{extract_book, parse_book};
pub use paginate::{collect_item_urls, parse_listing};

use crate::fetch::FetchOutcome;
use crate::{Result, ScrapeError};
use url::Url;

/// Unwraps a [`FetchOutcome`] into a page body, converting every non-success
/// outcome into the matching [`ScrapeError`]. Used where a missing page is a
/// hard failure (landing page, detail pages) rather than an end-of-listing
/// signal.
fn require_page(outcome: FetchOutcome, url: &Url) -> Result<String> {
    match outcome {
        FetchOutcome::Success { body, .. } => Ok(body),
        FetchOutcome::NotFound => Err(ScrapeError::BadStatus {
            url: url.to_string(),
            status: 404,
        }),
        FetchOutcome::HttpError { status } => Err(ScrapeError::BadStatus {
            url: url.to_string(),
            status,
        }),
        FetchOutcome::NetworkError { error } => Err(ScrapeError::Network {
            url: url.to_string(),
            error,
        }),
    }
}
