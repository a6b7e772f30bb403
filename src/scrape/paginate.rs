//! Category pagination: walking every listing page of one category
//!
//! Pagination never predicts page URLs (`page-N.html`) from a counter; it
//! always follows the next-page link the site actually served, resolved
//! against the page it appeared on. A visited set plus a hard page cap guard
//! against a listing whose next link loops back on itself.

use crate::fetch::{fetch_page, FetchOutcome};
use crate::url::resolve_href;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Hard stop for pathological next-link chains; the real site tops out
/// around 50 pages per listing.
const MAX_PAGES: usize = 500;

/// Walks every page of one category listing and collects item detail URLs
///
/// Starts at `first_page` (the category's `index.html`) and follows the
/// next-page control until it disappears. Output order is page order, then
/// in-page document order — downstream progress display indexes into it.
///
/// A 404, any other fetch failure, or a page with zero item containers ends
/// the walk; whatever was collected so far is the category's complete list.
pub async fn collect_item_urls(client: &Client, first_page: &Url) -> Vec<Url> {
    let mut item_urls = Vec::new();
    let mut visited: HashSet<Url> = HashSet::new();
    let mut current = first_page.clone();
    let mut page_count = 0usize;

    loop {
        if !visited.insert(current.clone()) {
            tracing::warn!("Next link revisits {}, stopping pagination", current);
            break;
        }

        page_count += 1;
        if page_count > MAX_PAGES {
            tracing::warn!("Page cap of {} reached at {}", MAX_PAGES, current);
            break;
        }

        let body = match fetch_page(client, &current).await {
            FetchOutcome::Success {
                body,
                final_url,
                status,
            } => {
                tracing::debug!("Fetched {} (HTTP {})", final_url, status);
                // Relative hrefs resolve against where the page actually
                // lives after redirects.
                current = final_url;
                body
            }
            FetchOutcome::NotFound => {
                tracing::debug!("404 at {}, listing exhausted", current);
                break;
            }
            FetchOutcome::HttpError { status } => {
                tracing::warn!("HTTP {} at {}, stopping pagination", status, current);
                break;
            }
            FetchOutcome::NetworkError { error } => {
                tracing::warn!("Network error at {}: {}, stopping pagination", current, error);
                break;
            }
        };

        let (items, next) = parse_listing(&body, &current);

        if items.is_empty() {
            tracing::debug!("No item containers at {}, listing exhausted", current);
            break;
        }
        item_urls.extend(items);

        match next {
            Some(next_url) => current = next_url,
            None => break,
        }
    }

    item_urls
}

/// Parses one listing page into its item URLs and optional next-page URL
///
/// Item anchors live inside the thumbnail containers; both they and the
/// next-page href are resolved against `page_url`.
pub fn parse_listing(html: &str, page_url: &Url) -> (Vec<Url>, Option<Url>) {
    let document = Html::parse_document(html);
    let mut items = Vec::new();

    if let Ok(item_selector) = Selector::parse("div.image_container a[href]") {
        for element in document.select(&item_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_href(page_url, href) {
                    items.push(absolute);
                }
            }
        }
    }

    let mut next = None;
    if let Ok(next_selector) = Selector::parse("li.next a[href]") {
        if let Some(element) = document.select(&next_selector).next() {
            if let Some(href) = element.value().attr("href") {
                next = resolve_href(page_url, href);
            }
        }
    }

    (items, next)
}
