//! Category directory extraction from the landing page

use crate::fetch::fetch_page;
use crate::model::Category;
use crate::Result;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Fetches the landing page and returns every category in navigation order
///
/// The first navigation entry is the umbrella "Books" link covering the
/// whole catalog; it is excluded so callers only see real categories.
pub async fn list_categories(client: &Client, site_root: &Url) -> Result<Vec<Category>> {
    let outcome = fetch_page(client, site_root).await;
    let body = super::require_page(outcome, site_root)?;
    Ok(parse_categories(&body))
}

/// Parses the landing page's side navigation into categories
///
/// Entries with an empty name or missing href are skipped; output order is
/// document order.
pub fn parse_categories(html: &str) -> Vec<Category> {
    let document = Html::parse_document(html);
    let mut categories = Vec::new();

    let Ok(selector) = Selector::parse("ul.nav-list a[href]") else {
        return categories;
    };

    // skip(1) drops the umbrella "Books" entry
    for element in document.select(&selector).skip(1) {
        let name = element
            .text()
            .collect::<String>()
            .trim()
            .to_lowercase();

        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();

        if name.is_empty() || href.is_empty() {
            continue;
        }

        categories.push(Category {
            name,
            listing_url: href.to_string(),
        });
    }

    categories
}
