//! URL resolution helpers
//!
//! Listing pages link to items with relative hrefs whose parent-directory
//! depth varies by page, and detail pages reference cover images the same
//! way. Everything downstream works on absolute URLs, so all resolution
//! happens here.

use url::Url;

/// Resolves an anchor href against the page it appeared on.
///
/// Returns `None` for hrefs that cannot become a fetchable page URL:
/// empty strings, fragment-only anchors, `javascript:`/`mailto:`/`tel:`/
/// `data:` schemes, unparseable values, and non-HTTP(S) results.
pub fn resolve_href(page_url: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match page_url.join(href) {
        Ok(absolute) => {
            if absolute.scheme() == "http" || absolute.scheme() == "https" {
                Some(absolute)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Resolves an image `src` against the site root.
///
/// Detail-page image paths traverse upward a varying number of levels
/// (`../../media/...`), so joining against the current page would resolve to
/// a different place on every page. Leading `../` segments are stripped and
/// the remainder joined against the root instead.
pub fn resolve_image_src(site_root: &Url, src: &str) -> Option<Url> {
    let mut rest = src.trim();

    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
    }
    let rest = rest.trim_start_matches("./").trim_start_matches('/');

    if rest.is_empty() {
        return None;
    }

    site_root.join(rest).ok()
}

/// Joins a site-relative listing path (e.g. a category's
/// `catalogue/category/books/travel_2/index.html`) against the site root.
pub fn listing_url(site_root: &Url, listing_path: &str) -> Result<Url, url::ParseError> {
    site_root.join(listing_path.trim())
}
