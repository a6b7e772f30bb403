//! Detail page extraction: one page, one [`Book`] record or a failure
//!
//! The site's detail pages are loosely structured, so extraction leans on a
//! small set of positional and classed lookups into a known layout:
//!
//! - product information table cells (`td`): `[0]` UPC, `[2]` price
//!   excluding tax, `[3]` price including tax, `[5]` availability text
//! - `h1` for the title
//! - 4th `<p>` inside `article.product_page` for the description
//! - 3rd breadcrumb anchor for the category
//! - `p.star-rating`'s modifier class for the rating
//! - first `img`'s `src` for the cover, resolved against the site root
//!
//! Any missing structural landmark fails the whole record; odd text inside a
//! present landmark (unknown rating token, availability with no count) is
//! tolerated with a sentinel value.

use crate::fetch::fetch_page;
use crate::model::{parse_availability, parse_price, Book, Rating};
use crate::url::resolve_image_src;
use crate::{ExtractError, Result, ScrapeError};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Minimum product-table cells for the positional reads to be meaningful
const MIN_PRODUCT_CELLS: usize = 6;

/// Zero-based index of the description paragraph inside the product article
const DESCRIPTION_PARAGRAPH: usize = 3;

/// Fetches a detail page and extracts it into a [`Book`]
///
/// Fetch failures surface as [`ScrapeError::BadStatus`] /
/// [`ScrapeError::Network`]; a malformed page surfaces as
/// [`ScrapeError::Extract`]. Callers treat both as skip-and-continue.
pub async fn extract_book(client: &Client, detail_url: &Url, site_root: &Url) -> Result<Book> {
    let outcome = fetch_page(client, detail_url).await;
    let body = super::require_page(outcome, detail_url)?;

    parse_book(&body, detail_url, site_root).map_err(|source| ScrapeError::Extract {
        url: detail_url.to_string(),
        source,
    })
}

/// Parses detail-page HTML into a [`Book`]
///
/// `detail_url` becomes the record's `product_page_url`; `site_root` anchors
/// image `src` resolution (the src's `../` depth varies by page).
pub fn parse_book(html: &str, detail_url: &Url, site_root: &Url) -> std::result::Result<Book, ExtractError> {
    let document = Html::parse_document(html);

    // Product information table, positional.
    let cells: Vec<String> = document
        .select(&sel("td")?)
        .map(|td| td.text().collect::<String>().trim().to_string())
        .collect();

    if cells.len() < MIN_PRODUCT_CELLS {
        return Err(ExtractError::ShortProductTable {
            found: cells.len(),
            expected: MIN_PRODUCT_CELLS,
        });
    }

    let universal_product_code = cells[0].clone();
    let price_excluding_tax =
        parse_price(&cells[2]).ok_or_else(|| ExtractError::BadPrice {
            text: cells[2].clone(),
        })?;
    let price_including_tax =
        parse_price(&cells[3]).ok_or_else(|| ExtractError::BadPrice {
            text: cells[3].clone(),
        })?;
    let number_available = parse_availability(&cells[5]);

    // Title heading.
    let title = document
        .select(&sel("h1")?)
        .next()
        .map(|h| h.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ExtractError::MissingTitle)?;

    // Description: fixed paragraph position inside the product article;
    // a page without one is valid.
    let product_description = document
        .select(&sel("article.product_page p")?)
        .nth(DESCRIPTION_PARAGRAPH)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    // Category from the breadcrumb trail: home > books > category > title.
    let breadcrumb_links: Vec<String> = document
        .select(&sel("ul.breadcrumb a")?)
        .map(|a| a.text().collect::<String>().trim().to_string())
        .collect();

    if breadcrumb_links.len() < 3 {
        return Err(ExtractError::ShortBreadcrumb {
            found: breadcrumb_links.len(),
        });
    }
    let category = breadcrumb_links[2].clone();

    // Star rating: element must exist; its modifier token may not.
    let rating_element = document
        .select(&sel("p.star-rating")?)
        .next()
        .ok_or(ExtractError::MissingRating)?;
    let review_rating = rating_element
        .value()
        .classes()
        .find(|c| *c != "star-rating")
        .map(Rating::from_class_token)
        .unwrap_or(Rating::Unknown);

    // Cover image; absent is valid.
    let image_url = document
        .select(&sel("img")?)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| resolve_image_src(site_root, src))
        .map(|u| u.to_string())
        .unwrap_or_default();

    Ok(Book {
        product_page_url: detail_url.to_string(),
        universal_product_code,
        title,
        price_including_tax,
        price_excluding_tax,
        number_available,
        product_description,
        category,
        review_rating,
        image_url,
    })
}

fn sel(css: &str) -> std::result::Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn detail_url() -> Url {
        Url::parse("http://books.toscrape.com/catalogue/a-light-in-the-attic_1000/index.html")
            .unwrap()
    }

    fn site_root() -> Url {
        Url::parse("http://books.toscrape.com/").unwrap()
    }

    fn detail_page() -> String {
        r#"
        <html><body>
          <ul class="breadcrumb">
            <li><a href="../../index.html">Home</a></li>
            <li><a href="../category/books_1/index.html">Books</a></li>
            <li><a href="../category/books/poetry_23/index.html">Poetry</a></li>
            <li class="active">A Light in the Attic</li>
          </ul>
          <div class="item active">
            <img src="../../media/cache/fe/72/cover.jpg" alt="A Light in the Attic"/>
          </div>
          <p class="star-rating Three"><i class="icon-star"></i></p>
          <div class="product_main"><h1>A Light in the Attic</h1></div>
          <article class="product_page">
            <p class="price_color">£51.77</p>
            <p class="instock availability">In stock (22 available)</p>
            <p class="lead-in">More books</p>
            <p>It's hard to imagine a world without A Light in the Attic.</p>
          </article>
          <table class="table table-striped">
            <tr><th>UPC</th><td>a897fe39b1053632</td></tr>
            <tr><th>Product Type</th><td>Books</td></tr>
            <tr><th>Price (excl. tax)</th><td>£51.77</td></tr>
            <tr><th>Price (incl. tax)</th><td>£51.77</td></tr>
            <tr><th>Tax</th><td>£0.00</td></tr>
            <tr><th>Availability</th><td>In stock (22 available)</td></tr>
            <tr><th>Number of reviews</th><td>0</td></tr>
          </table>
        </body></html>
        "#
        .to_string()
    }

    #[test]
    fn test_parse_complete_page() {
        let book = parse_book(&detail_page(), &detail_url(), &site_root()).unwrap();
        assert_eq!(book.universal_product_code, "a897fe39b1053632");
        assert_eq!(book.title, "A Light in the Attic");
        assert_eq!(book.price_excluding_tax, Decimal::new(5177, 2));
        assert_eq!(book.price_including_tax, Decimal::new(5177, 2));
        assert_eq!(book.number_available, 22);
        assert_eq!(book.category, "Poetry");
        assert_eq!(book.review_rating, Rating::Three);
        assert_eq!(
            book.image_url,
            "http://books.toscrape.com/media/cache/fe/72/cover.jpg"
        );
        assert!(book.product_description.starts_with("It's hard to imagine"));
    }

    #[test]
    fn test_prices_are_non_negative() {
        let book = parse_book(&detail_page(), &detail_url(), &site_root()).unwrap();
        assert!(!book.price_including_tax.is_sign_negative());
        assert!(!book.price_excluding_tax.is_sign_negative());
    }

    #[test]
    fn test_short_product_table_fails() {
        let html = r#"
            <html><body>
            <ul class="breadcrumb"><li><a>Home</a></li><li><a>Books</a></li><li><a>Poetry</a></li></ul>
            <h1>Title</h1>
            <p class="star-rating One"></p>
            <table><tr><td>upc</td></tr><tr><td>Books</td></tr></table>
            </body></html>
        "#;
        let err = parse_book(html, &detail_url(), &site_root()).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::ShortProductTable { found: 2, .. }
        ));
    }

    #[test]
    fn test_missing_breadcrumb_fails_not_empty_category() {
        let html = detail_page().replace(
            r#"<li><a href="../category/books/poetry_23/index.html">Poetry</a></li>"#,
            "",
        );
        let err = parse_book(&html, &detail_url(), &site_root()).unwrap_err();
        assert!(matches!(err, ExtractError::ShortBreadcrumb { found: 2 }));
    }

    #[test]
    fn test_missing_rating_element_fails() {
        let html = detail_page().replace(
            r#"<p class="star-rating Three"><i class="icon-star"></i></p>"#,
            "",
        );
        let err = parse_book(&html, &detail_url(), &site_root()).unwrap_err();
        assert!(matches!(err, ExtractError::MissingRating));
    }

    #[test]
    fn test_unknown_rating_token_is_sentinel() {
        let html = detail_page().replace("star-rating Three", "star-rating Eleven");
        let book = parse_book(&html, &detail_url(), &site_root()).unwrap();
        assert_eq!(book.review_rating, Rating::Unknown);
    }

    #[test]
    fn test_rating_without_modifier_is_sentinel() {
        let html = detail_page().replace("star-rating Three", "star-rating");
        let book = parse_book(&html, &detail_url(), &site_root()).unwrap();
        assert_eq!(book.review_rating, Rating::Unknown);
    }

    #[test]
    fn test_missing_description_is_empty() {
        let html = detail_page().replace(
            "<p>It's hard to imagine a world without A Light in the Attic.</p>",
            "",
        );
        let book = parse_book(&html, &detail_url(), &site_root()).unwrap();
        assert_eq!(book.product_description, "");
    }

    #[test]
    fn test_missing_image_is_empty_url() {
        let html = detail_page().replace(
            r#"<img src="../../media/cache/fe/72/cover.jpg" alt="A Light in the Attic"/>"#,
            "",
        );
        let book = parse_book(&html, &detail_url(), &site_root()).unwrap();
        assert_eq!(book.image_url, "");
    }

    #[test]
    fn test_unparseable_price_fails() {
        let html = detail_page().replace("<td>£51.77</td>", "<td>call us</td>");
        let err = parse_book(&html, &detail_url(), &site_root()).unwrap_err();
        assert!(matches!(err, ExtractError::BadPrice { .. }));
    }

    #[test]
    fn test_availability_without_count_defaults_to_zero() {
        let html = detail_page().replace(
            "<td>In stock (22 available)</td>",
            "<td>In stock</td>",
        );
        let book = parse_book(&html, &detail_url(), &site_root()).unwrap();
        assert_eq!(book.number_available, 0);
    }
}
