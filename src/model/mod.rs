//! Data model for scraped catalog records
//!
//! This module defines the [`Book`] record produced per detail page, the
//! [`Category`] entries from the landing-page directory, and the text
//! cleanup parsers that turn the site's free-text fields (prices,
//! availability, star ratings) into typed values.

use rust_decimal::Decimal;
use std::fmt;

/// Column order for CSV persistence; fixed, header-once semantics
pub const CSV_HEADERS: [&str; 10] = [
    "product_page_url",
    "universal_product_code",
    "title",
    "price_including_tax",
    "price_excluding_tax",
    "number_available",
    "product_description",
    "category",
    "review_rating",
    "image_url",
];

/// One fully extracted book record
///
/// Constructed once per detail-page fetch and never mutated afterwards.
/// A record only exists when every required landmark was present on the
/// page; there are no partially filled records.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// The detail page this record was extracted from
    pub product_page_url: String,
    /// UPC from the product information table
    pub universal_product_code: String,
    pub title: String,
    pub price_including_tax: Decimal,
    pub price_excluding_tax: Decimal,
    /// Count parsed from "In stock (N available)"; 0 when absent
    pub number_available: u32,
    /// Empty when the page carries no description
    pub product_description: String,
    /// Category name recovered from the breadcrumb trail
    pub category: String,
    pub review_rating: Rating,
    /// Absolute cover image URL; empty when the page has no image
    pub image_url: String,
}

impl Book {
    /// Renders the record as a CSV row in [`CSV_HEADERS`] order
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.product_page_url.clone(),
            self.universal_product_code.clone(),
            self.title.clone(),
            self.price_including_tax.to_string(),
            self.price_excluding_tax.to_string(),
            self.number_available.to_string(),
            self.product_description.clone(),
            self.category.clone(),
            self.review_rating.to_string(),
            self.image_url.clone(),
        ]
    }
}

/// Star rating parsed from the rating element's modifier class token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
    /// Element present but its modifier token was not a recognized level
    Unknown,
}

impl Rating {
    /// Maps the star-rating element's second class token ("One".."Five")
    ///
    /// Unrecognized tokens map to `Unknown` rather than failing the record;
    /// the element being *missing* entirely is the caller's failure case.
    pub fn from_class_token(token: &str) -> Self {
        match token {
            "One" => Rating::One,
            "Two" => Rating::Two,
            "Three" => Rating::Three,
            "Four" => Rating::Four,
            "Five" => Rating::Five,
            _ => Rating::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::One => "One",
            Rating::Two => "Two",
            Rating::Three => "Three",
            Rating::Four => "Four",
            Rating::Five => "Five",
            Rating::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category from the landing page's navigation list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Lowercased, trimmed display name; never empty
    pub name: String,
    /// Site-relative path to the category's first listing page
    pub listing_url: String,
}

impl Category {
    /// Filesystem-safe form of the name: whitespace runs become `_`
    pub fn safe_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut last_us = false;
        for ch in self.name.trim().chars() {
            if ch.is_whitespace() {
                if !last_us {
                    out.push('_');
                    last_us = true;
                }
            } else {
                out.push(ch.to_ascii_lowercase());
                last_us = false;
            }
        }
        out
    }
}

/// Parses currency-prefixed price text ("£51.77") into a decimal
///
/// The leading currency symbol is stripped before parsing. Returns `None`
/// for text that is not a non-negative decimal after the strip.
pub fn parse_price(text: &str) -> Option<Decimal> {
    let cleaned = text
        .trim()
        .trim_start_matches(['£', '€', '$'])
        .trim();

    let value: Decimal = cleaned.parse().ok()?;
    if value.is_sign_negative() {
        return None;
    }
    Some(value)
}

/// Extracts the count from availability text of the form
/// "In stock (22 available)"; anything else yields 0.
pub fn parse_availability(text: &str) -> u32 {
    let Some(open) = text.find('(') else {
        return 0;
    };
    let rest = &text[open + 1..];

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }

    // The parenthetical must actually be the availability phrase.
    if !rest[digits.len()..].trim_start().starts_with("available") {
        return 0;
    }

    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_parse_price_strips_pound() {
        assert_eq!(parse_price("£51.77"), Some(Decimal::new(5177, 2)));
    }

    #[test]
    fn test_parse_price_other_symbols() {
        assert_eq!(parse_price("€10.00"), Some(Decimal::new(1000, 2)));
        assert_eq!(parse_price("$0.99"), Some(Decimal::new(99, 2)));
    }

    #[test]
    fn test_parse_price_plain_number() {
        assert_eq!(parse_price("23.88"), Some(Decimal::new(2388, 2)));
    }

    #[test]
    fn test_parse_price_garbage() {
        assert_eq!(parse_price("free"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("£-1.00"), None);
    }

    #[test]
    fn test_parse_availability_round_trip() {
        assert_eq!(parse_availability("In stock (23 available)"), 23);
        assert_eq!(parse_availability("In stock (1 available)"), 1);
    }

    #[test]
    fn test_parse_availability_no_parenthetical() {
        assert_eq!(parse_availability("In stock"), 0);
        assert_eq!(parse_availability("Out of stock"), 0);
        assert_eq!(parse_availability(""), 0);
    }

    #[test]
    fn test_parse_availability_wrong_parenthetical() {
        assert_eq!(parse_availability("In stock (ships soon)"), 0);
        assert_eq!(parse_availability("In stock (3 left)"), 0);
    }

    #[test]
    fn test_rating_from_class_token() {
        assert_eq!(Rating::from_class_token("Three"), Rating::Three);
        assert_eq!(Rating::from_class_token("Five"), Rating::Five);
        assert_eq!(Rating::from_class_token("three"), Rating::Unknown);
        assert_eq!(Rating::from_class_token(""), Rating::Unknown);
    }

    #[test]
    fn test_safe_name() {
        let cat = Category {
            name: "science fiction".to_string(),
            listing_url: "catalogue/category/books/science-fiction_16/index.html".to_string(),
        };
        assert_eq!(cat.safe_name(), "science_fiction");
    }

    #[test]
    fn test_safe_name_collapses_whitespace() {
        let cat = Category {
            name: "  Historical   Fiction ".to_string(),
            listing_url: "x/index.html".to_string(),
        };
        assert_eq!(cat.safe_name(), "historical_fiction");
    }

    #[test]
    fn test_book_row_order_matches_headers() {
        let book = Book {
            product_page_url: "http://x.test/b/index.html".to_string(),
            universal_product_code: "a897fe39b1053632".to_string(),
            title: "A Light in the Attic".to_string(),
            price_including_tax: Decimal::new(5177, 2),
            price_excluding_tax: Decimal::new(5177, 2),
            number_available: 22,
            product_description: "desc".to_string(),
            category: "Poetry".to_string(),
            review_rating: Rating::Three,
            image_url: "http://x.test/media/a.jpg".to_string(),
        };
        let row = book.to_row();
        assert_eq!(row.len(), CSV_HEADERS.len());
        assert_eq!(row[1], "a897fe39b1053632");
        assert_eq!(row[3], "51.77");
        assert_eq!(row[5], "22");
        assert_eq!(row[8], "Three");
    }
}
