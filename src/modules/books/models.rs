use serde::Deserialize;
use shelf_catalog::query::{DEFAULT_LANGUAGE, DEFAULT_SEED};
use shelf_catalog::CatalogQuery;

/// Raw `/books` query string.
///
/// Every field is kept as text so absent or malformed values fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BooksParams {
    pub seed: Option<String>,
    pub page: Option<String>,
    pub language: Option<String>,
    pub likes: Option<String>,
    pub reviews: Option<String>,
}

impl BooksParams {
    pub fn into_catalog_query(self) -> CatalogQuery {
        CatalogQuery::new(
            non_empty(self.seed).unwrap_or_else(|| DEFAULT_SEED.to_string()),
            parse_page(self.page.as_deref()),
            non_empty(self.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            parse_average(self.likes.as_deref()),
            parse_average(self.reviews.as_deref()),
        )
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Zero, negative and unparsable pages all mean the first page.
///
/// Only the leading integer is read, so `2.7` is page 2 and `3abc` is page 3.
fn parse_page(raw: Option<&str>) -> u32 {
    let Some(digits) = raw.map(|v| numeric_prefix(v.trim_start(), false)) else {
        return 1;
    };
    if digits.is_empty() {
        return 1;
    }

    let page = digits.parse::<i64>().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    });
    if page < 1 {
        1
    } else {
        u32::try_from(page).unwrap_or(u32::MAX)
    }
}

/// The leading decimal number is read, so `3.5x` means 3.5.
fn parse_average(raw: Option<&str>) -> f64 {
    raw.map(|v| numeric_prefix(v.trim_start(), true))
        .and_then(|number| number.parse::<f64>().ok())
        .filter(|avg| avg.is_finite() && *avg > 0.0)
        .unwrap_or(0.0)
}

/// Longest leading slice of `raw` that forms a signed decimal number.
///
/// With `fractional` a decimal point and an exponent are accepted as well.
/// Returns an empty slice when `raw` does not start with a digit.
fn numeric_prefix(raw: &str, fractional: bool) -> &str {
    let bytes = raw.as_bytes();
    let is_digit = |at: usize| bytes.get(at).is_some_and(u8::is_ascii_digit);

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_start = end;
    while is_digit(end) {
        end += 1;
    }
    let mut has_digits = end > integer_start;

    if fractional {
        if bytes.get(end) == Some(&b'.') {
            let mut fraction_end = end + 1;
            while is_digit(fraction_end) {
                fraction_end += 1;
            }
            if has_digits || fraction_end > end + 1 {
                has_digits = true;
                end = fraction_end;
            }
        }

        if has_digits && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exponent_end = end + 1;
            if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
                exponent_end += 1;
            }
            let exponent_digits = exponent_end;
            while is_digit(exponent_end) {
                exponent_end += 1;
            }
            if exponent_end > exponent_digits {
                end = exponent_end;
            }
        }
    }

    if has_digits {
        &raw[..end]
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: &str, likes: &str) -> BooksParams {
        BooksParams {
            page: Some(page.to_string()),
            likes: Some(likes.to_string()),
            ..BooksParams::default()
        }
    }

    #[test]
    fn absent_values_use_defaults() {
        let query = BooksParams::default().into_catalog_query();
        assert_eq!(query, CatalogQuery::default());
    }

    #[test]
    fn empty_seed_and_language_use_defaults() {
        let query = BooksParams {
            seed: Some(String::new()),
            language: Some(String::new()),
            ..BooksParams::default()
        }
        .into_catalog_query();
        assert_eq!(query.seed, "default");
        assert_eq!(query.language, "en");
    }

    #[test]
    fn malformed_numbers_fall_back() {
        let query = params("abc", "lots").into_catalog_query();
        assert_eq!(query.page, 1);
        assert_eq!(query.likes, 0.0);

        let query = params("0", "-1.5").into_catalog_query();
        assert_eq!(query.page, 1);
        assert_eq!(query.likes, 0.0);

        let query = params("99999999999", "NaN").into_catalog_query();
        assert_eq!(query.page, u32::MAX);
        assert_eq!(query.likes, 0.0);
    }

    #[test]
    fn leading_numbers_are_read_like_browser_parsers() {
        let query = params("2.7", "3.5x").into_catalog_query();
        assert_eq!(query.page, 2);
        assert_eq!(query.likes, 3.5);

        let query = params("12abc", ".5 likes").into_catalog_query();
        assert_eq!(query.page, 12);
        assert_eq!(query.likes, 0.5);

        let query = params("-2", "1e2stars").into_catalog_query();
        assert_eq!(query.page, 1);
        assert_eq!(query.likes, 100.0);

        let query = params("+4", "2e").into_catalog_query();
        assert_eq!(query.page, 4);
        assert_eq!(query.likes, 2.0);
    }

    #[test]
    fn numeric_prefix_stops_at_first_invalid_character() {
        assert_eq!(numeric_prefix("3.5x", true), "3.5");
        assert_eq!(numeric_prefix("3.5x", false), "3");
        assert_eq!(numeric_prefix("-.25e-1!", true), "-.25e-1");
        assert_eq!(numeric_prefix(".", true), "");
        assert_eq!(numeric_prefix("x3", true), "");
        assert_eq!(numeric_prefix("-", false), "");
    }

    #[test]
    fn numeric_values_are_parsed() {
        let query = params(" 3 ", "4.25").into_catalog_query();
        assert_eq!(query.page, 3);
        assert_eq!(query.likes, 4.25);
    }
}
