//! Product listing filters shared by the storefront and admin listings.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::id::CategoryId;
use super::status::StockStatus;

/// Query-string filters for product listings.
///
/// ```
/// use larder_core::ProductFilter;
///
/// let filter = ProductFilter { limit: Some(10_000), ..ProductFilter::default() };
/// assert_eq!(filter.effective_limit(), ProductFilter::MAX_LIMIT);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    pub category: Option<CategoryId>,
    pub search: Option<String>,
    pub stock: Option<StockStatus>,
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub featured: Option<bool>,
    pub limit: Option<i64>,
}

impl ProductFilter {
    /// Largest page a listing will return.
    pub const MAX_LIMIT: i64 = 200;

    /// The requested limit clamped to `1..=MAX_LIMIT`.
    #[must_use]
    pub fn effective_limit(&self) -> i64 {
        self.limit.map_or(Self::MAX_LIMIT, |l| l.clamp(1, Self::MAX_LIMIT))
    }

    /// `ILIKE` pattern for the free-text search, if any.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().and_then(contains_pattern)
    }

    /// `ILIKE` pattern for the brand filter, if any.
    #[must_use]
    pub fn brand_pattern(&self) -> Option<String> {
        self.brand.as_deref().and_then(contains_pattern)
    }

    /// Only `featured=true` narrows the listing.
    #[must_use]
    pub fn featured_only(&self) -> bool {
        self.featured == Some(true)
    }
}

/// Build a `%term%` pattern with `LIKE` wildcards in the term escaped.
fn contains_pattern(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_limit() {
        assert_eq!(ProductFilter::default().effective_limit(), 200);
        let filter = ProductFilter {
            limit: Some(0),
            ..ProductFilter::default()
        };
        assert_eq!(filter.effective_limit(), 1);
        let filter = ProductFilter {
            limit: Some(25),
            ..ProductFilter::default()
        };
        assert_eq!(filter.effective_limit(), 25);
    }

    #[test]
    fn test_patterns_escape_wildcards() {
        let filter = ProductFilter {
            search: Some(" 100%_pure ".to_owned()),
            brand: Some("   ".to_owned()),
            ..ProductFilter::default()
        };
        assert_eq!(filter.search_pattern().as_deref(), Some("%100\\%\\_pure%"));
        assert_eq!(filter.brand_pattern(), None);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let filter: ProductFilter = serde_json::from_str(
            r#"{"category":3,"stock":"OUT","minPrice":"10","maxPrice":"99.5","featured":true}"#,
        )
        .unwrap();
        assert_eq!(filter.category, Some(CategoryId::new(3)));
        assert_eq!(filter.stock, Some(StockStatus::Out));
        assert_eq!(filter.min_price, Some(Decimal::from(10)));
        assert!(filter.featured_only());
    }
}
