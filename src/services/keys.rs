//! Cache key and request path construction.
//!
//! Keys are a pure function of the resource class and every parameter that affects
//! the response body. Paths are relative to the backend base URL.

use crate::domain::ItemInclude;

/// Treat a blank search term as no search at all.
fn effective_search(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|term| !term.is_empty())
}

/// Key for a listings page: `listings_{page}_{page_size}_{search|all}`.
pub fn listings_key(page: u32, page_size: u32, search: Option<&str>) -> String {
    format!(
        "listings_{}_{}_{}",
        page,
        page_size,
        effective_search(search).unwrap_or("all")
    )
}

/// Backend path for a listings page.
pub fn listings_path(page: u32, page_size: u32, search: Option<&str>) -> String {
    let mut path = format!("/listings?page={}&limit={}", page, page_size);
    if let Some(term) = effective_search(search) {
        path.push_str("&search=");
        path.push_str(&urlencoding::encode(term));
    }
    path
}

/// Key for an item at a given include level: `item_{id}_{include}`.
pub fn item_key(id: &str, include: ItemInclude) -> String {
    format!("item_{}_{}", id, include.as_str())
}

/// Backend path for an item.
pub fn item_path(id: &str, include: ItemInclude) -> String {
    format!(
        "/items/{}?include={}",
        urlencoding::encode(id),
        include.as_str()
    )
}

/// Key for the aggregates view: `aggregates_{include_activity}`.
pub fn aggregates_key(include_activity: bool) -> String {
    format!("aggregates_{}", include_activity)
}

/// Backend path for the aggregates view.
pub fn aggregates_path(include_activity: bool) -> String {
    if include_activity {
        "/aggregates?includeActivity=true".to_string()
    } else {
        "/aggregates".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listings_key() {
        assert_eq!(listings_key(2, 20, None), "listings_2_20_all");
        assert_eq!(listings_key(1, 50, Some("acme")), "listings_1_50_acme");
    }

    #[test]
    fn test_listings_key_blank_search_matches_none() {
        assert_eq!(listings_key(1, 20, Some("  ")), listings_key(1, 20, None));
        assert_eq!(listings_path(1, 20, Some("")), listings_path(1, 20, None));
    }

    #[test]
    fn test_listings_key_distinguishes_parameters() {
        let base = listings_key(1, 20, Some("acme"));
        assert_ne!(base, listings_key(2, 20, Some("acme")));
        assert_ne!(base, listings_key(1, 10, Some("acme")));
        assert_ne!(base, listings_key(1, 20, Some("globex")));
        assert_ne!(base, listings_key(1, 20, None));
    }

    #[test]
    fn test_listings_path() {
        assert_eq!(listings_path(3, 25, None), "/listings?page=3&limit=25");
        assert_eq!(
            listings_path(1, 20, Some("quarterly review")),
            "/listings?page=1&limit=20&search=quarterly%20review"
        );
    }

    #[test]
    fn test_item_key_and_path() {
        assert_eq!(item_key("X", ItemInclude::Summary), "item_X_summary");
        assert_eq!(item_key("X", ItemInclude::Result), "item_X_result");
        assert_eq!(
            item_path("rec/1", ItemInclude::All),
            "/items/rec%2F1?include=all"
        );
    }

    #[test]
    fn test_aggregates_key_and_path() {
        assert_eq!(aggregates_key(false), "aggregates_false");
        assert_eq!(aggregates_key(true), "aggregates_true");
        assert_eq!(aggregates_path(false), "/aggregates");
        assert_eq!(aggregates_path(true), "/aggregates?includeActivity=true");
    }
}
