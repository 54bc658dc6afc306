use crate::utils::nav;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// What the catalog grid is showing: a committed search term and a
/// zero-based page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub page: u32,
}

impl CatalogQuery {
    pub fn new(search: &str, page: u32) -> Self {
        Self {
            search: normalize_search(search),
            page,
        }
    }

    /// Reads `?search=…&page=…` so a shared catalog link lands on the same
    /// results.
    pub fn from_location_search(search: &str) -> Self {
        let term = nav::find_query_param(search, "search").unwrap_or_default();
        let page = nav::find_query_param(search, "page")
            .and_then(|page| page.parse().ok())
            .unwrap_or(0);
        Self::new(&term, page)
    }

    pub fn href(&self) -> String {
        let mut params = Vec::new();
        if let Some(term) = &self.search {
            params.push(format!(
                "search={}",
                utf8_percent_encode(term, NON_ALPHANUMERIC)
            ));
        }
        if self.page > 0 {
            params.push(format!("page={}", self.page));
        }
        if params.is_empty() {
            nav::HOME_PATH.to_string()
        } else {
            format!("{}?{}", nav::HOME_PATH, params.join("&"))
        }
    }

    pub fn empty_message(&self) -> &'static str {
        if self.search.is_some() {
            "No videos found matching your search."
        } else {
            "No videos available yet."
        }
    }
}

pub fn normalize_search(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_no_search() {
        assert_eq!(normalize_search("   "), None);
        assert_eq!(normalize_search(" rust "), Some("rust".into()));
    }

    #[test]
    fn href_round_trips_through_location() {
        let query = CatalogQuery::new("async rust", 2);
        assert_eq!(query.href(), "/?search=async%20rust&page=2");
        assert_eq!(CatalogQuery::from_location_search("?search=async%20rust&page=2"), query);
        assert_eq!(CatalogQuery::default().href(), "/");
    }

    #[test]
    fn malformed_page_falls_back_to_first() {
        let query = CatalogQuery::from_location_search("?page=abc");
        assert_eq!(query, CatalogQuery::default());
    }

    #[test]
    fn empty_message_depends_on_search() {
        assert!(CatalogQuery::new("x", 0).empty_message().contains("matching"));
        assert!(CatalogQuery::default().empty_message().contains("available"));
    }
}
