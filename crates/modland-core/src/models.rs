use serde::{Deserialize, Serialize};

use crate::pagination::total_pages;

/// One entry in a listing page - the star of the show
///
/// `description` and `star_count` are genuinely optional: absence means
/// "the registry doesn't know", which renders differently from an empty
/// string or a zero. Callers must not collapse the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSummary {
    pub name: String,
    pub description: Option<String>,
    pub star_count: Option<u64>,
}

impl ModuleSummary {
    /// Link to the module's detail page, e.g. `https://modland.dev/x/oak`
    pub fn detail_url(&self, base: &str) -> String {
        format!("{}/x/{}", base.trim_end_matches('/'), self.name)
    }
}

/// A single page of listing results
///
/// Transient: rebuilt on every query, never mutated in place. The result
/// order is whatever ranking the registry applied - we never re-sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulesList {
    /// Total matches across all pages, not just this page's length
    pub total_count: u64,
    pub results: Vec<ModuleSummary>,
}

impl ModulesList {
    /// Number of pages needed to show every match. Never zero, even when
    /// there are no matches at all - an empty listing is one empty page.
    pub fn total_pages(&self, per_page: u32) -> u64 {
        total_pages(self.total_count, per_page)
    }

    pub fn has_previous(&self, page: u64) -> bool {
        page > 1
    }

    pub fn has_next(&self, page: u64, per_page: u32) -> bool {
        page < self.total_pages(per_page)
    }

    /// 1-based inclusive range of result positions this page covers, for
    /// the "Showing 41 to 45 of 45" line. None when the page is empty.
    pub fn page_range(&self, page: u64, per_page: u32) -> Option<(u64, u64)> {
        if self.results.is_empty() {
            return None;
        }
        // Saturating: an absurd page number must not overflow into a panic
        let start = (page.max(1) - 1)
            .saturating_mul(u64::from(per_page))
            .saturating_add(1);
        let end = start.saturating_add(self.results.len() as u64 - 1);
        Some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total_count: u64, len: usize) -> ModulesList {
        ModulesList {
            total_count,
            results: (0..len)
                .map(|i| ModuleSummary {
                    name: format!("mod{}", i),
                    description: None,
                    star_count: None,
                })
                .collect(),
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(page_of(45, 20).total_pages(20), 3);
        assert_eq!(page_of(40, 20).total_pages(20), 2);
        assert_eq!(page_of(41, 20).total_pages(20), 3);
        assert_eq!(page_of(1, 1).total_pages(20), 1);
    }

    #[test]
    fn empty_listing_is_one_page_not_zero() {
        assert_eq!(page_of(0, 0).total_pages(20), 1);
    }

    #[test]
    fn page_range_on_last_partial_page() {
        // 45 results, page 3 of 20 covers positions 41..=45
        let list = page_of(45, 5);
        assert_eq!(list.page_range(3, 20), Some((41, 45)));
    }

    #[test]
    fn page_range_is_none_for_empty_page() {
        let list = page_of(45, 0);
        assert_eq!(list.page_range(99, 20), None);
    }

    #[test]
    fn page_range_survives_an_absurd_page_number() {
        // A non-empty payload alongside a page near the integer ceiling
        // saturates instead of panicking in debug builds
        let list = page_of(45, 1);
        let (start, end) = list.page_range(u64::MAX, 20).unwrap();
        assert_eq!(start, u64::MAX);
        assert_eq!(end, u64::MAX);
    }

    #[test]
    fn has_next_and_previous() {
        let list = page_of(45, 20);
        assert!(!list.has_previous(1));
        assert!(list.has_previous(2));
        assert!(list.has_next(1, 20));
        assert!(list.has_next(2, 20));
        assert!(!list.has_next(3, 20));
    }

    #[test]
    fn detail_url_joins_cleanly() {
        let m = ModuleSummary {
            name: "oak".into(),
            description: None,
            star_count: None,
        };
        assert_eq!(m.detail_url("https://modland.dev"), "https://modland.dev/x/oak");
        assert_eq!(m.detail_url("https://modland.dev/"), "https://modland.dev/x/oak");
    }

    #[test]
    fn absent_star_count_survives_serde_as_absent() {
        // A missing count must stay distinguishable from an explicit zero
        let absent: ModuleSummary = serde_json::from_str(r#"{"name":"a"}"#).unwrap();
        let zero: ModuleSummary =
            serde_json::from_str(r#"{"name":"a","star_count":0}"#).unwrap();
        assert_eq!(absent.star_count, None);
        assert_eq!(zero.star_count, Some(0));
        assert_ne!(absent, zero);
    }

    #[test]
    fn absent_description_is_distinct_from_empty() {
        let absent: ModuleSummary = serde_json::from_str(r#"{"name":"a"}"#).unwrap();
        let empty: ModuleSummary =
            serde_json::from_str(r#"{"name":"a","description":""}"#).unwrap();
        assert_eq!(absent.description, None);
        assert_eq!(empty.description, Some(String::new()));
    }
}
