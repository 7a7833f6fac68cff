use std::fmt;

use serde::{Deserialize, Serialize};

/// One page of a list view, together with the counts the presentation layer displays.
///
/// `total_items` is the count *after* search and filters, *before* pagination.
/// `range_start`/`range_end` are the 1-based positions of the first and last visible item; both are 0 when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
    /// Effective page after clamping.
    pub page: usize,
    pub range_start: usize,
    pub range_end: usize,
}

impl<T> ListPage<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_pages: 0,
            page: 1,
            range_start: 0,
            range_end: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Transform the visible items, keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> ListPage<U>
    where
        F: FnMut(T) -> U,
    {
        ListPage {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            total_pages: self.total_pages,
            page: self.page,
            range_start: self.range_start,
            range_end: self.range_end,
        }
    }
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Display for ListPage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_items == 0 {
            return f.write_str("No results");
        }
        write!(
            f,
            "Showing {}-{} of {}",
            self.range_start, self.range_end, self.total_items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: usize, total_pages: usize) -> ListPage<u32> {
        ListPage {
            items: vec![1, 2],
            total_items: 12,
            total_pages,
            page,
            range_start: 11,
            range_end: 12,
        }
    }

    #[test]
    fn empty_page_has_zero_range() {
        let p: ListPage<u32> = ListPage::empty();
        assert_eq!(p.range_start, 0);
        assert_eq!(p.range_end, 0);
        assert_eq!(p.page, 1);
        assert!(!p.has_next());
        assert!(!p.has_previous());
        assert_eq!(p.to_string(), "No results");
    }

    #[test]
    fn navigation_flags() {
        assert!(page(2, 2).has_previous());
        assert!(!page(2, 2).has_next());
        assert!(page(1, 2).has_next());
    }

    #[test]
    fn summary_text() {
        assert_eq!(page(2, 2).to_string(), "Showing 11-12 of 12");
    }

    #[test]
    fn map_keeps_metadata() {
        let p = page(2, 2).map(|n| n.to_string());
        assert_eq!(p.items, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(p.total_items, 12);
        assert_eq!(p.range_start, 11);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&page(2, 2)).unwrap();
        assert!(json.contains("\"totalItems\":12"));
        assert!(json.contains("\"rangeStart\":11"));
    }
}
