use std::collections::BTreeMap;

use super::SortDirection;

/// Default number of records shown per page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// User-controlled parameters of a list view: search, filters, sort and page.
///
/// Owned by the view presenting the list and never persisted.
/// A filter is inactive when its value is `None` or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search: String,
    pub filters: BTreeMap<String, Option<String>>,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    /// 1-based page number.
    pub page: usize,
}

impl QueryState {
    pub fn new(sort_field: impl Into<String>, sort_direction: SortDirection) -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            sort_field: sort_field.into(),
            sort_direction,
            page: 1,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.filters.insert(key.into(), value);
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = field.into();
        self.sort_direction = direction;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Search term with surrounding whitespace removed.
    pub fn search_term(&self) -> &str {
        self.search.trim()
    }

    /// Iterate over filters that currently narrow the result.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().filter_map(|(k, v)| {
            v.as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (k.as_str(), v))
        })
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(String::new(), SortDirection::Asc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_on_first_page_without_filters() {
        let q = QueryState::new("name", SortDirection::Desc);
        assert_eq!(q.page, 1);
        assert!(q.search.is_empty());
        assert_eq!(q.active_filters().count(), 0);
        assert_eq!(q.sort_field, "name");
        assert_eq!(q.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn with_page_never_goes_below_one() {
        let q = QueryState::default().with_page(0);
        assert_eq!(q.page, 1);
    }

    #[test]
    fn null_and_blank_filters_are_inactive() {
        let q = QueryState::default()
            .with_filter("environment", Some("production".into()))
            .with_filter("status", None)
            .with_filter("owner", Some("  ".into()));

        let active: Vec<_> = q.active_filters().collect();
        assert_eq!(active, vec![("environment", "production")]);
    }

    #[test]
    fn search_term_is_trimmed() {
        let q = QueryState::default().with_search("  api  ");
        assert_eq!(q.search_term(), "api");
    }
}
