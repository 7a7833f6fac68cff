use std::sync::Arc;

use envdeck_model::{ListPage, QueryState, SortDirection};
use tracing::debug;

use crate::{
    error::CoreError,
    pipeline::{ListPipeline, PageLabel, page_labels},
};

/// Query state of one list page bound to its pipeline and current collection.
///
/// Mirrors what a page does with user input:
/// - changing the search term or a filter returns to the first page;
/// - sorting by the active field flips its direction, sorting by another field starts at that field's default direction;
/// - page navigation is clamped to the pages that exist.
pub struct ListView<T> {
    pipeline: Arc<ListPipeline<T>>,
    items: Vec<T>,
    defaults: QueryState,
    state: QueryState,
}

impl<T: Clone> ListView<T> {
    pub fn new(pipeline: Arc<ListPipeline<T>>, items: Vec<T>) -> Self {
        let defaults = pipeline.default_query();
        Self {
            state: defaults.clone(),
            defaults,
            pipeline,
            items,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn pipeline(&self) -> &ListPipeline<T> {
        &self.pipeline
    }

    /// Replace the collection after a refresh; the current page is clamped to the new page count.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        let last = self.last_page();
        if self.state.page > last {
            self.state.page = last;
        }
        debug!(view = self.pipeline.name(), count = self.items.len(), page = self.state.page, "items replaced");
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.state.search = term.into();
        self.state.page = 1;
        debug!(view = self.pipeline.name(), search = %self.state.search, "search changed");
    }

    /// Set (`Some`) or clear (`None`) a filter.
    pub fn set_filter(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        debug!(view = self.pipeline.name(), filter = %key, value = ?value, "filter changed");
        self.state.filters.insert(key, value);
        self.state.page = 1;
    }

    /// Sort by `field`, returning the direction now in effect.
    pub fn sort_by(&mut self, field: &str) -> Result<SortDirection, CoreError> {
        let default_direction = self
            .pipeline
            .default_direction(field)
            .ok_or_else(|| CoreError::UnknownSortField(field.to_string()))?;

        let direction = if self.state.sort_field == field {
            self.state.sort_direction.toggled()
        } else {
            default_direction
        };
        self.state.sort_field = field.to_string();
        self.state.sort_direction = direction;
        debug!(view = self.pipeline.name(), field, %direction, "sort changed");
        Ok(direction)
    }

    /// Move to `page`, clamped into the existing pages. Returns the page now shown.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.state.page = page.clamp(1, self.last_page());
        self.state.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to(self.state.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to(self.state.page.saturating_sub(1))
    }

    /// Restore the initial query state ("reset filters").
    pub fn reset(&mut self) {
        self.state = self.defaults.clone();
        debug!(view = self.pipeline.name(), "query reset");
    }

    /// Compute the visible page for the current state.
    pub fn page(&self) -> ListPage<T> {
        self.pipeline.compute(&self.items, &self.state)
    }

    /// Pagination buttons for the current state.
    pub fn labels(&self) -> Vec<PageLabel> {
        let count = self.pipeline.count(&self.items, &self.state);
        page_labels(self.state.page, self.pipeline.total_pages(count))
    }

    fn last_page(&self) -> usize {
        let count = self.pipeline.count(&self.items, &self.state);
        self.pipeline.total_pages(count).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{compare_text, contains_ignore_case};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: usize,
        name: String,
        kind: &'static str,
    }

    fn items(n: usize) -> Vec<Item> {
        (1..=n)
            .map(|id| Item {
                id,
                name: format!("item-{id:02}"),
                kind: if id % 2 == 0 { "even" } else { "odd" },
            })
            .collect()
    }

    fn view(n: usize) -> ListView<Item> {
        let pipeline = ListPipeline::new("items")
            .with_search(|i: &Item, term| contains_ignore_case(&i.name, term))
            .with_filter("kind", |i: &Item, v| i.kind == v)
            .with_sort("name", SortDirection::Asc, |a: &Item, b: &Item| {
                compare_text(&a.name, &b.name)
            })
            .with_sort("id", SortDirection::Desc, |a: &Item, b: &Item| a.id.cmp(&b.id));
        ListView::new(Arc::new(pipeline), items(n))
    }

    #[test]
    fn starts_with_defaults() {
        let v = view(25);
        assert_eq!(v.state().page, 1);
        assert_eq!(v.state().sort_field, "name");
        assert_eq!(v.state().sort_direction, SortDirection::Asc);
        let page = v.page();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[0].id, 1);
    }

    #[test]
    fn search_and_filter_reset_page() {
        let mut v = view(25);
        v.go_to(3);
        v.set_search("item-1");
        assert_eq!(v.state().page, 1);

        v.go_to(2);
        v.set_filter("kind", Some("odd".into()));
        assert_eq!(v.state().page, 1);
    }

    #[test]
    fn sort_toggles_same_field_and_defaults_new_field() {
        let mut v = view(5);
        assert_eq!(v.sort_by("name").unwrap(), SortDirection::Desc);
        assert_eq!(v.sort_by("name").unwrap(), SortDirection::Asc);
        assert_eq!(v.sort_by("id").unwrap(), SortDirection::Desc);
        assert_eq!(v.page().items[0].id, 5);
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let mut v = view(5);
        let before = v.state().clone();
        assert!(matches!(
            v.sort_by("color"),
            Err(CoreError::UnknownSortField(f)) if f == "color"
        ));
        assert_eq!(v.state(), &before);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut v = view(25);
        assert_eq!(v.previous_page(), 1);
        assert_eq!(v.next_page(), 2);
        assert_eq!(v.next_page(), 3);
        assert_eq!(v.next_page(), 3);
        assert_eq!(v.go_to(0), 1);
        assert_eq!(v.go_to(100), 3);
    }

    #[test]
    fn empty_result_stays_on_page_one() {
        let mut v = view(3);
        v.set_search("nothing matches");
        assert_eq!(v.next_page(), 1);
        let page = v.page();
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert!(v.labels().is_empty());
    }

    #[test]
    fn shrinking_collection_clamps_page() {
        let mut v = view(25);
        v.go_to(3);
        v.set_items(items(12));
        assert_eq!(v.state().page, 2);
        assert_eq!(v.page().range_start, 11);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut v = view(25);
        v.set_search("item");
        v.set_filter("kind", Some("even".into()));
        v.sort_by("id").unwrap();
        v.go_to(2);
        v.reset();
        assert_eq!(v.state(), &v.pipeline().default_query());
        assert_eq!(v.page().total_items, 25);
    }

    #[test]
    fn labels_follow_current_page() {
        let mut v = view(100);
        v.go_to(5);
        assert_eq!(
            v.labels(),
            vec![
                PageLabel::Page(1),
                PageLabel::Ellipsis,
                PageLabel::Page(4),
                PageLabel::Page(5),
                PageLabel::Page(6),
                PageLabel::Ellipsis,
                PageLabel::Page(10),
            ]
        );
    }
}
