//! Generic search/filter/sort/paginate pipeline over an in-memory collection.
//!
//! A [`ListPipeline`] is configured once per list view and then recomputed from scratch on every [`QueryState`] change.
//! Computation is pure: the same collection and state always yield the same [`ListPage`].

mod compare;
pub use compare::{compare_instant, compare_text, contains_ignore_case};

mod labels;
pub use labels::{PageLabel, page_labels};

use std::{cmp::Ordering, collections::BTreeMap, fmt};

use envdeck_model::{DEFAULT_ITEMS_PER_PAGE, ListPage, QueryState, SortDirection};
use tracing::{instrument, trace};

type SearchFn<T> = Box<dyn Fn(&T, &str) -> bool + Send + Sync>;
type FilterFn<T> = Box<dyn Fn(&T, &str) -> bool + Send + Sync>;
type CompareFn<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

struct SortKey<T> {
    field: String,
    default_direction: SortDirection,
    compare: CompareFn<T>,
}

/// Configured list-view pipeline for records of type `T`.
///
/// Records are interpreted only through the registered closures:
/// - one search predicate, called with the trimmed non-empty search term;
/// - filter predicates keyed by filter name, called with the active filter value;
/// - one ascending comparator per sortable field.
pub struct ListPipeline<T> {
    name: String,
    search: Option<SearchFn<T>>,
    filters: BTreeMap<String, FilterFn<T>>,
    sorts: Vec<SortKey<T>>,
    default_sort: Option<String>,
    items_per_page: usize,
}

impl<T> ListPipeline<T> {
    /// Create an empty pipeline; `name` only labels log events.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            search: None,
            filters: BTreeMap::new(),
            sorts: Vec::new(),
            default_sort: None,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }

    pub fn with_search<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T, &str) -> bool + Send + Sync + 'static,
    {
        self.search = Some(Box::new(predicate));
        self
    }

    pub fn with_filter<F>(mut self, key: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T, &str) -> bool + Send + Sync + 'static,
    {
        self.filters.insert(key.into(), Box::new(predicate));
        self
    }

    /// Register a sortable field.
    ///
    /// `compare` must order ascending; [`SortDirection::Desc`] reverses it.
    /// Registering the same field twice replaces the earlier comparator.
    pub fn with_sort<F>(
        mut self,
        field: impl Into<String>,
        default_direction: SortDirection,
        compare: F,
    ) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        let field = field.into();
        self.sorts.retain(|s| s.field != field);
        self.sorts.push(SortKey {
            field,
            default_direction,
            compare: Box::new(compare),
        });
        self
    }

    /// Field sorted on when the view is first shown (defaults to the first registered field).
    pub fn with_default_sort(mut self, field: impl Into<String>) -> Self {
        self.default_sort = Some(field.into());
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Names of the sortable fields in registration order.
    pub fn sort_fields(&self) -> impl Iterator<Item = &str> {
        self.sorts.iter().map(|s| s.field.as_str())
    }

    /// Names of the registered filters.
    pub fn filter_keys(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn has_sort(&self, field: &str) -> bool {
        self.sort_key(field).is_some()
    }

    /// Direction a field starts in when the user first sorts by it.
    pub fn default_direction(&self, field: &str) -> Option<SortDirection> {
        self.sort_key(field).map(|s| s.default_direction)
    }

    /// Initial query state of a view using this pipeline.
    pub fn default_query(&self) -> QueryState {
        let field = self
            .default_sort
            .as_deref()
            .or_else(|| self.sorts.first().map(|s| s.field.as_str()))
            .unwrap_or_default();
        let direction = self.default_direction(field).unwrap_or_default();
        QueryState::new(field, direction)
    }

    /// Number of records passing search and filters.
    pub fn count(&self, items: &[T], state: &QueryState) -> usize {
        let filters = self.active_filters(state);
        let term = state.search_term();
        items
            .iter()
            .filter(|item| self.matches(item, term, &filters))
            .count()
    }

    /// Number of pages `count` records occupy (0 for no records).
    #[inline]
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.items_per_page)
    }

    /// Derive the visible page as borrowed records.
    #[instrument(level = "trace", skip_all, fields(view = %self.name, page = state.page))]
    pub fn compute_refs<'a>(&self, items: &'a [T], state: &QueryState) -> ListPage<&'a T> {
        let filters = self.active_filters(state);
        let term = state.search_term();

        let mut filtered: Vec<&'a T> = items
            .iter()
            .filter(|item| self.matches(item, term, &filters))
            .collect();

        // `sort_by` is stable: equal records keep collection order in both directions.
        match self.sort_key(&state.sort_field) {
            Some(key) => {
                let direction = state.sort_direction;
                filtered.sort_by(|a, b| direction.apply((key.compare)(*a, *b)));
            }
            None if !state.sort_field.is_empty() => {
                trace!(field = %state.sort_field, "unknown sort field; keeping collection order");
            }
            None => {}
        }

        let per_page = self.items_per_page;
        let total_items = filtered.len();
        let total_pages = self.total_pages(total_items);
        let page = state.page.clamp(1, total_pages.max(1));
        let start = (page - 1) * per_page;

        let visible: Vec<&'a T> = filtered.into_iter().skip(start).take(per_page).collect();
        let (range_start, range_end) = if visible.is_empty() {
            (0, 0)
        } else {
            (start + 1, start + visible.len())
        };

        trace!(
            source = items.len(),
            total_items,
            total_pages,
            page,
            visible = visible.len(),
            "list page computed"
        );

        ListPage {
            items: visible,
            total_items,
            total_pages,
            page,
            range_start,
            range_end,
        }
    }

    /// Derive the visible page, cloning only the visible records.
    pub fn compute(&self, items: &[T], state: &QueryState) -> ListPage<T>
    where
        T: Clone,
    {
        self.compute_refs(items, state).map(Clone::clone)
    }

    fn sort_key(&self, field: &str) -> Option<&SortKey<T>> {
        self.sorts.iter().find(|s| s.field == field)
    }

    fn active_filters<'s>(&'s self, state: &'s QueryState) -> Vec<(&'s FilterFn<T>, &'s str)> {
        state
            .active_filters()
            .filter_map(|(key, value)| match self.filters.get(key) {
                Some(predicate) => Some((predicate, value)),
                None => {
                    trace!(view = %self.name, filter = key, "no predicate registered; filter ignored");
                    None
                }
            })
            .collect()
    }

    fn matches(&self, item: &T, term: &str, filters: &[(&FilterFn<T>, &str)]) -> bool {
        let searched = term.is_empty()
            || self
                .search
                .as_ref()
                .is_none_or(|predicate| predicate(item, term));
        searched && filters.iter().all(|(predicate, value)| predicate(item, *value))
    }
}

impl<T> fmt::Debug for ListPipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListPipeline")
            .field("name", &self.name)
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .field("sorts", &self.sort_fields().collect::<Vec<_>>())
            .field("default_sort", &self.default_sort)
            .field("items_per_page", &self.items_per_page)
            .finish()
    }
}
