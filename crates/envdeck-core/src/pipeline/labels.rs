use serde::{Serialize, Serializer};

/// One entry of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLabel {
    /// Button for a 1-based page number.
    Page(usize),
    /// Placeholder for skipped page numbers.
    Ellipsis,
}

impl Serialize for PageLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageLabel::Page(n) => serializer.serialize_u64(*n as u64),
            PageLabel::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Page-number buttons for a pagination control.
///
/// The first and last pages are always shown, together with a window of three pages around the current one
/// (one either side, shifted inward on the first and last page).
/// An [`PageLabel::Ellipsis`] marks every gap between shown numbers.
/// A single page (or none) needs no control and yields no labels.
pub fn page_labels(page: usize, total_pages: usize) -> Vec<PageLabel> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let page = page.clamp(1, total_pages);

    let mut start = page.saturating_sub(1).max(1);
    let mut end = (page + 1).min(total_pages);
    if page == 1 {
        end = 3.min(total_pages);
    }
    if page == total_pages {
        start = total_pages.saturating_sub(2).max(1);
    }

    let mut labels = Vec::with_capacity(end - start + 5);
    if start > 1 {
        labels.push(PageLabel::Page(1));
    }
    if start > 2 {
        labels.push(PageLabel::Ellipsis);
    }
    labels.extend((start..=end).map(PageLabel::Page));
    if end + 1 < total_pages {
        labels.push(PageLabel::Ellipsis);
    }
    if end < total_pages {
        labels.push(PageLabel::Page(total_pages));
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::PageLabel::{Ellipsis as E, Page as P};
    use super::*;

    #[test]
    fn middle_page_has_both_ellipses() {
        assert_eq!(
            page_labels(5, 10),
            vec![P(1), E, P(4), P(5), P(6), E, P(10)]
        );
    }

    #[test]
    fn first_page_shows_three_leading_pages() {
        assert_eq!(page_labels(1, 10), vec![P(1), P(2), P(3), E, P(10)]);
    }

    #[test]
    fn last_page_shows_three_trailing_pages() {
        assert_eq!(page_labels(10, 10), vec![P(1), E, P(8), P(9), P(10)]);
    }

    #[test]
    fn single_or_no_page_has_no_controls() {
        assert!(page_labels(1, 1).is_empty());
        assert!(page_labels(1, 0).is_empty());
    }

    #[test]
    fn small_totals_show_every_page() {
        assert_eq!(page_labels(1, 2), vec![P(1), P(2)]);
        assert_eq!(page_labels(2, 3), vec![P(1), P(2), P(3)]);
        assert_eq!(page_labels(1, 4), vec![P(1), P(2), P(3), P(4)]);
        assert_eq!(page_labels(3, 5), vec![P(1), P(2), P(3), P(4), P(5)]);
    }

    #[test]
    fn no_ellipsis_for_adjacent_numbers() {
        assert_eq!(page_labels(3, 10), vec![P(1), P(2), P(3), P(4), E, P(10)]);
        assert_eq!(page_labels(8, 10), vec![P(1), E, P(7), P(8), P(9), P(10)]);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        assert_eq!(page_labels(42, 10), page_labels(10, 10));
        assert_eq!(page_labels(0, 10), page_labels(1, 10));
    }

    #[test]
    fn serializes_ellipsis_as_string() {
        let json = serde_json::to_string(&page_labels(5, 10)).unwrap();
        assert_eq!(json, r#"[1,"...",4,5,6,"...",10]"#);
    }
}
