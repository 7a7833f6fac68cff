use std::{cmp::Ordering, sync::OnceLock};

use icu_collator::{
    Collator, CollatorBorrowed,
    options::{CollatorOptions, Strength},
};
use time::OffsetDateTime;
use tracing::warn;

/// Case-insensitive substring test used by search predicates.
///
/// An empty needle matches every haystack.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

static COLLATOR: OnceLock<Option<CollatorBorrowed<'static>>> = OnceLock::new();

/// Root-locale collator at tertiary strength, built on first use.
fn collator() -> Option<&'static CollatorBorrowed<'static>> {
    COLLATOR
        .get_or_init(|| {
            let mut options = CollatorOptions::default();
            options.strength = Some(Strength::Tertiary);
            Collator::try_new(Default::default(), options)
                .inspect_err(|e| {
                    warn!(error = %e, "collator unavailable; falling back to case-folded order")
                })
                .ok()
        })
        .as_ref()
}

/// Locale-aware ordering of display strings.
///
/// Uses Unicode collation for the root locale: accents and case are secondary to the base letters,
/// so `"eagle" < "Éclair" < "orange"` and `"alpha" < "Beta" < "gamma"`.
/// Strings differing only in case put the lowercase form first.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let collated = match collator() {
        Some(collator) => collator.compare(a, b),
        None => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase))
            .then_with(|| b.cmp(a)),
    };
    collated.then_with(|| a.cmp(b))
}

/// Order two optional instants; a missing instant sorts as the Unix epoch.
pub fn compare_instant(a: Option<OffsetDateTime>, b: Option<OffsetDateTime>) -> Ordering {
    let a = a.unwrap_or(OffsetDateTime::UNIX_EPOCH);
    let b = b.unwrap_or(OffsetDateTime::UNIX_EPOCH);
    a.cmp(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn contains_ignores_case() {
        assert!(contains_ignore_case("DATABASE_URL", "base_u"));
        assert!(contains_ignore_case("Überweisung", "üBER"));
        assert!(!contains_ignore_case("api", "apis"));
        assert!(contains_ignore_case("anything", ""));
    }

    #[test]
    fn text_orders_case_folded() {
        let mut names = vec!["gamma", "Beta", "alpha", "beta"];
        names.sort_by(|a, b| compare_text(a, b));
        assert_eq!(names, vec!["alpha", "beta", "Beta", "gamma"]);
    }

    #[test]
    fn text_orders_accented_letters_with_their_base() {
        let mut names = vec!["zebra", "Éclair", "eagle", "Ölfeld", "orange"];
        names.sort_by(|a, b| compare_text(a, b));
        assert_eq!(names, vec!["eagle", "Éclair", "Ölfeld", "orange", "zebra"]);
    }

    #[test]
    fn text_accent_is_secondary_to_base_letters() {
        assert_eq!(compare_text("résumé", "resumes"), Ordering::Less);
        assert_eq!(compare_text("resume", "résumé"), Ordering::Less);
        assert_eq!(compare_text("Zoë", "zoo"), Ordering::Less);
    }

    #[test]
    fn text_equal_only_when_identical() {
        assert_eq!(compare_text("same", "same"), Ordering::Equal);
        assert_ne!(compare_text("Same", "same"), Ordering::Equal);
    }

    #[test]
    fn instants_compare_across_offsets() {
        let utc = datetime!(2024-05-01 12:00 UTC);
        let plus_two = datetime!(2024-05-01 13:00 +02:00);
        assert_eq!(compare_instant(Some(plus_two), Some(utc)), Ordering::Less);
    }

    #[test]
    fn missing_instant_is_epoch() {
        let before_epoch = datetime!(1969-12-31 23:59 UTC);
        assert_eq!(
            compare_instant(None, Some(OffsetDateTime::UNIX_EPOCH)),
            Ordering::Equal
        );
        assert_eq!(compare_instant(None, Some(before_epoch)), Ordering::Greater);
    }
}
