//! Display helpers for secret values (environment secrets, access keys).

use std::collections::HashSet;

use envdeck_model::RecordId;

const VISIBLE_EDGE: usize = 2;
const MASK: char = '*';

/// Mask a secret, keeping only its first and last two characters.
///
/// Values of four characters or fewer are masked entirely.
/// Works on characters, so multi-byte text is never split.
pub fn mask_secret(value: &str) -> String {
    let len = value.chars().count();
    if len <= VISIBLE_EDGE * 2 {
        return std::iter::repeat_n(MASK, len).collect();
    }

    let mut out = String::with_capacity(value.len());
    out.extend(value.chars().take(VISIBLE_EDGE));
    out.extend(std::iter::repeat_n(MASK, len - VISIBLE_EDGE * 2));
    out.extend(value.chars().skip(len - VISIBLE_EDGE));
    out
}

/// The raw value when revealed, its mask otherwise.
pub fn display_secret(value: &str, revealed: bool) -> String {
    if revealed {
        value.to_string()
    } else {
        mask_secret(value)
    }
}

/// Records whose secret the user chose to reveal on a page.
#[derive(Debug, Clone, Default)]
pub struct RevealSet {
    revealed: HashSet<RecordId>,
}

impl RevealSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip visibility of `id`; returns `true` when it is now revealed.
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        if self.revealed.remove(id) {
            false
        } else {
            self.revealed.insert(id.clone());
            true
        }
    }

    pub fn reveal(&mut self, id: &RecordId) {
        self.revealed.insert(id.clone());
    }

    pub fn is_revealed(&self, id: &RecordId) -> bool {
        self.revealed.contains(id)
    }

    /// Hide everything again.
    pub fn clear(&mut self) {
        self.revealed.clear();
    }

    /// Display form of `value` for the record `id`.
    pub fn display(&self, id: &RecordId, value: &str) -> String {
        display_secret(value, self.is_revealed(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_two_characters_on_each_side() {
        assert_eq!(mask_secret("sk_live_abcdef"), "sk**********ef");
        assert_eq!(mask_secret("abcde"), "ab*de");
    }

    #[test]
    fn short_values_are_fully_masked() {
        assert_eq!(mask_secret(""), "");
        assert_eq!(mask_secret("a"), "*");
        assert_eq!(mask_secret("abcd"), "****");
    }

    #[test]
    fn masks_by_character_not_byte() {
        assert_eq!(mask_secret("päßwörd"), "pä***rd");
    }

    #[test]
    fn display_respects_reveal_flag() {
        assert_eq!(display_secret("hunter22", true), "hunter22");
        assert_eq!(display_secret("hunter22", false), "hu****22");
    }

    #[test]
    fn reveal_set_toggles() {
        let id = RecordId::from("var-1");
        let other = RecordId::from("var-2");
        let mut set = RevealSet::new();

        assert!(set.toggle(&id));
        assert!(set.is_revealed(&id));
        assert!(!set.is_revealed(&other));
        assert_eq!(set.display(&id, "secret-value"), "secret-value");
        assert_eq!(set.display(&other, "secret-value"), "se********ue");

        assert!(!set.toggle(&id));
        assert!(!set.is_revealed(&id));

        set.reveal(&other);
        set.clear();
        assert!(!set.is_revealed(&other));
    }
}
