//! Shared slug validation predicates for catalogue entities.
//!
//! Slugs are trimmed, non-empty identifiers of at most 64 characters,
//! composed of lowercase ASCII letters, digits, and hyphens.

/// Maximum slug length in characters.
pub(crate) const MAX_SLUG_LEN: usize = 64;

/// Return `true` when `value` is a valid catalogue slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    is_trimmed_non_empty(value) && value.len() <= MAX_SLUG_LEN && has_allowed_slug_chars(value)
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("lisbon-old-town", true)]
    #[case("a", true)]
    #[case("hotel-42", true)]
    #[case("", false)]
    #[case(" padded ", false)]
    #[case("Uppercase", false)]
    #[case("under_score", false)]
    fn slug_predicate(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }

    #[test]
    fn slug_length_is_bounded() {
        let long = "a".repeat(MAX_SLUG_LEN + 1);
        assert!(!is_valid_slug(&long));
        let max = "a".repeat(MAX_SLUG_LEN);
        assert!(is_valid_slug(&max));
    }
}
