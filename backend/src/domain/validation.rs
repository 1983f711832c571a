//! Field-level validation primitives shared by the catalogue entities.
//!
//! Validation failures accumulate as [`FieldIssue`] values so a single
//! response can report every offending field, each with a machine code and a
//! human-readable suggestion for fixing the input.

use serde::Serialize;
use serde_json::json;

use super::error::Error;
use super::slug;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldIssue {
    /// Dotted path of the offending field, e.g. `pricePerNight`.
    pub field: String,
    /// Stable machine code, e.g. `out_of_range`.
    pub code: String,
    /// What went wrong.
    pub message: String,
    /// How to fix it.
    pub suggestion: String,
}

/// Accumulator for validation failures across a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issues(Vec<FieldIssue>);

impl Issues {
    /// Start with no recorded issues.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a failure for `field`.
    pub fn push(
        &mut self,
        field: &str,
        code: &str,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.0.push(FieldIssue {
            field: field.to_owned(),
            code: code.to_owned(),
            message: message.into(),
            suggestion: suggestion.into(),
        });
    }

    /// Append all issues recorded in `other`.
    pub fn extend(&mut self, other: Issues) {
        self.0.extend(other.0);
    }

    /// True when no failure has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recorded failures in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[FieldIssue] {
        &self.0
    }

    /// Finish validation: `Ok(())` when clean, otherwise a
    /// [`Error::validation`] carrying every issue in its details.
    ///
    /// # Errors
    /// Returns the aggregated validation error when any issue was recorded.
    pub fn into_result(self) -> Result<(), Error> {
        if self.0.is_empty() {
            return Ok(());
        }
        let message = self
            .0
            .first()
            .map_or_else(|| "request validation failed".to_owned(), |issue| {
                issue.message.clone()
            });
        Err(Error::validation(message).with_details(json!({ "issues": self.0 })))
    }
}

/// Check a trimmed, bounded, non-empty string field.
pub fn check_non_empty(issues: &mut Issues, field: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        issues.push(
            field,
            "required",
            format!("{field} must not be empty"),
            format!("Provide a non-empty value for {field}."),
        );
    } else if value.chars().count() > max_len {
        issues.push(
            field,
            "too_long",
            format!("{field} exceeds {max_len} characters"),
            format!("Shorten {field} to at most {max_len} characters."),
        );
    }
}

/// Check a slug field against the shared slug rules.
pub fn check_slug(issues: &mut Issues, field: &str, value: &str) {
    if !slug::is_valid_slug(value) {
        issues.push(
            field,
            "malformed_slug",
            format!("{field} is not a valid slug"),
            "Use 1-64 lowercase ASCII letters, digits, or hyphens.",
        );
    }
}

/// Check an inclusive integer range.
pub fn check_range(issues: &mut Issues, field: &str, value: i64, min: i64, max: i64) {
    if value < min || value > max {
        issues.push(
            field,
            "out_of_range",
            format!("{field} must be between {min} and {max}"),
            format!("Choose a value in the range {min}..={max}."),
        );
    }
}

/// Check a non-negative integer amount (prices, capacities).
pub fn check_non_negative(issues: &mut Issues, field: &str, value: i64) {
    if value < 0 {
        issues.push(
            field,
            "negative",
            format!("{field} must not be negative"),
            format!("Provide zero or a positive value for {field}."),
        );
    }
}

/// Check that `start` strictly precedes `end`.
pub fn check_ordered(
    issues: &mut Issues,
    start_field: &str,
    end_field: &str,
    start: chrono::DateTime<chrono::Utc>,
    end: chrono::DateTime<chrono::Utc>,
) {
    if start >= end {
        issues.push(
            end_field,
            "inverted_range",
            format!("{start_field} must be before {end_field}"),
            format!("Set {end_field} to a moment after {start_field}."),
        );
    }
}

/// Check an uppercase ISO-4217 currency code.
pub fn check_currency(issues: &mut Issues, field: &str, value: &str) {
    let well_formed = value.len() == 3 && value.chars().all(|c| c.is_ascii_uppercase());
    if !well_formed {
        issues.push(
            field,
            "malformed_currency",
            format!("{field} is not an ISO-4217 code"),
            "Use three uppercase letters, e.g. EUR.",
        );
    }
}

/// Check an uppercase ISO-3166 alpha-2 country code.
pub fn check_country(issues: &mut Issues, field: &str, value: &str) {
    let well_formed = value.len() == 2 && value.chars().all(|c| c.is_ascii_uppercase());
    if !well_formed {
        issues.push(
            field,
            "malformed_country",
            format!("{field} is not an ISO-3166 alpha-2 code"),
            "Use two uppercase letters, e.g. PT.",
        );
    }
}

/// Check a lowercase `#rrggbb` hex colour.
pub fn check_hex_colour(issues: &mut Issues, field: &str, value: &str) {
    let mut chars = value.chars();
    let well_formed = value.len() == 7
        && chars.next() == Some('#')
        && chars.all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
    if !well_formed {
        issues.push(
            field,
            "malformed_colour",
            format!("{field} is not a lowercase #rrggbb colour"),
            "Use the form #1a2b3c.",
        );
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[test]
    fn clean_issues_resolve_ok() {
        assert!(Issues::new().into_result().is_ok());
    }

    #[test]
    fn issues_aggregate_into_validation_error() {
        let mut issues = Issues::new();
        check_non_empty(&mut issues, "name", "  ", 64);
        check_non_negative(&mut issues, "pricePerNight", -5);
        let err = issues.into_result().expect_err("two issues recorded");
        assert_eq!(err.code(), ErrorCode::ValidationError);
        let details = err.details().expect("details attached");
        let listed = details["issues"].as_array().expect("issues array");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["code"], "required");
        assert!(listed[1]["suggestion"].as_str().is_some());
    }

    #[rstest]
    #[case("EUR", true)]
    #[case("eur", false)]
    #[case("EURO", false)]
    fn currency_codes(#[case] value: &str, #[case] ok: bool) {
        let mut issues = Issues::new();
        check_currency(&mut issues, "currency", value);
        assert_eq!(issues.is_empty(), ok);
    }

    #[rstest]
    #[case("#1a2b3c", true)]
    #[case("#1A2B3C", false)]
    #[case("1a2b3c", false)]
    #[case("#1a2b3", false)]
    fn hex_colours(#[case] value: &str, #[case] ok: bool) {
        let mut issues = Issues::new();
        check_hex_colour(&mut issues, "colour", value);
        assert_eq!(issues.is_empty(), ok);
    }

    #[rstest]
    #[case(0, 0, 64, true)]
    #[case(65, 1, 64, false)]
    fn ranges(#[case] value: i64, #[case] min: i64, #[case] max: i64, #[case] ok: bool) {
        let mut issues = Issues::new();
        check_range(&mut issues, "maxGuests", value, min, max);
        assert_eq!(issues.is_empty(), ok);
    }
}
