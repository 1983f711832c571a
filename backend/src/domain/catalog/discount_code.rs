//! Discount code aggregate: promotional codes with a validity window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::actor::EntityKind;
use crate::domain::audit::AuditInfo;
use crate::domain::entity::CrudEntity;
use crate::domain::validation::{Issues, check_non_negative, check_ordered, check_range};

/// The benefit a discount code grants: percentage off or a fixed amount off,
/// never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DiscountValue {
    /// Percentage off the booking total, `1..=100`.
    PercentOff(i32),
    /// Fixed amount off in minor currency units, `> 0`.
    AmountOff(i64),
}

/// A promotional discount code.
///
/// "Active" means: not soft-deleted and the current instant lies inside
/// `[valid_from, valid_until)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    /// Primary identifier.
    pub id: Uuid,
    /// Uppercase redemption code, unique.
    pub code: String,
    /// Benefit granted on redemption.
    pub value: DiscountValue,
    /// Start of the validity window.
    pub valid_from: DateTime<Utc>,
    /// End of the validity window, strictly after the start.
    pub valid_until: DateTime<Utc>,
    /// Redemption budget; zero means unlimited.
    pub max_redemptions: i32,
    /// Audit block.
    #[serde(flatten)]
    pub audit: AuditInfo,
}

/// Creation payload for [`DiscountCode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct DiscountCodeDraft {
    /// Uppercase redemption code.
    pub code: String,
    /// Benefit granted on redemption.
    pub value: DiscountValue,
    /// Start of the validity window.
    pub valid_from: DateTime<Utc>,
    /// End of the validity window.
    pub valid_until: DateTime<Utc>,
    /// Redemption budget; zero means unlimited.
    #[serde(default)]
    pub max_redemptions: i32,
}

/// Partial update payload for [`DiscountCode`]. The code itself is
/// immutable once issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct DiscountCodeChanges {
    /// New benefit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<DiscountValue>,
    /// New window start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    /// New window end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    /// New redemption budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_redemptions: Option<i32>,
}

fn check_code(issues: &mut Issues, value: &str) {
    let len_ok = (3..=32).contains(&value.len());
    let chars_ok = value
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-');
    if !(len_ok && chars_ok) {
        issues.push(
            "code",
            "malformed_code",
            "code must be 3-32 uppercase letters, digits, or hyphens",
            "Use a code like SUMMER-25.",
        );
    }
}

fn check_value(issues: &mut Issues, value: DiscountValue) {
    match value {
        DiscountValue::PercentOff(percent) => {
            check_range(issues, "value.percentOff", i64::from(percent), 1, 100);
        }
        DiscountValue::AmountOff(amount) => {
            if amount <= 0 {
                issues.push(
                    "value.amountOff",
                    "out_of_range",
                    "value.amountOff must be positive",
                    "Provide an amount greater than zero, in minor units.",
                );
            }
        }
    }
}

impl CrudEntity for DiscountCode {
    const KIND: EntityKind = EntityKind::DiscountCode;

    type Draft = DiscountCodeDraft;
    type Changes = DiscountCodeChanges;

    fn validate_draft(draft: &Self::Draft) -> Issues {
        let mut issues = Issues::new();
        check_code(&mut issues, &draft.code);
        check_value(&mut issues, draft.value);
        check_ordered(
            &mut issues,
            "validFrom",
            "validUntil",
            draft.valid_from,
            draft.valid_until,
        );
        check_non_negative(&mut issues, "maxRedemptions", i64::from(draft.max_redemptions));
        issues
    }

    fn validate_changes(changes: &Self::Changes) -> Issues {
        let mut issues = Issues::new();
        if let Some(value) = changes.value {
            check_value(&mut issues, value);
        }
        if let Some(max) = changes.max_redemptions {
            check_non_negative(&mut issues, "maxRedemptions", i64::from(max));
        }
        issues
    }

    fn validate_against(current: &Self, changes: &Self::Changes) -> Issues {
        let mut issues = Issues::new();
        let valid_from = changes.valid_from.unwrap_or(current.valid_from);
        let valid_until = changes.valid_until.unwrap_or(current.valid_until);
        check_ordered(&mut issues, "validFrom", "validUntil", valid_from, valid_until);
        issues
    }

    fn from_draft(draft: Self::Draft, id: Uuid, audit: AuditInfo) -> Self {
        Self {
            id,
            code: draft.code,
            value: draft.value,
            valid_from: draft.valid_from,
            valid_until: draft.valid_until,
            max_redemptions: draft.max_redemptions,
            audit,
        }
    }

    fn apply_changes(&mut self, changes: Self::Changes) {
        if let Some(value) = changes.value {
            self.value = value;
        }
        if let Some(from) = changes.valid_from {
            self.valid_from = from;
        }
        if let Some(until) = changes.valid_until {
            self.valid_until = until;
        }
        if let Some(max) = changes.max_redemptions {
            self.max_redemptions = max;
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    // The redemption code doubles as the unique human-readable identifier.
    fn slug(&self) -> &str {
        &self.code
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }

    fn search_haystack(&self) -> String {
        self.code.to_lowercase()
    }
}

impl DiscountCode {
    /// Whether the code can be redeemed at `now`.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.audit.is_deleted() && self.valid_from <= now && now < self.valid_until
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    fn draft() -> DiscountCodeDraft {
        let valid_from = Utc::now();
        DiscountCodeDraft {
            code: "SUMMER-25".to_owned(),
            value: DiscountValue::PercentOff(25),
            valid_from,
            valid_until: valid_from + Duration::days(30),
            max_redemptions: 100,
        }
    }

    #[rstest]
    #[case("OK-1", true)]
    #[case("ab", false)]
    #[case("lowercase", false)]
    #[case("WAY-TOO-LONG-FOR-A-DISCOUNT-CODE-FIELD", false)]
    fn code_format(#[case] code: &str, #[case] ok: bool) {
        let mut candidate = draft();
        candidate.code = code.to_owned();
        assert_eq!(DiscountCode::validate_draft(&candidate).is_empty(), ok);
    }

    #[rstest]
    #[case(DiscountValue::PercentOff(0), false)]
    #[case(DiscountValue::PercentOff(101), false)]
    #[case(DiscountValue::PercentOff(100), true)]
    #[case(DiscountValue::AmountOff(0), false)]
    #[case(DiscountValue::AmountOff(500), true)]
    fn value_bounds(#[case] value: DiscountValue, #[case] ok: bool) {
        let mut candidate = draft();
        candidate.value = value;
        assert_eq!(DiscountCode::validate_draft(&candidate).is_empty(), ok);
    }

    #[test]
    fn active_window_is_half_open() {
        let entity = DiscountCode::from_draft(
            draft(),
            Uuid::new_v4(),
            AuditInfo::created_now(Uuid::new_v4()),
        );
        assert!(entity.is_active(entity.valid_from));
        assert!(!entity.is_active(entity.valid_until));
    }

    #[test]
    fn soft_deleted_codes_are_inactive() {
        let mut entity = DiscountCode::from_draft(
            draft(),
            Uuid::new_v4(),
            AuditInfo::created_now(Uuid::new_v4()),
        );
        entity.audit.mark_deleted(Uuid::new_v4());
        assert!(!entity.is_active(Utc::now()));
    }
}
