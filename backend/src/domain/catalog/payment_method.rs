//! Payment method aggregate: the ways a booking can be paid.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::actor::EntityKind;
use crate::domain::audit::AuditInfo;
use crate::domain::entity::CrudEntity;
use crate::domain::validation::{Issues, check_non_empty, check_slug};

/// Settlement channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentKind {
    /// Credit or debit card.
    Card,
    /// SEPA or international bank transfer.
    BankTransfer,
    /// Hosted wallet provider.
    Wallet,
    /// Pay on arrival.
    Cash,
}

impl PaymentKind {
    /// Stable identifier used in persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::BankTransfer => "bank-transfer",
            Self::Wallet => "wallet",
            Self::Cash => "cash",
        }
    }

    /// Parse the persisted identifier back into a kind.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "card" => Some(Self::Card),
            "bank-transfer" => Some(Self::BankTransfer),
            "wallet" => Some(Self::Wallet),
            "cash" => Some(Self::Cash),
            _ => None,
        }
    }
}

/// A way to pay for a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// Primary identifier.
    pub id: Uuid,
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Name shown at checkout.
    pub display_name: String,
    /// Settlement channel.
    pub kind: PaymentKind,
    /// Whether the method is currently offered.
    pub enabled: bool,
    /// Audit block.
    #[serde(flatten)]
    pub audit: AuditInfo,
}

/// Creation payload for [`PaymentMethod`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct PaymentMethodDraft {
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Name shown at checkout.
    pub display_name: String,
    /// Settlement channel.
    pub kind: PaymentKind,
    /// Whether the method is offered from the start.
    #[serde(default)]
    pub enabled: bool,
}

/// Partial update payload for [`PaymentMethod`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct PaymentMethodChanges {
    /// New checkout name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// New settlement channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PaymentKind>,
    /// Toggle availability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl CrudEntity for PaymentMethod {
    const KIND: EntityKind = EntityKind::PaymentMethod;

    type Draft = PaymentMethodDraft;
    type Changes = PaymentMethodChanges;

    fn validate_draft(draft: &Self::Draft) -> Issues {
        let mut issues = Issues::new();
        check_slug(&mut issues, "slug", &draft.slug);
        check_non_empty(&mut issues, "displayName", &draft.display_name, 80);
        issues
    }

    fn validate_changes(changes: &Self::Changes) -> Issues {
        let mut issues = Issues::new();
        if let Some(display_name) = &changes.display_name {
            check_non_empty(&mut issues, "displayName", display_name, 80);
        }
        issues
    }

    fn from_draft(draft: Self::Draft, id: Uuid, audit: AuditInfo) -> Self {
        Self {
            id,
            slug: draft.slug,
            display_name: draft.display_name,
            kind: draft.kind,
            enabled: draft.enabled,
            audit,
        }
    }

    fn apply_changes(&mut self, changes: Self::Changes) {
        if let Some(display_name) = changes.display_name {
            self.display_name = display_name;
        }
        if let Some(kind) = changes.kind {
            self.kind = kind;
        }
        if let Some(enabled) = changes.enabled {
            self.enabled = enabled;
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }

    fn search_haystack(&self) -> String {
        format!("{} {}", self.slug, self.display_name).to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn enabled_defaults_to_false_in_drafts() {
        let draft: PaymentMethodDraft = serde_json::from_str(
            r#"{"slug":"visa","displayName":"Visa","kind":"card"}"#,
        )
        .expect("parse draft");
        assert!(!draft.enabled);
        assert!(PaymentMethod::validate_draft(&draft).is_empty());
    }
}
