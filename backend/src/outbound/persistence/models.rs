//! Diesel row types and their conversions to and from domain entities.
//!
//! One row struct per table, used in all three directions: `Queryable` for
//! reads, `Insertable` for creation, and `AsChangeset` for full-row updates
//! (the repositories always write the merged entity back, so
//! `treat_none_as_null` is correct for the nullable columns).
//!
//! Enumerated domain fields are stored as their stable string identifiers;
//! a stored value no parser recognises surfaces as a query error rather
//! than a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::actor::{Permission, Role};
use crate::domain::audit::AuditInfo;
use crate::domain::catalog::{
    Accommodation, AccommodationType, AdPlacement, AdSlot, Amenity, AmenityCategory, Destination,
    DiscountCode, DiscountValue, Event, PaymentKind, PaymentMethod, Tag, Visibility,
};
use crate::domain::ports::RepositoryError;
use crate::domain::user::User;

use super::schema::{
    accommodations, ad_slots, amenities, destinations, discount_codes, events, payment_methods,
    tags, users,
};

/// Resolve a stored string identifier, or fail with a query error naming
/// the offending column.
fn parse_stored<T>(
    column: &'static str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, RepositoryError> {
    parse(value).ok_or_else(|| {
        RepositoryError::query(format!("unrecognised {column} value: {value}"))
    })
}

/// Flat audit columns shared by every catalogue table.
struct AuditColumns {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: Uuid,
    updated_by: Uuid,
    deleted_at: Option<DateTime<Utc>>,
    deleted_by: Option<Uuid>,
}

impl From<AuditColumns> for AuditInfo {
    fn from(columns: AuditColumns) -> Self {
        Self {
            created_at: columns.created_at,
            updated_at: columns.updated_at,
            created_by: columns.created_by,
            updated_by: columns.updated_by,
            deleted_at: columns.deleted_at,
            deleted_by: columns.deleted_by,
        }
    }
}

/// Row for the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub grants: serde_json::Value,
    pub key_fingerprint: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = parse_stored("role", &row.role, Role::parse)?;
        let grants: Vec<Permission> = serde_json::from_value(row.grants)
            .map_err(|err| RepositoryError::query(format!("malformed grants column: {err}")))?;
        Ok(Self {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            role,
            grants,
            key_fingerprint: row.key_fingerprint,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Row for the `accommodations` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = accommodations)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccommodationRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub kind: String,
    pub destination_id: Uuid,
    pub visibility: String,
    pub price_per_night: i64,
    pub discounted_price: Option<i64>,
    pub currency: String,
    pub max_guests: i32,
    pub rating_tenths: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

impl From<&Accommodation> for AccommodationRow {
    fn from(entity: &Accommodation) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug.clone(),
            name: entity.name.clone(),
            description: entity.description.clone(),
            kind: entity.kind.as_str().to_owned(),
            destination_id: entity.destination_id,
            visibility: entity.visibility.as_str().to_owned(),
            price_per_night: entity.price_per_night,
            discounted_price: entity.discounted_price,
            currency: entity.currency.clone(),
            max_guests: entity.max_guests,
            rating_tenths: entity.rating_tenths,
            created_at: entity.audit.created_at,
            updated_at: entity.audit.updated_at,
            created_by: entity.audit.created_by,
            updated_by: entity.audit.updated_by,
            deleted_at: entity.audit.deleted_at,
            deleted_by: entity.audit.deleted_by,
        }
    }
}

impl TryFrom<AccommodationRow> for Accommodation {
    type Error = RepositoryError;

    fn try_from(row: AccommodationRow) -> Result<Self, Self::Error> {
        let kind = parse_stored("kind", &row.kind, AccommodationType::parse)?;
        let visibility = parse_stored("visibility", &row.visibility, Visibility::parse)?;
        Ok(Self {
            id: row.id,
            slug: row.slug,
            name: row.name,
            description: row.description,
            kind,
            destination_id: row.destination_id,
            visibility,
            price_per_night: row.price_per_night,
            discounted_price: row.discounted_price,
            currency: row.currency,
            max_guests: row.max_guests,
            rating_tenths: row.rating_tenths,
            audit: AuditColumns {
                created_at: row.created_at,
                updated_at: row.updated_at,
                created_by: row.created_by,
                updated_by: row.updated_by,
                deleted_at: row.deleted_at,
                deleted_by: row.deleted_by,
            }
            .into(),
        })
    }
}

/// Row for the `destinations` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = destinations)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DestinationRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub country_code: String,
    pub summary: String,
    pub latitude_micro: i64,
    pub longitude_micro: i64,
    pub visibility: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

impl From<&Destination> for DestinationRow {
    fn from(entity: &Destination) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug.clone(),
            name: entity.name.clone(),
            country_code: entity.country_code.clone(),
            summary: entity.summary.clone(),
            latitude_micro: entity.latitude_micro,
            longitude_micro: entity.longitude_micro,
            visibility: entity.visibility.as_str().to_owned(),
            created_at: entity.audit.created_at,
            updated_at: entity.audit.updated_at,
            created_by: entity.audit.created_by,
            updated_by: entity.audit.updated_by,
            deleted_at: entity.audit.deleted_at,
            deleted_by: entity.audit.deleted_by,
        }
    }
}

impl TryFrom<DestinationRow> for Destination {
    type Error = RepositoryError;

    fn try_from(row: DestinationRow) -> Result<Self, Self::Error> {
        let visibility = parse_stored("visibility", &row.visibility, Visibility::parse)?;
        Ok(Self {
            id: row.id,
            slug: row.slug,
            name: row.name,
            country_code: row.country_code,
            summary: row.summary,
            latitude_micro: row.latitude_micro,
            longitude_micro: row.longitude_micro,
            visibility,
            audit: AuditColumns {
                created_at: row.created_at,
                updated_at: row.updated_at,
                created_by: row.created_by,
                updated_by: row.updated_by,
                deleted_at: row.deleted_at,
                deleted_by: row.deleted_by,
            }
            .into(),
        })
    }
}

/// Row for the `amenities` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = amenities)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AmenityRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub icon_key: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

impl From<&Amenity> for AmenityRow {
    fn from(entity: &Amenity) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug.clone(),
            name: entity.name.clone(),
            icon_key: entity.icon_key.clone(),
            category: entity.category.as_str().to_owned(),
            created_at: entity.audit.created_at,
            updated_at: entity.audit.updated_at,
            created_by: entity.audit.created_by,
            updated_by: entity.audit.updated_by,
            deleted_at: entity.audit.deleted_at,
            deleted_by: entity.audit.deleted_by,
        }
    }
}

impl TryFrom<AmenityRow> for Amenity {
    type Error = RepositoryError;

    fn try_from(row: AmenityRow) -> Result<Self, Self::Error> {
        let category = parse_stored("category", &row.category, AmenityCategory::parse)?;
        Ok(Self {
            id: row.id,
            slug: row.slug,
            name: row.name,
            icon_key: row.icon_key,
            category,
            audit: AuditColumns {
                created_at: row.created_at,
                updated_at: row.updated_at,
                created_by: row.created_by,
                updated_by: row.updated_by,
                deleted_at: row.deleted_at,
                deleted_by: row.deleted_by,
            }
            .into(),
        })
    }
}

/// Row for the `tags` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tags)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TagRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub colour: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

impl From<&Tag> for TagRow {
    fn from(entity: &Tag) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug.clone(),
            name: entity.name.clone(),
            colour: entity.colour.clone(),
            created_at: entity.audit.created_at,
            updated_at: entity.audit.updated_at,
            created_by: entity.audit.created_by,
            updated_by: entity.audit.updated_by,
            deleted_at: entity.audit.deleted_at,
            deleted_by: entity.audit.deleted_by,
        }
    }
}

impl TryFrom<TagRow> for Tag {
    type Error = RepositoryError;

    fn try_from(row: TagRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            slug: row.slug,
            name: row.name,
            colour: row.colour,
            audit: AuditColumns {
                created_at: row.created_at,
                updated_at: row.updated_at,
                created_by: row.created_by,
                updated_by: row.updated_by,
                deleted_at: row.deleted_at,
                deleted_by: row.deleted_by,
            }
            .into(),
        })
    }
}

/// Row for the `events` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = events)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub destination_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

impl From<&Event> for EventRow {
    fn from(entity: &Event) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug.clone(),
            name: entity.name.clone(),
            description: entity.description.clone(),
            destination_id: entity.destination_id,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            capacity: entity.capacity,
            created_at: entity.audit.created_at,
            updated_at: entity.audit.updated_at,
            created_by: entity.audit.created_by,
            updated_by: entity.audit.updated_by,
            deleted_at: entity.audit.deleted_at,
            deleted_by: entity.audit.deleted_by,
        }
    }
}

impl TryFrom<EventRow> for Event {
    type Error = RepositoryError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            slug: row.slug,
            name: row.name,
            description: row.description,
            destination_id: row.destination_id,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            capacity: row.capacity,
            audit: AuditColumns {
                created_at: row.created_at,
                updated_at: row.updated_at,
                created_by: row.created_by,
                updated_by: row.updated_by,
                deleted_at: row.deleted_at,
                deleted_by: row.deleted_by,
            }
            .into(),
        })
    }
}

/// Row for the `discount_codes` table. The benefit enum is split across the
/// mutually exclusive `percent_off`/`amount_off` columns.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = discount_codes)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DiscountCodeRow {
    pub id: Uuid,
    pub code: String,
    pub percent_off: Option<i32>,
    pub amount_off: Option<i64>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub max_redemptions: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

impl From<&DiscountCode> for DiscountCodeRow {
    fn from(entity: &DiscountCode) -> Self {
        let (percent_off, amount_off) = match entity.value {
            DiscountValue::PercentOff(percent) => (Some(percent), None),
            DiscountValue::AmountOff(amount) => (None, Some(amount)),
        };
        Self {
            id: entity.id,
            code: entity.code.clone(),
            percent_off,
            amount_off,
            valid_from: entity.valid_from,
            valid_until: entity.valid_until,
            max_redemptions: entity.max_redemptions,
            created_at: entity.audit.created_at,
            updated_at: entity.audit.updated_at,
            created_by: entity.audit.created_by,
            updated_by: entity.audit.updated_by,
            deleted_at: entity.audit.deleted_at,
            deleted_by: entity.audit.deleted_by,
        }
    }
}

impl TryFrom<DiscountCodeRow> for DiscountCode {
    type Error = RepositoryError;

    fn try_from(row: DiscountCodeRow) -> Result<Self, Self::Error> {
        let value = match (row.percent_off, row.amount_off) {
            (Some(percent), None) => DiscountValue::PercentOff(percent),
            (None, Some(amount)) => DiscountValue::AmountOff(amount),
            _ => {
                return Err(RepositoryError::query(
                    "discount code must set exactly one of percent_off and amount_off",
                ));
            }
        };
        Ok(Self {
            id: row.id,
            code: row.code,
            value,
            valid_from: row.valid_from,
            valid_until: row.valid_until,
            max_redemptions: row.max_redemptions,
            audit: AuditColumns {
                created_at: row.created_at,
                updated_at: row.updated_at,
                created_by: row.created_by,
                updated_by: row.updated_by,
                deleted_at: row.deleted_at,
                deleted_by: row.deleted_by,
            }
            .into(),
        })
    }
}

/// Row for the `payment_methods` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = payment_methods)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentMethodRow {
    pub id: Uuid,
    pub slug: String,
    pub display_name: String,
    pub kind: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

impl From<&PaymentMethod> for PaymentMethodRow {
    fn from(entity: &PaymentMethod) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug.clone(),
            display_name: entity.display_name.clone(),
            kind: entity.kind.as_str().to_owned(),
            enabled: entity.enabled,
            created_at: entity.audit.created_at,
            updated_at: entity.audit.updated_at,
            created_by: entity.audit.created_by,
            updated_by: entity.audit.updated_by,
            deleted_at: entity.audit.deleted_at,
            deleted_by: entity.audit.deleted_by,
        }
    }
}

impl TryFrom<PaymentMethodRow> for PaymentMethod {
    type Error = RepositoryError;

    fn try_from(row: PaymentMethodRow) -> Result<Self, Self::Error> {
        let kind = parse_stored("kind", &row.kind, PaymentKind::parse)?;
        Ok(Self {
            id: row.id,
            slug: row.slug,
            display_name: row.display_name,
            kind,
            enabled: row.enabled,
            audit: AuditColumns {
                created_at: row.created_at,
                updated_at: row.updated_at,
                created_by: row.created_by,
                updated_by: row.updated_by,
                deleted_at: row.deleted_at,
                deleted_by: row.deleted_by,
            }
            .into(),
        })
    }
}

/// Row for the `ad_slots` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = ad_slots)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AdSlotRow {
    pub id: Uuid,
    pub slug: String,
    pub placement: String,
    pub destination_id: Option<Uuid>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub price_per_day: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

impl From<&AdSlot> for AdSlotRow {
    fn from(entity: &AdSlot) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug.clone(),
            placement: entity.placement.as_str().to_owned(),
            destination_id: entity.destination_id,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            price_per_day: entity.price_per_day,
            created_at: entity.audit.created_at,
            updated_at: entity.audit.updated_at,
            created_by: entity.audit.created_by,
            updated_by: entity.audit.updated_by,
            deleted_at: entity.audit.deleted_at,
            deleted_by: entity.audit.deleted_by,
        }
    }
}

impl TryFrom<AdSlotRow> for AdSlot {
    type Error = RepositoryError;

    fn try_from(row: AdSlotRow) -> Result<Self, Self::Error> {
        let placement = parse_stored("placement", &row.placement, AdPlacement::parse)?;
        Ok(Self {
            id: row.id,
            slug: row.slug,
            placement,
            destination_id: row.destination_id,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            price_per_day: row.price_per_day,
            audit: AuditColumns {
                created_at: row.created_at,
                updated_at: row.updated_at,
                created_by: row.created_by,
                updated_by: row.updated_by,
                deleted_at: row.deleted_at,
                deleted_by: row.deleted_by,
            }
            .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn audit_columns() -> (DateTime<Utc>, Uuid) {
        (Utc::now(), Uuid::new_v4())
    }

    #[test]
    fn accommodation_row_round_trips() {
        let (_, actor) = audit_columns();
        let entity = Accommodation {
            id: Uuid::new_v4(),
            slug: "quinta-do-sol".to_owned(),
            name: "Quinta do Sol".to_owned(),
            description: "A farmhouse stay.".to_owned(),
            kind: AccommodationType::GuestHouse,
            destination_id: Uuid::new_v4(),
            visibility: Visibility::Public,
            price_per_night: 12_500,
            discounted_price: Some(9_900),
            currency: "EUR".to_owned(),
            max_guests: 4,
            rating_tenths: 46,
            audit: AuditInfo::created_now(actor),
        };
        let row = AccommodationRow::from(&entity);
        let back = Accommodation::try_from(row).expect("row converts back");
        assert_eq!(back, entity);
    }

    #[test]
    fn unknown_kind_surfaces_as_query_error() {
        let (now, actor) = audit_columns();
        let row = AccommodationRow {
            id: Uuid::new_v4(),
            slug: "x".to_owned(),
            name: "X".to_owned(),
            description: String::new(),
            kind: "tree-house".to_owned(),
            destination_id: Uuid::new_v4(),
            visibility: "PUBLIC".to_owned(),
            price_per_night: 0,
            discounted_price: None,
            currency: "EUR".to_owned(),
            max_guests: 1,
            rating_tenths: 0,
            created_at: now,
            updated_at: now,
            created_by: actor,
            updated_by: actor,
            deleted_at: None,
            deleted_by: None,
        };
        let err = Accommodation::try_from(row).expect_err("unknown kind");
        assert!(err.to_string().contains("tree-house"));
    }

    #[rstest]
    #[case(Some(15), None, true)]
    #[case(None, Some(2_000), true)]
    #[case(Some(15), Some(2_000), false)]
    #[case(None, None, false)]
    fn discount_columns_must_be_exclusive(
        #[case] percent_off: Option<i32>,
        #[case] amount_off: Option<i64>,
        #[case] ok: bool,
    ) {
        let (now, actor) = audit_columns();
        let row = DiscountCodeRow {
            id: Uuid::new_v4(),
            code: "SUMMER25".to_owned(),
            percent_off,
            amount_off,
            valid_from: now,
            valid_until: now + chrono::Duration::days(30),
            max_redemptions: 0,
            created_at: now,
            updated_at: now,
            created_by: actor,
            updated_by: actor,
            deleted_at: None,
            deleted_by: None,
        };
        assert_eq!(DiscountCode::try_from(row).is_ok(), ok);
    }

    #[test]
    fn user_row_parses_role_and_grants() {
        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "ops@terraviva.example".to_owned(),
            display_name: "Ops".to_owned(),
            role: "viewer".to_owned(),
            grants: json!([{ "entity": "event", "action": "create" }]),
            key_fingerprint: "ab".repeat(32),
            created_at: now,
            updated_at: now,
        };
        let user = User::try_from(row).expect("row converts");
        assert_eq!(user.role, Role::Viewer);
        assert_eq!(user.grants.len(), 1);
    }

    #[test]
    fn malformed_grants_fail_conversion() {
        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "ops@terraviva.example".to_owned(),
            display_name: "Ops".to_owned(),
            role: "admin".to_owned(),
            grants: json!("not-a-list"),
            key_fingerprint: "ab".repeat(32),
            created_at: now,
            updated_at: now,
        };
        assert!(User::try_from(row).is_err());
    }
}
