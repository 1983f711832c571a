//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation. When
//! migrations change, regenerate with `diesel print-schema` or update by
//! hand.
//!
//! Every catalogue table carries the same audit block: `created_at`,
//! `updated_at`, `created_by`, `updated_by`, plus the nullable
//! `deleted_at`/`deleted_by` pair implementing soft deletion.

diesel::table! {
    /// Platform users holding API keys.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique contact address.
        email -> Varchar,
        /// Human-readable display name.
        display_name -> Varchar,
        /// Coarse role: `admin`, `editor`, or `viewer`.
        role -> Varchar,
        /// Extra permission grants beyond the role, as a JSON array.
        grants -> Jsonb,
        /// SHA-256 hex fingerprint of the user's API key, unique.
        key_fingerprint -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bookable stays.
    accommodations (id) {
        id -> Uuid,
        /// Unique URL-safe identifier.
        slug -> Varchar,
        name -> Varchar,
        description -> Text,
        /// Lodging category, e.g. `hotel` or `guest-house`.
        kind -> Varchar,
        destination_id -> Uuid,
        /// Publication state: `PUBLIC`, `PRIVATE`, or `DRAFT`.
        visibility -> Varchar,
        /// Nightly base price in minor currency units.
        price_per_night -> Int8,
        /// Discounted nightly price, strictly below the base when set.
        discounted_price -> Nullable<Int8>,
        /// ISO-4217 currency code.
        currency -> Varchar,
        max_guests -> Int4,
        /// Average rating in tenths of a star, `0..=50`.
        rating_tenths -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        created_by -> Uuid,
        updated_by -> Uuid,
        deleted_at -> Nullable<Timestamptz>,
        deleted_by -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Geographic destinations.
    destinations (id) {
        id -> Uuid,
        slug -> Varchar,
        name -> Varchar,
        /// ISO-3166 alpha-2 country code.
        country_code -> Varchar,
        summary -> Text,
        /// Latitude in micro-degrees.
        latitude_micro -> Int8,
        /// Longitude in micro-degrees.
        longitude_micro -> Int8,
        visibility -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        created_by -> Uuid,
        updated_by -> Uuid,
        deleted_at -> Nullable<Timestamptz>,
        deleted_by -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Features an accommodation can offer.
    amenities (id) {
        id -> Uuid,
        slug -> Varchar,
        name -> Varchar,
        /// Semantic icon key rendered by clients.
        icon_key -> Varchar,
        /// Filter section, e.g. `comfort` or `safety`.
        category -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        created_by -> Uuid,
        updated_by -> Uuid,
        deleted_at -> Nullable<Timestamptz>,
        deleted_by -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Free-form content labels.
    tags (id) {
        id -> Uuid,
        slug -> Varchar,
        name -> Varchar,
        /// Lowercase `#rrggbb` display colour.
        colour -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        created_by -> Uuid,
        updated_by -> Uuid,
        deleted_at -> Nullable<Timestamptz>,
        deleted_by -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Dated happenings at a destination.
    events (id) {
        id -> Uuid,
        slug -> Varchar,
        name -> Varchar,
        description -> Text,
        destination_id -> Uuid,
        starts_at -> Timestamptz,
        ends_at -> Timestamptz,
        /// Attendee capacity; zero means unlimited.
        capacity -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        created_by -> Uuid,
        updated_by -> Uuid,
        deleted_at -> Nullable<Timestamptz>,
        deleted_by -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Promotional discount codes.
    discount_codes (id) {
        id -> Uuid,
        /// Uppercase redemption code, unique.
        code -> Varchar,
        /// Percentage off, `1..=100`; mutually exclusive with `amount_off`.
        percent_off -> Nullable<Int4>,
        /// Fixed amount off in minor currency units, `> 0`.
        amount_off -> Nullable<Int8>,
        valid_from -> Timestamptz,
        valid_until -> Timestamptz,
        /// Redemption budget; zero means unlimited.
        max_redemptions -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        created_by -> Uuid,
        updated_by -> Uuid,
        deleted_at -> Nullable<Timestamptz>,
        deleted_by -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Ways a booking can be paid.
    payment_methods (id) {
        id -> Uuid,
        slug -> Varchar,
        display_name -> Varchar,
        /// Settlement channel, e.g. `card` or `bank-transfer`.
        kind -> Varchar,
        enabled -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        created_by -> Uuid,
        updated_by -> Uuid,
        deleted_at -> Nullable<Timestamptz>,
        deleted_by -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Bookable advertising placements.
    ad_slots (id) {
        id -> Uuid,
        slug -> Varchar,
        /// Rendering position, e.g. `home-top`.
        placement -> Varchar,
        /// Destination targeting; null for network-wide slots.
        destination_id -> Nullable<Uuid>,
        starts_at -> Timestamptz,
        ends_at -> Timestamptz,
        /// Daily price in minor currency units.
        price_per_day -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        created_by -> Uuid,
        updated_by -> Uuid,
        deleted_at -> Nullable<Timestamptz>,
        deleted_by -> Nullable<Uuid>,
    }
}
