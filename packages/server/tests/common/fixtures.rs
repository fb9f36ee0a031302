//! Test fixtures for creating test data.

use review_core::common::utils::hash_api_key;
use review_core::domains::locations::Coordinates;
use review_core::domains::operators::{Operator, PermissionLevel};
use review_core::domains::resolutions::{LocationType, ResolvedLocation};
use serde_json::{json, Value};

pub const SUBMITTER_KEY: &str = "submitterKeyAAAAAAAAAAAAAAAAAAAA";
pub const MODERATOR_KEY: &str = "moderatorKeyBBBBBBBBBBBBBBBBBBBB";

pub const SHORT_LINK: &str = "https://goo.gl/maps/abc123";
pub const LONG_LINK: &str =
    "https://www.google.com/maps/place/Antakya/@36.2,36.1,17z/data=!3m1!4b1!3d36.2025!4d36.1604";

/// Operator with submit rights, keyed by [`SUBMITTER_KEY`]
pub fn submitter() -> Operator {
    Operator::new(
        "Ayşe",
        "@ayse",
        hash_api_key(SUBMITTER_KEY),
        PermissionLevel::Submit,
    )
}

/// Operator with moderate rights, keyed by [`MODERATOR_KEY`]
pub fn moderator() -> Operator {
    Operator::new(
        "Mehmet",
        "@mehmet",
        hash_api_key(MODERATOR_KEY),
        PermissionLevel::Moderate,
    )
}

/// An earlier decision for `entry_id` carrying `message_text`
pub fn resolved_record(entry_id: i64, message_text: &str) -> ResolvedLocation {
    ResolvedLocation::builder()
        .entry_id(entry_id)
        .coordinates(Coordinates::new(36.2, 36.1))
        .location_type(LocationType::Wreckage)
        .reason("Hata Yok".to_string())
        .message_text(message_text.to_string())
        .build()
}

/// `/resolve` body for `entry_id`
pub fn resolve_body(entry_id: i64, reason: &str, new_address: &str) -> Value {
    json!({
        "id": entry_id,
        "type": 1,
        "new_address": new_address,
        "open_address": "Cumhuriyet Mah. 12. Sokak",
        "apartment": "Yıldız Apt.",
        "reason": reason,
        "tweet_contents": "Enkaz altında 3 kişi var",
    })
}
