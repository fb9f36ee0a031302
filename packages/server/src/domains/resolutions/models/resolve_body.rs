use serde::Deserialize;

use super::LocationType;
use crate::common::{ReviewError, ReviewResult};

/// Reasons meaning "the reported location was right"
pub const NO_ERROR_REASONS: [&str; 3] = ["HATA YOK", "Hata Yok", "hata yok"];

/// Correction payload submitted by an operator
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResolveBody {
    pub id: i64,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    /// Shortened map link pointing at the corrected location
    #[serde(default)]
    pub new_address: String,
    #[serde(default)]
    pub open_address: String,
    #[serde(default)]
    pub apartment: String,
    pub reason: String,
    #[serde(rename = "tweet_contents", default)]
    pub message_text: String,
}

impl ResolveBody {
    pub fn from_json(body: &[u8]) -> ReviewResult<Self> {
        serde_json::from_slice(body)
            .map_err(|e| ReviewError::Validation(format!("Invalid submission: {}", e)))
    }

    /// Whether the operator confirmed the original location
    pub fn reports_no_error(&self) -> bool {
        NO_ERROR_REASONS.contains(&self.reason.as_str())
    }

    pub fn has_new_address(&self) -> bool {
        !self.new_address.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_body() {
        let body = r#"{
            "id": 42,
            "type": 1,
            "new_address": "https://goo.gl/maps/abc",
            "open_address": "Cumhuriyet Mah. 12. Sok.",
            "apartment": "Yıldız Apt.",
            "reason": "İşaretleme Hatası",
            "tweet_contents": "Enkaz altındalar"
        }"#;

        let parsed = ResolveBody::from_json(body.as_bytes()).unwrap();
        assert_eq!(parsed.id, 42);
        assert_eq!(parsed.location_type, LocationType::Wreckage);
        assert_eq!(parsed.message_text, "Enkaz altındalar");
        assert!(parsed.has_new_address());
        assert!(!parsed.reports_no_error());
    }

    #[test]
    fn test_optional_fields_default() {
        let parsed = ResolveBody::from_json(br#"{"id": 1, "type": 2, "reason": "Hata Yok"}"#)
            .unwrap();
        assert!(parsed.new_address.is_empty());
        assert!(!parsed.has_new_address());
        assert!(parsed.reports_no_error());
    }

    #[test]
    fn test_missing_required_fields() {
        for body in [
            &br#"{"type": 1, "reason": "x"}"#[..],
            br#"{"id": 1, "reason": "x"}"#,
            br#"{"id": 1, "type": 1}"#,
            br#"{"id": 1, "type": 9, "reason": "x"}"#,
            b"not json",
        ] {
            assert!(matches!(
                ResolveBody::from_json(body),
                Err(ReviewError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_no_error_sentinels() {
        for reason in NO_ERROR_REASONS {
            let body = ResolveBody::from_json(
                format!(r#"{{"id": 1, "type": 1, "reason": "{}"}}"#, reason).as_bytes(),
            )
            .unwrap();
            assert!(body.reports_no_error());
        }
    }
}
