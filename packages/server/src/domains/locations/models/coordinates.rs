use serde::{Deserialize, Serialize};

use crate::common::utils::map_link;

/// A `[lat, lng]` pair.
///
/// On the wire this is a JSON array; extra trailing components sent by the
/// feed are ignored, fewer than two is a decode error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, sqlx::FromRow)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Coordinates {
    #[sqlx(rename = "latitude")]
    pub lat: f64,
    #[sqlx(rename = "longitude")]
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn map_link(&self) -> String {
        map_link(self.lat, self.lng)
    }
}

impl TryFrom<Vec<f64>> for Coordinates {
    type Error = String;

    fn try_from(components: Vec<f64>) -> Result<Self, Self::Error> {
        match components.as_slice() {
            [lat, lng, ..] => Ok(Self::new(*lat, *lng)),
            other => Err(format!(
                "expected [lat, lng], got {} component(s)",
                other.len()
            )),
        }
    }
}

impl From<Coordinates> for Vec<f64> {
    fn from(c: Coordinates) -> Self {
        vec![c.lat, c.lng]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_from_array() {
        let c: Coordinates = serde_json::from_str("[36.5, 35.9]").unwrap();
        assert_eq!(c, Coordinates::new(36.5, 35.9));

        let c: Coordinates = serde_json::from_str("[36.5, 35.9, 120.0]").unwrap();
        assert_eq!(c, Coordinates::new(36.5, 35.9));
    }

    #[test]
    fn test_decode_rejects_short_array() {
        assert!(serde_json::from_str::<Coordinates>("[36.5]").is_err());
        assert!(serde_json::from_str::<Coordinates>("[]").is_err());
    }

    #[test]
    fn test_encode_as_array() {
        let json = serde_json::to_string(&Coordinates::new(1.5, -2.25)).unwrap();
        assert_eq!(json, "[1.5,-2.25]");
    }
}
