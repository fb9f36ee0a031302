use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref SHORT_MAPS_URL: Regex = Regex::new(r"^https://goo\.gl/maps/.*").unwrap();
    static ref LATITUDE_MARKER: Regex = Regex::new(r"!3d(-?\d+\.\d+)").unwrap();
    static ref LONGITUDE_MARKER: Regex = Regex::new(r"!4d(-?\d+\.\d+)").unwrap();
}

/// A coordinate could not be recovered from a resolved map URL
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodeParseError {
    #[error("no {field} marker ({marker}) in map URL")]
    MissingMarker {
        field: &'static str,
        marker: &'static str,
    },

    #[error("invalid {field} value {value:?} in map URL")]
    InvalidNumber { field: &'static str, value: String },
}

/// Build the Google Maps link operators open to inspect a point.
///
/// Coordinates are always rendered with six decimal places so the same point
/// yields the same link.
pub fn map_link(lat: f64, lng: f64) -> String {
    format!(
        "https://www.google.com/maps/?q={:.6},{:.6}&ll={:.6},{:.6}&z=21",
        lat, lng, lat, lng
    )
}

/// Whether `url` is a shortened, shareable Google Maps link
pub fn is_short_maps_url(url: &str) -> bool {
    SHORT_MAPS_URL.is_match(url)
}

/// Latitude from the `!3d<lat>` data parameter of an expanded map URL
pub fn extract_latitude(url: &str) -> Result<f64, GeocodeParseError> {
    extract_marker(url, &LATITUDE_MARKER, "latitude", "!3d")
}

/// Longitude from the `!4d<lng>` data parameter of an expanded map URL
pub fn extract_longitude(url: &str) -> Result<f64, GeocodeParseError> {
    extract_marker(url, &LONGITUDE_MARKER, "longitude", "!4d")
}

fn extract_marker(
    url: &str,
    pattern: &Regex,
    field: &'static str,
    marker: &'static str,
) -> Result<f64, GeocodeParseError> {
    let raw = pattern
        .captures(url)
        .and_then(|caps| caps.get(1))
        .ok_or(GeocodeParseError::MissingMarker { field, marker })?
        .as_str();

    raw.parse().map_err(|_| GeocodeParseError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPANDED: &str = "https://www.google.com/maps/place/Antakya/@36.2,36.1,17z/data=!3m1!4b1!4m5!3m4!1s0x0:0x0!8m2!3d36.2021047!4d36.1603459";

    #[test]
    fn test_map_link_is_deterministic() {
        assert_eq!(
            map_link(36.5, 35.9),
            "https://www.google.com/maps/?q=36.500000,35.900000&ll=36.500000,35.900000&z=21"
        );
        assert_eq!(map_link(36.5, 35.9), map_link(36.5, 35.9));
    }

    #[test]
    fn test_map_link_negative_coordinates() {
        assert_eq!(
            map_link(-33.8688, 151.2093),
            "https://www.google.com/maps/?q=-33.868800,151.209300&ll=-33.868800,151.209300&z=21"
        );
    }

    #[test]
    fn test_short_maps_url() {
        assert!(is_short_maps_url("https://goo.gl/maps/AbCdEf123"));
        assert!(!is_short_maps_url("https://example.com/not-a-maps-link"));
        assert!(!is_short_maps_url("Atatürk Cd. No:5, Antakya"));
        assert!(!is_short_maps_url("http://goo.gl/maps/AbCdEf123"));
        assert!(!is_short_maps_url("https://googlexgl/maps/x"));
    }

    #[test]
    fn test_extract_coordinates() {
        assert_eq!(extract_latitude(EXPANDED), Ok(36.2021047));
        assert_eq!(extract_longitude(EXPANDED), Ok(36.1603459));
    }

    #[test]
    fn test_extract_negative_coordinates() {
        let url = "https://www.google.com/maps/data=!3d-12.5!4d-77.25";
        assert_eq!(extract_latitude(url), Ok(-12.5));
        assert_eq!(extract_longitude(url), Ok(-77.25));
    }

    #[test]
    fn test_missing_marker_is_reported_per_coordinate() {
        let url = "https://www.google.com/maps/data=!3d36.5";
        assert_eq!(extract_latitude(url), Ok(36.5));
        assert_eq!(
            extract_longitude(url),
            Err(GeocodeParseError::MissingMarker {
                field: "longitude",
                marker: "!4d"
            })
        );
    }
}
