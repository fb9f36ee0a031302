use serde::{Deserialize, Serialize};

use super::Coordinates;

/// An unresolved report surfaced by the upstream feed.
///
/// Field names on the wire follow the feed (`loc`) and the reviewer UI
/// (`original_message`, `original_location`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateLocation {
    pub entry_id: i64,
    #[serde(rename = "loc")]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub epoch: i64,
    /// Filled in by the selector from the entry detail
    #[serde(
        rename = "original_message",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub message_text: Option<String>,
    /// Map link derived from `coordinates`
    #[serde(
        rename = "original_location",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_location_url: Option<String>,
}

impl CandidateLocation {
    pub fn new(entry_id: i64, coordinates: Coordinates, epoch: i64) -> Self {
        Self {
            entry_id,
            coordinates,
            epoch,
            message_text: None,
            original_location_url: None,
        }
    }

    /// Attach the message text and the derived map link for presentation
    pub fn with_message(mut self, message_text: String) -> Self {
        self.original_location_url = Some(self.coordinates.map_link());
        self.message_text = Some(message_text);
        self
    }
}

/// Per-entry detail from the feed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateDetail {
    #[serde(rename = "full_text", default)]
    pub message_text: String,
    #[serde(default)]
    pub formatted_address: String,
}

/// Envelope of the feed's area snapshot endpoint
#[derive(Debug, Deserialize)]
pub struct FeedSnapshot {
    pub results: Vec<CandidateLocation>,
}
