//! Shared tail of the submission pipeline: recover the original point,
//! geocode the correction, attribute and persist.

use sqlx::types::Json;
use tracing::{debug, info, warn};

use crate::common::utils::{extract_latitude, extract_longitude};
use crate::common::{ReviewError, ReviewResult};
use crate::domains::locations::models::Coordinates;
use crate::domains::operators::models::Operator;
use crate::domains::resolutions::models::{ResolveBody, ResolvedLocation};
use crate::kernel::{BaseUrlResolver, ServerDeps};

/// Coordinates of `entry_id` in the current feed snapshot
pub async fn original_coordinates(entry_id: i64, deps: &ServerDeps) -> ReviewResult<Coordinates> {
    let snapshot = deps
        .feed
        .fetch_all()
        .await
        .map_err(ReviewError::Retrieval)?;

    snapshot
        .into_iter()
        .find(|c| c.entry_id == entry_id)
        .map(|c| c.coordinates)
        .ok_or(ReviewError::UnknownEntry(entry_id))
}

/// Apply the operator's map link to `original`.
///
/// Skipped when the operator reported no error or gave no link. Each
/// coordinate that cannot be parsed keeps its original value.
pub async fn corrected_coordinates(
    body: &ResolveBody,
    original: Coordinates,
    resolver: &dyn BaseUrlResolver,
) -> ReviewResult<Coordinates> {
    if body.reports_no_error() || !body.has_new_address() {
        return Ok(original);
    }

    let long_url = resolver
        .resolve(body.new_address.trim())
        .await
        .map_err(ReviewError::Retrieval)?;

    let mut coordinates = original;
    match extract_latitude(&long_url) {
        Ok(lat) => coordinates.lat = lat,
        Err(e) => warn!(entry_id = body.id, error = %e, "Keeping original latitude"),
    }
    match extract_longitude(&long_url) {
        Ok(lng) => coordinates.lng = lng,
        Err(e) => warn!(entry_id = body.id, error = %e, "Keeping original longitude"),
    }

    Ok(coordinates)
}

/// Message text to record for `body`.
///
/// Falls back to the feed detail when the operator sent none, so the
/// record can still be matched against re-posts of the same report.
pub async fn decision_message_text(body: &ResolveBody, deps: &ServerDeps) -> ReviewResult<String> {
    if !body.message_text.trim().is_empty() {
        return Ok(body.message_text.clone());
    }

    let detail = deps
        .feed
        .fetch_detail(body.id)
        .await
        .map_err(ReviewError::Retrieval)?;
    debug!(entry_id = body.id, "Message text taken from feed detail");
    Ok(detail.message_text)
}

/// Where a decision points: the feed's original point and the corrected one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub original: Coordinates,
    pub corrected: Coordinates,
}

/// Recover the original point and geocode the correction
pub async fn locate_decision(body: &ResolveBody, deps: &ServerDeps) -> ReviewResult<Placement> {
    let original = original_coordinates(body.id, deps).await?;
    let corrected = corrected_coordinates(body, original, deps.url_resolver.as_ref()).await?;
    Ok(Placement {
        original,
        corrected,
    })
}

/// Build and append the resolved record for `body`
pub async fn persist_decision(
    body: &ResolveBody,
    placement: Placement,
    submitter: Option<&Operator>,
    verified: bool,
    deps: &ServerDeps,
) -> ReviewResult<ResolvedLocation> {
    let submitter: Option<Json<_>> = submitter.map(|o| Json(o.to_ref()));
    let message_text = decision_message_text(body, deps).await?;
    let record = ResolvedLocation::builder()
        .entry_id(body.id)
        .submitter(submitter)
        .coordinates(placement.corrected)
        .corrected(body.reports_no_error())
        .verified(verified)
        .original_address(placement.original.map_link())
        .corrected_address(body.new_address.clone())
        .open_address(body.open_address.clone())
        .apartment(body.apartment.clone())
        .location_type(body.location_type)
        .reason(body.reason.clone())
        .message_text(message_text)
        .build();

    deps.resolutions
        .insert_resolved(&record)
        .await
        .map_err(ReviewError::Store)?;

    info!(
        entry_id = record.entry_id,
        corrected = record.corrected,
        verified = record.verified,
        attributed = record.submitter.is_some(),
        "Recorded resolution"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::resolutions::models::LocationType;
    use crate::kernel::test_dependencies::MockUrlResolver;

    const SHORT: &str = "https://goo.gl/maps/xyz";

    fn body(reason: &str, new_address: &str) -> ResolveBody {
        ResolveBody {
            id: 1,
            location_type: LocationType::Wreckage,
            new_address: new_address.to_string(),
            open_address: String::new(),
            apartment: String::new(),
            reason: reason.to_string(),
            message_text: String::new(),
        }
    }

    #[tokio::test]
    async fn test_correction_overwrites_both_coordinates() {
        let resolver = MockUrlResolver::new()
            .with_redirect(SHORT, "https://www.google.com/maps/place/x/data=!3d37.1!4d37.2");
        let original = Coordinates::new(36.0, 36.0);

        let corrected = corrected_coordinates(&body("İşaretleme Hatası", SHORT), original, &resolver)
            .await
            .unwrap();
        assert_eq!(corrected, Coordinates::new(37.1, 37.2));
    }

    #[tokio::test]
    async fn test_partial_parse_keeps_original_component() {
        let resolver =
            MockUrlResolver::new().with_redirect(SHORT, "https://www.google.com/maps/data=!4d38.5");
        let original = Coordinates::new(36.0, 36.0);

        let corrected = corrected_coordinates(&body("Adres Yok", SHORT), original, &resolver)
            .await
            .unwrap();
        assert_eq!(corrected, Coordinates::new(36.0, 38.5));
    }

    #[tokio::test]
    async fn test_no_error_reason_skips_geocoding() {
        let resolver = MockUrlResolver::new();
        let original = Coordinates::new(36.0, 36.0);

        let corrected = corrected_coordinates(&body("Hata Yok", SHORT), original, &resolver)
            .await
            .unwrap();
        assert_eq!(corrected, original);
        assert!(resolver.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_link_is_a_retrieval_error() {
        let resolver = MockUrlResolver::new();
        let result = corrected_coordinates(
            &body("İşaretleme Hatası", SHORT),
            Coordinates::new(36.0, 36.0),
            &resolver,
        )
        .await;
        assert!(matches!(result, Err(ReviewError::Retrieval(_))));
    }
}
