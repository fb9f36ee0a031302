use tracing::info;

use super::{locate_decision, persist_decision};
use crate::common::utils::is_short_maps_url;
use crate::common::{ReviewError, ReviewResult};
use crate::domains::operators::attribute_submitter;
use crate::domains::resolutions::models::{ResolveBody, ResolvedLocation};
use crate::kernel::ServerDeps;

/// Operator submission pipeline.
///
/// validate shape -> validate map link -> already-resolved guard ->
/// recover original point -> geocode -> attribute -> append.
///
/// The already-resolved guard is a read before the write; two concurrent
/// submissions for one entry can both land.
pub async fn submit_resolution(
    body: &[u8],
    api_key: Option<&str>,
    deps: &ServerDeps,
) -> ReviewResult<ResolvedLocation> {
    let body = ResolveBody::from_json(body)?;

    if body.has_new_address() && !is_short_maps_url(body.new_address.trim()) {
        return Err(ReviewError::InvalidMapsUrl);
    }

    let already_resolved = deps
        .resolutions
        .exists_by_entry_id(body.id)
        .await
        .map_err(ReviewError::Store)?;
    if already_resolved {
        info!(entry_id = body.id, "Entry already checked");
        return Err(ReviewError::AlreadyResolved(body.id));
    }

    let placement = locate_decision(&body, deps).await?;
    let submitter = attribute_submitter(api_key, deps.operators.as_ref()).await?;

    persist_decision(&body, placement, submitter.as_ref(), false, deps).await
}
