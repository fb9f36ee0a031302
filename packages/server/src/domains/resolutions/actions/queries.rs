use crate::common::{ReviewError, ReviewResult};
use crate::domains::resolutions::models::ResolvedLocation;
use crate::kernel::ServerDeps;

pub async fn list_resolved_entries(deps: &ServerDeps) -> ReviewResult<Vec<ResolvedLocation>> {
    deps.resolutions
        .list_resolved()
        .await
        .map_err(ReviewError::Store)
}

/// Earliest decision recorded for `entry_id`
pub async fn find_resolved_entry(
    entry_id: i64,
    deps: &ServerDeps,
) -> ReviewResult<ResolvedLocation> {
    list_resolved_entries(deps)
        .await?
        .into_iter()
        .find(|r| r.entry_id == entry_id)
        .ok_or(ReviewError::RecordNotFound(entry_id))
}
