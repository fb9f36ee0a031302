use super::{locate_decision, persist_decision};
use crate::common::ReviewResult;
use crate::domains::operators::models::Operator;
use crate::domains::resolutions::models::{ResolveBody, ResolvedLocation};
use crate::kernel::ServerDeps;

/// Moderator override: appends a verified decision for an entry, whether or
/// not it was resolved before. No map-link format check.
pub async fn update_entry(
    body: &[u8],
    moderator: &Operator,
    deps: &ServerDeps,
) -> ReviewResult<ResolvedLocation> {
    let body = ResolveBody::from_json(body)?;
    let placement = locate_decision(&body, deps).await?;
    persist_decision(&body, placement, Some(moderator), true, deps).await
}
