//! Moderator-only routes. Authorization happens in
//! [`moderator_auth_middleware`](crate::server::middleware::moderator_auth_middleware).

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    Json,
};

use crate::common::ReviewResult;
use crate::domains::resolutions::{
    find_resolved_entry, list_resolved_entries, update_entry, ResolvedLocation,
};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthOperator;

pub const UPDATE_SUCCESS: &str = "Entry updated.";

/// `GET /admin/locations`
pub async fn list_resolved_entries_handler(
    Extension(state): Extension<AxumAppState>,
) -> ReviewResult<Json<Vec<ResolvedLocation>>> {
    let records = list_resolved_entries(&state.deps).await?;
    Ok(Json(records))
}

/// `GET /admin/locations/:entry_id`
pub async fn get_resolved_entry_handler(
    Extension(state): Extension<AxumAppState>,
    Path(entry_id): Path<i64>,
) -> ReviewResult<Json<ResolvedLocation>> {
    let record = find_resolved_entry(entry_id, &state.deps).await?;
    Ok(Json(record))
}

/// `POST /admin/locations/update`
pub async fn update_entry_handler(
    Extension(state): Extension<AxumAppState>,
    Extension(AuthOperator(moderator)): Extension<AuthOperator>,
    body: Bytes,
) -> ReviewResult<&'static str> {
    update_entry(&body, &moderator, &state.deps).await?;
    Ok(UPDATE_SUCCESS)
}
