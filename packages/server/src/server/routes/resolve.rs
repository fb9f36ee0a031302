use axum::{body::Bytes, extract::Extension, http::HeaderMap};

use crate::common::ReviewResult;
use crate::domains::resolutions::submit_resolution;
use crate::server::app::AxumAppState;
use crate::server::middleware::extract_auth_key;

pub const RESOLVE_SUCCESS: &str = "Successfully added!";

/// `POST /resolve`
///
/// Takes the raw body so malformed JSON surfaces as a plain-text 400.
pub async fn resolve_handler(
    Extension(state): Extension<AxumAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ReviewResult<&'static str> {
    submit_resolution(&body, extract_auth_key(&headers), &state.deps).await?;
    Ok(RESOLVE_SUCCESS)
}
