use std::collections::HashMap;

use axum::{
    extract::{Extension, Query},
    Json,
};
use rand::{rngs::StdRng, SeedableRng};

use crate::common::ReviewResult;
use crate::domains::locations::{get_location, GetLocationResponse, LocationQuery};
use crate::server::app::AxumAppState;

/// `GET /get-location?city_id=&starting_at=`
///
/// Hands out one unresolved report. Unparseable parameters are ignored.
pub async fn get_location_handler(
    Extension(state): Extension<AxumAppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ReviewResult<Json<GetLocationResponse>> {
    let query = LocationQuery::from_params(&params);
    let mut rng = StdRng::from_entropy();
    let response = get_location(&query, &state.deps, &mut rng).await?;
    Ok(Json(response))
}
