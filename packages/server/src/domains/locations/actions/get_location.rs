use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::common::{ReviewError, ReviewResult};
use crate::domains::locations::filters::{city_box, filter_by_bounding_box, filter_by_min_epoch};
use crate::domains::locations::models::CandidateLocation;
use crate::domains::locations::reconcile::reconcile;
use crate::domains::locations::selector::select_fresh_candidate;
use crate::kernel::ServerDeps;

/// Optional narrowing requested by the reviewer UI.
///
/// Non-positive or unparsable values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationQuery {
    pub city_id: Option<i64>,
    pub starting_at: Option<i64>,
}

impl LocationQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            city_id: positive_param(params, "city_id"),
            starting_at: positive_param(params, "starting_at"),
        }
    }
}

fn positive_param(params: &HashMap<String, String>, name: &str) -> Option<i64> {
    params
        .get(name)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
}

#[derive(Debug, Clone, Serialize)]
pub struct GetLocationResponse {
    /// Size of the filtered pool before selection
    pub count: usize,
    pub location: Option<CandidateLocation>,
}

/// Hand out one unresolved, non-duplicate report.
///
/// fetch -> reconcile -> filter -> select, strictly in that order.
pub async fn get_location<R: Rng + Send + ?Sized>(
    query: &LocationQuery,
    deps: &ServerDeps,
    rng: &mut R,
) -> ReviewResult<GetLocationResponse> {
    info!("Pulling entries");
    let candidates = deps
        .feed
        .fetch_all()
        .await
        .map_err(ReviewError::Retrieval)?;

    let resolved = deps
        .resolutions
        .resolved_entry_ids()
        .await
        .map_err(ReviewError::Store)?;

    let mut pool = reconcile(candidates, &resolved);

    if let Some(city_id) = query.city_id {
        pool = filter_by_bounding_box(pool, city_box(city_id).as_ref());
    }
    if let Some(min_epoch) = query.starting_at {
        pool = filter_by_min_epoch(pool, min_epoch);
    }

    let count = pool.len();
    let location =
        select_fresh_candidate(&pool, deps.feed.as_ref(), deps.resolutions.as_ref(), rng).await?;

    Ok(GetLocationResponse { count, location })
}
