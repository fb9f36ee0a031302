//! One-off repairs over stored decisions.
//!
//! Records are processed in concurrent batches. Upstream failures for a
//! single record are logged and the record is skipped; store failures abort
//! the run.

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::common::utils::{extract_latitude, extract_longitude};
use crate::common::{ReviewError, ReviewResult};
use crate::domains::locations::models::Coordinates;
use crate::domains::resolutions::models::ResolvedLocation;
use crate::kernel::ServerDeps;

pub const DEFAULT_MAINTENANCE_BATCH_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub scanned: usize,
    pub updated: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Updated,
    Skipped,
}

/// Fill in message text for records stored without it, from the feed detail
pub async fn backfill_message_texts(
    deps: &ServerDeps,
    batch_size: usize,
    dry_run: bool,
) -> ReviewResult<MaintenanceReport> {
    let records = deps
        .resolutions
        .list_missing_message_text()
        .await
        .map_err(ReviewError::Store)?;

    run_batches(records, deps, batch_size, move |record, deps| async move {
        let detail = match deps.feed.fetch_detail(record.entry_id).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!(entry_id = record.entry_id, error = %e, "Skipping record, detail unavailable");
                return Ok(Outcome::Skipped);
            }
        };
        if detail.message_text.trim().is_empty() {
            return Ok(Outcome::Skipped);
        }

        if !dry_run {
            deps.resolutions
                .update_message_text(record.id, &detail.message_text)
                .await
                .map_err(ReviewError::Store)?;
        }
        Ok(Outcome::Updated)
    })
    .await
}

/// Recompute coordinates of corrected records from their stored map link.
///
/// A record is only rewritten when both coordinates can be read from the
/// resolved link.
pub async fn regeocode_corrections(
    deps: &ServerDeps,
    batch_size: usize,
    dry_run: bool,
) -> ReviewResult<MaintenanceReport> {
    let records = deps
        .resolutions
        .list_with_corrected_address()
        .await
        .map_err(ReviewError::Store)?;

    run_batches(records, deps, batch_size, move |record, deps| async move {
        let long_url = match deps.url_resolver.resolve(record.corrected_address.trim()).await {
            Ok(url) => url,
            Err(e) => {
                warn!(entry_id = record.entry_id, error = %e, "Skipping record, link unreachable");
                return Ok(Outcome::Skipped);
            }
        };

        let coordinates = match (extract_latitude(&long_url), extract_longitude(&long_url)) {
            (Ok(lat), Ok(lng)) => Coordinates::new(lat, lng),
            (Err(e), _) | (_, Err(e)) => {
                warn!(entry_id = record.entry_id, error = %e, "Skipping record, link has no coordinates");
                return Ok(Outcome::Skipped);
            }
        };
        if coordinates == record.coordinates {
            return Ok(Outcome::Skipped);
        }

        if !dry_run {
            deps.resolutions
                .update_coordinates(record.id, coordinates)
                .await
                .map_err(ReviewError::Store)?;
        }
        Ok(Outcome::Updated)
    })
    .await
}

async fn run_batches<F, Fut>(
    records: Vec<ResolvedLocation>,
    deps: &ServerDeps,
    batch_size: usize,
    task: F,
) -> ReviewResult<MaintenanceReport>
where
    F: Fn(ResolvedLocation, ServerDeps) -> Fut,
    Fut: std::future::Future<Output = ReviewResult<Outcome>> + Send + 'static,
{
    let mut report = MaintenanceReport {
        scanned: records.len(),
        ..Default::default()
    };
    let batch_size = batch_size.max(1);
    let batches = records.len().div_ceil(batch_size);

    let mut records = records.into_iter().peekable();
    let mut batch_number = 0;
    while records.peek().is_some() {
        batch_number += 1;
        let mut tasks = JoinSet::new();
        for record in records.by_ref().take(batch_size) {
            tasks.spawn(task(record, deps.clone()));
        }

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.map_err(|e| ReviewError::Store(e.into()))??;
            match outcome {
                Outcome::Updated => report.updated += 1,
                Outcome::Skipped => report.skipped += 1,
            }
        }

        info!("{}/{} complete.", batch_number, batches);
    }

    Ok(report)
}
