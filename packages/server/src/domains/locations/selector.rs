//! Duplicate-avoiding random selection.
//!
//! Candidates are tried in random order without replacement. Each attempt fetches
//! the entry's message text and rejects it when an already-resolved record
//! carries the same text (the same report is often re-posted upstream under a
//! new entry id). Running out of candidates is a normal outcome.

use rand::Rng;
use tracing::{debug, info};

use super::models::CandidateLocation;
use crate::common::{ReviewError, ReviewResult};
use crate::kernel::{BaseFeedClient, BaseResolutionStore};

/// Indices into a candidate list that have not been tried yet.
///
/// Scoped to a single request.
#[derive(Debug)]
pub struct CandidatePool {
    remaining: Vec<usize>,
    tried: Vec<usize>,
}

impl CandidatePool {
    pub fn new(size: usize) -> Self {
        Self {
            remaining: (0..size).collect(),
            tried: Vec::with_capacity(size),
        }
    }

    /// Take one untried index uniformly at random
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.remaining.is_empty() {
            return None;
        }
        let slot = rng.gen_range(0..self.remaining.len());
        let index = self.remaining.swap_remove(slot);
        self.tried.push(index);
        Some(index)
    }

    pub fn tried(&self) -> &[usize] {
        &self.tried
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Pick a candidate whose message text is not already resolved.
///
/// Returns the candidate augmented with its message text and map link, or
/// `None` when every candidate turned out to be a duplicate.
pub async fn select_fresh_candidate<R: Rng + Send + ?Sized>(
    candidates: &[CandidateLocation],
    feed: &dyn BaseFeedClient,
    resolutions: &dyn BaseResolutionStore,
    rng: &mut R,
) -> ReviewResult<Option<CandidateLocation>> {
    let mut pool = CandidatePool::new(candidates.len());

    while let Some(index) = pool.draw(rng) {
        let candidate = &candidates[index];

        let detail = feed
            .fetch_detail(candidate.entry_id)
            .await
            .map_err(ReviewError::Retrieval)?;

        let duplicate = is_known_message(&detail.message_text, resolutions).await?;

        if !duplicate {
            debug!(
                entry_id = candidate.entry_id,
                attempts = pool.tried().len(),
                "Selected candidate"
            );
            return Ok(Some(candidate.clone().with_message(detail.message_text)));
        }

        debug!(entry_id = candidate.entry_id, "Skipping duplicate message");
    }

    info!(
        pool_size = candidates.len(),
        "No eligible candidate, all tried entries are duplicates"
    );
    Ok(None)
}

/// Whether an already-resolved record carries `message_text`.
///
/// Empty text identifies nothing and never counts as a duplicate.
async fn is_known_message(
    message_text: &str,
    resolutions: &dyn BaseResolutionStore,
) -> ReviewResult<bool> {
    if message_text.trim().is_empty() {
        return Ok(false);
    }
    resolutions
        .exists_by_message_text(message_text)
        .await
        .map_err(ReviewError::Store)
}
