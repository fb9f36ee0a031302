use std::collections::HashSet;

use super::models::CandidateLocation;

/// Drop candidates whose entry id has already been resolved.
///
/// Order of `candidates` is preserved; neither input needs to be sorted.
pub fn reconcile(
    candidates: Vec<CandidateLocation>,
    resolved_entry_ids: &HashSet<i64>,
) -> Vec<CandidateLocation> {
    candidates
        .into_iter()
        .filter(|c| !resolved_entry_ids.contains(&c.entry_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::locations::models::Coordinates;

    fn candidates(ids: &[i64]) -> Vec<CandidateLocation> {
        ids.iter()
            .map(|id| CandidateLocation::new(*id, Coordinates::new(36.0, 36.0), 0))
            .collect()
    }

    fn ids(locations: &[CandidateLocation]) -> Vec<i64> {
        locations.iter().map(|l| l.entry_id).collect()
    }

    #[test]
    fn test_removes_resolved_and_keeps_order() {
        let resolved: HashSet<i64> = [4, 1, 9].into_iter().collect();
        let out = reconcile(candidates(&[7, 1, 3, 4, 2, 9, 5]), &resolved);
        assert_eq!(ids(&out), vec![7, 3, 2, 5]);
    }

    #[test]
    fn test_adjacent_resolved_entries_are_all_removed() {
        let resolved: HashSet<i64> = [2, 3].into_iter().collect();
        let out = reconcile(candidates(&[1, 2, 3, 4]), &resolved);
        assert_eq!(ids(&out), vec![1, 4]);
    }

    #[test]
    fn test_empty_resolved_set_is_identity() {
        let out = reconcile(candidates(&[3, 2, 1]), &HashSet::new());
        assert_eq!(ids(&out), vec![3, 2, 1]);
    }

    #[test]
    fn test_everything_resolved() {
        let resolved: HashSet<i64> = [1, 2].into_iter().collect();
        assert!(reconcile(candidates(&[2, 1]), &resolved).is_empty());
    }
}
