use rayon::prelude::*;
use std::cmp::Ordering;

use crate::models::{ParticipantId, ScoreMatrix};

/// Ordered candidate list of one proposer
pub type PreferenceList = Vec<ParticipantId>;

/// Rank one proposer's receivers by the proposer's filtered score.
///
/// Receivers are kept only when the pair is mutually acceptable (both
/// directions score above zero). Higher scores come first; equal scores go
/// to the lower id.
pub fn rank_candidates(
    filtered: &ScoreMatrix,
    proposer: ParticipantId,
    receivers: &[ParticipantId],
) -> PreferenceList {
    let row = filtered.row(proposer);

    let mut candidates: Vec<ParticipantId> = receivers
        .iter()
        .copied()
        .filter(|&r| row[r] > 0.0 && filtered.get(r, proposer) > 0.0)
        .collect();

    candidates.sort_by(|&a, &b| {
        row[b]
            .partial_cmp(&row[a])
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });

    candidates
}

/// Build every proposer's preference list, in the order of `proposers`.
///
/// Lists are independent of each other, so they are built on the rayon pool.
pub fn build_preference_lists(
    filtered: &ScoreMatrix,
    proposers: &[ParticipantId],
    receivers: &[ParticipantId],
) -> Vec<PreferenceList> {
    let lists: Vec<PreferenceList> = proposers
        .par_iter()
        .map(|&p| rank_candidates(filtered, p, receivers))
        .collect();

    let empty = lists.iter().filter(|list| list.is_empty()).count();
    if empty > 0 {
        tracing::debug!("{} of {} proposers have no feasible candidates", empty, proposers.len());
    }

    lists
}
