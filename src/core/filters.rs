use crate::models::{GenderIdentity, GenderPreference, ParticipantId, ScoreMatrix};

/// Check whether two participants may be paired at all.
///
/// Both directions must hold: `b`'s identity has to suit `a`'s preference
/// and `a`'s identity has to suit `b`'s preference.
#[inline]
pub fn is_feasible_pair(
    identity_a: GenderIdentity,
    preference_a: GenderPreference,
    identity_b: GenderIdentity,
    preference_b: GenderPreference,
) -> bool {
    preference_a.accepts(identity_b) && preference_b.accepts(identity_a)
}

/// Zero out every structurally infeasible pair.
///
/// Returns a derived matrix; `raw` is left as the auditable input. Feasible
/// cells keep their raw score and the diagonal is always zero.
pub fn filter_compatibility(
    raw: &ScoreMatrix,
    identities: &[GenderIdentity],
    preferences: &[GenderPreference],
) -> ScoreMatrix {
    debug_assert_eq!(raw.len(), identities.len());
    debug_assert_eq!(raw.len(), preferences.len());

    let filtered = raw.map_cells(|i: ParticipantId, j: ParticipantId, score| {
        if i != j
            && is_feasible_pair(identities[i], preferences[i], identities[j], preferences[j])
        {
            score
        } else {
            0.0
        }
    });

    tracing::debug!(
        "Compatibility filter kept {} of {} scored pairs",
        count_nonzero(&filtered),
        count_nonzero(raw)
    );

    filtered
}

fn count_nonzero(matrix: &ScoreMatrix) -> usize {
    matrix
        .rows()
        .iter()
        .map(|row| row.iter().filter(|&&s| s > 0.0).count())
        .sum()
}
