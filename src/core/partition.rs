use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::core::error::ValidationError;
use crate::models::{ParticipantId, PartitionStrategy, RoleAssignment};

/// Split participants `0..n` into proposers and receivers.
///
/// Proposers get `n / 2` ids and receivers the rest, except for an explicit
/// split which may hand the extra participant to either side. Both role
/// lists come back sorted.
pub fn partition_participants(
    n: usize,
    strategy: &PartitionStrategy,
) -> Result<RoleAssignment, ValidationError> {
    let half = n / 2;

    let proposers: Vec<ParticipantId> = match strategy {
        PartitionStrategy::Contiguous => (0..half).collect(),
        PartitionStrategy::Alternating => (0..n).step_by(2).take(half).collect(),
        PartitionStrategy::Random { seed } => {
            let mut rng = StdRng::seed_from_u64(*seed);
            let mut ids: Vec<ParticipantId> = (0..n).collect();
            ids.shuffle(&mut rng);
            ids.truncate(half);
            ids
        }
        PartitionStrategy::Explicit { proposers } => {
            validate_explicit(n, proposers)?;
            proposers.clone()
        }
    };

    let mut is_proposer = vec![false; n];
    for &id in &proposers {
        is_proposer[id] = true;
    }

    let mut proposers = proposers;
    proposers.sort_unstable();
    let receivers: Vec<ParticipantId> = (0..n).filter(|&id| !is_proposer[id]).collect();

    tracing::debug!(
        "Partitioned {} participants ({:?}): {} proposers, {} receivers",
        n,
        strategy,
        proposers.len(),
        receivers.len()
    );

    Ok(RoleAssignment { proposers, receivers })
}

fn validate_explicit(n: usize, proposers: &[ParticipantId]) -> Result<(), ValidationError> {
    let mut seen = vec![false; n];
    for &id in proposers {
        if id >= n {
            return Err(ValidationError::InvalidPartition(format!(
                "proposer id {} out of range for {} participants",
                id, n
            )));
        }
        if std::mem::replace(&mut seen[id], true) {
            return Err(ValidationError::InvalidPartition(format!(
                "proposer id {} listed more than once",
                id
            )));
        }
    }

    let (floor, ceil) = (n / 2, (n + 1) / 2);
    if proposers.len() != floor && proposers.len() != ceil {
        return Err(ValidationError::InvalidPartition(format!(
            "{} proposers for {} participants, expected {} or {}",
            proposers.len(),
            n,
            floor,
            ceil
        )));
    }

    Ok(())
}
