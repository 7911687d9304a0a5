use crate::core::{
    engine::{DeferredAcceptance, Engagement},
    error::ValidationError,
    filters::filter_compatibility,
    partition::partition_participants,
    ranking::build_preference_lists,
};
use crate::models::{
    GenderIdentity, GenderPreference, Match, MatchInput, ParticipantId, PartitionStrategy,
    ScoreMatrix,
};

/// Result of one matching run
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Final pairs, ordered by proposer id
    pub matches: Vec<Match>,
    /// Participants left without a partner, ascending
    pub unmatched: Vec<ParticipantId>,
    /// Number of proposals the engine made
    pub proposals: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Compatibility filtering
/// 2. Role partitioning
/// 3. Preference ranking
/// 4. Deferred acceptance
/// 5. Result assembly
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    strategy: PartitionStrategy,
}

impl Matcher {
    pub fn new(strategy: PartitionStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &PartitionStrategy {
        &self.strategy
    }

    /// Run the full pipeline with this matcher's partition strategy
    pub fn run(&self, input: &MatchInput) -> Result<MatchOutcome, ValidationError> {
        self.run_with(input, &self.strategy)
    }

    /// Run the full pipeline with an explicit partition strategy
    pub fn run_with(
        &self,
        input: &MatchInput,
        strategy: &PartitionStrategy,
    ) -> Result<MatchOutcome, ValidationError> {
        let n = input.len();

        let filtered = filter_compatibility(&input.scores, &input.identities(), &input.preferences());
        let roles = partition_participants(n, strategy)?;
        let lists = build_preference_lists(&filtered, &roles.proposers, &roles.receivers);

        let mut engine = DeferredAcceptance::new(&filtered, &roles, lists);
        engine.run();
        let proposals = engine.proposals();

        let matches = assemble(&engine.into_engagements());
        let unmatched = unmatched_participants(n, &matches);

        tracing::info!(
            "Matched {} pairs among {} participants ({} unmatched, {} proposals)",
            matches.len(),
            n,
            unmatched.len(),
            proposals
        );

        Ok(MatchOutcome {
            matches,
            unmatched,
            proposals,
        })
    }

    /// Filtered view of the scores this matcher would work on
    pub fn filtered_scores(&self, input: &MatchInput) -> ScoreMatrix {
        filter_compatibility(&input.scores, &input.identities(), &input.preferences())
    }
}

/// Turn final engagements (indexed by receiver id) into result pairs
pub fn assemble(engagements: &[Option<Engagement>]) -> Vec<Match> {
    let mut matches: Vec<Match> = engagements
        .iter()
        .enumerate()
        .filter_map(|(receiver_id, engagement)| {
            engagement.map(|e| Match {
                proposer_id: e.proposer,
                receiver_id,
            })
        })
        .collect();

    matches.sort_unstable();
    matches
}

fn unmatched_participants(n: usize, matches: &[Match]) -> Vec<ParticipantId> {
    let mut paired = vec![false; n];
    for m in matches {
        paired[m.proposer_id] = true;
        paired[m.receiver_id] = true;
    }
    (0..n).filter(|&id| !paired[id]).collect()
}

/// Compute a stable matching with the default contiguous partition.
///
/// Returns `(proposer_id, receiver_id)` pairs. Participants who end up
/// without a partner are simply absent.
pub fn run_matching(
    scores: Vec<Vec<f64>>,
    identities: &[GenderIdentity],
    preferences: &[GenderPreference],
) -> Result<Vec<(ParticipantId, ParticipantId)>, ValidationError> {
    let input = MatchInput::new(ScoreMatrix::new(scores)?, identities, preferences)?;
    let outcome = Matcher::default().run(&input)?;
    Ok(outcome.matches.into_iter().map(Into::into).collect())
}
