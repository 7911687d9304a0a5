use std::collections::BTreeSet;

use crate::core::ranking::PreferenceList;
use crate::models::{ParticipantId, RoleAssignment, ScoreMatrix};

/// Where a proposer currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposerState {
    Free,
    Engaged(ParticipantId),
}

/// A receiver's tentative partner and how much the receiver values them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engagement {
    pub proposer: ParticipantId,
    pub score: f64,
}

/// What happened to a single proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalOutcome {
    /// Receiver was unengaged and accepted
    Accepted,
    /// Receiver dropped the given incumbent for the proposer
    Replaced(ParticipantId),
    /// Receiver kept its incumbent (ties go to the incumbent)
    Rejected,
}

/// Deferred-acceptance state for one matching run.
///
/// All per-participant tables are indexed by participant id. Free proposers
/// that still have untried candidates wait in `pending`; the lowest id is
/// always served first, which fixes the result when scores tie.
#[derive(Debug)]
pub struct DeferredAcceptance<'a> {
    filtered: &'a ScoreMatrix,
    lists: Vec<PreferenceList>,
    cursors: Vec<usize>,
    proposer_state: Vec<ProposerState>,
    current_proposer: Vec<Option<Engagement>>,
    pending: BTreeSet<ParticipantId>,
    proposals: usize,
}

impl<'a> DeferredAcceptance<'a> {
    /// Set up the engine. `lists[k]` is the preference list of
    /// `roles.proposers[k]`.
    pub fn new(
        filtered: &'a ScoreMatrix,
        roles: &RoleAssignment,
        lists: Vec<PreferenceList>,
    ) -> Self {
        let n = filtered.len();
        assert_eq!(
            lists.len(),
            roles.proposers.len(),
            "one preference list per proposer"
        );

        let mut is_receiver = vec![false; n];
        for &r in &roles.receivers {
            is_receiver[r] = true;
        }

        let mut by_id = vec![PreferenceList::new(); n];
        let mut pending = BTreeSet::new();
        for (&p, list) in roles.proposers.iter().zip(lists) {
            assert!(!is_receiver[p], "participant {} holds both roles", p);
            let mut seen = BTreeSet::new();
            for &r in &list {
                assert!(is_receiver[r], "proposer {} lists non-receiver {}", p, r);
                assert!(seen.insert(r), "proposer {} lists receiver {} twice", p, r);
            }
            if !list.is_empty() {
                pending.insert(p);
            }
            by_id[p] = list;
        }

        Self {
            filtered,
            lists: by_id,
            cursors: vec![0; n],
            proposer_state: vec![ProposerState::Free; n],
            current_proposer: vec![None; n],
            pending,
            proposals: 0,
        }
    }

    /// Run proposals until no free proposer has an untried candidate left.
    ///
    /// Each iteration consumes one (proposer, candidate) pair, so the loop
    /// stops after at most the total length of all preference lists.
    pub fn run(&mut self) {
        while let Some(p) = self.pending.pop_first() {
            let r = self.next_candidate(p);
            let outcome = self.propose(p, r);
            tracing::trace!("Proposal {} -> {}: {:?}", p, r, outcome);
        }

        tracing::debug!(
            "Deferred acceptance finished after {} proposals, {} engagements",
            self.proposals,
            self.current_proposer.iter().flatten().count()
        );
    }

    /// Offer `p` to `r` and let `r` decide
    fn propose(&mut self, p: ParticipantId, r: ParticipantId) -> ProposalOutcome {
        self.proposals += 1;
        let score = self.filtered.get(r, p);

        match self.current_proposer[r] {
            None => {
                self.engage(p, r);
                ProposalOutcome::Accepted
            }
            Some(incumbent) if score > incumbent.score => {
                self.free(incumbent.proposer);
                self.engage(p, r);
                ProposalOutcome::Replaced(incumbent.proposer)
            }
            Some(_) => {
                self.reject(p);
                ProposalOutcome::Rejected
            }
        }
    }

    /// Take `p`'s next untried candidate and advance its cursor
    fn next_candidate(&mut self, p: ParticipantId) -> ParticipantId {
        let cursor = self.cursors[p];
        assert!(
            cursor < self.lists[p].len(),
            "proposer {} scheduled with an exhausted preference list",
            p
        );
        self.cursors[p] = cursor + 1;
        self.lists[p][cursor]
    }

    fn has_untried(&self, p: ParticipantId) -> bool {
        self.cursors[p] < self.lists[p].len()
    }

    fn engage(&mut self, p: ParticipantId, r: ParticipantId) {
        assert_eq!(
            self.proposer_state[p],
            ProposerState::Free,
            "proposer {} engaged twice",
            p
        );
        assert!(
            self.current_proposer[r].is_none(),
            "receiver {} double-booked",
            r
        );
        let score = self.filtered.get(r, p);
        assert!(score > 0.0, "infeasible engagement {} -> {}", p, r);

        self.proposer_state[p] = ProposerState::Engaged(r);
        self.current_proposer[r] = Some(Engagement { proposer: p, score });
    }

    /// Release `p` from its receiver; it resumes from its next untried candidate
    fn free(&mut self, p: ParticipantId) {
        let r = match self.proposer_state[p] {
            ProposerState::Engaged(r) => r,
            ProposerState::Free => panic!("freeing proposer {} that is not engaged", p),
        };
        assert_eq!(
            self.current_proposer[r].map(|e| e.proposer),
            Some(p),
            "receiver {} not held by proposer {}",
            r,
            p
        );

        self.current_proposer[r] = None;
        self.proposer_state[p] = ProposerState::Free;
        self.requeue(p);
    }

    fn reject(&mut self, p: ParticipantId) {
        assert_eq!(self.proposer_state[p], ProposerState::Free);
        self.requeue(p);
    }

    fn requeue(&mut self, p: ParticipantId) {
        if self.has_untried(p) {
            self.pending.insert(p);
        }
    }

    pub fn proposer_state(&self, p: ParticipantId) -> ProposerState {
        self.proposer_state[p]
    }

    /// O(1) lookup of a receiver's current partner
    pub fn current_proposer(&self, r: ParticipantId) -> Option<Engagement> {
        self.current_proposer[r]
    }

    pub fn proposals(&self) -> usize {
        self.proposals
    }

    /// Final engagements indexed by receiver id
    pub fn into_engagements(self) -> Vec<Option<Engagement>> {
        self.current_proposer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ranking::build_preference_lists;

    fn run(scores: Vec<Vec<f64>>, proposers: Vec<usize>, receivers: Vec<usize>) -> (Vec<Option<Engagement>>, usize) {
        let filtered = ScoreMatrix::new(scores).unwrap();
        let roles = RoleAssignment { proposers, receivers };
        let lists = build_preference_lists(&filtered, &roles.proposers, &roles.receivers);
        let mut engine = DeferredAcceptance::new(&filtered, &roles, lists);
        engine.run();
        let proposals = engine.proposals();
        (engine.into_engagements(), proposals)
    }

    fn partner(engagements: &[Option<Engagement>], r: usize) -> Option<usize> {
        engagements[r].map(|e| e.proposer)
    }

    #[test]
    fn test_receiver_upgrades() {
        // Both proposers want receiver 2; receiver 2 prefers proposer 1
        let scores = vec![
            vec![0.0, 0.0, 9.0, 1.0],
            vec![0.0, 0.0, 8.0, 2.0],
            vec![3.0, 7.0, 0.0, 0.0],
            vec![5.0, 5.0, 0.0, 0.0],
        ];
        let (engagements, proposals) = run(scores, vec![0, 1], vec![2, 3]);

        assert_eq!(partner(&engagements, 2), Some(1));
        assert_eq!(partner(&engagements, 3), Some(0));
        assert_eq!(proposals, 3);
    }

    #[test]
    fn test_incumbent_wins_ties() {
        let scores = vec![
            vec![0.0, 0.0, 9.0],
            vec![0.0, 0.0, 9.0],
            vec![4.0, 4.0, 0.0],
        ];
        let (engagements, _) = run(scores, vec![0, 1], vec![2]);

        assert_eq!(partner(&engagements, 2), Some(0));
    }

    #[test]
    fn test_displaced_proposer_resumes_from_cursor() {
        // Proposer 0 is bumped from 3 by proposer 1, then settles for 4
        let scores = vec![
            vec![0.0, 0.0, 0.0, 9.0, 5.0],
            vec![0.0, 0.0, 0.0, 9.0, 1.0],
            vec![0.0, 0.0, 0.0, 0.0, 0.0],
            vec![1.0, 6.0, 0.0, 0.0, 0.0],
            vec![2.0, 2.0, 0.0, 0.0, 0.0],
        ];
        let (engagements, proposals) = run(scores, vec![0, 1], vec![2, 3, 4]);

        assert_eq!(partner(&engagements, 3), Some(1));
        assert_eq!(partner(&engagements, 4), Some(0));
        assert_eq!(partner(&engagements, 2), None);
        assert_eq!(proposals, 3);
    }

    #[test]
    fn test_proposer_with_empty_list_stays_free() {
        let scores = vec![
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ];
        let filtered = ScoreMatrix::new(scores).unwrap();
        let roles = RoleAssignment { proposers: vec![0], receivers: vec![1, 2] };
        let mut engine = DeferredAcceptance::new(&filtered, &roles, vec![vec![]]);
        engine.run();

        assert_eq!(engine.proposer_state(0), ProposerState::Free);
        assert_eq!(engine.proposals(), 0);
        assert!(engine.current_proposer(1).is_none());
    }

    #[test]
    fn test_engagement_records_receiver_score() {
        let scores = vec![vec![0.0, 3.0], vec![7.5, 0.0]];
        let (engagements, _) = run(scores, vec![0], vec![1]);

        assert_eq!(engagements[1], Some(Engagement { proposer: 0, score: 7.5 }));
    }

    #[test]
    #[should_panic(expected = "lists non-receiver")]
    fn test_rejects_list_with_non_receiver() {
        let filtered = ScoreMatrix::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let roles = RoleAssignment { proposers: vec![0], receivers: vec![1] };
        let _ = DeferredAcceptance::new(&filtered, &roles, vec![vec![0]]);
    }

    #[test]
    #[should_panic(expected = "twice")]
    fn test_rejects_duplicate_candidate() {
        let filtered = ScoreMatrix::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let roles = RoleAssignment { proposers: vec![0], receivers: vec![1] };
        let _ = DeferredAcceptance::new(&filtered, &roles, vec![vec![1, 1]]);
    }
}
