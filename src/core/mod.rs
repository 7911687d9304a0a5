// Core algorithm exports
pub mod engine;
pub mod error;
pub mod filters;
pub mod matcher;
pub mod partition;
pub mod ranking;

pub use engine::{DeferredAcceptance, Engagement, ProposalOutcome, ProposerState};
pub use error::ValidationError;
pub use filters::{filter_compatibility, is_feasible_pair};
pub use matcher::{assemble, run_matching, MatchOutcome, Matcher};
pub use partition::partition_participants;
pub use ranking::{build_preference_lists, rank_candidates, PreferenceList};
