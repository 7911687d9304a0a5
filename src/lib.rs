//! Stable Match - score-driven stable pairing for dating matches
//!
//! This library derives preferences from raw compatibility scores, filters
//! out pairs whose gender identity and preference do not line up, and runs
//! deferred acceptance over a manufactured proposer/receiver split.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{run_matching, MatchOutcome, Matcher, ValidationError};
pub use self::models::{GenderIdentity, GenderPreference, Match, MatchInput, PartitionStrategy, ScoreMatrix};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let pairs = run_matching(
            vec![vec![0.0, 1.0], vec![1.0, 0.0]],
            &[GenderIdentity::NonBinary, GenderIdentity::Male],
            &[GenderPreference::Men, GenderPreference::Bisexual],
        )
        .unwrap();
        assert_eq!(pairs, vec![(0, 1)]);
    }
}
