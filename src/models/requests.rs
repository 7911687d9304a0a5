use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::error::ValidationError;
use crate::models::domain::{MatchInput, PartitionStrategy};

/// Request to compute a stable matching
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StableMatchRequest {
    /// N x N compatibility scores, row i scoring every participant j
    #[validate(length(min = 1, max = 10000))]
    pub scores: Vec<Vec<f64>>,
    /// Gender identity label per participant
    #[validate(length(min = 1))]
    pub identities: Vec<String>,
    /// Gender preference label per participant
    #[validate(length(min = 1))]
    pub preferences: Vec<String>,
    /// Overrides the configured partition strategy for this request
    #[serde(default)]
    pub partition: Option<PartitionStrategy>,
}

impl StableMatchRequest {
    /// Parse labels and check shapes
    pub fn to_input(&self) -> Result<MatchInput, ValidationError> {
        MatchInput::from_labels(self.scores.clone(), &self.identities, &self.preferences)
    }
}
