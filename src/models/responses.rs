use serde::{Deserialize, Serialize};
use crate::models::domain::{Match, ParticipantId};

/// Response for the stable matching endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StableMatchResponse {
    #[serde(rename = "runId")]
    pub run_id: String,
    pub matches: Vec<Match>,
    pub unmatched: Vec<ParticipantId>,
    #[serde(rename = "totalParticipants")]
    pub total_participants: usize,
    pub proposals: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
