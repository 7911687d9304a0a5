// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    GenderIdentity, GenderPreference, Match, MatchInput, Participant, ParticipantId,
    PartitionStrategy, RoleAssignment, ScoreMatrix,
};
pub use requests::StableMatchRequest;
pub use responses::{ErrorResponse, HealthResponse, StableMatchResponse};
