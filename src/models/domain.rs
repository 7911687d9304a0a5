use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::ValidationError;

/// Participant identifier: a stable row/column index into the score matrix
pub type ParticipantId = usize;

/// Gender identity of a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderIdentity {
    Male,
    Female,
    #[serde(alias = "Non-binary", alias = "non_binary")]
    NonBinary,
}

impl FromStr for GenderIdentity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "nonbinary" => Ok(Self::NonBinary),
            _ => Err(ValidationError::UnknownIdentity(s.trim().to_string())),
        }
    }
}

impl fmt::Display for GenderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
            Self::NonBinary => write!(f, "Non-binary"),
        }
    }
}

/// Which identities a participant wants to be matched with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderPreference {
    Men,
    Women,
    Bisexual,
}

impl GenderPreference {
    /// Whether someone with this preference would consider `identity`
    #[inline]
    pub fn accepts(self, identity: GenderIdentity) -> bool {
        match self {
            Self::Men => matches!(identity, GenderIdentity::Male | GenderIdentity::NonBinary),
            Self::Women => matches!(identity, GenderIdentity::Female | GenderIdentity::NonBinary),
            Self::Bisexual => true,
        }
    }
}

impl FromStr for GenderPreference {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            "bisexual" => Ok(Self::Bisexual),
            _ => Err(ValidationError::UnknownPreference(s.trim().to_string())),
        }
    }
}

impl fmt::Display for GenderPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Men => write!(f, "Men"),
            Self::Women => write!(f, "Women"),
            Self::Bisexual => write!(f, "Bisexual"),
        }
    }
}

/// A participant in a matching run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub identity: GenderIdentity,
    pub preference: GenderPreference,
}

/// Square matrix of non-negative compatibility scores.
///
/// `get(i, j)` is how much participant `i` values participant `j`. The
/// matrix is not required to be symmetric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMatrix {
    rows: Vec<Vec<f64>>,
}

impl ScoreMatrix {
    /// Build a matrix, checking that it is square and every score is a
    /// finite non-negative number
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let n = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(ValidationError::NonSquareScores {
                    row: i,
                    len: row.len(),
                    expected: n,
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(ValidationError::InvalidScore { row: i, col: j, value });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Number of participants
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn get(&self, i: ParticipantId, j: ParticipantId) -> f64 {
        self.rows[i][j]
    }

    pub fn row(&self, i: ParticipantId) -> &[f64] {
        &self.rows[i]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Derive a new matrix by mapping every cell; the source is untouched
    pub(crate) fn map_cells<F>(&self, f: F) -> Self
    where
        F: Fn(ParticipantId, ParticipantId, f64) -> f64,
    {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, &value)| f(i, j, value))
                    .collect()
            })
            .collect();
        Self { rows }
    }
}

/// Validated input to one matching run
#[derive(Debug, Clone, PartialEq)]
pub struct MatchInput {
    pub scores: ScoreMatrix,
    pub participants: Vec<Participant>,
}

impl MatchInput {
    /// Combine scores, identities and preferences, checking that all three
    /// describe the same N participants
    pub fn new(
        scores: ScoreMatrix,
        identities: &[GenderIdentity],
        preferences: &[GenderPreference],
    ) -> Result<Self, ValidationError> {
        let n = scores.len();
        if identities.len() != n {
            return Err(ValidationError::LengthMismatch {
                field: "identities",
                len: identities.len(),
                expected: n,
            });
        }
        if preferences.len() != n {
            return Err(ValidationError::LengthMismatch {
                field: "preferences",
                len: preferences.len(),
                expected: n,
            });
        }

        let participants = identities
            .iter()
            .zip(preferences)
            .enumerate()
            .map(|(id, (&identity, &preference))| Participant {
                id,
                identity,
                preference,
            })
            .collect();

        Ok(Self { scores, participants })
    }

    /// Same as [`MatchInput::new`] but with identity and preference labels
    /// still in their textual form
    pub fn from_labels<S, T>(
        scores: Vec<Vec<f64>>,
        identities: &[S],
        preferences: &[T],
    ) -> Result<Self, ValidationError>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let scores = ScoreMatrix::new(scores)?;
        let identities = identities
            .iter()
            .map(|label| label.as_ref().parse())
            .collect::<Result<Vec<GenderIdentity>, _>>()?;
        let preferences = preferences
            .iter()
            .map(|label| label.as_ref().parse())
            .collect::<Result<Vec<GenderPreference>, _>>()?;

        Self::new(scores, &identities, &preferences)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn identities(&self) -> Vec<GenderIdentity> {
        self.participants.iter().map(|p| p.identity).collect()
    }

    pub fn preferences(&self) -> Vec<GenderPreference> {
        self.participants.iter().map(|p| p.preference).collect()
    }
}

/// How participants are split into proposers and receivers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum PartitionStrategy {
    /// Lower half of the id range proposes
    Contiguous,
    /// Even ids propose, odd ids receive
    Alternating,
    /// Seeded shuffle
    Random { seed: u64 },
    /// Caller-supplied proposer ids
    Explicit { proposers: Vec<ParticipantId> },
}

impl Default for PartitionStrategy {
    fn default() -> Self {
        Self::Contiguous
    }
}

/// Disjoint split of all participants into the two engine roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub proposers: Vec<ParticipantId>,
    pub receivers: Vec<ParticipantId>,
}

/// A final pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "proposerId")]
    pub proposer_id: ParticipantId,
    #[serde(rename = "receiverId")]
    pub receiver_id: ParticipantId,
}

impl From<Match> for (ParticipantId, ParticipantId) {
    fn from(m: Match) -> Self {
        (m.proposer_id, m.receiver_id)
    }
}
