use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::error::ValidationError;
use crate::models::{GenderIdentity, GenderPreference, MatchInput, ScoreMatrix};

/// Default file names, relative to the data directory
pub const SCORES_FILE: &str = "raw_scores.txt";
pub const GENDERS_FILE: &str = "genders.txt";
pub const PREFERENCES_FILE: &str = "gender_preferences.txt";

/// Errors that can occur while loading match input from disk
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {} line {line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// Paths of the three input files
#[derive(Debug, Clone)]
pub struct InputFiles {
    pub scores: PathBuf,
    pub genders: PathBuf,
    pub preferences: PathBuf,
}

impl InputFiles {
    /// Standard file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            scores: dir.join(SCORES_FILE),
            genders: dir.join(GENDERS_FILE),
            preferences: dir.join(PREFERENCES_FILE),
        }
    }

    /// Read and validate all three files
    pub fn load(&self) -> Result<MatchInput, LoaderError> {
        let scores = load_scores(&self.scores)?;
        let identities = load_identities(&self.genders)?;
        let preferences = load_preferences(&self.preferences)?;

        tracing::info!(
            "Loaded {} participants from {}",
            scores.len(),
            self.scores.display()
        );

        Ok(MatchInput::new(scores, &identities, &preferences)?)
    }
}

fn read(path: &Path) -> Result<String, LoaderError> {
    fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a whitespace-separated score matrix; blank lines are skipped
pub fn parse_scores(text: &str, path: &Path) -> Result<ScoreMatrix, LoaderError> {
    let mut rows = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|e| LoaderError::Parse {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    message: format!("{:?}: {}", token, e),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push(row);
    }

    Ok(ScoreMatrix::new(rows)?)
}

/// Parse one label per non-blank line
pub fn parse_labels<T>(text: &str) -> Result<Vec<T>, ValidationError>
where
    T: std::str::FromStr<Err = ValidationError>,
{
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.parse::<T>())
        .collect()
}

pub fn load_scores(path: &Path) -> Result<ScoreMatrix, LoaderError> {
    parse_scores(&read(path)?, path)
}

pub fn load_identities(path: &Path) -> Result<Vec<GenderIdentity>, LoaderError> {
    Ok(parse_labels(&read(path)?)?)
}

pub fn load_preferences(path: &Path) -> Result<Vec<GenderPreference>, LoaderError> {
    Ok(parse_labels(&read(path)?)?)
}
