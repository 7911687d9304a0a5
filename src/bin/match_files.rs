//! # match-files
//!
//! Runs stable matching over the plain-text inputs:
//!
//! ```text
//! raw_scores.txt          N lines of N whitespace-separated scores
//! genders.txt             one identity per line (Male, Female, Non-binary)
//! gender_preferences.txt  one preference per line (Men, Women, Bisexual)
//! ```
//!
//! and prints one `proposer receiver` pair per line, or JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use stable_match::config::{init_tracing, LoggingSettings};
use stable_match::services::loader::{self, InputFiles};
use stable_match::{Matcher, MatchOutcome, PartitionStrategy};

#[derive(Parser)]
#[command(name = "match-files")]
#[command(about = "Compute a stable matching from score, gender and preference files")]
#[command(version)]
struct Cli {
    /// Score matrix file
    #[arg(long, default_value = loader::SCORES_FILE)]
    scores: PathBuf,

    /// Gender identity file
    #[arg(long, default_value = loader::GENDERS_FILE)]
    genders: PathBuf,

    /// Gender preference file
    #[arg(long, default_value = loader::PREFERENCES_FILE)]
    preferences: PathBuf,

    /// How to split participants into proposers and receivers
    #[arg(long, value_enum, default_value_t = Partition::Contiguous)]
    partition: Partition,

    /// Seed for the random partition
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Partition {
    Contiguous,
    Alternating,
    Random,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl Cli {
    fn strategy(&self) -> PartitionStrategy {
        match self.partition {
            Partition::Contiguous => PartitionStrategy::Contiguous,
            Partition::Alternating => PartitionStrategy::Alternating,
            Partition::Random => PartitionStrategy::Random { seed: self.seed },
        }
    }
}

fn print_outcome(outcome: &MatchOutcome, format: Format) -> Result<(), serde_json::Error> {
    match format {
        Format::Text => {
            for m in &outcome.matches {
                println!("{} {}", m.proposer_id, m.receiver_id);
            }
        }
        Format::Json => {
            let body = serde_json::json!({
                "matches": outcome.matches,
                "unmatched": outcome.unmatched,
                "proposals": outcome.proposals,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing(&LoggingSettings {
        level: "warn".to_string(),
        format: "pretty".to_string(),
    });

    let cli = Cli::parse();

    let files = InputFiles {
        scores: cli.scores.clone(),
        genders: cli.genders.clone(),
        preferences: cli.preferences.clone(),
    };

    let input = match files.load() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = match Matcher::new(cli.strategy()).run(&input) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = print_outcome(&outcome, cli.format) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
