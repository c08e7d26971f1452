use thiserror::Error;

use tileweave_core::GenerateError;
use tileweave_rules::LearnError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse sample file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to learn from the sample: {0}")]
    Learn(#[from] LearnError),

    #[error("generation failed: {0}")]
    Generate(#[from] GenerateError),

    #[error("no tilemap produced within {0} attempt(s)")]
    AttemptsExhausted(usize),
}
