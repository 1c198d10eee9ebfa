// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the statistical core. None of them are fatal; the dashboard
/// renders a placeholder instead of the affected chart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StatsError {
    #[error("No participant named '{0}'")]
    NotFound(String),

    #[error("Cannot aggregate over an empty population")]
    EmptyPopulation,

    #[error("Standard deviation is zero, z-score is undefined")]
    DegenerateVariance,

    #[error("Rank {rank} is outside 1..={total}")]
    InvalidRank { rank: u32, total: u32 },
}

/// Failures while building the record collection from a file.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid RON: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    #[error("Row {row}: invalid {field} '{value}'")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Row {row}: {reason}")]
    InconsistentRow { row: usize, reason: String },

    #[error("Duplicate participant name '{0}'")]
    DuplicateName(String),

    #[error("Overall ranks of completed participants are not a permutation of 1..={expected}")]
    RankNotPermutation { expected: usize },

    #[error("'{name}' is ranked {rank} but finished slower than a participant ranked below")]
    RankOutOfOrder { name: String, rank: u32 },

    #[error("'{name}' has gender rank {found}, expected {gender}{expected} from the overall order")]
    GenderRankOutOfOrder {
        name: String,
        gender: char,
        found: String,
        expected: usize,
    },
}
