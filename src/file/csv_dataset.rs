// src/file/csv_dataset.rs
use std::path::Path;

use serde::Deserialize;

use super::FileHandler;
use super::records::{build_records, RawEntry, RawOutcome};
use crate::config::{ClassSlot, EventDataset, Gender, GenderRank};
use crate::error::DatasetError;

/// Column layout of a results export. Empty cells read as `None`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    gender: String,
    class: String,
    completed: String,
    #[serde(default)]
    finish_time_seconds: Option<f64>,
    #[serde(default)]
    overall_rank: Option<u32>,
    #[serde(default)]
    gender_rank: Option<String>,
    #[serde(default)]
    last_workout: Option<String>,
}

#[derive(Debug, Default)]
pub struct CsvDatasetHandler;

impl CsvDatasetHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<EventDataset> for CsvDatasetHandler {
    fn load(&self, path: &Path) -> Result<EventDataset, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut entries = Vec::new();
        for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
            entries.push(parse_row(i + 1, row?)?);
        }

        let name = path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(EventDataset::new(name, None, build_records(entries)?))
    }
}

fn parse_completed(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "sí" | "si" | "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_row(row: usize, raw: CsvRow) -> Result<RawEntry, DatasetError> {
    let invalid = |field: &'static str, value: &str| DatasetError::InvalidField {
        row,
        field,
        value: value.to_string(),
    };

    if raw.name.is_empty() {
        return Err(invalid("name", &raw.name));
    }
    let gender: Gender = raw.gender.parse().map_err(|_| invalid("gender", &raw.gender))?;
    let class_slot: ClassSlot = raw.class.parse().map_err(|_| invalid("class", &raw.class))?;
    let completed = parse_completed(&raw.completed).ok_or_else(|| invalid("completed", &raw.completed))?;
    let gender_rank = match non_empty(raw.gender_rank) {
        Some(value) => Some(value.parse::<GenderRank>().map_err(|_| invalid("gender_rank", &value))?),
        None => None,
    };

    let outcome = if completed {
        let seconds = raw.finish_time_seconds.ok_or_else(|| DatasetError::InconsistentRow {
            row,
            reason: "completed without a finish time".to_string(),
        })?;
        if !(seconds.is_finite() && seconds >= 0.0) {
            return Err(invalid("finish_time_seconds", &seconds.to_string()));
        }
        if let Some(rank) = &gender_rank {
            if rank.gender != gender {
                return Err(DatasetError::InconsistentRow {
                    row,
                    reason: format!("gender rank {} does not match gender {}", rank, gender.code()),
                });
            }
        }
        if raw.overall_rank == Some(0) {
            return Err(invalid("overall_rank", "0"));
        }
        RawOutcome::Finished {
            seconds,
            overall_rank: raw.overall_rank,
            gender_rank,
        }
    } else {
        if raw.finish_time_seconds.is_some() || raw.overall_rank.is_some() || gender_rank.is_some() {
            return Err(DatasetError::InconsistentRow {
                row,
                reason: "did not finish but has a time or rank".to_string(),
            });
        }
        RawOutcome::DidNotFinish {
            last_workout_reached: non_empty(raw.last_workout),
        }
    };

    Ok(RawEntry {
        row,
        name: raw.name,
        gender,
        class_slot,
        outcome,
    })
}
