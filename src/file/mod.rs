// src/file/mod.rs
use std::path::Path;

use tracing::{error, info};

use crate::config::EventDataset;
use crate::error::DatasetError;

pub mod csv_dataset;
pub mod ron_dataset;
pub mod records;

pub use csv_dataset::CsvDatasetHandler;
pub use ron_dataset::RonDatasetHandler;

// Core trait for dataset sources
pub trait FileHandler<T> {
    fn load(&self, path: &Path) -> Result<T, DatasetError>;
}

/// Reads a dataset, picking the handler from the file extension, and checks
/// it before handing it to the analysis layer.
pub fn load_dataset(path: &Path) -> Result<EventDataset, DatasetError> {
    let result = read_dataset(path).and_then(|dataset| {
        records::validate_records(&dataset.participants)?;
        Ok(dataset)
    });

    match &result {
        Ok(dataset) => info!(
            path = %path.display(),
            event = %dataset.name,
            participants = dataset.participants.len(),
            completed = dataset.participants.iter().filter(|r| r.is_completed()).count(),
            "Loaded dataset"
        ),
        Err(e) => error!(path = %path.display(), "Failed to load dataset: {}", e),
    }
    result
}

fn read_dataset(path: &Path) -> Result<EventDataset, DatasetError> {
    let extension = path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => CsvDatasetHandler::new().load(path),
        "ron" => RonDatasetHandler::new().load(path),
        other => Err(DatasetError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn dispatches_on_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.CSV");
        fs::write(&path, "name,gender,class,completed,finish_time_seconds,overall_rank,gender_rank,last_workout\n\
                          Ana,F,6AM,Sí,1800,,,\n").unwrap();
        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.name, "results");
        assert_eq!(dataset.participants[0].overall_rank(), Some(1));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.xlsx");
        fs::write(&path, "").unwrap();
        assert!(matches!(load_dataset(&path), Err(DatasetError::UnsupportedFormat(ext)) if ext == "xlsx"));
    }

    #[test]
    fn loaded_ranks_are_validated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("swapped.csv");
        fs::write(&path, "name,gender,class,completed,finish_time_seconds,overall_rank,gender_rank,last_workout\n\
                          Ana,F,6AM,Sí,1900,1,F1,\n\
                          Bea,F,6AM,Sí,1800,2,F2,\n").unwrap();
        assert!(matches!(
            load_dataset(&path),
            Err(DatasetError::RankOutOfOrder { rank: 1, .. })
        ));
    }
}
