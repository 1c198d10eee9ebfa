// src/file/ron_dataset.rs
use std::fs;
use std::path::Path;

use super::FileHandler;
use crate::config::EventDataset;
use crate::error::DatasetError;

/// Full dataset documents, including the event date.
#[derive(Debug, Default)]
pub struct RonDatasetHandler;

impl RonDatasetHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<EventDataset> for RonDatasetHandler {
    fn load(&self, path: &Path) -> Result<EventDataset, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(ron::from_str(&content)?)
    }
}
