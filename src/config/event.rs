// src/config/event.rs
use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

use super::ParticipantRecord;

/// One event's results. Built once by the loader and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDataset {
    pub name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub participants: Vec<ParticipantRecord>,
}

impl EventDataset {
    pub fn new(name: String, date: Option<NaiveDate>, participants: Vec<ParticipantRecord>) -> Self {
        Self { name, date, participants }
    }

    pub fn records(&self) -> &[ParticipantRecord] {
        &self.participants
    }

    pub fn display_date(&self) -> String {
        self.date
            .map(|d| d.format("%A, %-d %B %Y").to_string())
            .unwrap_or_else(|| "Date not set".to_string())
    }
}

impl Default for EventDataset {
    fn default() -> Self {
        Self {
            name: String::new(),
            date: None,
            participants: Vec::new(),
        }
    }
}
