// src/state/mod.rs
use std::path::Path;

use tracing::debug;

use crate::analysis::aggregate::class_slots_present;
use crate::analysis::roster::{gender_counts, GenderCounts};
use crate::analysis::{
    completion_rate, evaluate_individual, group_by_class, group_by_gender, histogram,
    ClassAggregate, ClassFilter, GenderAggregate, HistogramBucket, IndividualEvaluation,
};
use crate::config::{ClassSlot, EventDataset, Settings};
use crate::error::{DatasetError, StatsError};
use crate::file::load_dataset;

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Coach,
    Participant,
}

impl Screen {
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Coach => "Coach",
            Screen::Participant => "Participant",
        }
    }
}

/// Event-wide figures for the coach view. Computed once per dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CoachOverview {
    pub total: usize,
    pub completed: usize,
    pub completion_rate: Result<f64, StatsError>,
    pub gender_counts: GenderCounts,
    pub classes: Vec<ClassAggregate>,
    pub genders: Vec<GenderAggregate>,
    pub histogram: Vec<HistogramBucket>,
}

impl CoachOverview {
    pub fn build(dataset: &EventDataset, settings: &Settings) -> Self {
        let records = dataset.records();
        Self {
            total: records.len(),
            completed: records.iter().filter(|r| r.is_completed()).count(),
            completion_rate: completion_rate(records),
            gender_counts: gender_counts(records),
            classes: group_by_class(records),
            genders: group_by_gender(records),
            histogram: histogram(records, &settings.histogram_buckets),
        }
    }
}

// Core application state
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,
    pub dataset: EventDataset,
    pub overview: CoachOverview,
    pub class_slots: Vec<ClassSlot>,

    // Minimal UI state
    pub current_screen: Screen,
    pub class_filter: ClassFilter,
    pub selected_participant: Option<String>,
    pub evaluation: Option<Result<IndividualEvaluation, StatsError>>,
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self::with_dataset(settings, EventDataset::default())
    }

    pub fn with_dataset(settings: Settings, dataset: EventDataset) -> Self {
        let overview = CoachOverview::build(&dataset, &settings);
        let class_slots = class_slots_present(dataset.records());
        Self {
            settings,
            dataset,
            overview,
            class_slots,
            current_screen: Screen::default(),
            class_filter: ClassFilter::default(),
            selected_participant: None,
            evaluation: None,
            error_message: None,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.dataset.participants.is_empty()
    }

    /// Replaces the dataset wholesale. Selection and filter are reset.
    pub fn set_dataset(&mut self, dataset: EventDataset) {
        self.overview = CoachOverview::build(&dataset, &self.settings);
        self.class_slots = class_slots_present(dataset.records());
        self.dataset = dataset;
        self.class_filter = ClassFilter::All;
        self.selected_participant = None;
        self.evaluation = None;
        self.error_message = None;
    }

    pub fn open_dataset(&mut self, path: &Path) -> Result<(), DatasetError> {
        let dataset = load_dataset(path)?;
        self.set_dataset(dataset);
        Ok(())
    }

    pub fn select_participant(&mut self, name: Option<String>) {
        if name == self.selected_participant {
            return;
        }
        debug!(participant = ?name, "selection changed");
        self.evaluation = name.as_deref()
            .map(|name| evaluate_individual(self.dataset.records(), name));
        self.selected_participant = name;
    }

    /// Changing the class drops a selection that is no longer listed.
    pub fn set_class_filter(&mut self, filter: ClassFilter) {
        self.class_filter = filter;
        let still_listed = self.selected_participant.as_deref()
            .and_then(|name| crate::utils::find_participant(self.dataset.records(), name))
            .map_or(false, |record| filter.matches(record));
        if !still_listed {
            self.select_participant(None);
        }
    }
}
