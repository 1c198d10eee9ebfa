// src/analysis/roster.rs
use serde::{Serialize, Deserialize};

use crate::config::{ClassSlot, Gender, ParticipantRecord};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ClassFilter {
    #[default]
    All,
    Slot(ClassSlot),
}

impl ClassFilter {
    pub fn matches(&self, record: &ParticipantRecord) -> bool {
        match self {
            ClassFilter::All => true,
            ClassFilter::Slot(slot) => record.class_slot == *slot,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClassFilter::All => "All classes",
            ClassFilter::Slot(slot) => slot.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GenderCounts {
    pub male: usize,
    pub female: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryLeaders<'a> {
    pub male: Option<&'a ParticipantRecord>,
    pub female: Option<&'a ParticipantRecord>,
}

/// Participants in the filter, finishers by overall rank first, then the
/// rest in dataset order.
pub fn roster(records: &[ParticipantRecord], filter: ClassFilter) -> Vec<&ParticipantRecord> {
    let mut selected: Vec<&ParticipantRecord> = records.iter()
        .filter(|r| filter.matches(r))
        .collect();
    // sort_by_key is stable, so non-finishers keep their input order
    selected.sort_by_key(|r| match r.overall_rank() {
        Some(rank) => (0, rank),
        None => (1, 0),
    });
    selected
}

pub fn gender_counts(records: &[ParticipantRecord]) -> GenderCounts {
    records.iter().fold(GenderCounts::default(), |mut counts, r| {
        match r.gender {
            Gender::Male => counts.male += 1,
            Gender::Female => counts.female += 1,
        }
        counts
    })
}

/// Winner of each gender category, i.e. gender rank 1.
pub fn category_leaders(records: &[ParticipantRecord]) -> CategoryLeaders<'_> {
    let leader = |gender: Gender| {
        records.iter().find(|r| {
            r.gender_rank()
                .map_or(false, |rank| rank.gender == gender && rank.position == 1)
        })
    };
    CategoryLeaders {
        male: leader(Gender::Male),
        female: leader(Gender::Female),
    }
}

pub fn gap_to_leader_minutes(record: &ParticipantRecord, records: &[ParticipantRecord]) -> Option<f64> {
    let time = record.finish_time_minutes()?;
    let best = records.iter()
        .filter_map(|r| r.finish_time_minutes())
        .fold(f64::INFINITY, f64::min);
    Some(time - best)
}
