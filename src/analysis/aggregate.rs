// src/analysis/aggregate.rs
use serde::{Serialize, Deserialize};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

use crate::config::{ClassSlot, Gender, ParticipantRecord};
use crate::error::StatsError;
use super::stats::Moments;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassAggregate {
    pub class_slot: ClassSlot,
    pub participant_count: usize,
    pub completion_rate: f64,
    // None when nobody in the class finished
    pub mean_time_minutes: Option<f64>,
    pub best_time_minutes: Option<f64>,
    pub worst_time_minutes: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenderAggregate {
    pub gender: Gender,
    pub completed_count: usize,
    pub mean_time_minutes: f64,
    pub best_time_minutes: f64,
}

/// Histogram range in minutes. `max_minutes` is ignored for the last bucket
/// of a histogram, which collects everything at or above its `min_minutes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BucketSpec {
    pub label: String,
    pub min_minutes: f64,
    pub max_minutes: f64,
}

impl BucketSpec {
    pub fn new(label: &str, min_minutes: f64, max_minutes: f64) -> Self {
        Self {
            label: label.to_string(),
            min_minutes,
            max_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistogramBucket {
    pub range_label: String,
    pub count: usize,
}

pub fn default_buckets() -> Vec<BucketSpec> {
    vec![
        BucketSpec::new("20-25", 20.0, 25.0),
        BucketSpec::new("25-30", 25.0, 30.0),
        BucketSpec::new("30-35", 30.0, 35.0),
        BucketSpec::new("35-40", 35.0, 40.0),
        BucketSpec::new("40+", 40.0, 45.0),
    ]
}

/// Finish times in minutes of everyone who completed, in input order.
pub fn completed_times_minutes(records: &[ParticipantRecord]) -> Vec<f64> {
    records.iter()
        .filter_map(|r| r.finish_time_minutes())
        .collect()
}

pub fn completion_rate(records: &[ParticipantRecord]) -> Result<f64, StatsError> {
    if records.is_empty() {
        return Err(StatsError::EmptyPopulation);
    }
    let completed = records.iter().filter(|r| r.is_completed()).count();
    Ok(completed as f64 / records.len() as f64 * 100.0)
}

/// Population statistics (divisor N).
pub fn mean_and_std_dev(times: &[f64]) -> Result<Moments, StatsError> {
    if times.is_empty() {
        return Err(StatsError::EmptyPopulation);
    }
    Ok(Moments {
        mean: times.mean(),
        std_dev: times.population_std_dev(),
    })
}

pub fn group_by_class(records: &[ParticipantRecord]) -> Vec<ClassAggregate> {
    let mut partitions: BTreeMap<ClassSlot, Vec<&ParticipantRecord>> = BTreeMap::new();
    for record in records {
        partitions.entry(record.class_slot).or_default().push(record);
    }

    // BTreeMap iterates in ClassSlot order, which is chronological
    partitions.into_iter()
        .map(|(class_slot, members)| {
            let times: Vec<f64> = members.iter()
                .filter_map(|r| r.finish_time_minutes())
                .collect();
            let completion_rate = times.len() as f64 / members.len() as f64 * 100.0;

            let (mean_time_minutes, best_time_minutes, worst_time_minutes) = if times.is_empty() {
                (None, None, None)
            } else {
                (
                    Some(times.iter().sum::<f64>() / times.len() as f64),
                    Some(times.iter().copied().fold(f64::INFINITY, f64::min)),
                    Some(times.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
                )
            };

            ClassAggregate {
                class_slot,
                participant_count: members.len(),
                completion_rate,
                mean_time_minutes,
                best_time_minutes,
                worst_time_minutes,
            }
        })
        .collect()
}

pub fn group_by_gender(records: &[ParticipantRecord]) -> Vec<GenderAggregate> {
    Gender::ALL.iter()
        .filter_map(|&gender| {
            let times: Vec<f64> = records.iter()
                .filter(|r| r.gender == gender)
                .filter_map(|r| r.finish_time_minutes())
                .collect();
            if times.is_empty() {
                return None;
            }

            Some(GenderAggregate {
                gender,
                completed_count: times.len(),
                mean_time_minutes: times.iter().sum::<f64>() / times.len() as f64,
                best_time_minutes: times.iter().copied().fold(f64::INFINITY, f64::min),
            })
        })
        .collect()
}

/// Counts completed participants per bucket. Buckets are tried in the given
/// order and a time lands in the first one whose `[min, max)` range holds
/// it; the final bucket is open-ended.
pub fn histogram(records: &[ParticipantRecord], buckets: &[BucketSpec]) -> Vec<HistogramBucket> {
    let mut counts = vec![0usize; buckets.len()];
    let last = buckets.len().saturating_sub(1);

    for time in completed_times_minutes(records) {
        let slot = buckets.iter().enumerate().position(|(i, bucket)| {
            time >= bucket.min_minutes && (i == last || time < bucket.max_minutes)
        });
        if let Some(i) = slot {
            counts[i] += 1;
        }
    }

    buckets.iter()
        .zip(counts)
        .map(|(bucket, count)| HistogramBucket {
            range_label: bucket.label.clone(),
            count,
        })
        .collect()
}

/// Distinct class slots present in the dataset, earliest first.
pub fn class_slots_present(records: &[ParticipantRecord]) -> Vec<ClassSlot> {
    let mut slots: Vec<ClassSlot> = records.iter().map(|r| r.class_slot).collect();
    slots.sort();
    slots.dedup();
    slots
}
