// src/file/records.rs
use std::collections::HashSet;

use crate::config::{
    ClassSlot, CompletedResult, Gender, GenderRank, IncompleteResult, ParticipantRecord, RaceResult,
};
use crate::error::DatasetError;

/// A row as read from a flat source, before ranks are settled.
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub row: usize,
    pub name: String,
    pub gender: Gender,
    pub class_slot: ClassSlot,
    pub outcome: RawOutcome,
}

#[derive(Debug, Clone)]
pub enum RawOutcome {
    Finished {
        seconds: f64,
        overall_rank: Option<u32>,
        gender_rank: Option<GenderRank>,
    },
    DidNotFinish {
        last_workout_reached: Option<String>,
    },
}

/// Turns raw rows into records. When no finisher carries a rank, ranks are
/// assigned by ascending time with ties kept in input order; otherwise every
/// finisher must carry one.
pub fn build_records(entries: Vec<RawEntry>) -> Result<Vec<ParticipantRecord>, DatasetError> {
    let finished: Vec<(usize, f64, Gender)> = entries.iter()
        .enumerate()
        .filter_map(|(i, e)| match e.outcome {
            RawOutcome::Finished { seconds, .. } => Some((i, seconds, e.gender)),
            RawOutcome::DidNotFinish { .. } => None,
        })
        .collect();

    let derive_overall = entries.iter().all(|e| !matches!(
        e.outcome,
        RawOutcome::Finished { overall_rank: Some(_), .. }
    ));
    let derive_gender = entries.iter().all(|e| !matches!(
        e.outcome,
        RawOutcome::Finished { gender_rank: Some(_), .. }
    ));

    let mut overall = vec![None; entries.len()];
    let mut by_gender = vec![None; entries.len()];
    if derive_overall {
        for (position, (i, _, _)) in sort_by_time(&finished).into_iter().enumerate() {
            overall[i] = Some(position as u32 + 1);
        }
    }
    if derive_gender {
        for gender in Gender::ALL {
            let group: Vec<(usize, f64, Gender)> = finished.iter()
                .copied()
                .filter(|(_, _, g)| *g == gender)
                .collect();
            for (position, (i, _, _)) in sort_by_time(&group).into_iter().enumerate() {
                by_gender[i] = Some(GenderRank { gender, position: position as u32 + 1 });
            }
        }
    }

    entries.into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let result = match entry.outcome {
                RawOutcome::Finished { seconds, overall_rank, gender_rank } => {
                    let overall_rank = overall_rank.or(overall[i]).ok_or_else(|| DatasetError::InconsistentRow {
                        row: entry.row,
                        reason: "finisher has no overall rank while others do".to_string(),
                    })?;
                    let gender_rank = gender_rank.or(by_gender[i]).ok_or_else(|| DatasetError::InconsistentRow {
                        row: entry.row,
                        reason: "finisher has no gender rank while others do".to_string(),
                    })?;
                    RaceResult::Completed(CompletedResult {
                        finish_time_seconds: seconds,
                        overall_rank,
                        gender_rank,
                    })
                }
                RawOutcome::DidNotFinish { last_workout_reached } => {
                    RaceResult::Incomplete(IncompleteResult { last_workout_reached })
                }
            };
            Ok(ParticipantRecord {
                name: entry.name,
                gender: entry.gender,
                class_slot: entry.class_slot,
                result,
            })
        })
        .collect()
}

fn sort_by_time(finished: &[(usize, f64, Gender)]) -> Vec<(usize, f64, Gender)> {
    let mut sorted = finished.to_vec();
    sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Checks the invariants every loaded dataset must hold. Gender positions
/// must count 1, 2, 3... within each gender in overall rank order.
pub fn validate_records(records: &[ParticipantRecord]) -> Result<(), DatasetError> {
    let mut names = HashSet::new();
    for record in records {
        if !names.insert(record.name.as_str()) {
            return Err(DatasetError::DuplicateName(record.name.clone()));
        }
    }

    let mut finishers: Vec<(&ParticipantRecord, &CompletedResult)> = Vec::new();
    for (i, record) in records.iter().enumerate() {
        if let Some(result) = record.completed() {
            if !(result.finish_time_seconds.is_finite() && result.finish_time_seconds >= 0.0) {
                return Err(DatasetError::InvalidField {
                    row: i + 1,
                    field: "finish_time_seconds",
                    value: result.finish_time_seconds.to_string(),
                });
            }
            if result.gender_rank.gender != record.gender {
                return Err(DatasetError::InconsistentRow {
                    row: i + 1,
                    reason: format!("gender rank {} does not match gender {}", result.gender_rank, record.gender.code()),
                });
            }
            finishers.push((record, result));
        }
    }

    finishers.sort_by_key(|(_, result)| result.overall_rank);
    let in_sequence = finishers.iter()
        .enumerate()
        .all(|(i, (_, result))| result.overall_rank as usize == i + 1);
    if !in_sequence {
        return Err(DatasetError::RankNotPermutation { expected: finishers.len() });
    }

    for pair in finishers.windows(2) {
        let (ahead, ahead_result) = pair[0];
        let (_, behind_result) = pair[1];
        if ahead_result.finish_time_seconds > behind_result.finish_time_seconds {
            return Err(DatasetError::RankOutOfOrder {
                name: ahead.name.clone(),
                rank: ahead_result.overall_rank,
            });
        }
    }

    for gender in Gender::ALL {
        let in_gender = finishers.iter().filter(|(record, _)| record.gender == gender);
        for (i, (record, result)) in in_gender.enumerate() {
            if result.gender_rank.position as usize != i + 1 {
                return Err(DatasetError::GenderRankOutOfOrder {
                    name: record.name.clone(),
                    gender: gender.code(),
                    found: result.gender_rank.to_string(),
                    expected: i + 1,
                });
            }
        }
    }

    Ok(())
}
