// src/analysis/test_support.rs
use crate::config::{
    ClassSlot, CompletedResult, Gender, GenderRank, IncompleteResult, ParticipantRecord, RaceResult,
};

pub fn finisher(name: &str, gender: Gender, class_slot: ClassSlot, seconds: f64, rank: u32) -> ParticipantRecord {
    finisher_in_category(name, gender, class_slot, seconds, rank, rank)
}

pub fn finisher_in_category(
    name: &str,
    gender: Gender,
    class_slot: ClassSlot,
    seconds: f64,
    rank: u32,
    gender_position: u32,
) -> ParticipantRecord {
    ParticipantRecord {
        name: name.to_string(),
        gender,
        class_slot,
        result: RaceResult::Completed(CompletedResult {
            finish_time_seconds: seconds,
            overall_rank: rank,
            gender_rank: GenderRank { gender, position: gender_position },
        }),
    }
}

pub fn dnf(name: &str, gender: Gender, class_slot: ClassSlot) -> ParticipantRecord {
    ParticipantRecord {
        name: name.to_string(),
        gender,
        class_slot,
        result: RaceResult::Incomplete(IncompleteResult {
            last_workout_reached: Some("Sled push".to_string()),
        }),
    }
}
