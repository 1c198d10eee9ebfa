// src/config/participant.rs
use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::analysis::stats::seconds_to_minutes;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    #[serde(rename = "M", alias = "Male")]
    Male,
    #[serde(rename = "F", alias = "Female")]
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn code(&self) -> char {
        match self {
            Gender::Male => 'M',
            Gender::Female => 'F',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// Class (heat) start times. Declaration order is the chronological order
/// used everywhere a list of slots is displayed. Serialized as its label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub enum ClassSlot {
    Am5,
    Am6,
    Am7,
    Am8,
    Am9,
    Pm4,
    Pm5,
    Pm6,
    Pm7,
    Pm8,
    Pm9,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Morning,
    Evening,
}

impl DayPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Evening => "Evening",
        }
    }
}

impl ClassSlot {
    pub const ALL: [ClassSlot; 11] = [
        ClassSlot::Am5,
        ClassSlot::Am6,
        ClassSlot::Am7,
        ClassSlot::Am8,
        ClassSlot::Am9,
        ClassSlot::Pm4,
        ClassSlot::Pm5,
        ClassSlot::Pm6,
        ClassSlot::Pm7,
        ClassSlot::Pm8,
        ClassSlot::Pm9,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClassSlot::Am5 => "5AM",
            ClassSlot::Am6 => "6AM",
            ClassSlot::Am7 => "7AM",
            ClassSlot::Am8 => "8AM",
            ClassSlot::Am9 => "9AM",
            ClassSlot::Pm4 => "4PM",
            ClassSlot::Pm5 => "5PM",
            ClassSlot::Pm6 => "6PM",
            ClassSlot::Pm7 => "7PM",
            ClassSlot::Pm8 => "8PM",
            ClassSlot::Pm9 => "9PM",
        }
    }

    pub fn period(&self) -> DayPeriod {
        if *self <= ClassSlot::Am9 {
            DayPeriod::Morning
        } else {
            DayPeriod::Evening
        }
    }
}

impl fmt::Display for ClassSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ClassSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(' ', "");
        ClassSlot::ALL.iter()
            .find(|slot| slot.label() == normalized)
            .copied()
            .ok_or_else(|| format!("unknown class slot '{}'", s))
    }
}

impl TryFrom<String> for ClassSlot {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClassSlot> for String {
    fn from(slot: ClassSlot) -> Self {
        slot.label().to_string()
    }
}

/// Position within the participant's gender, shown as `M1`, `F3`...
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenderRank {
    pub gender: Gender,
    pub position: u32,
}

impl fmt::Display for GenderRank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.gender.code(), self.position)
    }
}

impl FromStr for GenderRank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let gender = chars.next()
            .ok_or_else(|| "empty gender rank".to_string())?
            .to_string()
            .parse::<Gender>()?;
        let position = chars.as_str().parse::<u32>()
            .map_err(|_| format!("invalid gender rank '{}'", s))?;
        if position == 0 {
            return Err(format!("invalid gender rank '{}'", s));
        }
        Ok(GenderRank { gender, position })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletedResult {
    pub finish_time_seconds: f64,
    pub overall_rank: u32,
    pub gender_rank: GenderRank,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IncompleteResult {
    pub last_workout_reached: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RaceResult {
    Completed(CompletedResult),
    Incomplete(IncompleteResult),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantRecord {
    pub name: String,
    pub gender: Gender,
    pub class_slot: ClassSlot,
    pub result: RaceResult,
}

impl ParticipantRecord {
    pub fn is_completed(&self) -> bool {
        matches!(self.result, RaceResult::Completed(_))
    }

    pub fn completed(&self) -> Option<&CompletedResult> {
        match &self.result {
            RaceResult::Completed(result) => Some(result),
            RaceResult::Incomplete(_) => None,
        }
    }

    pub fn finish_time_seconds(&self) -> Option<f64> {
        self.completed().map(|r| r.finish_time_seconds)
    }

    pub fn finish_time_minutes(&self) -> Option<f64> {
        self.finish_time_seconds().map(seconds_to_minutes)
    }

    pub fn overall_rank(&self) -> Option<u32> {
        self.completed().map(|r| r.overall_rank)
    }

    pub fn gender_rank(&self) -> Option<GenderRank> {
        self.completed().map(|r| r.gender_rank)
    }

    pub fn last_workout_reached(&self) -> Option<&str> {
        match &self.result {
            RaceResult::Incomplete(result) => result.last_workout_reached.as_deref(),
            RaceResult::Completed(_) => None,
        }
    }
}
