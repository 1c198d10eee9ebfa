// src/config/mod.rs
pub mod participant;
pub mod event;
pub mod settings;

// Re-export commonly used types
pub use participant::{
    ParticipantRecord,
    RaceResult,
    CompletedResult,
    IncompleteResult,
    Gender,
    GenderRank,
    ClassSlot,
    DayPeriod,
};
pub use event::EventDataset;
pub use settings::Settings;
