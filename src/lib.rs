// src/lib.rs
pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod file;
pub mod state;
pub mod ui;
pub mod utils;

pub use app::DashboardApp;
pub use config::{EventDataset, ParticipantRecord, Settings};
pub use error::{DatasetError, StatsError};
