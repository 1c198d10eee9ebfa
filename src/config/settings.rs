// src/config/settings.rs
use anyhow::{Result, Context, anyhow};
use config::{Config, Environment, File, FileFormat};
use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use crate::analysis::aggregate::{default_buckets, BucketSpec};

const ENV_PREFIX: &str = "HYROX_DASHBOARD";
const LOCAL_SETTINGS_FILE: &str = "dashboard.ron";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub dataset_path: Option<PathBuf>,
    pub log_filter: String,
    pub histogram_buckets: Vec<BucketSpec>,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: None,
            log_filter: "info".to_string(),
            histogram_buckets: default_buckets(),
            window_width: 1280.0,
            window_height: 860.0,
        }
    }
}

impl Settings {
    /// Standard lookup: user config dir, then `./dashboard.ron`, then
    /// `HYROX_DASHBOARD_*` environment variables. Later sources win.
    pub fn load() -> Result<Self> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("hyrox-dashboard").join("settings.ron"));
        }
        paths.push(PathBuf::from(LOCAL_SETTINGS_FILE));

        Self::from_sources(&paths, ENV_PREFIX)
    }

    pub fn from_sources(paths: &[PathBuf], env_prefix: &str) -> Result<Self> {
        let mut builder = Config::builder();
        for path in paths {
            builder = builder.add_source(
                File::from(path.clone())
                    .format(FileFormat::Ron)
                    .required(false)
            );
        }
        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
        );

        let settings: Settings = builder.build()
            .context("Failed to read dashboard settings")?
            .try_deserialize()
            .context("Failed to parse dashboard settings")?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.histogram_buckets.is_empty() {
            return Err(anyhow!("At least one histogram bucket is required"));
        }
        for bucket in &self.histogram_buckets {
            if !(bucket.min_minutes < bucket.max_minutes) {
                return Err(anyhow!(
                    "Histogram bucket '{}' has min {} not below max {}",
                    bucket.label, bucket.min_minutes, bucket.max_minutes
                ));
            }
        }
        for pair in self.histogram_buckets.windows(2) {
            if pair[1].min_minutes < pair[0].max_minutes {
                return Err(anyhow!(
                    "Histogram buckets '{}' and '{}' overlap",
                    pair[0].label, pair[1].label
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_sources(
            &[dir.path().join("absent.ron")],
            "HYROX_DASHBOARD_TEST_ABSENT",
        ).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.histogram_buckets.len(), 5);
    }

    #[test]
    fn ron_file_overrides_selected_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.ron");
        fs::write(&path, r#"(
            dataset_path: "results/march.csv",
            log_filter: "debug",
            histogram_buckets: [
                (label: "<30", min_minutes: 0.0, max_minutes: 30.0),
                (label: "30+", min_minutes: 30.0, max_minutes: 90.0),
            ],
        )"#).unwrap();

        let settings = Settings::from_sources(&[path], "HYROX_DASHBOARD_TEST_FILE").unwrap();

        assert_eq!(settings.dataset_path, Some(PathBuf::from("results/march.csv")));
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.histogram_buckets.len(), 2);
        assert_eq!(settings.histogram_buckets[1].label, "30+");
        assert_eq!(settings.window_width, Settings::default().window_width);
    }

    #[test]
    fn environment_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.ron");
        fs::write(&path, r#"(log_filter: "warn", window_width: 900.0)"#).unwrap();

        std::env::set_var("HYROX_DASHBOARD_TEST_ENV_LOG_FILTER", "hyrox_dashboard=debug");
        let settings = Settings::from_sources(&[path], "HYROX_DASHBOARD_TEST_ENV");
        std::env::remove_var("HYROX_DASHBOARD_TEST_ENV_LOG_FILTER");

        let settings = settings.unwrap();
        assert_eq!(settings.log_filter, "hyrox_dashboard=debug");
        assert_eq!(settings.window_width, 900.0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.ron");
        fs::write(&path, "(log_filter: ").unwrap();

        let err = Settings::from_sources(&[path], "HYROX_DASHBOARD_TEST_MALFORMED").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read dashboard settings"));
    }

    #[test]
    fn overlapping_buckets_are_rejected() {
        let settings = Settings {
            histogram_buckets: vec![
                BucketSpec::new("a", 20.0, 30.0),
                BucketSpec::new("b", 25.0, 35.0),
            ],
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let empty = Settings { histogram_buckets: Vec::new(), ..Settings::default() };
        assert!(empty.validate().is_err());
    }
}
