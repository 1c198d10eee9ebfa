// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "hyrox-dashboard")]
#[command(version)]
#[command(about = "Statistics dashboard for fitness event results", long_about = None)]
pub struct Cli {
    /// Results file to open (.csv or .ron); overrides `dataset_path` from settings
    #[arg(value_name = "DATASET")]
    pub dataset: Option<PathBuf>,
}
