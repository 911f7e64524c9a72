pub mod file_config;

pub use file_config::RunConfig;

use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "job-digest-etl")]
#[command(about = "Extracts remote jobs from a digest email, tailors resumes and notifies")]
pub struct CliConfig {
    #[arg(long, default_value = "config/digest.toml")]
    pub config: String,

    #[arg(long, help = "Override the digest source file path")]
    pub digest: Option<String>,

    #[arg(long, help = "Override the resume output directory")]
    pub output_path: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,

    #[arg(long, help = "Emit JSON logs (for scheduled runs)")]
    pub log_json: bool,

    #[arg(long, help = "Skip upload and notification delivery")]
    pub dry_run: bool,
}
