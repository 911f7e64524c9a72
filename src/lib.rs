pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod notify;
pub mod utils;

pub use adapters::{DriveStore, FileDigestSource, TemplateRenderer};
pub use config::{CliConfig, RunConfig};
pub use crate::core::engine::PipelineEngine;
pub use crate::core::pipeline::DigestPipeline;
pub use notify::{Dispatcher, EmailNotifier, TelegramNotifier};
pub use utils::error::{PipelineError, Result};
