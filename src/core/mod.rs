pub mod engine;
pub mod extractor;
pub mod keywords;
pub mod normalizer;
pub mod pipeline;
pub mod resolver;

pub use crate::domain::model::{
    DeliveryReport, JobNotification, JobPosting, PipelineRecord, Resolution,
};
pub use crate::domain::ports::{DigestSource, Notifier, Pipeline, ResumeRenderer, ResumeStore};
pub use crate::utils::error::Result;
