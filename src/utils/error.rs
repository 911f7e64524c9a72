use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("SMTP delivery failed: {0}")]
    SmtpError(String),

    #[error("Notification failed ({channel}): {message}")]
    NotifyError { channel: String, message: String },

    #[error("Upload failed: {0}")]
    UploadError(String),

    #[error("Digest source error: {message}")]
    DigestError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Data,
    Config,
    Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PipelineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PipelineError::ApiError(_) => ErrorCategory::Network,
            PipelineError::IoError(_) => ErrorCategory::Io,
            PipelineError::SerializationError(_) | PipelineError::ProcessingError { .. } => {
                ErrorCategory::Data
            }
            PipelineError::TemplateError(_)
            | PipelineError::SmtpError(_)
            | PipelineError::NotifyError { .. }
            | PipelineError::UploadError(_) => ErrorCategory::Delivery,
            PipelineError::DigestError { .. } => ErrorCategory::Io,
            PipelineError::ConfigError { .. }
            | PipelineError::ConfigValidationError { .. }
            | PipelineError::InvalidConfigValueError { .. }
            | PipelineError::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一 channel 的傳送失敗不會中止整個 run
            PipelineError::SmtpError(_)
            | PipelineError::NotifyError { .. }
            | PipelineError::UploadError(_) => ErrorSeverity::Low,
            PipelineError::ApiError(_) => ErrorSeverity::Medium,
            PipelineError::TemplateError(_)
            | PipelineError::SerializationError(_)
            | PipelineError::ProcessingError { .. } => ErrorSeverity::High,
            PipelineError::IoError(_) | PipelineError::DigestError { .. } => ErrorSeverity::High,
            PipelineError::ConfigError { .. }
            | PipelineError::ConfigValidationError { .. }
            | PipelineError::InvalidConfigValueError { .. }
            | PipelineError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PipelineError::ApiError(_) => {
                "Check network connectivity and that the job page is reachable".to_string()
            }
            PipelineError::IoError(_) => {
                "Check file permissions and that the output directory exists".to_string()
            }
            PipelineError::SerializationError(_) => {
                "The remote API returned an unexpected payload shape".to_string()
            }
            PipelineError::TemplateError(_) => {
                "Check the resume template for unbalanced placeholders".to_string()
            }
            PipelineError::SmtpError(_) => {
                "Verify SMTP host, port and credentials in the [email] section".to_string()
            }
            PipelineError::NotifyError { channel, .. } => {
                format!("Verify the credentials for the '{channel}' channel")
            }
            PipelineError::UploadError(_) => {
                "Verify the storage token has not expired; the local copy is kept".to_string()
            }
            PipelineError::DigestError { .. } => {
                "Check that the digest source path is readable".to_string()
            }
            PipelineError::ProcessingError { .. } => {
                "Inspect the digest content with --verbose to see what was extracted".to_string()
            }
            PipelineError::ConfigError { .. }
            | PipelineError::ConfigValidationError { .. }
            | PipelineError::InvalidConfigValueError { .. }
            | PipelineError::MissingConfigError { .. } => {
                "Fix the run configuration file and re-run".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Network problem: {self}"),
            ErrorCategory::Io => format!("File problem: {self}"),
            ErrorCategory::Data => format!("Data problem: {self}"),
            ErrorCategory::Config => format!("Configuration problem: {self}"),
            ErrorCategory::Delivery => format!("Delivery problem: {self}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
