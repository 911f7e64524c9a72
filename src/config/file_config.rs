use crate::utils::error::{PipelineError, Result};
use crate::utils::validation::{
    validate_email_address, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub digest: DigestConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    pub resume: ResumeConfig,
    pub drive: Option<DriveConfig>,
    pub email: Option<EmailConfig>,
    pub telegram: Option<TelegramConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    pub source_path: String,
    /// 原始信箱查詢用的主旨過濾字串，collaborator 抓信時使用
    pub subject_filter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeConfig {
    pub template_path: String,
    pub output_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    pub enabled: bool,
    pub token: Option<String>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub from: Option<String>,
    pub to: Option<Vec<String>>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub enabled: bool,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl RunConfig {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PipelineError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PipelineError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EMAIL_PASS})，沒設定的變數原樣留著
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.fetch.timeout_seconds.unwrap_or(10)
    }

    pub fn user_agent(&self) -> String {
        self.fetch
            .user_agent
            .clone()
            .unwrap_or_else(|| "Mozilla/5.0".to_string())
    }

    pub fn subject_filter(&self) -> String {
        self.digest
            .subject_filter
            .clone()
            .unwrap_or_else(|| "TechOps Examples".to_string())
    }

    pub fn drive_enabled(&self) -> bool {
        self.drive.as_ref().map(|d| d.enabled).unwrap_or(false)
    }

    pub fn email_enabled(&self) -> bool {
        self.email.as_ref().map(|e| e.enabled).unwrap_or(false)
    }

    pub fn telegram_enabled(&self) -> bool {
        self.telegram.as_ref().map(|t| t.enabled).unwrap_or(false)
    }

    /// 檢查設定的合理性；關掉的 channel 不檢查憑證
    pub fn validate_config(&self) -> Result<()> {
        validate_path("digest.source_path", &self.digest.source_path)?;
        validate_path("resume.template_path", &self.resume.template_path)?;
        validate_path("resume.output_dir", &self.resume.output_dir)?;
        validate_positive_number("fetch.timeout_seconds", self.timeout_seconds(), 1)?;

        if let Some(drive) = self.drive.as_ref().filter(|d| d.enabled) {
            let token = required("drive.token", &drive.token)?;
            validate_non_empty_string("drive.token", token)?;
            if let Some(api_base) = &drive.api_base {
                validate_url("drive.api_base", api_base)?;
            }
        }

        if let Some(email) = self.email.as_ref().filter(|e| e.enabled) {
            validate_non_empty_string("email.smtp_host", required("email.smtp_host", &email.smtp_host)?)?;
            validate_email_address("email.from", required("email.from", &email.from)?)?;
            let recipients = required("email.to", &email.to)?;
            if recipients.is_empty() {
                return Err(PipelineError::MissingConfigError {
                    field: "email.to".to_string(),
                });
            }
            for recipient in recipients {
                validate_email_address("email.to", recipient)?;
            }
            validate_non_empty_string("email.username", required("email.username", &email.username)?)?;
            validate_non_empty_string("email.password", required("email.password", &email.password)?)?;
        }

        if let Some(telegram) = self.telegram.as_ref().filter(|t| t.enabled) {
            validate_non_empty_string(
                "telegram.bot_token",
                required("telegram.bot_token", &telegram.bot_token)?,
            )?;
            validate_non_empty_string(
                "telegram.chat_id",
                required("telegram.chat_id", &telegram.chat_id)?,
            )?;
        }

        Ok(())
    }
}

fn required<'a, T>(field: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PipelineError::MissingConfigError {
        field: field.to_string(),
    })
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
