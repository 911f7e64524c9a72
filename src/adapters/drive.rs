use crate::domain::ports::ResumeStore;
use crate::utils::error::{PipelineError, Result};
use std::path::Path;

const DEFAULT_API_BASE: &str = "https://www.googleapis.com";

/// 把履歷上傳到 Google Drive，回傳可分享連結。
/// token 由外部的 secret provisioning 準備好，這裡當不透明字串用
pub struct DriveStore {
    client: reqwest::Client,
    token: String,
    api_base: String,
}

impl DriveStore {
    pub fn from_config(token: String, api_base: Option<String>) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(PipelineError::MissingConfigError {
                field: "drive.token".to_string(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            token,
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }
}

#[async_trait::async_trait]
impl ResumeStore for DriveStore {
    async fn upload(&self, path: &str) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        let filename = Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("resume.md")
            .to_string();

        // 1. 上傳檔案內容
        let upload_url = format!(
            "{}/upload/drive/v3/files?uploadType=media",
            self.api_base
        );
        let response = self
            .client
            .post(&upload_url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "text/markdown")
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PipelineError::UploadError(format!(
                "Drive upload returned {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response.json().await?;
        let file_id = payload
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                PipelineError::UploadError("Drive response missing file id".to_string())
            })?
            .to_string();

        // 2. 補上檔名 metadata，失敗只記 log，檔案已經在雲端了
        let rename_url = format!("{}/drive/v3/files/{}", self.api_base, file_id);
        let rename = self
            .client
            .patch(&rename_url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "name": filename }))
            .send()
            .await;
        if let Err(e) = rename {
            tracing::warn!("⚠️ Drive rename failed for {}: {}", file_id, e);
        }

        let link = format!("https://drive.google.com/file/d/{}/view", file_id);
        tracing::info!("☁️ Resume uploaded: {}", link);
        Ok(link)
    }
}
