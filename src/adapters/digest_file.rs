use crate::domain::ports::DigestSource;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 讀取已經抓好的摘要內文檔。
/// 信箱存取是外部 collaborator，這裡只認 materialize 好的檔案；
/// 檔案不存在或內容空白 = 這次沒有新摘要，正常結束
pub struct FileDigestSource {
    path: PathBuf,
    subject_filter: String,
}

impl FileDigestSource {
    pub fn new(path: impl Into<PathBuf>, subject_filter: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            subject_filter: subject_filter.into(),
        }
    }
}

#[async_trait::async_trait]
impl DigestSource for FileDigestSource {
    async fn fetch_digest(&self) -> Result<Option<String>> {
        if !Path::new(&self.path).exists() {
            tracing::info!(
                "No digest file at {} (subject filter: \"{}\")",
                self.path.display(),
                self.subject_filter
            );
            return Ok(None);
        }

        let body = tokio::fs::read_to_string(&self.path).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        tracing::debug!(
            "Loaded digest body ({} bytes) from {}",
            body.len(),
            self.path.display()
        );
        Ok(Some(body))
    }
}
