use crate::domain::model::{DeliveryReport, JobNotification, JobPosting, PipelineRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 摘要信件來源。回傳 None 代表沒有新的摘要，屬於正常結束
#[async_trait]
pub trait DigestSource: Send + Sync {
    async fn fetch_digest(&self) -> Result<Option<String>>;
}

/// 履歷模板渲染，回傳寫出的檔案路徑
#[async_trait]
pub trait ResumeRenderer: Send + Sync {
    async fn render(&self, posting: &JobPosting, keywords: &[String]) -> Result<String>;
}

/// 遠端儲存上傳，回傳可分享的連結
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn upload(&self, path: &str) -> Result<String>;
}

/// 通知 channel 實作
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &JobNotification) -> Result<()>;

    fn channel_name(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<JobPosting>>;
    async fn enrich(&self, postings: Vec<JobPosting>) -> Result<Vec<PipelineRecord>>;
    async fn deliver(&self, records: Vec<PipelineRecord>) -> Result<DeliveryReport>;
}
