use crate::core::extractor::JobExtractor;
use crate::core::keywords::KeywordDeriver;
use crate::core::normalizer;
use crate::core::resolver::DescriptionResolver;
use crate::domain::model::{
    DeliveryReport, JobNotification, JobPosting, PipelineRecord, Resolution,
};
use crate::domain::ports::{DigestSource, Pipeline, ResumeRenderer, ResumeStore};
use crate::notify::dispatcher::Dispatcher;
use crate::utils::error::Result;

/// 單筆職缺的交付結果
struct DeliveryOutcome {
    resume_ref: Option<String>,
    resume_path: Option<String>,
    error: Option<String>,
}

/// 一次 run 的管線：摘要 → 職缺 → 補充說明與關鍵字 → 履歷/上傳/通知。
/// 每筆職缺獨立處理，單筆失敗不中斷整個 run
pub struct DigestPipeline<D: DigestSource> {
    source: D,
    extractor: JobExtractor,
    resolver: DescriptionResolver,
    deriver: KeywordDeriver,
    renderer: Box<dyn ResumeRenderer>,
    store: Option<Box<dyn ResumeStore>>,
    dispatcher: Dispatcher,
    dry_run: bool,
}

impl<D: DigestSource> DigestPipeline<D> {
    pub fn new(
        source: D,
        resolver: DescriptionResolver,
        renderer: Box<dyn ResumeRenderer>,
        store: Option<Box<dyn ResumeStore>>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            source,
            extractor: JobExtractor::new(),
            resolver,
            deriver: KeywordDeriver::new(),
            renderer,
            store,
            dispatcher,
            dry_run: false,
        }
    }

    /// dry-run 模式：跳過上傳與通知，只留 log
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 說明抓到就從說明推關鍵字，推不出或沒抓到就用通用清單
    fn keywords_for(&self, resolution: &Resolution) -> Vec<String> {
        match resolution.text() {
            Some(description) => {
                let keywords = self.deriver.derive(description);
                if keywords.is_empty() {
                    KeywordDeriver::fallback()
                } else {
                    keywords
                }
            }
            None => KeywordDeriver::fallback(),
        }
    }

    async fn deliver_one(&self, record: &PipelineRecord) -> DeliveryOutcome {
        let mut error = record.resolution.reason().map(str::to_string);

        // 1. 渲染履歷
        let resume_path = match self
            .renderer
            .render(&record.posting, &record.keywords)
            .await
        {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("⚠️ Resume rendering failed for '{}': {}", record.posting.title, e);
                error = Some(append_error(error, format!("resume rendering failed: {e}")));
                None
            }
        };

        // 2. 上傳，失敗就退回本地路徑
        let resume_ref = match (&resume_path, &self.store) {
            (Some(path), Some(store)) if !self.dry_run => match store.upload(path).await {
                Ok(shared) => Some(shared),
                Err(e) => {
                    tracing::warn!("⚠️ Upload failed for '{}': {}", record.posting.title, e);
                    error = Some(append_error(error, format!("upload failed: {e}")));
                    Some(path.clone())
                }
            },
            (Some(path), _) => Some(path.clone()),
            (None, _) => None,
        };

        DeliveryOutcome {
            resume_ref,
            resume_path,
            error,
        }
    }
}

fn append_error(existing: Option<String>, new: String) -> String {
    match existing {
        Some(previous) => format!("{previous}; {new}"),
        None => new,
    }
}

#[async_trait::async_trait]
impl<D: DigestSource> Pipeline for DigestPipeline<D> {
    async fn extract(&self) -> Result<Vec<JobPosting>> {
        let Some(body) = self.source.fetch_digest().await? else {
            tracing::info!("📭 No new digest found");
            return Ok(Vec::new());
        };

        let lines = normalizer::normalize(&body);
        tracing::debug!("Normalized digest into {} line(s)", lines.len());

        let postings = self.extractor.extract(&lines);
        for posting in &postings {
            tracing::info!(
                " - {} at {} ({}) Link: {}",
                posting.title,
                posting.company,
                posting.location,
                posting.link.as_deref().unwrap_or("N/A")
            );
        }

        Ok(postings)
    }

    async fn enrich(&self, postings: Vec<JobPosting>) -> Result<Vec<PipelineRecord>> {
        let mut records = Vec::with_capacity(postings.len());

        for posting in postings {
            let resolution = self.resolver.resolve(posting.link.as_deref()).await;
            if let Some(reason) = resolution.reason() {
                tracing::warn!("⚠️ No description for '{}': {}", posting.title, reason);
            }

            let keywords = self.keywords_for(&resolution);
            tracing::debug!("Keywords for '{}': {:?}", posting.title, keywords);

            records.push(PipelineRecord {
                posting,
                resolution,
                keywords,
            });
        }

        Ok(records)
    }

    async fn deliver(&self, records: Vec<PipelineRecord>) -> Result<DeliveryReport> {
        let mut report = DeliveryReport {
            extracted: records.len(),
            ..Default::default()
        };

        for record in &records {
            let outcome = self.deliver_one(record).await;
            let notification = JobNotification::new(
                &record.posting,
                outcome.resume_ref,
                outcome.resume_path,
                outcome.error,
            );

            if self.dry_run {
                tracing::info!(
                    "📝 [dry-run] Would notify: {} at {} (resume: {}, errors: {})",
                    notification.title,
                    notification.company,
                    notification.resume_ref,
                    notification.error
                );
                report.delivered += 1;
                continue;
            }

            // 每筆職缺都發通知，channel 各自獨立失敗
            let results = self.dispatcher.dispatch(&notification).await;
            if results.iter().any(|r| r.success) {
                report.delivered += 1;
            } else {
                tracing::error!(
                    "❌ All notification channels failed for '{}'",
                    notification.title
                );
                report.failed += 1;
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Notifier;
    use crate::utils::error::PipelineError;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    struct StaticDigestSource {
        body: Option<String>,
    }

    #[async_trait::async_trait]
    impl DigestSource for StaticDigestSource {
        async fn fetch_digest(&self) -> Result<Option<String>> {
            Ok(self.body.clone())
        }
    }

    #[derive(Clone)]
    struct RecordingRenderer {
        rendered: Arc<Mutex<Vec<String>>>,
        fail_for_title: Option<String>,
    }

    impl RecordingRenderer {
        fn new() -> Self {
            Self {
                rendered: Arc::new(Mutex::new(Vec::new())),
                fail_for_title: None,
            }
        }

        fn failing_for(title: &str) -> Self {
            Self {
                rendered: Arc::new(Mutex::new(Vec::new())),
                fail_for_title: Some(title.to_string()),
            }
        }
    }

    #[async_trait::async_trait]
    impl ResumeRenderer for RecordingRenderer {
        async fn render(&self, posting: &JobPosting, _keywords: &[String]) -> Result<String> {
            if self.fail_for_title.as_deref() == Some(posting.title.as_str()) {
                return Err(PipelineError::ProcessingError {
                    message: "template blew up".to_string(),
                });
            }
            let path = format!("output/resume_{}.md", posting.company.to_lowercase());
            self.rendered.lock().await.push(path.clone());
            Ok(path)
        }
    }

    #[derive(Clone)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<JobNotification>>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, notification: &JobNotification) -> Result<()> {
            self.sent.lock().await.push(notification.clone());
            Ok(())
        }

        fn channel_name(&self) -> &str {
            "recording"
        }
    }

    struct FailingStore;

    #[async_trait::async_trait]
    impl ResumeStore for FailingStore {
        async fn upload(&self, _path: &str) -> Result<String> {
            Err(PipelineError::UploadError("token expired".to_string()))
        }
    }

    fn pipeline_with(
        body: Option<&str>,
        renderer: RecordingRenderer,
        store: Option<Box<dyn ResumeStore>>,
        notifier: RecordingNotifier,
    ) -> DigestPipeline<StaticDigestSource> {
        DigestPipeline::new(
            StaticDigestSource {
                body: body.map(str::to_string),
            },
            DescriptionResolver::new(Duration::from_secs(2), "Mozilla/5.0".to_string()),
            Box::new(renderer),
            store,
            Dispatcher::new(vec![Box::new(notifier)]),
        )
    }

    #[tokio::test]
    async fn test_extract_without_digest_is_empty() {
        let pipeline = pipeline_with(
            None,
            RecordingRenderer::new(),
            None,
            RecordingNotifier::new(),
        );
        assert!(pipeline.extract().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_extract_digest_without_hiring_lines_is_empty() {
        let pipeline = pipeline_with(
            Some("Weekly digest\nNothing interesting this week"),
            RecordingRenderer::new(),
            None,
            RecordingNotifier::new(),
        );
        assert!(pipeline.extract().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_enrich_without_links_uses_generic_fallback() {
        let pipeline = pipeline_with(
            Some("Acme is hiring a Platform Engineer"),
            RecordingRenderer::new(),
            None,
            RecordingNotifier::new(),
        );

        let postings = pipeline.extract().await.unwrap();
        let records = pipeline.enrich(postings).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].resolution,
            Resolution::Unresolved("no link".to_string())
        );
        assert_eq!(records[0].keywords, KeywordDeriver::fallback());
    }

    #[tokio::test]
    async fn test_partial_failure_still_notifies_every_posting() {
        // 第 2 筆渲染失敗，1/3 筆照常交付，三筆都要收到通知
        let renderer = RecordingRenderer::failing_for("SRE");
        let notifier = RecordingNotifier::new();
        let pipeline = pipeline_with(
            Some(
                "Acme is hiring a Platform Engineer\n\
                 Globex is hiring an SRE\n\
                 Initech is hiring a Cloud Architect",
            ),
            renderer.clone(),
            None,
            notifier.clone(),
        );

        let postings = pipeline.extract().await.unwrap();
        let records = pipeline.enrich(postings).await.unwrap();
        let report = pipeline.deliver(records).await.unwrap();

        assert_eq!(report.extracted, 3);
        assert_eq!(report.delivered, 3);

        // 渲染成功兩筆，失敗那筆不留檔案
        assert_eq!(renderer.rendered.lock().await.len(), 2);

        let sent = notifier.sent.lock().await;
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].company, "Acme");
        assert_eq!(sent[1].company, "Globex");
        assert_eq!(sent[2].company, "Initech");

        // 失敗的那筆要帶 error 描述，履歷欄位用 sentinel 補
        assert!(sent[1].error.contains("resume rendering failed"));
        assert_eq!(sent[1].resume_ref, "N/A");
        assert!(sent[0].error.contains("no link"));
    }

    #[tokio::test]
    async fn test_upload_failure_falls_back_to_local_path() {
        let notifier = RecordingNotifier::new();
        let pipeline = pipeline_with(
            Some("Acme is hiring a Platform Engineer"),
            RecordingRenderer::new(),
            Some(Box::new(FailingStore)),
            notifier.clone(),
        );

        let postings = pipeline.extract().await.unwrap();
        let records = pipeline.enrich(postings).await.unwrap();
        let report = pipeline.deliver(records).await.unwrap();

        assert_eq!(report.delivered, 1);
        let sent = notifier.sent.lock().await;
        assert_eq!(sent[0].resume_ref, "output/resume_acme.md");
        assert!(sent[0].error.contains("upload failed"));
    }

    #[tokio::test]
    async fn test_dry_run_skips_notification_dispatch() {
        let notifier = RecordingNotifier::new();
        let pipeline = pipeline_with(
            Some("Acme is hiring a Platform Engineer"),
            RecordingRenderer::new(),
            None,
            notifier.clone(),
        )
        .with_dry_run(true);

        let postings = pipeline.extract().await.unwrap();
        let records = pipeline.enrich(postings).await.unwrap();
        let report = pipeline.deliver(records).await.unwrap();

        assert_eq!(report.delivered, 1);
        assert!(notifier.sent.lock().await.is_empty());
    }
}
