use crate::domain::model::DeliveryReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// 驅動一次 run：extract → enrich → deliver。
/// 沒有職缺就提早結束，不碰任何下游 collaborator
pub struct PipelineEngine<P: Pipeline> {
    pipeline: P,
    monitor: Option<SystemMonitor>,
}

impl<P: Pipeline> PipelineEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: None,
        }
    }

    pub fn new_with_monitoring(pipeline: P, enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: enabled.then(|| SystemMonitor::new(true)),
        }
    }

    pub async fn run(&self) -> Result<DeliveryReport> {
        tracing::info!("🚀 Starting digest pipeline run");
        if let Some(monitor) = &self.monitor {
            monitor.log_stats("Run started.");
        }

        let postings = self.pipeline.extract().await?;
        if postings.is_empty() {
            tracing::info!("📭 Nothing to do for this run");
            return Ok(DeliveryReport::default());
        }
        tracing::info!("📋 Detected {} remote job(s)", postings.len());

        let records = self.pipeline.enrich(postings).await?;
        tracing::info!("🔎 Enriched {} posting(s)", records.len());

        let report = self.pipeline.deliver(records).await?;
        tracing::info!(
            "✅ Run finished: {} extracted, {} delivered, {} failed",
            report.extracted,
            report.delivered,
            report.failed
        );

        if let Some(monitor) = &self.monitor {
            monitor.log_stats("Run finished.");
        }

        Ok(report)
    }
}
