use clap::Parser;
use job_digest_etl::adapters::{DriveStore, FileDigestSource, TemplateRenderer};
use job_digest_etl::core::resolver::DescriptionResolver;
use job_digest_etl::domain::ports::{Notifier, ResumeStore};
use job_digest_etl::notify::{Dispatcher, EmailNotifier, TelegramNotifier};
use job_digest_etl::utils::error::ErrorSeverity;
use job_digest_etl::utils::{logger, validation::Validate};
use job_digest_etl::{CliConfig, DigestPipeline, PipelineEngine, PipelineError, RunConfig};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_scheduled_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting job-digest-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證 run 設定
    let mut run_config = RunConfig::from_file(&cli.config).unwrap_or_else(|e| fail(e));
    if let Some(digest) = &cli.digest {
        run_config.digest.source_path = digest.clone();
    }
    if let Some(output_path) = &cli.output_path {
        run_config.resume.output_dir = output_path.clone();
    }
    if let Err(e) = run_config.validate() {
        fail(e);
    }

    // 組裝 collaborator
    let source = FileDigestSource::new(
        run_config.digest.source_path.clone(),
        run_config.subject_filter(),
    );
    let resolver = DescriptionResolver::new(
        Duration::from_secs(run_config.timeout_seconds()),
        run_config.user_agent(),
    );
    let renderer = TemplateRenderer::new(
        run_config.resume.template_path.clone(),
        run_config.resume.output_dir.clone(),
    );

    let store = build_store(&run_config).unwrap_or_else(|e| fail(e));
    let dispatcher = build_dispatcher(&run_config).unwrap_or_else(|e| fail(e));

    if dispatcher.is_empty() && !cli.dry_run {
        tracing::warn!("⚠️ No notification channels enabled; postings will only be logged");
    }

    let pipeline = DigestPipeline::new(source, resolver, Box::new(renderer), store, dispatcher)
        .with_dry_run(cli.dry_run);
    let engine = PipelineEngine::new_with_monitoring(pipeline, cli.monitor);

    match engine.run().await {
        Ok(report) => {
            println!(
                "✅ Processed {} posting(s), {} delivered, {} failed",
                report.extracted, report.delivered, report.failed
            );
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn build_store(config: &RunConfig) -> job_digest_etl::Result<Option<Box<dyn ResumeStore>>> {
    if !config.drive_enabled() {
        return Ok(None);
    }
    let token = config
        .drive
        .as_ref()
        .and_then(|d| d.token.clone())
        .ok_or_else(|| PipelineError::MissingConfigError {
            field: "drive.token".to_string(),
        })?;
    let api_base = config.drive.as_ref().and_then(|d| d.api_base.clone());
    Ok(Some(Box::new(DriveStore::from_config(token, api_base)?)))
}

fn build_dispatcher(config: &RunConfig) -> job_digest_etl::Result<Dispatcher> {
    let mut channels: Vec<Box<dyn Notifier>> = Vec::new();

    if let Some(email) = config.email.as_ref().filter(|e| e.enabled) {
        channels.push(Box::new(EmailNotifier::from_config(
            email.smtp_host.as_deref().unwrap_or_default(),
            email.smtp_port.unwrap_or(587),
            email.from.as_deref().unwrap_or_default(),
            email.to.as_deref().unwrap_or_default(),
            email.username.as_deref().unwrap_or_default(),
            email.password.as_deref().unwrap_or_default(),
        )?));
    }

    if let Some(telegram) = config.telegram.as_ref().filter(|t| t.enabled) {
        channels.push(Box::new(TelegramNotifier::from_config(
            telegram.bot_token.clone().unwrap_or_default(),
            telegram.chat_id.clone().unwrap_or_default(),
        )?));
    }

    Ok(Dispatcher::new(channels))
}

/// 記錄錯誤細節、輸出使用者訊息，依嚴重程度決定退出碼
fn fail(e: PipelineError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,    // 警告性質，視為成功
        ErrorSeverity::Medium => 2, // 可重試的錯誤
        ErrorSeverity::High => 1,   // 處理錯誤
        ErrorSeverity::Critical => 3, // 設定/系統錯誤
    };
    std::process::exit(exit_code);
}
