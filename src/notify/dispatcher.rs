use crate::domain::model::JobNotification;
use crate::domain::ports::Notifier;

/// 單一 channel 的發送結果
#[derive(Debug)]
pub struct DispatchResult {
    pub channel: String,
    pub success: bool,
    pub error: Option<String>,
}

/// 把通知扇出到所有 channel。單一 channel 失敗只記錄，不影響其他 channel
pub struct Dispatcher {
    channels: Vec<Box<dyn Notifier>>,
}

impl Dispatcher {
    pub fn new(channels: Vec<Box<dyn Notifier>>) -> Self {
        Self { channels }
    }

    pub fn empty() -> Self {
        Self {
            channels: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub async fn dispatch(&self, notification: &JobNotification) -> Vec<DispatchResult> {
        let mut results = Vec::with_capacity(self.channels.len());

        for channel in &self.channels {
            let name = channel.channel_name().to_string();
            match channel.send(notification).await {
                Ok(()) => results.push(DispatchResult {
                    channel: name,
                    success: true,
                    error: None,
                }),
                Err(e) => {
                    tracing::warn!("⚠️ Notification via '{}' failed: {}", name, e);
                    results.push(DispatchResult {
                        channel: name,
                        success: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::JobPosting;
    use crate::utils::error::{PipelineError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FlakyNotifier {
        name: String,
        should_fail: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Notifier for FlakyNotifier {
        async fn send(&self, _notification: &JobNotification) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.should_fail {
                return Err(PipelineError::NotifyError {
                    channel: self.name.clone(),
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }

        fn channel_name(&self) -> &str {
            &self.name
        }
    }

    fn notification() -> JobNotification {
        JobNotification::new(
            &JobPosting {
                company: "Acme".to_string(),
                title: "Engineer".to_string(),
                location: "Remote".to_string(),
                link: None,
            },
            None,
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_failing_channel_does_not_block_the_next_one() {
        let email_calls = Arc::new(AtomicUsize::new(0));
        let telegram_calls = Arc::new(AtomicUsize::new(0));

        let dispatcher = Dispatcher::new(vec![
            Box::new(FlakyNotifier {
                name: "email".to_string(),
                should_fail: true,
                calls: email_calls.clone(),
            }),
            Box::new(FlakyNotifier {
                name: "telegram".to_string(),
                should_fail: false,
                calls: telegram_calls.clone(),
            }),
        ]);

        let results = dispatcher.dispatch(&notification()).await;

        assert_eq!(email_calls.load(Ordering::SeqCst), 1);
        assert_eq!(telegram_calls.load(Ordering::SeqCst), 1);
        assert_eq!(results.len(), 2);
        assert!(!results[0].success);
        assert!(results[0].error.as_deref().unwrap_or("").contains("boom"));
        assert!(results[1].success);
    }

    #[tokio::test]
    async fn test_empty_dispatcher_returns_no_results() {
        let dispatcher = Dispatcher::empty();
        assert!(dispatcher.is_empty());
        assert!(dispatcher.dispatch(&notification()).await.is_empty());
    }
}
