use crate::domain::model::JobNotification;
use crate::domain::ports::Notifier;
use crate::utils::error::{PipelineError, Result};

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// 透過 Telegram Bot API sendMessage 發通知
pub struct TelegramNotifier {
    bot_token: String,
    chat_id: String,
    api_base: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn from_config(bot_token: String, chat_id: String) -> Result<Self> {
        if bot_token.trim().is_empty() {
            return Err(PipelineError::MissingConfigError {
                field: "telegram.bot_token".to_string(),
            });
        }
        if chat_id.trim().is_empty() {
            return Err(PipelineError::MissingConfigError {
                field: "telegram.chat_id".to_string(),
            });
        }

        Ok(Self {
            bot_token,
            chat_id,
            api_base: DEFAULT_API_BASE.to_string(),
            client: reqwest::Client::new(),
        })
    }

    #[cfg(test)]
    fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base;
        self
    }

    fn compose_text(notification: &JobNotification) -> String {
        format!(
            "📢 New remote job\n\
             {title} at {company}\n\
             Location: {location}\n\
             Link: {link}\n\
             Resume: {resume}\n\
             Errors: {error}",
            title = notification.title,
            company = notification.company,
            location = notification.location,
            link = notification.link,
            resume = notification.resume_ref,
            error = notification.error,
        )
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, notification: &JobNotification) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": Self::compose_text(notification),
        });

        tracing::debug!("Sending Telegram notification for '{}'", notification.title);

        let response = self.client.post(&url).json(&body).send().await?;
        let payload: serde_json::Value = response.json().await?;

        if payload.get("ok") == Some(&serde_json::Value::Bool(true)) {
            tracing::info!("💬 Telegram notification sent for '{}'", notification.title);
            return Ok(());
        }

        let description = payload
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown Telegram API error");

        Err(PipelineError::NotifyError {
            channel: "telegram".to_string(),
            message: description.to_string(),
        })
    }

    fn channel_name(&self) -> &str {
        "telegram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::JobPosting;
    use httpmock::prelude::*;

    fn notification() -> JobNotification {
        JobNotification::new(
            &JobPosting {
                company: "Acme Corp".to_string(),
                title: "Platform Engineer".to_string(),
                location: "Remote - US only".to_string(),
                link: Some("https://jobs.example.com/1".to_string()),
            },
            Some("https://drive.google.com/file/d/abc/view".to_string()),
            None,
            None,
        )
    }

    #[test]
    fn test_empty_token_rejected() {
        let result = TelegramNotifier::from_config(String::new(), "123".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_chat_id_rejected() {
        let result = TelegramNotifier::from_config("123:ABC".to_string(), "  ".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_compose_text_contains_all_fields() {
        let text = TelegramNotifier::compose_text(&notification());
        assert!(text.contains("Platform Engineer at Acme Corp"));
        assert!(text.contains("Location: Remote - US only"));
        assert!(text.contains("Link: https://jobs.example.com/1"));
        assert!(text.contains("Resume: https://drive.google.com/file/d/abc/view"));
        assert!(text.contains("Errors: None"));
    }

    #[tokio::test]
    async fn test_send_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/bot123:ABC/sendMessage");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"ok": true, "result": {}}));
        });

        let notifier = TelegramNotifier::from_config("123:ABC".to_string(), "42".to_string())
            .unwrap()
            .with_api_base(server.base_url());

        notifier.send(&notification()).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_api_error_is_surfaced() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/bot123:ABC/sendMessage");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"ok": false, "description": "chat not found"}));
        });

        let notifier = TelegramNotifier::from_config("123:ABC".to_string(), "42".to_string())
            .unwrap()
            .with_api_base(server.base_url());

        let err = notifier.send(&notification()).await.unwrap_err();
        assert!(err.to_string().contains("chat not found"));
    }
}
