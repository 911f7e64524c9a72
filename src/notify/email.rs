use crate::domain::model::JobNotification;
use crate::domain::ports::Notifier;
use crate::utils::error::{PipelineError, Result};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::Path;

/// SMTP 寄信，履歷檔存在的話夾帶附件
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
}

impl EmailNotifier {
    /// 憑證由設定檔帶進來 (經 ${VAR} 替換)，這裡不讀環境變數
    pub fn from_config(
        smtp_host: &str,
        smtp_port: u16,
        from: &str,
        to: &[String],
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let from_mailbox: Mailbox = from.parse().map_err(|e: lettre::address::AddressError| {
            PipelineError::InvalidConfigValueError {
                field: "email.from".to_string(),
                value: from.to_string(),
                reason: e.to_string(),
            }
        })?;

        let to_mailboxes: Vec<Mailbox> = to
            .iter()
            .map(|addr| {
                addr.parse().map_err(|e: lettre::address::AddressError| {
                    PipelineError::InvalidConfigValueError {
                        field: "email.to".to_string(),
                        value: addr.clone(),
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if to_mailboxes.is_empty() {
            return Err(PipelineError::MissingConfigError {
                field: "email.to".to_string(),
            });
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp_host)
            .map_err(|e| PipelineError::ConfigError {
                message: format!("SMTP relay setup failed: {e}"),
            })?
            .port(smtp_port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        Ok(Self {
            transport,
            from: from_mailbox,
            to: to_mailboxes,
        })
    }

    fn compose(notification: &JobNotification) -> (String, String) {
        let subject = format!(
            "New remote job: {} at {}",
            notification.title, notification.company
        );
        let body = format!(
            "Job: {title}\n\
             Company: {company}\n\
             Location: {location}\n\
             Link: {link}\n\
             Resume: {resume}\n\
             Errors: {error}\n",
            title = notification.title,
            company = notification.company,
            location = notification.location,
            link = notification.link,
            resume = notification.resume_ref,
            error = notification.error,
        );
        (subject, body)
    }
}

#[async_trait::async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, notification: &JobNotification) -> Result<()> {
        let (subject, body) = Self::compose(notification);

        let mut builder = Message::builder().from(self.from.clone());
        for recipient in &self.to {
            builder = builder.to(recipient.clone());
        }
        let builder = builder.subject(subject);

        // 有本地履歷檔才夾附件
        let attachment = notification
            .resume_path
            .as_deref()
            .filter(|path| Path::new(path).is_file())
            .map(|path| -> Result<SinglePart> {
                let bytes = std::fs::read(path)?;
                let filename = Path::new(path)
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("resume.md")
                    .to_string();
                Ok(Attachment::new(filename).body(bytes, ContentType::TEXT_PLAIN))
            })
            .transpose()?;

        let email = match attachment {
            Some(part) => builder
                .multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::plain(body))
                        .singlepart(part),
                )
                .map_err(|e| PipelineError::SmtpError(e.to_string()))?,
            None => builder
                .body(body)
                .map_err(|e| PipelineError::SmtpError(e.to_string()))?,
        };

        self.transport
            .send(email)
            .await
            .map_err(|e| PipelineError::SmtpError(e.to_string()))?;

        tracing::info!(
            "📧 Email notification sent for '{}' to {} recipient(s)",
            notification.title,
            self.to.len()
        );

        Ok(())
    }

    fn channel_name(&self) -> &str {
        "email"
    }
}
