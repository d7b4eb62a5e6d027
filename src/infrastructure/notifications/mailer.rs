use super::NotificationSender;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct MailPayload<'a> {
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Delivers mail by POSTing JSON to a mail relay webhook.
pub struct HttpMailer {
    client: reqwest::Client,
    webhook_url: String,
    default_recipient: String,
}

impl HttpMailer {
    pub fn new(webhook_url: String, default_recipient: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            webhook_url,
            default_recipient,
        })
    }
}

#[async_trait]
impl NotificationSender for HttpMailer {
    async fn send(
        &self,
        subject: String,
        body: String,
        recipient: Option<String>,
    ) -> anyhow::Result<()> {
        let to = recipient.as_deref().unwrap_or(&self.default_recipient);
        self.client
            .post(&self.webhook_url)
            .json(&MailPayload {
                to,
                subject: &subject,
                text: &body,
            })
            .send()
            .await?
            .error_for_status()?;
        tracing::info!(to, subject = %subject, "Notification sent");
        Ok(())
    }
}

/// Writes notifications to the log. Used when no mail relay is configured.
pub struct LogNotifier {
    default_recipient: String,
}

impl LogNotifier {
    pub fn new(default_recipient: String) -> Self {
        Self { default_recipient }
    }
}

#[async_trait]
impl NotificationSender for LogNotifier {
    async fn send(
        &self,
        subject: String,
        body: String,
        recipient: Option<String>,
    ) -> anyhow::Result<()> {
        let to = recipient.unwrap_or_else(|| self.default_recipient.clone());
        tracing::info!(to = %to, subject = %subject, body = %body, "Notification (not delivered)");
        Ok(())
    }
}
