pub mod mailer;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Instrument, warn};

/// Outbound notification channel (moderation alerts, author notices).
///
/// Callers go through [`dispatch`]: delivery runs in the background and a
/// failure is only logged, so a notification never delays or changes the
/// outcome of the operation that triggered it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Sends to `recipient`, or to the configured default when `None`.
    async fn send(
        &self,
        subject: String,
        body: String,
        recipient: Option<String>,
    ) -> anyhow::Result<()>;
}

/// Sends on a background task and returns immediately. Must be called from
/// within a Tokio runtime.
pub fn dispatch(
    notifier: Arc<dyn NotificationSender>,
    subject: String,
    body: String,
    recipient: Option<String>,
) {
    tokio::spawn(
        async move {
            if let Err(e) = notifier.send(subject, body, recipient).await {
                warn!(error = %e, "Notification delivery failed");
            }
        }
        .in_current_span(),
    );
}
