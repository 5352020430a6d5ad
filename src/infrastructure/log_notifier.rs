use crate::domain::notification::Notification;
use crate::domain::ports::Notifier;
use async_trait::async_trait;
use tracing::info;

/// Writes notifications to the log instead of delivering them. Used when no
/// email provider is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) {
        info!(
            to = %notification.recipient,
            subject = %notification.subject,
            body = %notification.body,
            "Notification (email disabled)"
        );
    }
}
