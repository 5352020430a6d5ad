use crate::domain::notification::Notification;
use crate::domain::ports::Notifier;
use super::{DEFAULT_TIMEOUT, http_client};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info};

pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// EmailJS account settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: String,
}

/// `Notifier` that delivers through the EmailJS REST API.
#[derive(Clone)]
pub struct EmailJsNotifier {
    http: reqwest::Client,
    endpoint: String,
    config: EmailJsConfig,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken")]
    access_token: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    to_email: &'a str,
    to_name: &'a str,
    subject: &'a str,
    message: &'a str,
}

impl EmailJsNotifier {
    pub fn new(config: EmailJsConfig) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, config)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, config: EmailJsConfig) -> Self {
        Self {
            http: http_client(DEFAULT_TIMEOUT),
            endpoint: endpoint.into(),
            config,
        }
    }

    async fn send(&self, notification: &Notification) -> Result<(), String> {
        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            access_token: &self.config.private_key,
            template_params: TemplateParams {
                to_email: &notification.recipient,
                to_name: &notification.display_name,
                subject: &notification.subject,
                message: &notification.body,
            },
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(format!("HTTP {}: {}", status.as_u16(), body))
        }
    }
}

#[async_trait]
impl Notifier for EmailJsNotifier {
    async fn notify(&self, notification: Notification) {
        match self.send(&notification).await {
            Ok(()) => info!(to = %notification.recipient, subject = %notification.subject, "Email sent"),
            Err(e) => error!(to = %notification.recipient, subject = %notification.subject, error = %e, "Email failed"),
        }
    }
}
