//! HTTP webhook delivery for amendment notifications.

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::{Notification, NotifyError, Notifier};

/// Posts each notification as JSON to a fixed URL.
///
/// The payload carries the attachment's file name only, not its contents.
/// The receiver has to fetch the document from `updated_contracts/` itself.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct Payload<'a> {
    subject: &'a str,
    body: &'a str,
    attachment: Option<String>,
}

impl<'a> From<&'a Notification> for Payload<'a> {
    fn from(n: &'a Notification) -> Self {
        Self {
            subject: &n.subject,
            body: &n.body,
            attachment: n.attachment_name(),
        }
    }
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.trim().to_string(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(url = %self.url, subject = %notification.subject, "posting notification");
        let resp = self
            .client
            .post(&self.url)
            .json(&Payload::from(notification))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn payload_carries_attachment_name_only() {
        let n = Notification {
            subject: "Contract Updated: a_v1.pdf".into(),
            body: "Contract updated".into(),
            attachment: Some(PathBuf::from("/srv/data/updated_contracts/a_v1.pdf")),
        };
        let json = serde_json::to_value(Payload::from(&n)).unwrap();
        assert_eq!(json["subject"], "Contract Updated: a_v1.pdf");
        assert_eq!(json["attachment"], "a_v1.pdf");
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3, "unexpected payload fields: {keys:?}");
    }

    #[test]
    fn payload_without_attachment_is_null() {
        let n = Notification {
            subject: "s".into(),
            body: "b".into(),
            attachment: None,
        };
        let json = serde_json::to_value(Payload::from(&n)).unwrap();
        assert!(json["attachment"].is_null());
    }

    #[test]
    fn url_is_trimmed() {
        let notifier = WebhookNotifier::new("  http://localhost:4000/hooks/contracts \n".into());
        assert_eq!(notifier.url, "http://localhost:4000/hooks/contracts");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let notifier = WebhookNotifier::new("http://127.0.0.1:1/hook".into());
        let n = Notification {
            subject: "s".into(),
            body: "b".into(),
            attachment: None,
        };
        assert!(matches!(
            notifier.notify(&n).await,
            Err(NotifyError::Http(_))
        ));
    }
}
