//! Notification layer: tells someone a contract was amended.
//!
//! Delivery is best-effort. Callers log a [`NotifyError`] and carry on; an
//! output document and its history record are never rolled back because a
//! notification failed.

use std::path::PathBuf;

use async_trait::async_trait;
use regtrack_core::AmendmentAction;
use thiserror::Error;
use tracing::info;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::WebhookNotifier;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
}

/// A message about one amended contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    /// The rendered output document.
    pub attachment: Option<PathBuf>,
}

impl Notification {
    pub fn contract_updated(
        output_name: &str,
        actions: &[AmendmentAction],
        attachment: Option<PathBuf>,
    ) -> Self {
        let changes: Vec<String> = actions.iter().map(|a| format!("- {a}")).collect();
        Self {
            subject: format!("Contract Updated: {output_name}"),
            body: format!(
                "Contract updated with the following changes:\n\n{}",
                changes.join("\n")
            ),
            attachment,
        }
    }

    /// File name of the attachment, if any.
    pub fn attachment_name(&self) -> Option<String> {
        self.attachment
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(
            subject = %notification.subject,
            attachment = notification.attachment_name().as_deref().unwrap_or("-"),
            "notification"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_updated_message() {
        let n = Notification::contract_updated(
            "nda_v1771668000.pdf",
            &[
                AmendmentAction::Removed("Safety".into()),
                AmendmentAction::Inserted("Safety".into()),
            ],
            Some(PathBuf::from("/data/updated_contracts/nda_v1771668000.pdf")),
        );
        assert_eq!(n.subject, "Contract Updated: nda_v1771668000.pdf");
        assert_eq!(
            n.body,
            "Contract updated with the following changes:\n\n\
             - Removed outdated clause related to 'Safety'\n\
             - Inserted updated clause for 'Safety'"
        );
        assert_eq!(n.attachment_name().as_deref(), Some("nda_v1771668000.pdf"));
    }

    #[test]
    fn no_attachment() {
        let n = Notification::contract_updated("x.txt", &[], None);
        assert_eq!(n.attachment_name(), None);
    }

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        let n = Notification::contract_updated("x.txt", &[], None);
        assert!(LogNotifier.notify(&n).await.is_ok());
    }
}
