pub mod email;
pub mod google_auth;
pub mod message;
pub mod row;
pub mod sheets;
pub mod webhook;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::models::SubmissionRecord;

use email::EmailNotifier;
use message::OwnerMessage;
use sheets::GoogleSheetsAppender;
use webhook::WebhookNotifier;

/// Result of one best-effort delivery to an external system.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryOutcome {
    pub status: DeliveryStatus,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Success,
    Failed,
    /// Nothing was attempted because the integration is not configured.
    Skipped,
}

impl DeliveryOutcome {
    pub fn success(detail: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Success,
            detail: Some(detail.into()),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Failed,
            detail: Some(detail.into()),
        }
    }

    pub fn skipped(detail: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Skipped,
            detail: Some(detail.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DeliveryStatus::Success
    }
}

#[derive(Debug)]
pub struct IntegrationError {
    pub message: String,
}

impl std::fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for IntegrationError {}

impl From<String> for IntegrationError {
    fn from(s: String) -> Self {
        IntegrationError { message: s }
    }
}

impl From<&str> for IntegrationError {
    fn from(s: &str) -> Self {
        IntegrationError {
            message: s.to_string(),
        }
    }
}

/// Spreadsheet used as the lead system of record.
///
/// Implementations never fail the caller: every problem, including missing
/// configuration, is reported through the returned outcome.
#[async_trait]
pub trait SheetAppender: Send + Sync {
    async fn append(&self, record: &SubmissionRecord) -> DeliveryOutcome;
    async fn initialize_headers(&self) -> DeliveryOutcome;
}

/// Channel that tells the product owner about a new lead.
#[async_trait]
pub trait OwnerNotifier: Send + Sync {
    fn id(&self) -> &str;
    async fn notify(&self, message: &OwnerMessage) -> Result<DeliveryOutcome, IntegrationError>;
}

/// Owner notifier used when no destination is configured.
pub struct NoopNotifier;

#[async_trait]
impl OwnerNotifier for NoopNotifier {
    fn id(&self) -> &str {
        "noop"
    }

    async fn notify(&self, _message: &OwnerMessage) -> Result<DeliveryOutcome, IntegrationError> {
        Ok(DeliveryOutcome::skipped("Owner notification not configured"))
    }
}

pub fn build_sheet_appender(config: &Config) -> Result<Arc<dyn SheetAppender>, String> {
    let appender = GoogleSheetsAppender::new(config.sheets.clone(), config.adapter_timeout)?;
    if !config.sheets.is_configured() {
        tracing::warn!("Google Sheets not configured; submissions will not be recorded");
    }
    Ok(Arc::new(appender))
}

/// Pick the owner channel: webhook first, then email, else a no-op.
pub fn build_owner_notifier(config: &Config) -> Result<Arc<dyn OwnerNotifier>, String> {
    let owner = &config.owner;

    if let Some(url) = &owner.webhook_url {
        tracing::info!("Owner notifications via webhook");
        return Ok(Arc::new(WebhookNotifier::new(url.clone(), config.adapter_timeout)?));
    }

    match (&owner.email, &owner.smtp) {
        (Some(to), Some(smtp)) => {
            tracing::info!("Owner notifications via email");
            Ok(Arc::new(EmailNotifier::new(smtp, to.clone(), config.adapter_timeout)?))
        }
        (Some(_), None) => {
            tracing::warn!("OWNER_NOTIFY_EMAIL set but SMTP is incomplete; owner notifications disabled");
            Ok(Arc::new(NoopNotifier))
        }
        _ => {
            tracing::info!("Owner notifications disabled");
            Ok(Arc::new(NoopNotifier))
        }
    }
}
