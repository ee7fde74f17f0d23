use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use super::validate::{self, ValidationError};
use crate::integrations::message;
use crate::integrations::{DeliveryOutcome, DeliveryStatus, OwnerNotifier, SheetAppender};
use crate::models::{SubmissionInput, SubmissionRecord};

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

impl SubmitResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Validates a lead and fans it out to the spreadsheet and the owner channel.
///
/// Only validation can fail a submission. Both integrations are attempted
/// concurrently, each bounded by `timeout`, and their failures are logged and
/// absorbed.
pub struct SubmissionHandler {
    sheet: Arc<dyn SheetAppender>,
    notifier: Arc<dyn OwnerNotifier>,
    timeout: Duration,
}

impl SubmissionHandler {
    pub fn new(
        sheet: Arc<dyn SheetAppender>,
        notifier: Arc<dyn OwnerNotifier>,
        timeout: Duration,
    ) -> Self {
        Self {
            sheet,
            notifier,
            timeout,
        }
    }

    pub fn sheet(&self) -> &Arc<dyn SheetAppender> {
        &self.sheet
    }

    pub async fn submit(&self, input: SubmissionInput) -> Result<SubmitResponse, ValidationError> {
        let input = input.normalize();
        validate::validate(&input)?;

        let record = SubmissionRecord::from_input(input, Utc::now());
        let owner_message = message::render(&record);

        let (sheet, notify) = tokio::join!(
            tokio::time::timeout(self.timeout, self.sheet.append(&record)),
            tokio::time::timeout(self.timeout, self.notifier.notify(&owner_message)),
        );

        match sheet {
            Ok(outcome) if outcome.is_success() => {}
            Ok(outcome) => tracing::warn!(
                "Failed to append to Google Sheets, but continuing: {}",
                describe(&outcome)
            ),
            Err(_) => tracing::warn!(
                "Google Sheets append timed out after {:?}, but continuing",
                self.timeout
            ),
        }

        match notify {
            Ok(Ok(outcome)) => match outcome.status {
                DeliveryStatus::Success => {}
                DeliveryStatus::Skipped => {
                    tracing::debug!("Owner notification skipped: {}", describe(&outcome))
                }
                DeliveryStatus::Failed => tracing::warn!(
                    "Owner notification via {} failed: {}",
                    self.notifier.id(),
                    describe(&outcome)
                ),
            },
            Ok(Err(e)) => {
                tracing::warn!("Owner notification via {} failed: {e}", self.notifier.id())
            }
            Err(_) => tracing::warn!(
                "Owner notification via {} timed out after {:?}",
                self.notifier.id(),
                self.timeout
            ),
        }

        tracing::info!(name = %record.name, timestamp = %record.timestamp, "Lead accepted");

        Ok(SubmitResponse::accepted())
    }
}

fn describe(outcome: &DeliveryOutcome) -> &str {
    outcome.detail.as_deref().unwrap_or("no detail")
}
