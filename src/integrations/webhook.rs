use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::google_auth::truncated_body;
use super::message::OwnerMessage;
use super::{DeliveryOutcome, IntegrationError, OwnerNotifier};

/// Posts `{ "title", "content" }` to an owner notification endpoint
/// (chat incoming-webhook, push relay and the like).
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build webhook HTTP client: {e}"))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl OwnerNotifier for WebhookNotifier {
    fn id(&self) -> &str {
        "webhook"
    }

    async fn notify(&self, message: &OwnerMessage) -> Result<DeliveryOutcome, IntegrationError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&json!({
                "title": message.title,
                "content": message.content,
            }))
            .send()
            .await
            .map_err(|e| IntegrationError::from(format!("Webhook request failed: {e}")))?;

        let status = resp.status();
        if status.is_success() {
            Ok(DeliveryOutcome::success(format!("Webhook returned {status}")))
        } else {
            let body = truncated_body(resp).await;
            Ok(DeliveryOutcome::failed(format!("Webhook returned {status}: {body}")))
        }
    }
}
