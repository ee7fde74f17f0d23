use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use super::google_auth::{self, ServiceAccountKey, truncated_body};
use super::row::{self, HEADERS};
use super::{DeliveryOutcome, IntegrationError, SheetAppender};
use crate::config::SheetsConfig;
use crate::models::SubmissionRecord;

/// Appends leads to a Google Sheet through the Sheets v4 REST API.
pub struct GoogleSheetsAppender {
    client: reqwest::Client,
    config: SheetsConfig,
}

/// Authenticated handle for one operation.
struct Session {
    token: String,
    spreadsheet_id: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl GoogleSheetsAppender {
    pub fn new(config: SheetsConfig, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build Sheets HTTP client: {e}"))?;
        Ok(Self { client, config })
    }

    async fn open_session(&self) -> Result<Session, IntegrationError> {
        let (Some(credentials), Some(spreadsheet_id)) =
            (&self.config.credentials, &self.config.spreadsheet_id)
        else {
            return Err(IntegrationError::from("Missing credentials or sheet ID"));
        };

        let key = ServiceAccountKey::from_json(credentials)?;
        let token = google_auth::fetch_access_token(&self.client, &key).await?;

        Ok(Session {
            token,
            spreadsheet_id: spreadsheet_id.clone(),
        })
    }

    /// `{base}/v4/spreadsheets/{id}/values/{range}{suffix}`, each part encoded as a path segment.
    fn values_url(&self, session: &Session, range: &str, suffix: &str) -> Result<Url, IntegrationError> {
        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| IntegrationError::from(format!("Invalid Sheets API base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| IntegrationError::from("Sheets API base URL cannot be a base"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", session.spreadsheet_id.as_str(), "values"])
            .push(&format!("{range}{suffix}"));
        Ok(url)
    }

    async fn try_append(&self, record: &SubmissionRecord) -> Result<(), IntegrationError> {
        let session = self.open_session().await?;
        let mut url = self.values_url(&session, &row::data_range(&self.config.sheet_name), ":append")?;
        url.set_query(Some("valueInputOption=RAW"));

        let resp = self
            .client
            .post(url)
            .bearer_auth(&session.token)
            .json(&json!({ "values": [row::to_row(record)] }))
            .send()
            .await
            .map_err(|e| IntegrationError::from(format!("Append request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = truncated_body(resp).await;
            return Err(IntegrationError::from(format!("Append returned {status}: {body}")));
        }

        Ok(())
    }

    /// Returns true when headers were written, false when they already existed.
    async fn try_initialize_headers(&self) -> Result<bool, IntegrationError> {
        let session = self.open_session().await?;
        let range = row::header_range(&self.config.sheet_name);

        let resp = self
            .client
            .get(self.values_url(&session, &range, "")?)
            .bearer_auth(&session.token)
            .send()
            .await
            .map_err(|e| IntegrationError::from(format!("Header read failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = truncated_body(resp).await;
            return Err(IntegrationError::from(format!("Header read returned {status}: {body}")));
        }

        let existing: ValueRange = resp
            .json()
            .await
            .map_err(|e| IntegrationError::from(format!("Invalid header read response: {e}")))?;

        if !existing.values.is_empty() {
            return Ok(false);
        }

        let mut url = self.values_url(&session, &range, "")?;
        url.set_query(Some("valueInputOption=RAW"));

        let resp = self
            .client
            .put(url)
            .bearer_auth(&session.token)
            .json(&json!({ "values": [HEADERS] }))
            .send()
            .await
            .map_err(|e| IntegrationError::from(format!("Header write failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = truncated_body(resp).await;
            return Err(IntegrationError::from(format!("Header write returned {status}: {body}")));
        }

        Ok(true)
    }
}

#[async_trait]
impl SheetAppender for GoogleSheetsAppender {
    async fn append(&self, record: &SubmissionRecord) -> DeliveryOutcome {
        match self.try_append(record).await {
            Ok(()) => {
                tracing::info!("Google Sheets: appended form submission");
                DeliveryOutcome::success("Row appended")
            }
            Err(e) => {
                tracing::debug!("Google Sheets: append failed: {e}");
                DeliveryOutcome::failed(e.message)
            }
        }
    }

    async fn initialize_headers(&self) -> DeliveryOutcome {
        match self.try_initialize_headers().await {
            Ok(true) => {
                tracing::info!("Google Sheets: headers initialized");
                DeliveryOutcome::success("Headers written")
            }
            Ok(false) => {
                tracing::info!("Google Sheets: headers already exist");
                DeliveryOutcome::success("Headers already present")
            }
            Err(e) => {
                tracing::debug!("Google Sheets: header initialization failed: {e}");
                DeliveryOutcome::failed(e.message)
            }
        }
    }
}
