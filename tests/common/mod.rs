#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use tutoratlas::config::Config;
use tutoratlas::integrations::message::OwnerMessage;
use tutoratlas::integrations::{DeliveryOutcome, IntegrationError, OwnerNotifier, SheetAppender};
use tutoratlas::models::SubmissionRecord;

/// In-memory spreadsheet that records appended leads.
#[derive(Default)]
pub struct FakeSheet {
    pub rows: Mutex<Vec<SubmissionRecord>>,
    pub fail: AtomicBool,
}

impl FakeSheet {
    pub fn rows(&self) -> Vec<SubmissionRecord> {
        self.rows.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SheetAppender for FakeSheet {
    async fn append(&self, record: &SubmissionRecord) -> DeliveryOutcome {
        self.rows.lock().unwrap().push(record.clone());
        if self.fail.load(Ordering::SeqCst) {
            DeliveryOutcome::failed("Missing credentials or sheet ID")
        } else {
            DeliveryOutcome::success("Row appended")
        }
    }

    async fn initialize_headers(&self) -> DeliveryOutcome {
        DeliveryOutcome::success("Headers already present")
    }
}

/// Owner channel that records messages and can be told to error.
#[derive(Default)]
pub struct FakeNotifier {
    pub messages: Mutex<Vec<OwnerMessage>>,
    pub fail: AtomicBool,
}

impl FakeNotifier {
    pub fn messages(&self) -> Vec<OwnerMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl OwnerNotifier for FakeNotifier {
    fn id(&self) -> &str {
        "fake"
    }

    async fn notify(&self, message: &OwnerMessage) -> Result<DeliveryOutcome, IntegrationError> {
        self.messages.lock().unwrap().push(message.clone());
        if self.fail.load(Ordering::SeqCst) {
            Err(IntegrationError::from("owner channel unavailable"))
        } else {
            Ok(DeliveryOutcome::success("delivered"))
        }
    }
}

/// A running test server backed by fake integrations.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub sheet: Arc<FakeSheet>,
    pub notifier: Arc<FakeNotifier>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit JSON to the form endpoint, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/form/submit"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit form-urlencoded data, return (body, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/form/submit"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit a raw body with an explicit content type, return (body, status).
    pub async fn submit_raw(&self, content_type: &str, body: String) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/form/submit"))
            .header("content-type", content_type)
            .body(body)
            .send()
            .await
            .expect("submit raw failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        rate_limit: 100,
        ..Config::default()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

/// Spawn the app on an ephemeral port with the given config.
pub async fn spawn_app_with(config: Config) -> TestApp {
    let sheet = Arc::new(FakeSheet::default());
    let notifier = Arc::new(FakeNotifier::default());

    let state = tutoratlas::build_state_with(config, sheet.clone(), notifier.clone());
    let app = tutoratlas::build_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        sheet,
        notifier,
    }
}
