use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use leadsheet::config::{Config, FieldSet, SheetPolicy, StoreBackend};
use leadsheet::store::MemorySheetStore;

/// A running test server backed by an in-memory sheet store. The store
/// handle allows direct inspection of what the handler persisted.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemorySheetStore>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit a JSON lead, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/v1/leads"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit a raw body under an explicit (or absent) content type.
    pub async fn submit_raw(&self, content_type: Option<&str>, body: &str) -> (Value, StatusCode) {
        let mut req = self.client.post(self.url("/v1/leads")).body(body.to_string());
        if let Some(ct) = content_type {
            req = req.header("content-type", ct);
        }
        let resp = req.send().await.expect("submit raw failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit a form-encoded body, return (body, status).
    pub async fn submit_form(&self, body: &str) -> (Value, StatusCode) {
        self.submit_raw(Some("application/x-www-form-urlencoded"), body)
            .await
    }

    /// Make a GET request, return (body, status).
    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make a POST request with no body, return (body, status).
    pub async fn post(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to a random port
        spreadsheet_id: "test-container".to_string(),
        sheet_policy: SheetPolicy::Named,
        target_sheet: "Leads".to_string(),
        field_set: FieldSet::WithNotes,
        store: StoreBackend::Memory,
        log_level: "warn".to_string(),
    }
}

/// Spawn a test app with the default config (named "Leads" target,
/// 13-column field set).
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let store = Arc::new(MemorySheetStore::new());
    let app = leadsheet::build_app(store.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        store,
    }
}
