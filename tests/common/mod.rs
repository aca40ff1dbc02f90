#![allow(dead_code)]

use campus_lost_found::error::NotificationError;
use campus_lost_found::services::email::Mailer;
use campus_lost_found::services::notifier::{DeliveryFailure, Notifier};
use campus_lost_found::store::ItemStore;
use reqwest::Client;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Records every email instead of sending it. Addresses listed in
/// `refuse` fail delivery.
#[derive(Clone, Default)]
pub struct Outbox {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    refuse: Arc<Mutex<Vec<String>>>,
}

impl Outbox {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn refuse(&self, address: &str) {
        self.refuse.lock().unwrap().push(address.to_string());
    }

    /// Wait for the detached worker to deliver at least `count` emails.
    pub async fn wait_for(&self, count: usize) -> Vec<(String, String)> {
        for _ in 0..100 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.sent()
    }
}

impl Mailer for Outbox {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), NotificationError> {
        if self.refuse.lock().unwrap().iter().any(|a| a == to) {
            return Err(NotificationError::Address {
                address: to.to_string(),
                reason: "mailbox unavailable".into(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

pub struct TestApp {
    pub addr: String,
    pub client: Client,
    pub store: ItemStore,
    pub outbox: Outbox,
    pub failures: mpsc::UnboundedReceiver<DeliveryFailure>,
    // Keeps the store directory alive for the test.
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.addr, path)
    }
}

pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = ItemStore::open(dir.path().join("items.json"))
        .await
        .expect("Failed to open item store");

    let outbox = Outbox::default();
    let (failure_tx, failures) = mpsc::unbounded_channel();
    let notifier = Notifier::spawn(outbox.clone(), Some(failure_tx));

    let app = axum::Router::new()
        .merge(campus_lost_found::routes::create_routes())
        .layer(axum::extract::Extension(store.clone()))
        .layer(axum::extract::Extension(notifier));

    TestApp {
        addr: serve(app).await,
        client: Client::new(),
        store,
        outbox,
        failures,
        _dir: dir,
    }
}

/// Serve `app` on a random local port and return its base URL.
pub async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    format!("http://{}", addr)
}

pub fn lost_item_body(name: &str, contact: &str) -> Value {
    serde_json::json!({
        "itemName": name,
        "category": "electronics",
        "location": "Central Library",
        "dateLost": "2024-05-01",
        "timeLost": "14:30",
        "description": "Black case, cracked corner",
        "contact": contact,
        "type": "lost",
        "college": "gitam-university",
        "studentName": "Asha",
        "studentEmail": "asha@gitam.in"
    })
}

pub fn found_item_body(name: &str, contact: &str) -> Value {
    serde_json::json!({
        "itemName": name,
        "category": "books",
        "location": "Canteen",
        "dateFound": "2024-05-02",
        "description": "Hardcover, name on first page",
        "contact": contact,
        "currentLocation": "Security office",
        "type": "found",
        "college": "gitam-university",
        "studentName": "Ravi",
        "studentEmail": "ravi@gitam.in"
    })
}

/// Report a lost item and return its id.
pub async fn create_lost_item(app: &TestApp, name: &str, contact: &str) -> String {
    let resp = app
        .client
        .post(app.url("/items/lost"))
        .json(&lost_item_body(name, contact))
        .send()
        .await
        .expect("Failed to report lost item");
    assert_eq!(resp.status(), 201, "lost item creation failed");
    let body: Value = resp.json().await.unwrap();
    body["id"].as_str().expect("lost item has no id").to_string()
}

/// Post a found item and return its id.
pub async fn create_found_item(app: &TestApp, name: &str, contact: &str) -> String {
    let resp = app
        .client
        .post(app.url("/items/found"))
        .json(&found_item_body(name, contact))
        .send()
        .await
        .expect("Failed to post found item");
    assert_eq!(resp.status(), 201, "found item creation failed");
    let body: Value = resp.json().await.unwrap();
    body["id"].as_str().expect("found item has no id").to_string()
}

pub async fn list_items(app: &TestApp) -> Value {
    app.client
        .get(app.url("/items"))
        .send()
        .await
        .expect("Failed to list items")
        .json()
        .await
        .unwrap()
}
