use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use power_sidebar::{
    client::{ClientError, Command, PowerApi},
    create_router,
    sync::{LogSink, NotificationOptions, SessionGate, Sidebar},
    AppState,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Fake print server: records every command and answers from a fixed table.
pub struct FakeServer {
    seen: mpsc::UnboundedSender<Command>,
    power_code: i64,
    fail: bool,
}

#[async_trait]
impl PowerApi for FakeServer {
    async fn send(&self, command: Command) -> Result<Value, ClientError> {
        let _ = self.seen.send(command);
        if self.fail {
            return Err(ClientError::Status { command, status: 503 });
        }
        Ok(match command {
            Command::GetPrinterPowerState => json!({ "state": self.power_code }),
            Command::GetPowerManagementState => json!({ "isEnabled": true }),
            _ => Value::Null,
        })
    }
}

pub struct Harness {
    pub app: Router,
    pub state: Arc<AppState>,
    pub commands: mpsc::UnboundedReceiver<Command>,
}

pub fn harness(require_login: bool, power_code: i64) -> Harness {
    build(require_login, power_code, false)
}

pub fn failing_harness() -> Harness {
    build(false, 0, true)
}

fn build(require_login: bool, power_code: i64, fail: bool) -> Harness {
    let (seen, commands) = mpsc::unbounded_channel();
    let server = FakeServer {
        seen,
        power_code,
        fail,
    };
    let sidebar = Sidebar::new(
        SessionGate::new(require_login),
        NotificationOptions::default(),
    );
    let state = Arc::new(AppState::start(
        sidebar,
        Arc::new(server),
        Arc::new(LogSink),
        Duration::from_millis(3000),
        0,
        "test".to_string(),
    ));
    Harness {
        app: create_router(Arc::clone(&state)),
        state,
        commands,
    }
}

pub async fn post(app: &Router, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn push(app: &Router, data: Value) {
    let (status, _) = post(
        app,
        "/hooks/plugin-message",
        Some(json!({ "plugin": "powermanager", "data": data })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
}
