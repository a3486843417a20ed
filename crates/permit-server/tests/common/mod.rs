//! A fake data service and LINE push endpoint, plus a helper that boots
//! the real application against them.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::routing::post;
use permit_server::config::ServerConfig;
use permit_server::state::AppState;
use serde_json::Value;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub api_key: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct Upstream {
    requests: Vec<Recorded>,
    script: VecDeque<(u16, String)>,
}

#[derive(Clone, Default)]
pub struct FakeUpstream {
    inner: Arc<Mutex<Upstream>>,
}

impl FakeUpstream {
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .script
            .push_back((status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

async fn record(
    State(upstream): State<FakeUpstream>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let mut inner = upstream.inner.lock().unwrap();
    inner.requests.push(Recorded {
        path: uri.path().to_string(),
        api_key: header("x-api-key"),
        authorization: header("authorization"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });
    let (status, body) = inner
        .script
        .pop_front()
        .unwrap_or((200, "[]".to_string()));
    (StatusCode::from_u16(status).unwrap(), body)
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub struct TestApp {
    pub base: String,
    pub upstream: FakeUpstream,
    pub http: reqwest::Client,
    pub upload_dir: std::path::PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

/// Boot the application against a fresh fake upstream. Pacing is turned
/// down so the tests do not wait two seconds per call.
pub async fn spawn_app() -> TestApp {
    let upstream = FakeUpstream::default();
    let upstream_addr = serve(
        Router::new()
            .route("/api/query", post(record))
            .route("/api/procedure", post(record))
            .route("/v2/bot/message/push", post(record))
            .with_state(upstream.clone()),
    )
    .await;

    let upload_dir = std::env::temp_dir().join(format!(
        "permit-server-test-{}-{}",
        std::process::id(),
        upstream_addr.port()
    ));

    let mut config = ServerConfig::default();
    config.data.base_url = format!("http://{upstream_addr}/api");
    config.data.api_key = "test-key".into();
    config.data.min_interval = Duration::from_millis(1);
    config.service.notify.push_url = format!("http://{upstream_addr}/v2/bot/message/push");
    config.service.notify.channel_access_token = "line-token".into();
    config.service.notify.admin_line_id = "U-admin".into();
    config.upload_dir = upload_dir.clone();

    let state = AppState::new(config).unwrap();
    let app_addr = serve(permit_server::app(state)).await;

    TestApp {
        base: format!("http://{app_addr}"),
        upstream,
        http: reqwest::Client::new(),
        upload_dir,
    }
}
