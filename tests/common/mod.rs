//! In-process stand-in for the SmartMeet backend.
//!
//! Canned responses are registered per method and path; every request is
//! recorded so tests can inspect headers and bodies.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::extract::State;
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use smartmeet::api::ApiClient;
use smartmeet::session::SessionContext;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

#[derive(Clone, Default)]
pub struct StubBackend {
    routes: Arc<Mutex<HashMap<(String, String), Canned>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and a JSON body
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.respond_raw(method, path, status, &body.to_string())
    }

    /// Answer `method path` with `status` and an arbitrary body
    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        self.insert(method, path, status, body, None)
    }

    /// Answer `method path` only after `delay` has passed
    pub fn respond_after(
        &self,
        method: &str,
        path: &str,
        delay: Duration,
        status: u16,
        body: Value,
    ) -> &Self {
        self.insert(method, path, status, &body.to_string(), Some(delay))
    }

    fn insert(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: &str,
        delay: Option<Duration>,
    ) -> &Self {
        self.routes.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            Canned {
                status,
                body: body.to_string(),
                delay,
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Serve on an ephemeral port; returns the base URL including `/api`
    pub async fn start(&self) -> String {
        let router = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{}/api", addr)
    }
}

async fn handle(
    State(stub): State<StubBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_string();
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    stub.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        request_id: header("x-request-id"),
        body: serde_json::from_slice(&body).ok(),
    });

    let canned = stub
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), path))
        .cloned();

    match canned {
        Some(canned) => {
            if let Some(delay) = canned.delay {
                tokio::time::sleep(delay).await;
            }
            (
                StatusCode::from_u16(canned.status).unwrap(),
                [(header::CONTENT_TYPE, "application/json")],
                canned.body,
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"error":"Not found"}"#.to_string(),
        )
            .into_response(),
    }
}

/// Client with an in-memory session against `base_url`
pub fn client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, SessionContext::in_memory()).unwrap()
}

/// Base URL of a port nothing listens on
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

/// Base URL of a server that announces a body it never finishes sending
pub async fn truncated_body_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"stats\"",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}/api", addr)
}
