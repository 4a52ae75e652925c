#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    status: StatusCode,
    body: String,
    delay: Duration,
}

/// Records every request and answers all of them the same way.
pub struct MockEventServer {
    addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl MockEventServer {
    pub async fn respond_with(status: StatusCode, body: &str) -> Self {
        Self::launch(status, body, Duration::ZERO).await
    }

    pub async fn delayed(delay: Duration) -> Self {
        Self::launch(StatusCode::OK, r#"{"eventId":"late"}"#, delay).await
    }

    async fn launch(status: StatusCode, body: &str, delay: Duration) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            calls: calls.clone(),
            status,
            body: body.to_string(),
            delay,
        };
        let router = Router::new().fallback(record_call).with_state(state);

        // 0: port is picked by the OS
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move { axum::serve(listener, router).await });

        Self {
            addr,
            calls,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub async fn wait_for_calls(&self, count: usize) {
        for _ in 0..200 {
            if self.calls.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("mock server did not receive {} calls", count);
    }
}

impl Drop for MockEventServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn record_call(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let call = RecordedCall {
        method,
        path: uri.path().to_string(),
        content_type: header_value(&headers, "content-type"),
        api_key: header_value(&headers, "x-api-key"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    state.calls.lock().unwrap().push(call);

    tokio::time::sleep(state.delay).await;

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// Answers one request with headers announcing more body than it sends.
pub async fn truncated_body_server() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"eventId\"",
                )
                .await;
            let _ = socket.shutdown().await;
            // drain until the client hangs up so the close is orderly
            let _ = tokio::io::copy(&mut socket, &mut tokio::io::sink()).await;
        }
    });

    (format!("http://{}", addr), handle)
}

/// Answers one request with a 200 whose body arrives in `chunk`-byte pieces
/// spaced `gap` apart.
pub async fn trickling_body_server(
    body: &'static str,
    chunk: usize,
    gap: Duration,
) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
                body.len()
            );
            let _ = socket.write_all(head.as_bytes()).await;
            for piece in body.as_bytes().chunks(chunk) {
                tokio::time::sleep(gap).await;
                let _ = socket.write_all(piece).await;
                let _ = socket.flush().await;
            }
            let _ = tokio::io::copy(&mut socket, &mut tokio::io::sink()).await;
        }
    });

    (format!("http://{}", addr), handle)
}

/// An address nothing listens on.
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
