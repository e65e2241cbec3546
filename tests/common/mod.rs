//! In-process stand-ins for the dashboard backend.
//!
//! - `MockHttp`: `axum` router answering every request through a handler
//! - `MockWs`: WebSocket server that plays a frame script to each connection
//! - `RecordingSurface`: chart surface that logs what it was asked to draw

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::{Json, Router};
use cryptodash_sdk::chart::{ChartSurface, LineChartSpec, UpdateMode};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;

pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

// ─── HTTP ────────────────────────────────────────────────────────────────────

type Handler = Arc<dyn Fn(&str) -> (StatusCode, Value) + Send + Sync>;

#[derive(Clone)]
struct Backend {
    handler: Handler,
    requests: Arc<Mutex<Vec<String>>>,
}

pub struct MockHttp {
    pub addr: SocketAddr,
    /// Request targets (`/path?query`) in arrival order.
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockHttp {
    /// Serve every request with `handler(target) -> (status, json body)`.
    pub async fn start(handler: impl Fn(&str) -> (StatusCode, Value) + Send + Sync + 'static) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let backend = Backend {
            handler: Arc::new(handler),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(answer).with_state(backend);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn answer(State(backend): State<Backend>, uri: Uri) -> (StatusCode, Json<Value>) {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    backend.requests.lock().unwrap().push(target.clone());
    let (status, body) = (backend.handler)(&target);
    (status, Json(body))
}

/// An address nothing listens on.
pub async fn closed_port_url(scheme: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("{}://{}", scheme, addr)
}

// ─── WebSocket ───────────────────────────────────────────────────────────────

pub struct MockWs {
    pub addr: SocketAddr,
    /// Paths clients asked for during the handshake, in connection order.
    pub paths: Arc<Mutex<Vec<String>>>,
    /// Set once any client sent a close frame.
    pub client_closed: Arc<AtomicBool>,
}

impl MockWs {
    /// Accept connections, send `frames` on each, then close with 1000 if
    /// `close_after`, otherwise keep reading until the client leaves.
    pub async fn start(frames: Vec<String>, close_after: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let paths = Arc::new(Mutex::new(Vec::new()));
        let client_closed = Arc::new(AtomicBool::new(false));

        let seen_paths = Arc::clone(&paths);
        let closed = Arc::clone(&client_closed);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let frames = frames.clone();
                let seen_paths = Arc::clone(&seen_paths);
                let closed = Arc::clone(&closed);
                tokio::spawn(async move {
                    let callback = move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
                        seen_paths.lock().unwrap().push(req.uri().path().to_string());
                        Ok(resp)
                    };
                    let Ok(mut ws) = tokio_tungstenite::accept_hdr_async(stream, callback).await else {
                        return;
                    };

                    for frame in frames {
                        if ws.send(Message::Text(frame.into())).await.is_err() {
                            return;
                        }
                    }
                    if close_after {
                        let _ = ws
                            .close(Some(CloseFrame {
                                code: CloseCode::Normal,
                                reason: "bye".into(),
                            }))
                            .await;
                    }

                    while let Some(msg) = ws.next().await {
                        match msg {
                            Ok(Message::Close(_)) => {
                                closed.store(true, Ordering::SeqCst);
                            }
                            Ok(_) => {}
                            Err(_) => break,
                        }
                    }
                });
            }
        });

        Self {
            addr,
            paths,
            client_closed,
        }
    }

    pub fn base_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Path of the first connection.
    pub fn path(&self) -> Option<String> {
        self.paths.lock().unwrap().first().cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    pub fn client_closed(&self) -> bool {
        self.client_closed.load(Ordering::SeqCst)
    }

    /// Wait until a client has sent a close frame.
    pub async fn wait_client_closed(&self) {
        tokio::time::timeout(TEST_TIMEOUT, async {
            while !self.client_closed() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("server never saw a close frame");
    }
}

pub fn tick_frame(price: f64, timestamp_ms: i64) -> String {
    format!(
        r#"{{"symbol":"BTC","pair":"BTCUSDT","price":{},"timestamp":{}}}"#,
        price, timestamp_ms
    )
}

// ─── Chart surface ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Drawn {
    Create(LineChartSpec),
    Update(LineChartSpec, UpdateMode),
    Destroy,
}

#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub log: Arc<Mutex<Vec<Drawn>>>,
}

impl RecordingSurface {
    pub fn calls(&self) -> Vec<Drawn> {
        self.log.lock().unwrap().clone()
    }
}

impl ChartSurface for RecordingSurface {
    type Chart = ();

    fn create(&mut self, spec: &LineChartSpec) -> Self::Chart {
        self.log.lock().unwrap().push(Drawn::Create(spec.clone()));
    }

    fn update(&mut self, _chart: &mut Self::Chart, spec: &LineChartSpec, mode: UpdateMode) {
        self.log.lock().unwrap().push(Drawn::Update(spec.clone(), mode));
    }

    fn destroy(&mut self, _chart: Self::Chart) {
        self.log.lock().unwrap().push(Drawn::Destroy);
    }
}
