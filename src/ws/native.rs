//! Native WebSocket client — `tokio-tungstenite`.
//!
//! - Background tokio task owns the socket
//! - Text frames are forwarded unparsed as [`WsEvent::Message`]
//! - One connection per client: no reconnect, no outbound application messages
//! - Stream-based event delivery; when the consumer falls behind, new events
//!   are dropped so the task keeps serving close requests

use std::pin::Pin;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream, Stream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::WsError;
use crate::ws::{ReadyState, WsConfig, WsEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const EVENT_QUEUE_LEN: usize = 256;

// ─── Commands from public API to background task ─────────────────────────────

enum Command {
    Disconnect,
}

// ─── Background task state ───────────────────────────────────────────────────

struct TaskState {
    config: WsConfig,
    event_tx: mpsc::Sender<WsEvent>,
    cmd_rx: mpsc::Receiver<Command>,
    ready_state: Arc<AtomicU16>,
}

impl TaskState {
    fn emit(&self, event: WsEvent) {
        if let Err(mpsc::error::TrySendError::Full(dropped)) = self.event_tx.try_send(event) {
            tracing::warn!(url = %self.config.url, ?dropped, "Event queue full, dropping event");
        }
    }

    fn set_ready_state(&self, state: ReadyState) {
        self.ready_state.store(state as u16, Ordering::SeqCst);
    }
}

// ─── Public WsClient ─────────────────────────────────────────────────────────

/// Native WebSocket client using `tokio-tungstenite`.
///
/// Uses a background tokio task for connection management.
/// The public API communicates with it via mpsc channels.
pub struct WsClient {
    config: WsConfig,
    cmd_tx: Option<mpsc::Sender<Command>>,
    event_rx: tokio::sync::Mutex<mpsc::Receiver<WsEvent>>,
    /// Handed to the task on `connect`, so the stream ends once the task exits.
    event_tx: Option<mpsc::Sender<WsEvent>>,
    task_handle: Option<JoinHandle<()>>,
    ready_state: Arc<AtomicU16>,
}

impl WsClient {
    /// Create a new WS client. Does not connect yet.
    pub fn new(config: WsConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_LEN);
        Self {
            config,
            cmd_tx: None,
            event_rx: tokio::sync::Mutex::new(event_rx),
            event_tx: Some(event_tx),
            task_handle: None,
            ready_state: Arc::new(AtomicU16::new(ReadyState::Closed as u16)),
        }
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Open the connection.
    ///
    /// Spawns the background task and returns immediately; the outcome arrives
    /// as `Connected` or `Error` + `Disconnected` on the event stream. Calling
    /// this on a client that was already started is a no-op; a client that
    /// has been disconnected cannot be restarted.
    pub async fn connect(&mut self) -> Result<(), WsError> {
        if self.cmd_tx.is_some() {
            return Ok(());
        }
        let Some(event_tx) = self.event_tx.take() else {
            return Err(WsError::Finished);
        };

        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        self.cmd_tx = Some(cmd_tx);
        self.ready_state
            .store(ReadyState::Connecting as u16, Ordering::SeqCst);

        let state = TaskState {
            config: self.config.clone(),
            event_tx,
            cmd_rx,
            ready_state: Arc::clone(&self.ready_state),
        };

        self.task_handle = Some(tokio::spawn(run_task(state)));
        Ok(())
    }

    /// Close the connection.
    ///
    /// Sends a normal close frame and waits up to `close_timeout` for the
    /// background task to finish. A task that does not stop in time is
    /// aborted, which drops the socket, and `WsError::CloseTimeout` is returned.
    pub async fn disconnect(&mut self) -> Result<(), WsError> {
        let Some(tx) = self.cmd_tx.take() else {
            return Ok(());
        };
        self.ready_state
            .store(ReadyState::Closing as u16, Ordering::SeqCst);
        let _ = tx.try_send(Command::Disconnect);

        let result = match self.task_handle.take() {
            Some(mut handle) => {
                match tokio::time::timeout(self.config.close_timeout, &mut handle).await {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(e)) => Err(WsError::Task(e.to_string())),
                    Err(_) => {
                        tracing::warn!(url = %self.config.url, "WebSocket task did not stop in time, aborting");
                        handle.abort();
                        Err(WsError::CloseTimeout(self.config.close_timeout))
                    }
                }
            }
            None => Ok(()),
        };

        self.ready_state
            .store(ReadyState::Closed as u16, Ordering::SeqCst);
        result
    }

    /// Whether the WebSocket is currently open.
    pub fn is_connected(&self) -> bool {
        self.ready_state() == ReadyState::Open
    }

    /// Current connection state.
    pub fn ready_state(&self) -> ReadyState {
        ReadyState::from(self.ready_state.load(Ordering::SeqCst))
    }

    /// Wait for the next event. `None` once the connection task has exited
    /// and every queued event was received.
    pub async fn next_event(&self) -> Option<WsEvent> {
        self.event_rx.lock().await.recv().await
    }

    /// Get a stream of events from the WebSocket connection.
    ///
    /// The returned stream borrows `self`, so it must be dropped
    /// before calling `disconnect()`.
    pub fn events(&self) -> Pin<Box<dyn Stream<Item = WsEvent> + Send + '_>> {
        Box::pin(futures_util::stream::unfold(
            &self.event_rx,
            |rx| async move {
                let mut guard = rx.lock().await;
                guard.recv().await.map(|event| (event, rx))
            },
        ))
    }
}

impl Drop for WsClient {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

async fn run_task(mut state: TaskState) {
    let (sink, stream) = match attempt_connect(&state.config).await {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!(url = %state.config.url, "WebSocket connection failed: {}", e);
            state.set_ready_state(ReadyState::Closed);
            state.emit(WsEvent::Error(format!("Connection failed: {}", e)));
            state.emit(WsEvent::Disconnected {
                code: None,
                reason: e,
            });
            return;
        }
    };

    tracing::info!(url = %state.config.url, "WebSocket connected");
    state.set_ready_state(ReadyState::Open);
    state.emit(WsEvent::Connected);

    run_connected(&mut state, sink, stream).await;

    state.set_ready_state(ReadyState::Closed);
    tracing::info!(url = %state.config.url, "WebSocket closed");
}

/// The connected loop — runs until either side closes.
async fn run_connected(
    state: &mut TaskState,
    mut sink: SplitSink<WsStream, Message>,
    mut stream: SplitStream<WsStream>,
) {
    loop {
        tokio::select! {
            // ── a) Incoming WS message ───────────────────────────────────
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!(len = text.len(), "WS frame");
                        state.emit(WsEvent::Message(text.as_str().to_owned()));
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let (code, reason) = extract_close(frame.as_ref());
                        state.emit(WsEvent::Disconnected {
                            code: Some(code),
                            reason,
                        });
                        return;
                    }
                    Some(Ok(_)) => {} // Binary, Pong, Frame — ignore
                    Some(Err(e)) => {
                        let reason = e.to_string();
                        tracing::error!("WebSocket error: {}", reason);
                        state.emit(WsEvent::Error(reason.clone()));
                        state.emit(WsEvent::Disconnected {
                            code: None,
                            reason,
                        });
                        return;
                    }
                    None => {
                        state.emit(WsEvent::Disconnected {
                            code: None,
                            reason: "Stream ended".into(),
                        });
                        return;
                    }
                }
            }

            // ── b) Command from public API ───────────────────────────────
            cmd = state.cmd_rx.recv() => {
                match cmd {
                    Some(Command::Disconnect) => {
                        state.set_ready_state(ReadyState::Closing);
                        let _ = sink.send(Message::Close(Some(CloseFrame {
                            code: CloseCode::Normal,
                            reason: "Client disconnect".into(),
                        }))).await;
                        state.emit(WsEvent::Disconnected {
                            code: Some(1000),
                            reason: "Client disconnect".into(),
                        });
                        return;
                    }
                    None => {
                        // WsClient dropped — clean exit
                        return;
                    }
                }
            }
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Attempt to establish a WebSocket connection within the configured timeout.
async fn attempt_connect(
    config: &WsConfig,
) -> Result<(SplitSink<WsStream, Message>, SplitStream<WsStream>), String> {
    let (ws_stream, _) = tokio::time::timeout(config.connect_timeout, connect_async(&config.url))
        .await
        .map_err(|_| "Connection timeout".to_string())?
        .map_err(|e| e.to_string())?;

    Ok(ws_stream.split())
}

/// Extract close code and reason from an optional CloseFrame.
fn extract_close(frame: Option<&CloseFrame>) -> (u16, String) {
    match frame {
        Some(f) => (f.code.into(), f.reason.to_string()),
        None => (1006, "No close frame".into()),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
