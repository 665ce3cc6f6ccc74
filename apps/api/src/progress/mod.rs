//! Realtime progress channel for long-running analyses.
//!
//! A client opens `GET /ws?client_id=...` before submitting a resume and
//! passes the same identifier with the upload. Pipeline stages emit
//! step-status events addressed to that identifier, followed by exactly one
//! terminal event (success with the full report, or error).
//!
//! The identifier is supplied by the caller and is not verified against any
//! session — events addressed to an unknown identifier are dropped.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

use crate::ats::models::AtsReport;
use crate::state::AppState;

/// Analysis stages reported to the client, in the order the UI displays
/// them. Stages run concurrently; completion order is not guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Skills,
    Experience,
    Projects,
    Education,
    Formatting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Processing,
    Completed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum ProgressEvent {
    #[serde(rename = "stepUpdate")]
    StepUpdate { step: Step, status: StepStatus },

    #[serde(rename = "analysisComplete")]
    AnalysisComplete(Box<AtsReport>),

    #[serde(rename = "analysisError")]
    AnalysisError { error: String },
}

/// Registry of connected progress clients, keyed by caller-supplied id.
#[derive(Clone, Default)]
pub struct ProgressNotifier {
    clients: Arc<RwLock<HashMap<String, mpsc::UnboundedSender<ProgressEvent>>>>,
}

impl ProgressNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a client and returns the receiving half of its channel.
    /// A reconnect under the same id replaces the previous sender; the stale
    /// connection's receiver closes and its socket loop ends.
    pub async fn register(&self, client_id: &str) -> mpsc::UnboundedReceiver<ProgressEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.clients.write().await.insert(client_id.to_string(), tx);
        rx
    }

    pub async fn unregister(&self, client_id: &str) {
        self.clients.write().await.remove(client_id);
    }

    /// Sends an event to one client. Events for unknown or disconnected
    /// clients are dropped — analysis never blocks on a missing listener.
    pub async fn emit(&self, client_id: &str, event: ProgressEvent) {
        let clients = self.clients.read().await;
        if let Some(tx) = clients.get(client_id) {
            if tx.send(event).is_err() {
                debug!("progress client '{client_id}' went away mid-send");
            }
        }
    }

    pub async fn emit_step(&self, client_id: &str, step: Step, status: StepStatus) {
        self.emit(client_id, ProgressEvent::StepUpdate { step, status })
            .await;
    }
}

#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub client_id: String,
}

/// GET /ws?client_id=...
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| client_loop(socket, state.progress, params.client_id))
}

async fn client_loop(mut socket: WebSocket, notifier: ProgressNotifier, client_id: String) {
    let mut rx = notifier.register(&client_id).await;
    debug!("progress client '{client_id}' connected");

    while let Some(event) = rx.recv().await {
        let text = match serde_json::to_string(&event) {
            Ok(t) => t,
            Err(e) => {
                debug!("failed to serialize progress event: {e}");
                continue;
            }
        };
        if socket.send(Message::Text(text)).await.is_err() {
            break;
        }
    }

    notifier.unregister(&client_id).await;
    debug!("progress client '{client_id}' disconnected");
}
