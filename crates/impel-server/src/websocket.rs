//! WebSocket handler for real-time updates
//!
//! Note: WebSocket support in axum 0.8 requires the axum-extra crate.
//! For now, this module provides a placeholder that returns the status.

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::AppState;

/// WebSocket upgrade handler (placeholder - returns current status)
///
/// To enable full WebSocket support, add axum-extra with websocket feature.
pub async fn ws_handler(
    State(state): State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    // Return current status as JSON for now
    // Full WebSocket support would require axum-extra
    let coord = state.coordination.read().await;
    let status = serde_json::json!({
        "type": "status",
        "message": "WebSocket endpoint - use HTTP polling or SSE as alternative",
        "paused": coord.is_paused(),
        "thread_count": coord.threads().count(),
        "sequence": coord.current_sequence()
    });
    Json(status)
}

// The following would be used with axum-extra WebSocket support:
//
// use axum_extra::extract::ws::{Message, WebSocket, WebSocketUpgrade};
//
// pub async fn ws_handler(
//     ws: WebSocketUpgrade,
//     State(state): State<Arc<AppState>>,
// ) -> impl IntoResponse {
//     ws.on_upgrade(move |socket| handle_socket(socket, state))
// }
//
// async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
//     // ... WebSocket handling code
// }
