//! Dashboard notification WebSocket
//!
//! Browsers cannot set an Authorization header on a WebSocket upgrade,
//! so the token travels as a `?token=` query parameter and is validated
//! here instead of in the auth middleware.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::ws::ServerMessage;
use shared::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub token: String,
}

/// GET /api/notificaciones/ws?token=... - upgrade to WebSocket
pub async fn notificaciones_ws(
    State(state): State<ServerState>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> AppResult<impl IntoResponse> {
    let claims = state
        .jwt_service()
        .validate_token(&query.token)
        .map_err(|e| match e {
            crate::auth::JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        })?;
    let user = CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {e}")))?;
    user.require_empresa()?;

    Ok(ws.on_upgrade(move |socket| handle_ws_connection(socket, state, user)))
}

async fn handle_ws_connection(socket: WebSocket, state: ServerState, user: CurrentUser) {
    let empresa_id = user.id.clone();

    tracing::info!(empresa = %empresa_id, "Notification WebSocket connected");

    let (mut ws_sink, mut ws_stream) = socket.split();
    let mut rx = state.notify.subscribe(&empresa_id);

    // Welcome frame carries the unread count for the badge
    let no_leidas = match state.notificaciones().count_no_leidas(&empresa_id).await {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(empresa = %empresa_id, "Failed to count unread notifications: {e}");
            0
        }
    };
    let welcome = ServerMessage::Welcome { no_leidas };
    if let Ok(json) = serde_json::to_string(&welcome)
        && ws_sink.send(Message::Text(json.into())).await.is_err()
    {
        tracing::warn!(empresa = %empresa_id, "Failed to send Welcome, disconnecting");
        drop(rx);
        state.notify.release(&empresa_id);
        return;
    }

    loop {
        tokio::select! {
            // Incoming frames: only control traffic is expected
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!(empresa = %empresa_id, "Notification WebSocket disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::warn!(empresa = %empresa_id, "WebSocket error: {e}");
                        break;
                    }
                    _ => {} // Text, Binary, Pong — ignore
                }
            }

            // Notification to push
            notificacion = rx.recv() => {
                match notificacion {
                    Ok(n) => {
                        let frame = ServerMessage::Notificacion { notificacion: n };
                        if let Ok(json) = serde_json::to_string(&frame)
                            && ws_sink.send(Message::Text(json.into())).await.is_err()
                        {
                            tracing::warn!(empresa = %empresa_id, "Failed to push notification");
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        // The history endpoint fills any gap on reload
                        tracing::warn!(empresa = %empresa_id, skipped, "Notification stream lagged");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    let _ = ws_sink.close().await;
    drop(rx);
    state.notify.release(&empresa_id);
}
