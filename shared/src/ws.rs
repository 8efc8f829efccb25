//! WebSocket protocol for the notification push channel
//!
//! Server → empresa session only; the client never sends application frames.

use serde::{Deserialize, Serialize};

use crate::models::Notificacion;

/// Frames pushed over `/api/notificaciones/ws`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once after the connection is established
    Welcome { no_leidas: u64 },

    /// A notification, pushed as it is created
    Notificacion { notificacion: Notificacion },
}
