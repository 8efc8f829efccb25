//! Notificacion REST handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::client::UnreadCount;
use shared::models::Notificacion;
use shared::{AppError, AppResult};

/// GET /api/notificaciones - recent notifications, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Notificacion>>> {
    let empresa_id = user.require_empresa()?;
    let notificaciones = state.notificaciones().find_by_empresa(empresa_id).await?;
    Ok(Json(notificaciones))
}

/// GET /api/notificaciones/no-leidas
pub async fn count_no_leidas(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UnreadCount>> {
    let empresa_id = user.require_empresa()?;
    let no_leidas = state.notificaciones().count_no_leidas(empresa_id).await?;
    Ok(Json(UnreadCount { no_leidas }))
}

/// PUT /api/notificaciones/{id}/leida
pub async fn mark_leida(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let empresa_id = user.require_empresa()?;
    let updated = state.notificaciones().mark_leida(&id, empresa_id).await?;
    if !updated {
        return Err(AppError::not_found(format!("notificacion {id}")));
    }
    Ok(Json(true))
}

/// PUT /api/notificaciones/leidas - mark everything read
pub async fn mark_all_leidas(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<()>> {
    let empresa_id = user.require_empresa()?;
    state.notificaciones().mark_all_leidas(empresa_id).await?;
    Ok(Json(()))
}
