//! Empresa directory handler

use axum::{Json, extract::State};

use crate::core::ServerState;
use shared::AppResult;
use shared::models::EmpresaPublic;

/// GET /api/empresas - verified sellers, public projection
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<EmpresaPublic>>> {
    let empresas = state.empresas().find_all_verified().await?;
    Ok(Json(empresas.into_iter().map(EmpresaPublic::from).collect()))
}
