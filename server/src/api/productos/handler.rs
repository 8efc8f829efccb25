//! Producto handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::validation::{
    MAX_DESC_LEN, MAX_NAME_LEN, validate_optional_text, validate_required_text,
};
use shared::models::{Producto, ProductoCreate, ProductoUpdate};
use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict the listing to one empresa (storefront view)
    pub empresa: Option<String>,
}

/// GET /api/productos[?empresa=...] - active products
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Producto>>> {
    let productos = state
        .productos()
        .find_all_active(query.empresa.as_deref())
        .await?;
    Ok(Json(productos))
}

/// GET /api/productos/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Producto>> {
    let producto = state
        .productos()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductoNotFound))?;
    Ok(Json(producto))
}

/// POST /api/productos - create a product for the calling empresa
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductoCreate>,
) -> AppResult<Json<Producto>> {
    let empresa_id = user.require_empresa()?.to_string();

    validate_required_text(&payload.nombre, "nombre", MAX_NAME_LEN)?;
    validate_optional_text(&payload.descripcion, "descripcion", MAX_DESC_LEN)?;
    if payload.precio <= Decimal::ZERO {
        return Err(AppError::new(ErrorCode::InvalidPrice));
    }

    let now = now_millis();
    let producto = state
        .productos()
        .create(Producto {
            id: None,
            nombre: payload.nombre.trim().to_string(),
            descripcion: payload.descripcion,
            precio: payload.precio,
            imagen: None,
            activo: true,
            empresa: empresa_id,
            empresa_nombre: user.nombre.clone(),
            created_at: now,
            updated_at: now,
        })
        .await?;

    tracing::info!(
        id = %producto.id.as_deref().unwrap_or_default(),
        empresa = %user.id,
        "Producto created"
    );

    Ok(Json(producto))
}

/// Fetch a product and check the caller owns it
pub(super) async fn owned_producto(
    state: &ServerState,
    user: &CurrentUser,
    id: &str,
) -> AppResult<Producto> {
    let empresa_id = user.require_empresa()?;
    let producto = state
        .productos()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductoNotFound))?;

    if producto.empresa != empresa_id {
        return Err(AppError::new(ErrorCode::NotResourceOwner));
    }
    Ok(producto)
}

/// PUT /api/productos/{id} - merge-update an owned product
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductoUpdate>,
) -> AppResult<Json<Producto>> {
    owned_producto(&state, &user, &id).await?;

    if let Some(nombre) = &payload.nombre {
        validate_required_text(nombre, "nombre", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.descripcion, "descripcion", MAX_DESC_LEN)?;
    if let Some(precio) = payload.precio
        && precio <= Decimal::ZERO
    {
        return Err(AppError::new(ErrorCode::InvalidPrice));
    }

    let producto = state.productos().update(&id, payload).await?;
    Ok(Json(producto))
}

/// DELETE /api/productos/{id} - soft delete; history keeps the reference
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    owned_producto(&state, &user, &id).await?;

    let deleted = state.productos().soft_delete(&id).await?;
    tracing::info!(id = %id, empresa = %user.id, "Producto deactivated");
    Ok(Json(deleted))
}
