//! Pedido handlers
//!
//! Order submission re-reads every product so prices and names come from
//! storage, never from the client payload. Status transitions are
//! enforced here; the repository persists whatever it is told.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::models::{
    EstadoPedido, Notificacion, NotificacionTipo, Pedido, PedidoCreate, PedidoEstadoUpdate,
    PedidoItem, PedidoStats, TipoCuenta,
};
use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode};

/// Persist a notification and push it to connected dashboards
async fn notify_empresa(
    state: &ServerState,
    empresa_id: &str,
    titulo: &str,
    mensaje: String,
    tipo: NotificacionTipo,
    metadata: serde_json::Value,
) {
    let notificacion = Notificacion {
        id: None,
        empresa: Some(empresa_id.to_string()),
        titulo: titulo.to_string(),
        mensaje,
        tipo,
        leida: false,
        created_at: now_millis(),
        metadata: Some(metadata),
    };

    // Notification failures never fail the order operation itself
    match state.notificaciones().create(notificacion).await {
        Ok(created) => {
            state.notify.publish(empresa_id, created);
        }
        Err(e) => {
            tracing::warn!(empresa = %empresa_id, "Failed to persist notification: {e}");
        }
    }
}

/// POST /api/pedidos - submit one order (one empresa slice of the cart)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PedidoCreate>,
) -> AppResult<Json<Pedido>> {
    let cliente_id = user.require_cliente()?.to_string();

    if payload.items.is_empty() {
        return Err(AppError::new(ErrorCode::PedidoEmpty));
    }
    if payload.items.iter().any(|i| i.cantidad == 0) {
        return Err(AppError::validation("cantidad must be at least 1"));
    }

    state
        .empresas()
        .find_by_id(&payload.empresa_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmpresaNotFound))?;

    // Re-read every product; stored prices are authoritative
    let ids: Vec<String> = payload.items.iter().map(|i| i.producto_id.clone()).collect();
    let productos = state.productos().find_by_ids(&ids).await?;
    let by_id: HashMap<String, _> = productos
        .into_iter()
        .filter_map(|p| p.id.clone().map(|id| (id, p)))
        .collect();

    let mut items = Vec::with_capacity(payload.items.len());
    let mut total = Decimal::ZERO;
    for line in &payload.items {
        let producto = by_id
            .get(&line.producto_id)
            .ok_or_else(|| {
                AppError::new(ErrorCode::ProductoNotFound).with_detail("producto", line.producto_id.clone())
            })?;

        if producto.empresa != payload.empresa_id {
            return Err(AppError::new(ErrorCode::ProductoWrongEmpresa)
                .with_detail("producto", line.producto_id.clone()));
        }
        if !producto.activo {
            return Err(AppError::new(ErrorCode::ProductoInactive)
                .with_detail("producto", line.producto_id.clone()));
        }

        let item = PedidoItem {
            producto: line.producto_id.clone(),
            nombre: producto.nombre.clone(),
            cantidad: line.cantidad,
            precio: producto.precio,
        };
        total += item.subtotal();
        items.push(item);
    }

    let now = now_millis();
    let pedido = state
        .pedidos()
        .create(Pedido {
            id: None,
            cliente: cliente_id.clone(),
            cliente_nombre: user.nombre.clone(),
            empresa: payload.empresa_id.clone(),
            items,
            total,
            estado: EstadoPedido::Pendiente,
            created_at: now,
            updated_at: now,
        })
        .await?;

    let pedido_id = pedido.id.clone().unwrap_or_default();
    tracing::info!(
        pedido = %pedido_id,
        cliente = %cliente_id,
        empresa = %payload.empresa_id,
        %total,
        "Pedido created"
    );

    notify_empresa(
        &state,
        &payload.empresa_id,
        "Nuevo pedido",
        format!("Nuevo pedido de {} por {}", user.nombre, total),
        NotificacionTipo::NuevoPedido,
        serde_json::json!({
            "pedidoId": pedido_id,
            "total": total,
            "estado": pedido.estado,
        }),
    )
    .await;

    Ok(Json(pedido))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub estado: Option<EstadoPedido>,
}

/// GET /api/pedidos[?estado=...] - orders for the calling empresa
pub async fn list_for_empresa(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Pedido>>> {
    let empresa_id = user.require_empresa()?;
    let pedidos = state
        .pedidos()
        .find_by_empresa(empresa_id, query.estado)
        .await?;
    Ok(Json(pedidos))
}

/// GET /api/pedidos/mios - orders placed by the calling cliente
pub async fn list_for_cliente(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Pedido>>> {
    let cliente_id = user.require_cliente()?;
    let pedidos = state.pedidos().find_by_cliente(cliente_id).await?;
    Ok(Json(pedidos))
}

/// GET /api/pedidos/stats - per-estado counts and revenue
pub async fn stats(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<PedidoStats>> {
    let empresa_id = user.require_empresa()?;
    let stats = state.pedidos().stats(empresa_id).await?;
    Ok(Json(stats))
}

/// GET /api/pedidos/{id} - visible to its cliente and its empresa only
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Pedido>> {
    let pedido = state
        .pedidos()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PedidoNotFound))?;

    let is_owner = match user.tipo {
        TipoCuenta::Cliente => pedido.cliente == user.id,
        TipoCuenta::Empresa => pedido.empresa == user.id,
    };
    if !is_owner {
        return Err(AppError::new(ErrorCode::NotResourceOwner));
    }

    Ok(Json(pedido))
}

/// PUT /api/pedidos/{id}/estado - advance or cancel an order
///
/// Legal moves are the single forward step
/// (pendiente → en_proceso → finalizado) and cancellation from any
/// non-terminal state.
pub async fn update_estado(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<PedidoEstadoUpdate>,
) -> AppResult<Json<Pedido>> {
    let empresa_id = user.require_empresa()?.to_string();

    let pedido = state
        .pedidos()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PedidoNotFound))?;

    if pedido.empresa != empresa_id {
        return Err(AppError::new(ErrorCode::NotResourceOwner));
    }

    if pedido.estado.is_terminal() {
        return Err(AppError::new(ErrorCode::PedidoTerminal)
            .with_detail("estado", pedido.estado.as_str()));
    }
    if !pedido.estado.can_transition_to(payload.estado) {
        return Err(AppError::new(ErrorCode::InvalidStatusTransition)
            .with_detail("from", pedido.estado.as_str())
            .with_detail("to", payload.estado.as_str()));
    }

    let updated = state.pedidos().update_estado(&id, payload.estado).await?;

    tracing::info!(
        pedido = %id,
        from = %pedido.estado,
        to = %payload.estado,
        "Pedido estado updated"
    );

    notify_empresa(
        &state,
        &empresa_id,
        "Pedido actualizado",
        format!("El pedido pasó a {}", payload.estado),
        NotificacionTipo::EstadoPedido,
        serde_json::json!({
            "pedidoId": id,
            "estado": payload.estado,
        }),
    )
    .await;

    Ok(Json(updated))
}
