//! Router-level tests driving the middleware + handler stack in process
//! Run: cargo test -p mercado-server --test api

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode, header};
use mercado_server::{Config, ServerState, api};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::ErrorCode;
use shared::models::{
    Cliente, Empresa, EstadoPedido, Pedido, PedidoItem, Producto, TipoCuenta,
};
use shared::util::now_millis;
use tower::ServiceExt;

async fn test_app() -> (tempfile::TempDir, ServerState, Router) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await.expect("state");
    let app = api::router(state.clone());
    (tmp, state, app)
}

async fn seed_empresa(state: &ServerState, email: &str, nombre: &str) -> (String, String) {
    let empresa = state
        .empresas()
        .create(Empresa {
            id: None,
            nombre: nombre.into(),
            email: email.into(),
            password: "$argon2$fake".into(),
            descripcion: None,
            logo: None,
            verificado: true,
            created_at: now_millis(),
        })
        .await
        .expect("empresa");
    let id = empresa.id.expect("id");
    let token = state
        .jwt_service()
        .generate_token(&id, email, nombre, TipoCuenta::Empresa)
        .expect("token");
    (id, token)
}

async fn seed_cliente(state: &ServerState) -> (String, String) {
    let cliente = state
        .clientes()
        .create(Cliente {
            id: None,
            nombre: "Ana".into(),
            email: "ana@mail.com".into(),
            password: "$argon2$fake".into(),
            verificado: true,
            created_at: now_millis(),
        })
        .await
        .expect("cliente");
    let id = cliente.id.expect("id");
    let token = state
        .jwt_service()
        .generate_token(&id, "ana@mail.com", "Ana", TipoCuenta::Cliente)
        .expect("token");
    (id, token)
}

async fn seed_producto(
    state: &ServerState,
    empresa_id: &str,
    nombre: &str,
    precio: i64,
    activo: bool,
) -> String {
    let now = now_millis();
    let producto = state
        .productos()
        .create(Producto {
            id: None,
            nombre: nombre.into(),
            descripcion: None,
            precio: Decimal::from(precio),
            imagen: None,
            activo,
            empresa: empresa_id.into(),
            empresa_nombre: "Panadería Sol".into(),
            created_at: now,
            updated_at: now,
        })
        .await
        .expect("producto");
    producto.id.expect("id")
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Value,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

#[tokio::test]
async fn order_submission_rejects_inactive_product() {
    let (_tmp, state, app) = test_app().await;
    let (empresa_id, _) = seed_empresa(&state, "sol@mail.com", "Panadería Sol").await;
    let (_, cliente_token) = seed_cliente(&state).await;
    let producto_id = seed_producto(&state, &empresa_id, "Pan", 2, false).await;

    let payload = json!({
        "empresaId": empresa_id,
        "items": [{ "productoId": producto_id, "cantidad": 1, "precio": "2" }],
    });
    let (status, body) = send_json(&app, "POST", "/api/pedidos", &cliente_token, payload).await;

    assert_eq!(status, ErrorCode::ProductoInactive.http_status());
    assert_eq!(body["code"], u16::from(ErrorCode::ProductoInactive));
}

#[tokio::test]
async fn order_submission_rejects_product_of_another_empresa() {
    let (_tmp, state, app) = test_app().await;
    let (sol_id, _) = seed_empresa(&state, "sol@mail.com", "Panadería Sol").await;
    let (luna_id, _) = seed_empresa(&state, "luna@mail.com", "Café Luna").await;
    let (_, cliente_token) = seed_cliente(&state).await;
    let producto_luna = seed_producto(&state, &luna_id, "Café", 3, true).await;

    // Addressed to Sol but carrying Luna's product
    let payload = json!({
        "empresaId": sol_id,
        "items": [{ "productoId": producto_luna, "cantidad": 1, "precio": "3" }],
    });
    let (status, body) = send_json(&app, "POST", "/api/pedidos", &cliente_token, payload).await;

    assert_eq!(status, ErrorCode::ProductoWrongEmpresa.http_status());
    assert_eq!(body["code"], u16::from(ErrorCode::ProductoWrongEmpresa));
}

#[tokio::test]
async fn order_total_comes_from_stored_prices() {
    let (_tmp, state, app) = test_app().await;
    let (empresa_id, _) = seed_empresa(&state, "sol@mail.com", "Panadería Sol").await;
    let (_, cliente_token) = seed_cliente(&state).await;
    let producto_id = seed_producto(&state, &empresa_id, "Tarta", 100, true).await;

    // The buyer claims a price of 1; the stored price must win
    let payload = json!({
        "empresaId": empresa_id,
        "items": [{ "productoId": producto_id, "cantidad": 2, "precio": "1" }],
    });
    let (status, body) = send_json(&app, "POST", "/api/pedidos", &cliente_token, payload).await;

    assert_eq!(status, StatusCode::OK);
    let pedido: Pedido = serde_json::from_value(body).expect("pedido");
    assert_eq!(pedido.total, Decimal::from(200));
    assert_eq!(pedido.items[0].precio, Decimal::from(100));
    assert_eq!(pedido.estado, EstadoPedido::Pendiente);
}

#[tokio::test]
async fn unread_count_tracks_order_notifications() {
    let (_tmp, state, app) = test_app().await;
    let (empresa_id, empresa_token) = seed_empresa(&state, "sol@mail.com", "Panadería Sol").await;
    let (_, cliente_token) = seed_cliente(&state).await;
    let producto_id = seed_producto(&state, &empresa_id, "Pan", 2, true).await;

    let (status, body) = send_json(
        &app,
        "GET",
        "/api/notificaciones/no-leidas",
        &empresa_token,
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["no_leidas"], 0);

    let payload = json!({
        "empresaId": empresa_id,
        "items": [{ "productoId": producto_id, "cantidad": 1, "precio": "2" }],
    });
    let (status, _) = send_json(&app, "POST", "/api/pedidos", &cliente_token, payload).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        &app,
        "GET",
        "/api/notificaciones/no-leidas",
        &empresa_token,
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["no_leidas"], 1);
}

#[tokio::test]
async fn estado_update_rejects_jumps_and_terminal_states() {
    let (_tmp, state, app) = test_app().await;
    let (empresa_id, empresa_token) = seed_empresa(&state, "sol@mail.com", "Panadería Sol").await;

    let now = now_millis();
    let pedido = state
        .pedidos()
        .create(Pedido {
            id: None,
            cliente: "cliente:ana".into(),
            cliente_nombre: "Ana".into(),
            empresa: empresa_id.clone(),
            items: vec![PedidoItem {
                producto: "producto:pan".into(),
                nombre: "Pan".into(),
                cantidad: 1,
                precio: Decimal::from(2),
            }],
            total: Decimal::from(2),
            estado: EstadoPedido::Pendiente,
            created_at: now,
            updated_at: now,
        })
        .await
        .expect("pedido");
    let pedido_id = pedido.id.expect("id");
    let uri = format!("/api/pedidos/{pedido_id}/estado");

    // No jump straight to finalizado
    let (status, body) = send_json(
        &app,
        "PUT",
        &uri,
        &empresa_token,
        json!({ "estado": "finalizado" }),
    )
    .await;
    assert_eq!(status, ErrorCode::InvalidStatusTransition.http_status());
    assert_eq!(body["code"], u16::from(ErrorCode::InvalidStatusTransition));

    // Cancellation from a non-terminal state is fine
    let (status, _) = send_json(
        &app,
        "PUT",
        &uri,
        &empresa_token,
        json!({ "estado": "cancelado" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Terminal orders accept nothing further
    let (status, body) = send_json(
        &app,
        "PUT",
        &uri,
        &empresa_token,
        json!({ "estado": "en_proceso" }),
    )
    .await;
    assert_eq!(status, ErrorCode::PedidoTerminal.http_status());
    assert_eq!(body["code"], u16::from(ErrorCode::PedidoTerminal));
}
