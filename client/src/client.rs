//! HTTP client for the marketplace API
//!
//! Success responses carry the payload directly; error responses carry
//! the `{ code, message, details }` envelope, which is surfaced as
//! [`ClientError::Api`].

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ClientError, ClientResult};
use shared::ApiResponse;
use shared::client::{
    LoginRequest, LoginResponse, RegisterClienteRequest, RegisterEmpresaRequest, RegisterResponse,
    ResendCodeRequest, UnreadCount, UserInfo, VerifyEmailRequest,
};
use shared::models::{
    EmpresaPublic, EstadoPedido, Notificacion, Pedido, PedidoCreate, PedidoEstadoUpdate,
    PedidoStats, Producto, ProductoCreate, ProductoUpdate, TipoCuenta,
};

/// Marketplace API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn send<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ClientResult<T> {
        let req = match self.auth_header() {
            Some(auth) => req.header(reqwest::header::AUTHORIZATION, auth),
            None => req,
        };
        Self::handle_response(req.send().await?).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.get(format!("{}{}", self.base_url, path)))
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send(self.client.post(format!("{}{}", self.base_url, path)).json(body))
            .await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send(self.client.put(format!("{}{}", self.base_url, path)).json(body))
            .await
    }

    async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.put(format!("{}{}", self.base_url, path)))
            .await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.delete(format!("{}{}", self.base_url, path)))
            .await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        let status = resp.status();

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                return Err(ClientError::Unauthorized);
            }
            let text = resp.text().await.unwrap_or_default();
            // Error bodies carry the envelope; fall back to raw text
            return match serde_json::from_str::<ApiResponse<()>>(&text) {
                Ok(envelope) => Err(ClientError::Api {
                    code: envelope.code.unwrap_or(status.as_u16()),
                    message: envelope.message,
                }),
                Err(_) => Err(ClientError::Api {
                    code: status.as_u16(),
                    message: text,
                }),
            };
        }

        resp.json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    // ==================== Auth ====================

    pub async fn register_cliente(
        &self,
        req: &RegisterClienteRequest,
    ) -> ClientResult<RegisterResponse> {
        self.post("/api/auth/register/cliente", req).await
    }

    pub async fn register_empresa(
        &self,
        req: &RegisterEmpresaRequest,
    ) -> ClientResult<RegisterResponse> {
        self.post("/api/auth/register/empresa", req).await
    }

    pub async fn verify_email(&self, req: &VerifyEmailRequest) -> ClientResult<()> {
        self.post("/api/auth/verify", req).await
    }

    pub async fn resend_code(&self, req: &ResendCodeRequest) -> ClientResult<()> {
        self.post("/api/auth/resend-code", req).await
    }

    /// Login and remember the bearer token for subsequent calls
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        tipo: TipoCuenta,
    ) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            tipo,
        };
        let resp: LoginResponse = self.post("/api/auth/login", &req).await?;
        self.token = Some(resp.token.clone());
        Ok(resp)
    }

    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.get("/api/auth/me").await
    }

    // ==================== Catalog ====================

    pub async fn empresas(&self) -> ClientResult<Vec<EmpresaPublic>> {
        self.get("/api/empresas").await
    }

    pub async fn productos(&self, empresa: Option<&str>) -> ClientResult<Vec<Producto>> {
        match empresa {
            Some(id) => self.get(&format!("/api/productos?empresa={id}")).await,
            None => self.get("/api/productos").await,
        }
    }

    pub async fn producto(&self, id: &str) -> ClientResult<Producto> {
        self.get(&format!("/api/productos/{id}")).await
    }

    pub async fn crear_producto(&self, req: &ProductoCreate) -> ClientResult<Producto> {
        self.post("/api/productos", req).await
    }

    pub async fn actualizar_producto(
        &self,
        id: &str,
        req: &ProductoUpdate,
    ) -> ClientResult<Producto> {
        self.put(&format!("/api/productos/{id}"), req).await
    }

    pub async fn eliminar_producto(&self, id: &str) -> ClientResult<bool> {
        self.delete(&format!("/api/productos/{id}")).await
    }

    // ==================== Pedidos ====================

    pub async fn crear_pedido(&self, req: &PedidoCreate) -> ClientResult<Pedido> {
        self.post("/api/pedidos", req).await
    }

    /// Orders for the calling empresa, optionally filtered by estado
    pub async fn pedidos(&self, estado: Option<EstadoPedido>) -> ClientResult<Vec<Pedido>> {
        match estado {
            Some(e) => self.get(&format!("/api/pedidos?estado={e}")).await,
            None => self.get("/api/pedidos").await,
        }
    }

    pub async fn mis_pedidos(&self) -> ClientResult<Vec<Pedido>> {
        self.get("/api/pedidos/mios").await
    }

    pub async fn pedido(&self, id: &str) -> ClientResult<Pedido> {
        self.get(&format!("/api/pedidos/{id}")).await
    }

    pub async fn pedido_stats(&self) -> ClientResult<PedidoStats> {
        self.get("/api/pedidos/stats").await
    }

    pub async fn actualizar_estado(
        &self,
        id: &str,
        estado: EstadoPedido,
    ) -> ClientResult<Pedido> {
        self.put(
            &format!("/api/pedidos/{id}/estado"),
            &PedidoEstadoUpdate { estado },
        )
        .await
    }

    // ==================== Notificaciones ====================

    pub async fn notificaciones(&self) -> ClientResult<Vec<Notificacion>> {
        self.get("/api/notificaciones").await
    }

    pub async fn no_leidas(&self) -> ClientResult<UnreadCount> {
        self.get("/api/notificaciones/no-leidas").await
    }

    pub async fn marcar_leida(&self, id: &str) -> ClientResult<bool> {
        self.put_empty(&format!("/api/notificaciones/{id}/leida"))
            .await
    }

    pub async fn marcar_todas_leidas(&self) -> ClientResult<()> {
        self.put_empty("/api/notificaciones/leidas").await
    }
}
