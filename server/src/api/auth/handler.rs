//! Auth handlers
//!
//! Registration issues a 6-digit verification code. Without an SMTP
//! integration the code is written to the log; operators read it from
//! there during onboarding.

use std::time::Duration;

use axum::{Json, extract::State};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use shared::client::{
    LoginRequest, LoginResponse, RegisterClienteRequest, RegisterEmpresaRequest, RegisterResponse,
    ResendCodeRequest, UserInfo, VerifyEmailRequest,
};
use shared::models::{Cliente, Empresa, TipoCuenta, VerificationCode};
use shared::util::{generate_verification_code, normalize_email, now_millis};
use shared::{AppError, AppResult, ErrorCode};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Issue a fresh verification code for an email, superseding older ones
async fn issue_verification_code(
    state: &ServerState,
    email: &str,
    tipo: TipoCuenta,
) -> AppResult<VerificationCode> {
    let codes = state.verification_codes();
    codes.invalidate_all(email).await?;

    let now = now_millis();
    let code = VerificationCode {
        id: None,
        email: email.to_string(),
        code: generate_verification_code(),
        expires_at: now + state.config.code_expiry_minutes * 60_000,
        used: false,
        created_at: now,
    };
    let created = codes.create(code).await?;

    // No SMTP integration: the code is read from the log
    tracing::info!(
        email = %email,
        tipo = %tipo,
        code = %created.code,
        expires_at = created.expires_at,
        "Verification code issued"
    );

    Ok(created)
}

/// POST /api/auth/register/cliente
pub async fn register_cliente(
    State(state): State<ServerState>,
    Json(req): Json<RegisterClienteRequest>,
) -> AppResult<Json<RegisterResponse>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let email = normalize_email(&req.email);
    if state.clientes().find_by_email(&email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
    }

    let password = crate::auth::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let cliente = state
        .clientes()
        .create(Cliente {
            id: None,
            nombre: req.nombre.trim().to_string(),
            email: email.clone(),
            password,
            verificado: false,
            created_at: now_millis(),
        })
        .await?;

    let code = issue_verification_code(&state, &email, TipoCuenta::Cliente).await?;

    let id = cliente.id.unwrap_or_default();
    tracing::info!(id = %id, email = %email, "Cliente registered");

    Ok(Json(RegisterResponse {
        id,
        email,
        code_expires_at: code.expires_at,
    }))
}

/// POST /api/auth/register/empresa
pub async fn register_empresa(
    State(state): State<ServerState>,
    Json(req): Json<RegisterEmpresaRequest>,
) -> AppResult<Json<RegisterResponse>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let email = normalize_email(&req.email);
    if state.empresas().find_by_email(&email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
    }

    let password = crate::auth::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let empresa = state
        .empresas()
        .create(Empresa {
            id: None,
            nombre: req.nombre.trim().to_string(),
            email: email.clone(),
            password,
            descripcion: req.descripcion,
            logo: None,
            verificado: false,
            created_at: now_millis(),
        })
        .await?;

    let code = issue_verification_code(&state, &email, TipoCuenta::Empresa).await?;

    let id = empresa.id.unwrap_or_default();
    tracing::info!(id = %id, email = %email, "Empresa registered");

    Ok(Json(RegisterResponse {
        id,
        email,
        code_expires_at: code.expires_at,
    }))
}

/// Lookup helper: (id, verificado) for an account of the given tipo
async fn find_account(
    state: &ServerState,
    email: &str,
    tipo: TipoCuenta,
) -> AppResult<Option<(String, bool)>> {
    let found = match tipo {
        TipoCuenta::Cliente => state
            .clientes()
            .find_by_email(email)
            .await?
            .map(|c| (c.id.unwrap_or_default(), c.verificado)),
        TipoCuenta::Empresa => state
            .empresas()
            .find_by_email(email)
            .await?
            .map(|e| (e.id.unwrap_or_default(), e.verificado)),
    };
    Ok(found)
}

/// POST /api/auth/verify
pub async fn verify_email(
    State(state): State<ServerState>,
    Json(req): Json<VerifyEmailRequest>,
) -> AppResult<Json<()>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let email = normalize_email(&req.email);
    let not_found_code = match req.tipo {
        TipoCuenta::Cliente => ErrorCode::ClienteNotFound,
        TipoCuenta::Empresa => ErrorCode::EmpresaNotFound,
    };
    let (_, verificado) = find_account(&state, &email, req.tipo)
        .await?
        .ok_or_else(|| AppError::new(not_found_code))?;

    if verificado {
        return Err(AppError::new(ErrorCode::AccountAlreadyVerified));
    }

    let codes = state.verification_codes();
    let stored = codes
        .find_latest_active(&email)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VerificationCodeInvalid))?;

    if stored.is_expired(now_millis()) {
        return Err(AppError::new(ErrorCode::VerificationCodeExpired));
    }
    if stored.code != req.code {
        security_log!("WARN", "verify_failed", email = email.clone());
        return Err(AppError::new(ErrorCode::VerificationCodeInvalid));
    }

    if let Some(id) = &stored.id {
        codes.mark_used(id).await?;
    }
    match req.tipo {
        TipoCuenta::Cliente => state.clientes().mark_verificado(&email).await?,
        TipoCuenta::Empresa => state.empresas().mark_verificado(&email).await?,
    }

    tracing::info!(email = %email, tipo = %req.tipo, "Email verified");
    Ok(Json(()))
}

/// POST /api/auth/resend-code
pub async fn resend_code(
    State(state): State<ServerState>,
    Json(req): Json<ResendCodeRequest>,
) -> AppResult<Json<()>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let email = normalize_email(&req.email);
    let not_found_code = match req.tipo {
        TipoCuenta::Cliente => ErrorCode::ClienteNotFound,
        TipoCuenta::Empresa => ErrorCode::EmpresaNotFound,
    };
    let (_, verificado) = find_account(&state, &email, req.tipo)
        .await?
        .ok_or_else(|| AppError::new(not_found_code))?;

    if verificado {
        return Err(AppError::new(ErrorCode::AccountAlreadyVerified));
    }

    issue_verification_code(&state, &email, req.tipo).await?;
    Ok(Json(()))
}

/// POST /api/auth/login
///
/// Unified error message for unknown email and wrong password, plus a
/// fixed delay, so responses do not leak which emails are registered.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let email = normalize_email(&req.email);

    // (id, nombre, password hash, verificado, created_at)
    let account = match req.tipo {
        TipoCuenta::Cliente => state.clientes().find_by_email(&email).await?.map(|c| {
            (
                c.id.unwrap_or_default(),
                c.nombre,
                c.password,
                c.verificado,
                c.created_at,
            )
        }),
        TipoCuenta::Empresa => state.empresas().find_by_email(&email).await?.map(|e| {
            (
                e.id.unwrap_or_default(),
                e.nombre,
                e.password,
                e.verificado,
                e.created_at,
            )
        }),
    };

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let (id, nombre, password_hash, verificado, created_at) = match account {
        Some(a) => a,
        None => {
            security_log!("WARN", "login_failed", email = email.clone(), reason = "not_found");
            return Err(AppError::invalid_credentials());
        }
    };

    if !crate::auth::verify_password(&req.password, &password_hash) {
        security_log!("WARN", "login_failed", email = email.clone(), reason = "bad_password");
        return Err(AppError::invalid_credentials());
    }

    if !verificado {
        return Err(AppError::new(ErrorCode::AccountNotVerified));
    }

    let token = state
        .jwt_service()
        .generate_token(&id, &email, &nombre, req.tipo)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(id = %id, tipo = %req.tipo, "Login successful");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id,
            nombre,
            email,
            tipo: req.tipo,
            verificado,
            created_at,
        },
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserInfo>> {
    // Fresh read so verificado/created_at reflect the database, not the token
    let info = match user.tipo {
        TipoCuenta::Cliente => state
            .clientes()
            .find_by_id(&user.id)
            .await?
            .map(|c| UserInfo {
                id: c.id.unwrap_or_default(),
                nombre: c.nombre,
                email: c.email,
                tipo: TipoCuenta::Cliente,
                verificado: c.verificado,
                created_at: c.created_at,
            }),
        TipoCuenta::Empresa => state
            .empresas()
            .find_by_id(&user.id)
            .await?
            .map(|e| UserInfo {
                id: e.id.unwrap_or_default(),
                nombre: e.nombre,
                email: e.email,
                tipo: TipoCuenta::Empresa,
                verificado: e.verificado,
                created_at: e.created_at,
            }),
    };

    info.map(Json)
        .ok_or_else(|| AppError::not_found(format!("account {}", user.id)))
}
