// src/handlers/auth.rs

use axum::{Json, extract::State};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{AuthResponse, LoginPayload},
};

// Handler de login do admin: devolve o token estático que o painel guarda
// e reenvia como bearer nas rotas protegidas.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Credenciais válidas", body = AuthResponse),
        (status = 401, description = "E-mail ou senha incorretos")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // validate(required) garante que os dois campos existem
    let email = payload.email.as_deref().unwrap_or_default();
    let password = payload.password.as_deref().unwrap_or_default();

    let response = app_state.auth_service.login(email, password).await?;
    tracing::info!("🔑 Login do admin: {}", response.email);

    Ok(Json(response))
}
