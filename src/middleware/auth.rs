use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{common::error::AppError, config::AppState};

/// Extrator das rotas admin: exige `Authorization: Bearer <token>` com o
/// token estático da configuração. Usado como argumento do handler em vez
/// de camada de middleware porque várias rotas misturam método público e
/// método protegido no mesmo path.
pub struct AdminUser;

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|value| value.to_str().ok());

        if let Some(auth_header) = auth_header {
            if let Some(token) = auth_header.strip_prefix("Bearer ") {
                if state.auth_service.verify_token(token) {
                    return Ok(AdminUser);
                }
            }
        }

        Err(AppError::InvalidToken)
    }
}
