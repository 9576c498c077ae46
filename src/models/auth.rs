// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Dados para login do dono da agência (conta única)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(required(message = "required"), email(message = "invalid_email"))]
    #[schema(example = "admin@gmail.com")]
    pub email: Option<String>,

    #[validate(required(message = "required"))]
    pub password: Option<String>,
}

// Resposta de autenticação: o token estático compartilhado
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
}
