// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido ou ausente")]
    InvalidToken,

    // Guarda a mensagem pronta ("Cab request not found", ...)
    #[error("{0}")]
    NotFound(&'static str),

    // Tentativa de triagem sobre um lead que não está mais pendente
    #[error("Lead já triado")]
    AlreadyTriaged,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Resposta detalhada: lista os campos ausentes/inválidos para o
            // formulário destacar cada um.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                let mut missing: Vec<String> = Vec::new();

                for (field, field_errors) in errors.field_errors() {
                    let field_name = to_camel_case(&field);
                    let codes: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    if field_errors.iter().any(|e| e.code == "required") {
                        missing.push(field_name.clone());
                    }
                    details.insert(field_name, codes);
                }
                missing.sort();

                let body = Json(json!({
                    "success": false,
                    "message": "Missing required fields",
                    "missing": missing,
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password".to_string())
            }
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            AppError::AlreadyTriaged => (
                StatusCode::CONFLICT,
                "Only pending leads can be confirmed or rejected".to_string(),
            ),

            // Todos os outros erros (DatabaseError etc.) viram 500 genérico.
            // O detalhe fica no log, nunca no corpo da resposta.
            ref e => {
                tracing::error!("🔥 Erro interno do servidor: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again.".to_string(),
                )
            }
        };

        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}

// O validator reporta os idents do struct (snake_case); o contrato da API
// fala camelCase (carType, pickupLocation...).
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn camel_case_conversion() {
        assert_eq!(to_camel_case("car_type"), "carType");
        assert_eq!(to_camel_case("pickup_location"), "pickupLocation");
        assert_eq!(to_camel_case("phone"), "phone");
    }

    #[test]
    fn validation_error_maps_to_400() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("car_type", ValidationError::new("required"));
        let resp = AppError::ValidationError(errors).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_errors_map_to_401() {
        assert_eq!(
            AppError::InvalidToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn not_found_and_conflict_statuses() {
        assert_eq!(
            AppError::NotFound("Enquiry not found").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::AlreadyTriaged.into_response().status(),
            StatusCode::CONFLICT
        );
    }
}
