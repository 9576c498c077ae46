// src/handlers/enquiry.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AdminUser,
    models::lead::{NewEnquiry, TriageUpdate},
    services::notifier::LeadDigest,
};

use super::validate_phone;

// ---
// Payload: formulário de contato geral do site
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnquiryPayload {
    #[validate(required(message = "required"))]
    pub name: Option<String>,

    #[validate(required(message = "required"))]
    pub service: Option<String>,

    #[validate(required(message = "required"), custom(function = "validate_phone"))]
    pub phone: Option<String>,

    pub email: Option<String>,
    pub details: Option<String>,
}

// O formulário de contato responde assim que o lead está salvo; a
// notificação roda em background.
#[utoipa::path(
    post,
    path = "/api/enquiry",
    request_body = CreateEnquiryPayload,
    responses(
        (status = 201, description = "Enquiry registrada"),
        (status = 400, description = "Campos obrigatórios ausentes")
    ),
    tag = "Enquiries"
)]
pub async fn create_enquiry(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateEnquiryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let new = NewEnquiry {
        name: payload.name.unwrap_or_default(),
        service: payload.service.unwrap_or_default(),
        phone: payload.phone.unwrap_or_default(),
        email: payload.email.unwrap_or_default(),
        details: payload.details.unwrap_or_default(),
    };

    let saved = app_state.lead_service.submit_enquiry(new).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Thank you! Your enquiry has been submitted successfully.",
            "data": {
                "id": saved.id,
                "name": saved.name,
                "service": saved.service,
                "phone": saved.phone,
                "timestamp": saved.created_at,
            }
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/enquiry",
    responses(
        (status = 200, description = "Todas as enquiries, mais recentes primeiro"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("bearer_auth" = [])),
    tag = "Enquiries"
)]
pub async fn list_enquiries(
    _admin: AdminUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let enquiries = app_state.lead_service.list_enquiries().await?;

    Ok(Json(json!({
        "success": true,
        "count": enquiries.len(),
        "data": enquiries,
    })))
}

#[utoipa::path(
    get,
    path = "/api/enquiry/{id}",
    params(("id" = Uuid, Path, description = "ID da enquiry")),
    responses(
        (status = 200, description = "Enquiry encontrada"),
        (status = 404, description = "Enquiry não encontrada")
    ),
    security(("bearer_auth" = [])),
    tag = "Enquiries"
)]
pub async fn get_enquiry(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let enquiry = app_state.lead_service.get_enquiry(id).await?;

    Ok(Json(json!({
        "success": true,
        "data": enquiry,
    })))
}

#[utoipa::path(
    put,
    path = "/api/enquiry/{id}",
    request_body = TriageUpdate,
    params(("id" = Uuid, Path, description = "ID da enquiry")),
    responses(
        (status = 200, description = "Enquiry atualizada"),
        (status = 404, description = "Enquiry não encontrada"),
        (status = 409, description = "Lead já triado")
    ),
    security(("bearer_auth" = [])),
    tag = "Enquiries"
)]
pub async fn triage_enquiry(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<TriageUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.lead_service.triage_enquiry(id, update).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Enquiry status updated successfully",
        "data": updated,
    })))
}

// Dispara um e-mail de teste com dados fixos para conferir as credenciais
// do transporte sem depender de um lead real.
#[utoipa::path(
    post,
    path = "/api/enquiry/test-email",
    responses(
        (status = 200, description = "E-mail de teste aceito pelo transporte"),
        (status = 500, description = "Transporte indisponível ou não configurado")
    ),
    tag = "Enquiries"
)]
pub async fn test_email(State(app_state): State<AppState>) -> impl IntoResponse {
    let digest = LeadDigest {
        id: format!("test-{}", Uuid::new_v4()),
        name: "Test User".to_string(),
        service: "Test Service".to_string(),
        phone: "9876543210".to_string(),
        email: "test@example.com".to_string(),
        details: "This is a test enquiry to check email functionality.".to_string(),
        created_at: chrono::Utc::now(),
    };

    if app_state.notifier.notify(&digest).await {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Test email sent successfully! Check your inbox.",
            })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "message": "Test email failed. Check server logs for details.",
            })),
        )
    }
}
