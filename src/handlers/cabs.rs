// src/handlers/cabs.rs

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
    models::lead::{NewCabRequest, TriageUpdate},
};

use super::validate_phone;

// ---
// Payload: formulário público de reserva de táxi
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCabPayload {
    #[validate(required(message = "required"))]
    pub pickup_location: Option<String>,

    #[validate(required(message = "required"))]
    pub drop_location: Option<String>,

    #[validate(required(message = "required"))]
    pub date: Option<String>,

    #[validate(required(message = "required"))]
    pub time: Option<String>,

    #[validate(required(message = "required"))]
    pub car_type: Option<String>,

    #[validate(required(message = "required"))]
    pub name: Option<String>,

    #[validate(required(message = "required"), custom(function = "validate_phone"))]
    pub phone: Option<String>,
}

// Formulário público: salva, notifica inline e responde o recibo enxuto
// que a página de confirmação mostra.
#[utoipa::path(
    post,
    path = "/api/cabs",
    request_body = CreateCabPayload,
    responses(
        (status = 201, description = "Pedido de táxi registrado"),
        (status = 400, description = "Campos obrigatórios ausentes")
    ),
    tag = "Cabs"
)]
pub async fn create_cab(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCabPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let new = NewCabRequest {
        pickup_location: payload.pickup_location.unwrap_or_default(),
        drop_location: payload.drop_location.unwrap_or_default(),
        date: payload.date.unwrap_or_default(),
        time: payload.time.unwrap_or_default(),
        car_type: payload.car_type.unwrap_or_default(),
        name: payload.name.unwrap_or_default(),
        phone: payload.phone.unwrap_or_default(),
    };

    let (saved, notified) = app_state.lead_service.submit_cab(new).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Cab enquiry submitted successfully",
            "data": {
                "id": saved.id,
                "name": saved.name,
                "phone": saved.phone,
                "date": saved.date,
                "notified": notified,
            }
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/cabs",
    responses(
        (status = 200, description = "Todos os pedidos de táxi, mais recentes primeiro"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("bearer_auth" = [])),
    tag = "Cabs"
)]
pub async fn list_cabs(
    _admin: AdminUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let cabs = app_state.lead_service.list_cabs().await?;

    Ok(Json(json!({
        "success": true,
        "count": cabs.len(),
        "data": cabs,
    })))
}

#[utoipa::path(
    put,
    path = "/api/cabs/{id}",
    request_body = TriageUpdate,
    params(("id" = Uuid, Path, description = "ID do pedido de táxi")),
    responses(
        (status = 200, description = "Pedido atualizado"),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Lead já triado")
    ),
    security(("bearer_auth" = [])),
    tag = "Cabs"
)]
pub async fn triage_cab(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<TriageUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.lead_service.triage_cab(id, update).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Cab status updated successfully",
        "data": updated,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_car_type_is_reported_by_name() {
        let payload = CreateCabPayload {
            pickup_location: Some("Delhi".to_string()),
            drop_location: Some("Agra".to_string()),
            date: Some("2025-01-01".to_string()),
            time: Some("09:00".to_string()),
            car_type: None,
            name: Some("Asha".to_string()),
            phone: Some("9876543210".to_string()),
        };

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("car_type"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn complete_payload_passes_validation() {
        let payload = CreateCabPayload {
            pickup_location: Some("Delhi".to_string()),
            drop_location: Some("Agra".to_string()),
            date: Some("2025-01-01".to_string()),
            time: Some("09:00".to_string()),
            car_type: Some("Sedan".to_string()),
            name: Some("Asha".to_string()),
            phone: Some("9876543210".to_string()),
        };
        assert!(payload.validate().is_ok());
    }
}
