// src/handlers/tickets.rs

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
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AdminUser,
    models::lead::{NewTicketRequest, TicketMode, TriageUpdate},
};

use super::validate_phone;

// ---
// Payload: formulário público de passagens (trem ou voo)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketPayload {
    #[validate(required(message = "required"))]
    pub from: Option<String>,

    #[validate(required(message = "required"))]
    pub to: Option<String>,

    #[validate(required(message = "required"))]
    pub date: Option<String>,

    #[validate(required(message = "required"), custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(required(message = "required"))]
    pub ticket_mode: Option<TicketMode>,

    pub service_type: Option<String>,
    pub passengers: Option<String>,
    #[serde(default)]
    pub passenger_names: Vec<String>,
    pub email: Option<String>,
    pub travel_class: Option<String>,
    pub flight_class: Option<String>,
    pub trip_type: Option<String>,
    pub return_date: Option<String>,
    pub preferred_time: Option<String>,
    pub special_request: Option<String>,
    pub source: Option<String>,
}

impl CreateTicketPayload {
    // Origem e destino iguais não formam um trecho vendável
    fn validate_consistency(&self) -> Result<(), ValidationError> {
        if let (Some(from), Some(to)) = (&self.from, &self.to) {
            if from.trim().eq_ignore_ascii_case(to.trim()) {
                let mut err = ValidationError::new("same_location");
                err.message = Some("Origin and destination must be different.".into());
                return Err(err);
            }
        }
        Ok(())
    }
}

#[utoipa::path(
    post,
    path = "/api/tickets",
    request_body = CreateTicketPayload,
    responses(
        (status = 201, description = "Pedido de passagem registrado"),
        (status = 400, description = "Campos obrigatórios ausentes ou trecho inválido")
    ),
    tag = "Tickets"
)]
pub async fn create_ticket(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTicketPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    if let Err(e) = payload.validate_consistency() {
        let mut errors = ValidationErrors::new();
        errors.add("to", e);
        return Err(AppError::ValidationError(errors));
    }

    let new = NewTicketRequest {
        from_location: payload.from.unwrap_or_default(),
        to_location: payload.to.unwrap_or_default(),
        date: payload.date.unwrap_or_default(),
        service_type: payload.service_type.unwrap_or_else(|| "Normal".to_string()),
        passengers: payload.passengers.unwrap_or_else(|| "1".to_string()),
        passenger_names: payload.passenger_names,
        phone: payload.phone.unwrap_or_default(),
        email: payload.email,
        travel_class: payload.travel_class,
        flight_class: payload.flight_class,
        trip_type: payload.trip_type.unwrap_or_else(|| "One Way".to_string()),
        return_date: payload.return_date,
        preferred_time: payload.preferred_time,
        special_request: payload.special_request,
        ticket_mode: payload.ticket_mode.unwrap_or(TicketMode::Train),
        source: payload.source.unwrap_or_else(|| "website_form".to_string()),
    };

    let (saved, notified) = app_state.lead_service.submit_ticket(new).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Ticket enquiry submitted successfully",
            "data": saved,
            "notified": notified,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/tickets",
    responses(
        (status = 200, description = "Todos os pedidos de passagem, mais recentes primeiro"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("bearer_auth" = [])),
    tag = "Tickets"
)]
pub async fn list_tickets(
    _admin: AdminUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let tickets = app_state.lead_service.list_tickets().await?;

    Ok(Json(json!({
        "success": true,
        "count": tickets.len(),
        "data": tickets,
    })))
}

#[utoipa::path(
    put,
    path = "/api/tickets/{id}",
    request_body = TriageUpdate,
    params(("id" = Uuid, Path, description = "ID do pedido de passagem")),
    responses(
        (status = 200, description = "Pedido atualizado"),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Lead já triado")
    ),
    security(("bearer_auth" = [])),
    tag = "Tickets"
)]
pub async fn triage_ticket(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<TriageUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.lead_service.triage_ticket(id, update).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Ticket status updated successfully",
        "data": updated,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(from: &str, to: &str) -> CreateTicketPayload {
        CreateTicketPayload {
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            date: Some("2025-02-10".to_string()),
            phone: Some("9123456780".to_string()),
            ticket_mode: Some(TicketMode::Train),
            service_type: None,
            passengers: None,
            passenger_names: vec![],
            email: None,
            travel_class: None,
            flight_class: None,
            trip_type: None,
            return_date: None,
            preferred_time: None,
            special_request: None,
            source: None,
        }
    }

    #[test]
    fn distinct_endpoints_pass_consistency() {
        assert!(payload("Mumbai", "Goa").validate_consistency().is_ok());
    }

    #[test]
    fn same_origin_and_destination_is_rejected() {
        assert!(payload("Mumbai", "Mumbai").validate_consistency().is_err());
        // caixa e espaços não tornam o trecho válido
        assert!(payload("  goa ", "GOA").validate_consistency().is_err());
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let mut p = payload("Mumbai", "Goa");
        p.phone = None;
        p.ticket_mode = None;

        let errors = p.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("ticket_mode"));
    }
}
