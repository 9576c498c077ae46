// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AdminUser,
    models::dashboard::{DashboardTab, StatusFilter},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DashboardQuery {
    #[serde(default)]
    pub tab: DashboardTab,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub search: String,
}

// Visão agregada do painel: as três coleções numa linha do tempo só, com
// contadores do dia, contadores gerais e os indicadores rápidos. O painel
// consulta esta rota a cada 2 minutos.
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Visão agregada dos leads"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state
        .lead_service
        .dashboard(query.tab, query.status, &query.search)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": view,
    })))
}
