// src/handlers/health.rs

use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

use crate::config::AppState;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "🚀 Travel Backend is Live",
        "timestamp": Utc::now(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/test",
    responses((status = 200, description = "API respondendo")),
    tag = "Health"
)]
pub async fn test() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "✅ Backend API is working!",
        "timestamp": Utc::now(),
    }))
}

// Sonda o banco com um SELECT 1 e reporta se o transporte de e-mail
// está configurado; a rota em si nunca falha.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Estado do serviço e das dependências")),
    tag = "Health"
)]
pub async fn health(State(app_state): State<AppState>) -> impl IntoResponse {
    let database = match sqlx::query("SELECT 1").execute(&app_state.db_pool).await {
        Ok(_) => "connected",
        Err(e) => {
            tracing::warn!("⚠️ Health check falhou no banco: {}", e);
            "disconnected"
        }
    };

    Json(json!({
        "status": "healthy",
        "database": database,
        "email": if app_state.notifier.is_configured() { "configured" } else { "not configured" },
        "timestamp": Utc::now(),
    }))
}
