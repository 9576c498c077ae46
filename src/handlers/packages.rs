// src/handlers/packages.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AdminUser,
    models::package::{NewPackage, PackagePatch, PackageTag},
};

// ---
// Validação customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreatePackage
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackagePayload {
    #[validate(required(message = "required"))]
    pub title: Option<String>,

    #[validate(required(message = "required"))]
    pub location: Option<String>,

    #[validate(required(message = "required"), range(min = 1, message = "O pacote precisa de pelo menos 1 dia."))]
    pub days: Option<i32>,

    #[validate(required(message = "required"), custom(function = "validate_not_negative"))]
    pub price_from: Option<Decimal>,

    pub description: Option<String>,
    pub tag: Option<PackageTag>,
    pub category: Option<PackageTag>,
    pub image_url: Option<String>,
    pub images: Option<Vec<String>>,
    pub highlights: Option<Vec<String>>,
}

// As rotas de catálogo respondem JSON "cru" (sem envelope success/data):
// o site consome o array/objeto diretamente.

#[utoipa::path(
    get,
    path = "/api/packages",
    responses((status = 200, description = "Catálogo completo, mais recentes primeiro")),
    tag = "Packages"
)]
pub async fn list_packages(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Value>>, AppError> {
    let packages = app_state.package_repo.list().await?;
    tracing::info!("📦 Catálogo consultado: {} pacotes", packages.len());

    let public: Vec<Value> = packages.iter().map(|p| p.to_public_json()).collect();
    Ok(Json(public))
}

#[utoipa::path(
    get,
    path = "/api/packages/{id}",
    params(("id" = Uuid, Path, description = "ID do pacote")),
    responses(
        (status = 200, description = "Pacote encontrado"),
        (status = 404, description = "Pacote não encontrado")
    ),
    tag = "Packages"
)]
pub async fn get_package(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let pkg = app_state.package_repo.get(id).await?;
    Ok(Json(pkg.to_public_json()))
}

#[utoipa::path(
    post,
    path = "/api/packages",
    request_body = CreatePackagePayload,
    responses(
        (status = 201, description = "Pacote criado"),
        (status = 400, description = "Campos obrigatórios ausentes"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("bearer_auth" = [])),
    tag = "Packages"
)]
pub async fn create_package(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePackagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let title = payload.title.unwrap_or_default();
    let location = payload.location.unwrap_or_default();
    let tag = payload.tag.unwrap_or(PackageTag::Popular);

    let new = NewPackage {
        description: payload
            .description
            .unwrap_or_else(|| format!("{} - {}", title, location)),
        // category espelha tag quando não vem separada
        category: payload.category.unwrap_or(tag),
        tag,
        days: payload.days.unwrap_or(1),
        price_from: payload.price_from.unwrap_or(Decimal::ZERO),
        images: payload
            .images
            .or_else(|| payload.image_url.clone().map(|url| vec![url]))
            .unwrap_or_default(),
        highlights: payload.highlights.unwrap_or_else(|| {
            vec![
                "Scenic Views".to_string(),
                "Cultural Experience".to_string(),
                "Comfortable Stay".to_string(),
            ]
        }),
        image_url: payload.image_url,
        title,
        location,
    };

    let pkg = app_state.package_repo.create(new).await?;
    tracing::info!("📦 Pacote criado: {} ({})", pkg.title, pkg.id);

    Ok((StatusCode::CREATED, Json(pkg.to_public_json())))
}

#[utoipa::path(
    put,
    path = "/api/packages/{id}",
    request_body = PackagePatch,
    params(("id" = Uuid, Path, description = "ID do pacote")),
    responses(
        (status = 200, description = "Pacote atualizado"),
        (status = 404, description = "Pacote não encontrado"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("bearer_auth" = [])),
    tag = "Packages"
)]
pub async fn update_package(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PackagePatch>,
) -> Result<Json<Value>, AppError> {
    let pkg = app_state.package_repo.update(id, patch).await?;
    tracing::info!("📦 Pacote atualizado: {} ({})", pkg.title, pkg.id);

    Ok(Json(pkg.to_public_json()))
}

#[utoipa::path(
    delete,
    path = "/api/packages/{id}",
    params(("id" = Uuid, Path, description = "ID do pacote")),
    responses(
        (status = 200, description = "Pacote removido"),
        (status = 404, description = "Pacote não encontrado"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("bearer_auth" = [])),
    tag = "Packages"
)]
pub async fn delete_package(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    app_state.package_repo.delete(id).await?;
    tracing::info!("🗑️ Pacote removido: {}", id);

    Ok(Json(json!({ "message": "Package deleted successfully" })))
}
