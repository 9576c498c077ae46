//src/main.rs

use axum::{
    Json, Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // POST público (formulário do site); GET e PUT protegidos pelo extrator
    // AdminUser dentro de cada handler.
    let enquiry_routes = Router::new()
        .route(
            "/",
            post(handlers::enquiry::create_enquiry).get(handlers::enquiry::list_enquiries),
        )
        .route("/test-email", post(handlers::enquiry::test_email))
        .route(
            "/{id}",
            get(handlers::enquiry::get_enquiry).put(handlers::enquiry::triage_enquiry),
        );

    let cab_routes = Router::new()
        .route(
            "/",
            post(handlers::cabs::create_cab).get(handlers::cabs::list_cabs),
        )
        .route("/{id}", axum::routing::put(handlers::cabs::triage_cab));

    let ticket_routes = Router::new()
        .route(
            "/",
            post(handlers::tickets::create_ticket).get(handlers::tickets::list_tickets),
        )
        .route("/{id}", axum::routing::put(handlers::tickets::triage_ticket));

    let package_routes = Router::new()
        .route(
            "/",
            get(handlers::packages::list_packages).post(handlers::packages::create_package),
        )
        .route(
            "/{id}",
            get(handlers::packages::get_package)
                .put(handlers::packages::update_package)
                .delete(handlers::packages::delete_package),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/", get(handlers::health::root))
        .route("/api/test", get(handlers::health::test))
        .route("/api/health", get(handlers::health::health))
        .route("/api/admin/dashboard", get(handlers::dashboard::get_dashboard))
        .route(
            "/api/docs/openapi.json",
            get(|| async { Json(docs::ApiDoc::openapi()) }),
        )
        .nest("/api/auth", auth_routes)
        .nest("/api/enquiry", enquiry_routes)
        .nest("/api/cabs", cab_routes)
        .nest("/api/tickets", ticket_routes)
        .nest("/api/packages", package_routes)
        // O site e o painel rodam em origens próprias
        .layer(CorsLayer::permissive())
        .with_state(app_state.clone());

    // Inicia o servidor
    let addr = format!("0.0.0.0:{}", app_state.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
