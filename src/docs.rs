// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Enquiries ---
        handlers::enquiry::create_enquiry,
        handlers::enquiry::list_enquiries,
        handlers::enquiry::get_enquiry,
        handlers::enquiry::triage_enquiry,
        handlers::enquiry::test_email,

        // --- Cabs ---
        handlers::cabs::create_cab,
        handlers::cabs::list_cabs,
        handlers::cabs::triage_cab,

        // --- Tickets ---
        handlers::tickets::create_ticket,
        handlers::tickets::list_tickets,
        handlers::tickets::triage_ticket,

        // --- Packages ---
        handlers::packages::list_packages,
        handlers::packages::get_package,
        handlers::packages::create_package,
        handlers::packages::update_package,
        handlers::packages::delete_package,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,

        // --- Health ---
        handlers::health::test,
        handlers::health::health,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Leads ---
            models::lead::LeadStatus,
            models::lead::TicketMode,
            models::lead::CabRequest,
            models::lead::TicketRequest,
            models::lead::Enquiry,
            models::lead::Lead,
            models::lead::TriageUpdate,

            // --- Dashboard ---
            models::dashboard::ScopeStats,
            models::dashboard::QuickStats,
            models::dashboard::DashboardView,

            // --- Packages ---
            models::package::PackageTag,
            models::package::Package,
            models::package::PackagePatch,

            // --- Payloads ---
            handlers::cabs::CreateCabPayload,
            handlers::tickets::CreateTicketPayload,
            handlers::enquiry::CreateEnquiryPayload,
            handlers::packages::CreatePackagePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Login do administrador"),
        (name = "Enquiries", description = "Formulário de contato e triagem"),
        (name = "Cabs", description = "Reservas de táxi"),
        (name = "Tickets", description = "Passagens de trem e voo"),
        (name = "Packages", description = "Catálogo de pacotes de viagem"),
        (name = "Dashboard", description = "Visão agregada dos leads"),
        (name = "Health", description = "Sondas de disponibilidade")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
