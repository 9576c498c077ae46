// src/models/lead.rs

use chrono::{DateTime, Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

// Mapeia o CREATE TYPE lead_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lead_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    Pending,
    Confirmed,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "ticket_mode", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketMode {
    Train,
    Flight,
}

// --- LEADS ---
// Os nomes JSON (pickupLocation, carType, from, to...) são contrato com o
// site e o painel admin; não renomear.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CabRequest {
    pub id: Uuid,
    pub pickup_location: String,
    pub drop_location: String,

    // Data/hora da corrida como o formulário envia (texto livre)
    #[sqlx(rename = "travel_date")]
    pub date: String,
    #[sqlx(rename = "travel_time")]
    pub time: String,

    pub car_type: String,
    pub name: String,
    pub phone: String,

    // Preenchido pelo admin ao fechar a corrida; entra na receita do painel
    pub price: Option<Decimal>,

    pub status: LeadStatus,
    pub assigned_to: String,
    pub notes: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    pub id: Uuid,

    #[serde(rename = "from")]
    pub from_location: String,
    #[serde(rename = "to")]
    pub to_location: String,

    #[sqlx(rename = "travel_date")]
    pub date: String,

    pub service_type: String,
    pub passengers: String,
    pub passenger_names: Vec<String>,
    pub phone: String,
    pub email: Option<String>,

    // Campos específicos de trem
    pub travel_class: Option<String>,
    // Campos específicos de voo
    pub flight_class: Option<String>,
    pub trip_type: String,
    pub return_date: Option<String>,

    pub preferred_time: Option<String>,
    pub special_request: Option<String>,

    pub ticket_mode: TicketMode,
    pub source: String,
    pub pnr_number: String,

    pub price: Option<Decimal>,

    pub status: LeadStatus,
    pub assigned_to: String,
    pub notes: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: Uuid,
    pub name: String,
    pub service: String,
    pub phone: String,
    pub email: String,
    pub details: String,

    pub estimated_cost: Option<Decimal>,

    pub status: LeadStatus,
    pub assigned_to: String,
    pub notes: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- ENVELOPE UNIFORME ---
// O painel admin enxerga os três tipos como uma linha do tempo só; a tag
// "kind" diz para qual sub-recurso rotear a triagem.

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Lead {
    Cab(CabRequest),
    Ticket(TicketRequest),
    Enquiry(Enquiry),
}

impl Lead {
    pub fn status(&self) -> LeadStatus {
        match self {
            Lead::Cab(c) => c.status,
            Lead::Ticket(t) => t.status,
            Lead::Enquiry(e) => e.status,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Lead::Cab(c) => c.created_at,
            Lead::Ticket(t) => t.created_at,
            Lead::Enquiry(e) => e.created_at,
        }
    }

    /// Data local (meia-noite a meia-noite) usada pela aba "daily".
    pub fn local_date(&self) -> NaiveDate {
        self.created_at().with_timezone(&Local).date_naive()
    }

    /// Hora local (0-23) usada no cálculo de horário de pico.
    pub fn local_hour(&self) -> u32 {
        use chrono::Timelike;
        self.created_at().with_timezone(&Local).hour()
    }

    pub fn name(&self) -> &str {
        match self {
            Lead::Cab(c) => &c.name,
            // O formulário de passagens não tem campo "name"
            Lead::Ticket(t) => t.passenger_names.first().map(String::as_str).unwrap_or("Customer"),
            Lead::Enquiry(e) => &e.name,
        }
    }

    pub fn phone(&self) -> &str {
        match self {
            Lead::Cab(c) => &c.phone,
            Lead::Ticket(t) => &t.phone,
            Lead::Enquiry(e) => &e.phone,
        }
    }

    /// Valor que entra na receita: price (cab/ticket) ou estimatedCost
    /// (enquiry). Leads sem valor contam como zero.
    pub fn amount(&self) -> Decimal {
        match self {
            Lead::Cab(c) => c.price.unwrap_or(Decimal::ZERO),
            Lead::Ticket(t) => t.price.unwrap_or(Decimal::ZERO),
            Lead::Enquiry(e) => e.estimated_cost.unwrap_or(Decimal::ZERO),
        }
    }

    /// Rótulo de serviço para o ranking "top service": o campo `service`
    /// explícito quando existe, senão deriva do tipo do lead.
    pub fn service_label(&self) -> String {
        match self {
            Lead::Enquiry(e) => e.service.clone(),
            Lead::Cab(_) => "Cab".to_string(),
            Lead::Ticket(_) => "Ticket".to_string(),
        }
    }

    /// Busca por substring, case-insensitive, nos mesmos campos que o
    /// painel pesquisa: nome, telefone, e-mail, serviço, origem e destino.
    pub fn matches_search(&self, term_lower: &str) -> bool {
        let contains = |s: &str| s.to_lowercase().contains(term_lower);
        match self {
            Lead::Cab(c) => {
                contains(&c.name)
                    || c.phone.contains(term_lower)
                    || contains(&c.pickup_location)
                    || contains(&c.drop_location)
            }
            Lead::Ticket(t) => {
                contains(self.name())
                    || t.phone.contains(term_lower)
                    || t.email.as_deref().is_some_and(contains)
                    || contains(&t.from_location)
                    || contains(&t.to_location)
            }
            Lead::Enquiry(e) => {
                contains(&e.name)
                    || e.phone.contains(term_lower)
                    || contains(&e.email)
                    || contains(&e.service)
            }
        }
    }
}

// --- PAYLOADS DE ESCRITA ---
// Já validados; os repositórios só persistem.

#[derive(Debug, Clone)]
pub struct NewCabRequest {
    pub pickup_location: String,
    pub drop_location: String,
    pub date: String,
    pub time: String,
    pub car_type: String,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct NewTicketRequest {
    pub from_location: String,
    pub to_location: String,
    pub date: String,
    pub service_type: String,
    pub passengers: String,
    pub passenger_names: Vec<String>,
    pub phone: String,
    pub email: Option<String>,
    pub travel_class: Option<String>,
    pub flight_class: Option<String>,
    pub trip_type: String,
    pub return_date: Option<String>,
    pub preferred_time: Option<String>,
    pub special_request: Option<String>,
    pub ticket_mode: TicketMode,
    pub source: String,
}

#[derive(Debug, Clone)]
pub struct NewEnquiry {
    pub name: String,
    pub service: String,
    pub phone: String,
    pub email: String,
    pub details: String,
}

// Corpo do PUT de triagem ({status?, assignedTo?, notes?})
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TriageUpdate {
    pub status: Option<LeadStatus>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enquiry(name: &str, service: &str, phone: &str) -> Enquiry {
        Enquiry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            service: service.to_string(),
            phone: phone.to_string(),
            email: String::new(),
            details: String::new(),
            estimated_cost: None,
            status: LeadStatus::Pending,
            assigned_to: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn service_label_prefers_explicit_service() {
        let lead = Lead::Enquiry(enquiry("Asha", "Tour Package - Goa", "9876543210"));
        assert_eq!(lead.service_label(), "Tour Package - Goa");
    }

    #[test]
    fn search_is_case_insensitive() {
        let lead = Lead::Enquiry(enquiry("Asha Verma", "Honeymoon", "9876543210"));
        assert!(lead.matches_search("asha"));
        assert!(lead.matches_search("honeymoon"));
        assert!(lead.matches_search("98765"));
        assert!(!lead.matches_search("delhi"));
    }

    #[test]
    fn lead_serializes_with_kind_tag() {
        let lead = Lead::Enquiry(enquiry("Asha", "Visa", "9876543210"));
        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["kind"], "enquiry");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["assignedTo"], "");
    }

    #[test]
    fn status_roundtrips_lowercase() {
        let s: LeadStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(s, LeadStatus::Confirmed);
        assert_eq!(serde_json::to_string(&LeadStatus::Rejected).unwrap(), "\"rejected\"");
    }
}
