// src/services/notifier.rs

use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde_json::json;

use crate::models::lead::{CabRequest, Enquiry, TicketMode, TicketRequest};

// Timeout curto: um transporte pendurado não pode segurar a resposta do
// formulário quando a notificação é aguardada inline.
const TRANSPORT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: String,
    pub api_url: String,
    pub sender_name: String,
    pub sender_email: String,
    pub owner_email: String,
}

/// Gateway de notificação best-effort: uma tentativa, sem fila, sem retry.
/// Nunca propaga erro; devolve `true` somente quando o transporte aceitou.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    config: Option<EmailConfig>,
}

impl Notifier {
    pub fn new(config: Option<EmailConfig>) -> anyhow::Result<Self> {
        if config.is_none() {
            tracing::warn!("⚠️ Notificações por e-mail desabilitadas (credenciais ausentes)");
            tracing::warn!("📝 Os formulários continuam salvando no banco normalmente");
        }
        let client = reqwest::Client::builder()
            .timeout(TRANSPORT_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    pub async fn notify(&self, digest: &LeadDigest) -> bool {
        let Some(config) = &self.config else {
            tracing::info!("📭 E-mail não configurado; pulando notificação \"{}\"", digest.service);
            return false;
        };

        let subject = format!("📋 {} - {}", digest.service, digest.name);
        let body = json!({
            "sender": { "name": config.sender_name, "email": config.sender_email },
            "to": [{ "email": config.owner_email }],
            "subject": subject,
            "textContent": digest.to_text(),
            "htmlContent": digest.to_html(),
        });

        let url = format!("{}/smtp/email", config.api_url.trim_end_matches('/'));
        match self
            .client
            .post(&url)
            .header("api-key", &config.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!("📧 E-mail enviado: {}", subject);
                true
            }
            Ok(resp) => {
                tracing::warn!("⚠️ Transporte de e-mail recusou ({}): {}", resp.status(), subject);
                false
            }
            Err(e) => {
                tracing::warn!("⚠️ Falha ao enviar e-mail ({}): {}", subject, e);
                false
            }
        }
    }
}

/// Resumo legível de um lead, montado por tipo no formato que o dono recebe.
#[derive(Debug, Clone)]
pub struct LeadDigest {
    pub id: String,
    pub name: String,
    pub service: String,
    pub phone: String,
    pub email: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl LeadDigest {
    pub fn from_cab(cab: &CabRequest) -> Self {
        Self {
            id: cab.id.to_string(),
            name: cab.name.clone(),
            service: format!("Cab Rental - {}", cab.car_type),
            phone: cab.phone.clone(),
            // O formulário de táxi não coleta e-mail
            email: String::new(),
            details: format!(
                "📍 Pickup Location: {}\n📍 Drop Location: {}\n📅 Date: {}\n⏰ Time: {}\n🚗 Car Type: {}\n📋 Submitted via: Cab Booking Form",
                cab.pickup_location, cab.drop_location, cab.date, cab.time, cab.car_type
            ),
            created_at: cab.created_at,
        }
    }

    pub fn from_ticket(ticket: &TicketRequest) -> Self {
        let mode_lines = match ticket.ticket_mode {
            TicketMode::Train => format!(
                "🚆 Service: {}\n🎫 Class: {}",
                ticket.service_type,
                ticket.travel_class.as_deref().unwrap_or("Not specified")
            ),
            TicketMode::Flight => format!(
                "✈️ Trip: {}\n✈️ Class: {}",
                ticket.trip_type,
                ticket.flight_class.as_deref().unwrap_or("Not specified")
            ),
        };
        let mut details = format!(
            "✈️ From: {}\n✈️ To: {}\n📅 Date: {}\n👥 Passengers: {}\n{}",
            ticket.from_location, ticket.to_location, ticket.date, ticket.passengers, mode_lines
        );
        if let Some(return_date) = &ticket.return_date {
            details.push_str(&format!("\n🔄 Return Date: {}", return_date));
        }
        details.push_str("\n📋 Submitted via: Ticket Booking Form");

        Self {
            id: ticket.id.to_string(),
            name: ticket
                .passenger_names
                .first()
                .cloned()
                .unwrap_or_else(|| "Customer".to_string()),
            service: match ticket.ticket_mode {
                TicketMode::Train => "Train Ticket Booking".to_string(),
                TicketMode::Flight => "Flight Ticket Booking".to_string(),
            },
            phone: ticket.phone.clone(),
            email: ticket.email.clone().unwrap_or_default(),
            details,
            created_at: ticket.created_at,
        }
    }

    pub fn from_enquiry(enquiry: &Enquiry) -> Self {
        Self {
            id: enquiry.id.to_string(),
            name: enquiry.name.clone(),
            service: enquiry.service.clone(),
            phone: enquiry.phone.clone(),
            email: enquiry.email.clone(),
            details: enquiry.details.clone(),
            created_at: enquiry.created_at,
        }
    }

    fn submitted_at(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%d %b %Y, %H:%M")
            .to_string()
    }

    pub fn to_text(&self) -> String {
        let mut text = format!(
            "📋 NEW ENQUIRY RECEIVED\n\n👤 CUSTOMER DETAILS:\n• Name: {}\n• Phone: {}\n",
            self.name, self.phone
        );
        if !self.email.is_empty() {
            text.push_str(&format!("• Email: {}\n", self.email));
        }
        text.push_str(&format!("• Service: {}\n", self.service));
        if !self.details.is_empty() {
            text.push_str(&format!("• Details:\n{}\n", self.details));
        }
        text.push_str(&format!(
            "\n⏰ Submitted: {}\n\n✅ This enquiry has been saved to your database.\n",
            self.submitted_at()
        ));
        text
    }

    pub fn to_html(&self) -> String {
        let details_block = if self.details.is_empty() {
            String::new()
        } else {
            format!(
                "<p><strong>Details:</strong><br>{}</p>",
                self.details.replace('\n', "<br>")
            )
        };
        format!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px;\">\
             <h2>📋 New Travel Enquiry</h2>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Phone:</strong> {}</p>\
             <p><strong>Service:</strong> {}</p>\
             {}\
             <p><strong>Submitted:</strong> {}</p>\
             <p style=\"font-size: 12px; color: #666;\">Enquiry ID: {}</p>\
             </div>",
            self.name,
            self.phone,
            self.service,
            details_block,
            self.submitted_at(),
            self.id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lead::LeadStatus;
    use uuid::Uuid;

    fn cab() -> CabRequest {
        CabRequest {
            id: Uuid::new_v4(),
            pickup_location: "Delhi".into(),
            drop_location: "Agra".into(),
            date: "2025-01-01".into(),
            time: "09:00".into(),
            car_type: "Sedan".into(),
            name: "Asha".into(),
            phone: "9876543210".into(),
            price: None,
            status: LeadStatus::Pending,
            assigned_to: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn cab_digest_lists_trip_fields() {
        let digest = LeadDigest::from_cab(&cab());
        assert_eq!(digest.service, "Cab Rental - Sedan");
        assert!(digest.details.contains("Pickup Location: Delhi"));
        assert!(digest.details.contains("Drop Location: Agra"));
        assert!(digest.details.contains("Car Type: Sedan"));

        let text = digest.to_text();
        assert!(text.contains("Name: Asha"));
        assert!(text.contains("Phone: 9876543210"));
        // táxi não tem e-mail, a linha não deve aparecer
        assert!(!text.contains("• Email:"));
    }

    #[test]
    fn ticket_digest_uses_first_passenger_as_name() {
        let ticket = TicketRequest {
            id: Uuid::new_v4(),
            from_location: "Mumbai".into(),
            to_location: "Goa".into(),
            date: "2025-02-10".into(),
            service_type: "Normal".into(),
            passengers: "2".into(),
            passenger_names: vec!["Ravi".into(), "Meera".into()],
            phone: "9123456780".into(),
            email: None,
            travel_class: None,
            flight_class: Some("Economy".into()),
            trip_type: "Round Trip".into(),
            return_date: Some("2025-02-15".into()),
            preferred_time: None,
            special_request: None,
            ticket_mode: TicketMode::Flight,
            source: "website_form".into(),
            pnr_number: String::new(),
            price: None,
            status: LeadStatus::Pending,
            assigned_to: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let digest = LeadDigest::from_ticket(&ticket);
        assert_eq!(digest.name, "Ravi");
        assert_eq!(digest.service, "Flight Ticket Booking");
        assert!(digest.details.contains("Trip: Round Trip"));
        assert!(digest.details.contains("Return Date: 2025-02-15"));
    }

    #[tokio::test]
    async fn unconfigured_notifier_reports_failure_without_erroring() {
        let notifier = Notifier::new(None).unwrap();
        assert!(!notifier.is_configured());
        let digest = LeadDigest::from_cab(&cab());
        assert!(!notifier.notify(&digest).await);
    }
}
