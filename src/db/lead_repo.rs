// src/db/lead_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::lead::{
        CabRequest, Enquiry, LeadStatus, NewCabRequest, NewEnquiry, NewTicketRequest,
        TicketRequest, TriageUpdate,
    },
};

// Usamos queries checadas em runtime (query_as + FromRow) em vez das macros
// do sqlx: o build não depende de um banco disponível.
#[derive(Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CABS
    // =========================================================================

    /// Persiste o pedido de táxi com status inicial `pending`.
    pub async fn create_cab(&self, new: NewCabRequest) -> Result<CabRequest, AppError> {
        let saved = sqlx::query_as::<_, CabRequest>(
            r#"
            INSERT INTO cab_requests (
                pickup_location, drop_location, travel_date, travel_time,
                car_type, name, phone
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&new.pickup_location)
        .bind(&new.drop_location)
        .bind(&new.date)
        .bind(&new.time)
        .bind(&new.car_type)
        .bind(&new.name)
        .bind(&new.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn list_cabs(&self) -> Result<Vec<CabRequest>, AppError> {
        let cabs = sqlx::query_as::<_, CabRequest>(
            "SELECT * FROM cab_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cabs)
    }

    /// Triagem de um pedido de táxi. A tabela de transições é aplicada aqui:
    /// mudança de status só a partir de `pending`; confirmado/rejeitado são
    /// terminais. `assignedTo`/`notes` podem ser anotados a qualquer momento.
    pub async fn triage_cab(
        &self,
        id: Uuid,
        update: TriageUpdate,
    ) -> Result<CabRequest, AppError> {
        let current = sqlx::query_as::<_, CabRequest>(
            "SELECT * FROM cab_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Cab request not found"))?;

        guard_transition(current.status, update.status)?;

        let updated = sqlx::query_as::<_, CabRequest>(
            r#"
            UPDATE cab_requests
            SET status      = COALESCE($2, status),
                assigned_to = COALESCE($3, assigned_to),
                notes       = COALESCE($4, notes),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.status)
        .bind(update.assigned_to)
        .bind(update.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    // =========================================================================
    //  TICKETS
    // =========================================================================

    pub async fn create_ticket(&self, new: NewTicketRequest) -> Result<TicketRequest, AppError> {
        let saved = sqlx::query_as::<_, TicketRequest>(
            r#"
            INSERT INTO ticket_requests (
                from_location, to_location, travel_date, service_type,
                passengers, passenger_names, phone, email,
                travel_class, flight_class, trip_type, return_date,
                preferred_time, special_request, ticket_mode, source
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(&new.from_location)
        .bind(&new.to_location)
        .bind(&new.date)
        .bind(&new.service_type)
        .bind(&new.passengers)
        .bind(&new.passenger_names)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.travel_class)
        .bind(&new.flight_class)
        .bind(&new.trip_type)
        .bind(&new.return_date)
        .bind(&new.preferred_time)
        .bind(&new.special_request)
        .bind(new.ticket_mode)
        .bind(&new.source)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn list_tickets(&self) -> Result<Vec<TicketRequest>, AppError> {
        let tickets = sqlx::query_as::<_, TicketRequest>(
            "SELECT * FROM ticket_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tickets)
    }

    pub async fn triage_ticket(
        &self,
        id: Uuid,
        update: TriageUpdate,
    ) -> Result<TicketRequest, AppError> {
        let current = sqlx::query_as::<_, TicketRequest>(
            "SELECT * FROM ticket_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Ticket not found"))?;

        guard_transition(current.status, update.status)?;

        let updated = sqlx::query_as::<_, TicketRequest>(
            r#"
            UPDATE ticket_requests
            SET status      = COALESCE($2, status),
                assigned_to = COALESCE($3, assigned_to),
                notes       = COALESCE($4, notes),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.status)
        .bind(update.assigned_to)
        .bind(update.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    // =========================================================================
    //  ENQUIRIES
    // =========================================================================

    pub async fn create_enquiry(&self, new: NewEnquiry) -> Result<Enquiry, AppError> {
        let saved = sqlx::query_as::<_, Enquiry>(
            r#"
            INSERT INTO enquiries (name, service, phone, email, details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.service)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.details)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn list_enquiries(&self) -> Result<Vec<Enquiry>, AppError> {
        let enquiries = sqlx::query_as::<_, Enquiry>(
            "SELECT * FROM enquiries ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(enquiries)
    }

    pub async fn get_enquiry(&self, id: Uuid) -> Result<Enquiry, AppError> {
        sqlx::query_as::<_, Enquiry>("SELECT * FROM enquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Enquiry not found"))
    }

    pub async fn triage_enquiry(
        &self,
        id: Uuid,
        update: TriageUpdate,
    ) -> Result<Enquiry, AppError> {
        let current = sqlx::query_as::<_, Enquiry>("SELECT * FROM enquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Enquiry not found"))?;

        guard_transition(current.status, update.status)?;

        let updated = sqlx::query_as::<_, Enquiry>(
            r#"
            UPDATE enquiries
            SET status      = COALESCE($2, status),
                assigned_to = COALESCE($3, assigned_to),
                notes       = COALESCE($4, notes),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.status)
        .bind(update.assigned_to)
        .bind(update.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }
}

// Reescrever o mesmo status é um no-op permitido (o painel reenvia o valor
// corrente junto com notes/assignedTo).
fn guard_transition(current: LeadStatus, requested: Option<LeadStatus>) -> Result<(), AppError> {
    match requested {
        Some(new_status) if current != LeadStatus::Pending && new_status != current => {
            Err(AppError::AlreadyTriaged)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_move_to_either_terminal_state() {
        assert!(guard_transition(LeadStatus::Pending, Some(LeadStatus::Confirmed)).is_ok());
        assert!(guard_transition(LeadStatus::Pending, Some(LeadStatus::Rejected)).is_ok());
    }

    #[test]
    fn terminal_states_reject_new_status() {
        assert!(matches!(
            guard_transition(LeadStatus::Confirmed, Some(LeadStatus::Rejected)),
            Err(AppError::AlreadyTriaged)
        ));
        assert!(matches!(
            guard_transition(LeadStatus::Rejected, Some(LeadStatus::Pending)),
            Err(AppError::AlreadyTriaged)
        ));
    }

    #[test]
    fn rewriting_same_status_is_a_noop() {
        assert!(guard_transition(LeadStatus::Confirmed, Some(LeadStatus::Confirmed)).is_ok());
    }

    #[test]
    fn annotations_without_status_always_pass() {
        assert!(guard_transition(LeadStatus::Confirmed, None).is_ok());
        assert!(guard_transition(LeadStatus::Pending, None).is_ok());
    }
}
