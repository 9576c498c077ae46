// src/services/lead_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LeadRepository,
    models::{
        dashboard::{DashboardTab, DashboardView, StatusFilter},
        lead::{
            CabRequest, Enquiry, NewCabRequest, NewEnquiry, NewTicketRequest, TicketRequest,
            TriageUpdate,
        },
    },
    services::{
        notifier::{LeadDigest, Notifier},
        stats,
    },
};

/// Pipeline de captação: valida (no handler), persiste, notifica e responde.
/// A persistência é a única etapa que pode falhar a requisição; a notificação
/// é best-effort e só aparece na resposta como o flag `notified`.
#[derive(Clone)]
pub struct LeadService {
    repo: LeadRepository,
    notifier: Notifier,
}

impl LeadService {
    pub fn new(repo: LeadRepository, notifier: Notifier) -> Self {
        Self { repo, notifier }
    }

    // =========================================================================
    //  INTAKE
    // =========================================================================

    /// Salva o pedido de táxi e aguarda a notificação antes de responder.
    pub async fn submit_cab(&self, new: NewCabRequest) -> Result<(CabRequest, bool), AppError> {
        let saved = self.repo.create_cab(new).await?;
        tracing::info!("🚕 Novo pedido de táxi: {} ({})", saved.name, saved.id);

        let notified = self.notifier.notify(&LeadDigest::from_cab(&saved)).await;
        Ok((saved, notified))
    }

    pub async fn submit_ticket(
        &self,
        new: NewTicketRequest,
    ) -> Result<(TicketRequest, bool), AppError> {
        let saved = self.repo.create_ticket(new).await?;
        tracing::info!(
            "🎫 Novo pedido de passagem: {} -> {} ({})",
            saved.from_location,
            saved.to_location,
            saved.id
        );

        let notified = self.notifier.notify(&LeadDigest::from_ticket(&saved)).await;
        Ok((saved, notified))
    }

    /// Salva a enquiry e dispara a notificação em background: o formulário de
    /// contato responde assim que o lead está no banco.
    pub async fn submit_enquiry(&self, new: NewEnquiry) -> Result<Enquiry, AppError> {
        let saved = self.repo.create_enquiry(new).await?;
        tracing::info!("📩 Nova enquiry: {} - {} ({})", saved.name, saved.service, saved.id);

        let notifier = self.notifier.clone();
        let digest = LeadDigest::from_enquiry(&saved);
        tokio::spawn(async move {
            notifier.notify(&digest).await;
        });

        Ok(saved)
    }

    // =========================================================================
    //  LISTAGEM E TRIAGEM
    // =========================================================================

    pub async fn list_cabs(&self) -> Result<Vec<CabRequest>, AppError> {
        self.repo.list_cabs().await
    }

    pub async fn list_tickets(&self) -> Result<Vec<TicketRequest>, AppError> {
        self.repo.list_tickets().await
    }

    pub async fn list_enquiries(&self) -> Result<Vec<Enquiry>, AppError> {
        self.repo.list_enquiries().await
    }

    pub async fn get_enquiry(&self, id: Uuid) -> Result<Enquiry, AppError> {
        self.repo.get_enquiry(id).await
    }

    pub async fn triage_cab(
        &self,
        id: Uuid,
        update: TriageUpdate,
    ) -> Result<CabRequest, AppError> {
        let updated = self.repo.triage_cab(id, update).await?;
        tracing::info!("✅ Táxi {} triado: {:?}", id, updated.status);
        Ok(updated)
    }

    pub async fn triage_ticket(
        &self,
        id: Uuid,
        update: TriageUpdate,
    ) -> Result<TicketRequest, AppError> {
        let updated = self.repo.triage_ticket(id, update).await?;
        tracing::info!("✅ Passagem {} triada: {:?}", id, updated.status);
        Ok(updated)
    }

    pub async fn triage_enquiry(&self, id: Uuid, update: TriageUpdate) -> Result<Enquiry, AppError> {
        let updated = self.repo.triage_enquiry(id, update).await?;
        tracing::info!("✅ Enquiry {} triada: {:?}", id, updated.status);
        Ok(updated)
    }

    // =========================================================================
    //  PAINEL
    // =========================================================================

    /// Carrega as três coleções em paralelo e agrega em memória.
    pub async fn dashboard(
        &self,
        tab: DashboardTab,
        status: StatusFilter,
        search: &str,
    ) -> Result<DashboardView, AppError> {
        let (cabs, tickets, enquiries) = tokio::try_join!(
            self.repo.list_cabs(),
            self.repo.list_tickets(),
            self.repo.list_enquiries(),
        )?;

        Ok(stats::dashboard_view(
            cabs, tickets, enquiries, tab, status, search,
        ))
    }
}
