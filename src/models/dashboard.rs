// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::lead::Lead;

// Abas do painel: "daily" recorta o dia corrente, as demais recortam por tipo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    Daily,
    #[default]
    All,
    Tickets,
    Cabs,
    Enquiries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Confirmed,
    Rejected,
}

/// Contadores de um recorte (diário ou geral). `revenue` soma apenas leads
/// confirmados; pendentes e rejeitados contribuem zero.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScopeStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub rejected: usize,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    /// round(100 * confirmados / total); 0 quando não há leads.
    pub conversion_rate: u32,
    /// Hora local (0-23) com mais leads; empate fica com a menor hora.
    pub peak_hour: u32,
    pub top_service: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub daily: ScopeStats,
    pub overall: ScopeStats,
    pub quick: QuickStats,
    pub leads: Vec<Lead>,
}
