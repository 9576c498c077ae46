// src/services/stats.rs
//
// Agregação do painel admin: funções puras sobre listas já carregadas.
// Nenhuma consulta acontece aqui; o handler busca as três coleções e o
// recorte/contagem é todo feito em memória.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{
    dashboard::{DashboardTab, DashboardView, QuickStats, ScopeStats, StatusFilter},
    lead::{CabRequest, Enquiry, Lead, LeadStatus, TicketRequest},
};

impl StatusFilter {
    fn matches(self, status: LeadStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == LeadStatus::Pending,
            StatusFilter::Confirmed => status == LeadStatus::Confirmed,
            StatusFilter::Rejected => status == LeadStatus::Rejected,
        }
    }
}

/// Junta as três coleções na linha do tempo única do painel.
pub fn merge_leads(
    cabs: Vec<CabRequest>,
    tickets: Vec<TicketRequest>,
    enquiries: Vec<Enquiry>,
) -> Vec<Lead> {
    let mut leads = Vec::with_capacity(cabs.len() + tickets.len() + enquiries.len());
    leads.extend(tickets.into_iter().map(Lead::Ticket));
    leads.extend(cabs.into_iter().map(Lead::Cab));
    leads.extend(enquiries.into_iter().map(Lead::Enquiry));
    leads
}

/// Aplica aba + status + busca e ordena do mais recente para o mais antigo.
/// A ordenação é estável: empates de timestamp mantêm a ordem de inserção.
pub fn filter_leads(
    leads: &[Lead],
    tab: DashboardTab,
    status: StatusFilter,
    search: &str,
    today: NaiveDate,
) -> Vec<Lead> {
    let term = search.trim().to_lowercase();

    let mut selected: Vec<Lead> = leads
        .iter()
        .filter(|lead| match tab {
            DashboardTab::Daily => lead.local_date() == today,
            DashboardTab::All => true,
            DashboardTab::Tickets => matches!(lead, Lead::Ticket(_)),
            DashboardTab::Cabs => matches!(lead, Lead::Cab(_)),
            DashboardTab::Enquiries => matches!(lead, Lead::Enquiry(_)),
        })
        .filter(|lead| status.matches(lead.status()))
        .filter(|lead| term.is_empty() || lead.matches_search(&term))
        .cloned()
        .collect();

    selected.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    selected
}

/// Contadores de um recorte. Receita soma só leads confirmados.
pub fn scope_stats<'a>(leads: impl Iterator<Item = &'a Lead>) -> ScopeStats {
    let mut stats = ScopeStats {
        total: 0,
        pending: 0,
        confirmed: 0,
        rejected: 0,
        revenue: Decimal::ZERO,
    };

    for lead in leads {
        stats.total += 1;
        match lead.status() {
            LeadStatus::Pending => stats.pending += 1,
            LeadStatus::Confirmed => {
                stats.confirmed += 1;
                stats.revenue += lead.amount();
            }
            LeadStatus::Rejected => stats.rejected += 1,
        }
    }

    stats
}

pub fn quick_stats(leads: &[Lead]) -> QuickStats {
    let total = leads.len();
    let confirmed = leads
        .iter()
        .filter(|l| l.status() == LeadStatus::Confirmed)
        .count();

    // 0 quando vazio: nunca dividir por zero
    let conversion_rate = if total == 0 {
        0
    } else {
        ((confirmed as f64 / total as f64) * 100.0).round() as u32
    };

    // Varredura linear: empate fica com a menor hora
    let mut hour_counts = [0usize; 24];
    for lead in leads {
        hour_counts[lead.local_hour() as usize] += 1;
    }
    let mut peak_hour = 0u32;
    let mut peak_count = hour_counts[0];
    for (hour, count) in hour_counts.iter().enumerate().skip(1) {
        if *count > peak_count {
            peak_count = *count;
            peak_hour = hour as u32;
        }
    }

    // Contagem em ordem de inserção; empate fica com o primeiro rótulo visto
    let mut tally: Vec<(String, usize)> = Vec::new();
    for lead in leads {
        let label = lead.service_label();
        match tally.iter_mut().find(|(s, _)| *s == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }
    let mut top_service = "Cab Booking".to_string();
    let mut top_count = 0usize;
    for (label, count) in tally {
        if count > top_count {
            top_count = count;
            top_service = label;
        }
    }

    QuickStats {
        conversion_rate,
        peak_hour,
        top_service,
    }
}

/// Monta a resposta completa do painel a partir das três coleções.
/// Os contadores diário/geral ignoram os filtros de exibição (como o painel
/// original); só a lista `leads` reflete aba, status e busca.
pub fn dashboard_view(
    cabs: Vec<CabRequest>,
    tickets: Vec<TicketRequest>,
    enquiries: Vec<Enquiry>,
    tab: DashboardTab,
    status: StatusFilter,
    search: &str,
) -> DashboardView {
    let today = Local::now().date_naive();
    let all = merge_leads(cabs, tickets, enquiries);

    let daily = scope_stats(all.iter().filter(|l| l.local_date() == today));
    let overall = scope_stats(all.iter());
    let quick = quick_stats(&all);
    let leads = filter_leads(&all, tab, status, search, today);

    DashboardView {
        daily,
        overall,
        quick,
        leads,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn cab(status: LeadStatus, price: Option<i64>, created_at: DateTime<Utc>) -> Lead {
        Lead::Cab(CabRequest {
            id: Uuid::new_v4(),
            pickup_location: "Delhi".into(),
            drop_location: "Agra".into(),
            date: "2025-01-01".into(),
            time: "09:00".into(),
            car_type: "Sedan".into(),
            name: "Asha".into(),
            phone: "9876543210".into(),
            price: price.map(Decimal::from),
            status,
            assigned_to: String::new(),
            notes: String::new(),
            created_at,
            updated_at: created_at,
        })
    }

    fn enquiry(status: LeadStatus, cost: Option<i64>, created_at: DateTime<Utc>) -> Lead {
        Lead::Enquiry(Enquiry {
            id: Uuid::new_v4(),
            name: "Ravi".into(),
            service: "Tour Package".into(),
            phone: "9123456780".into(),
            email: String::new(),
            details: String::new(),
            estimated_cost: cost.map(Decimal::from),
            status,
            assigned_to: String::new(),
            notes: String::new(),
            created_at,
            updated_at: created_at,
        })
    }

    fn at_local_hour(hour: u32) -> DateTime<Utc> {
        Local::now()
            .date_naive()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
            .and_local_timezone(Local)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn daily_scope_counts_and_revenue() {
        // um táxi confirmado (2000) e uma enquiry pendente, ambos de hoje
        let now = at_local_hour(10);
        let leads = vec![
            cab(LeadStatus::Confirmed, Some(2000), now),
            enquiry(LeadStatus::Pending, None, now),
        ];

        let today = Local::now().date_naive();
        let daily = scope_stats(leads.iter().filter(|l| l.local_date() == today));
        assert_eq!(daily.total, 2);
        assert_eq!(daily.confirmed, 1);
        assert_eq!(daily.pending, 1);
        assert_eq!(daily.revenue, Decimal::from(2000));
    }

    #[test]
    fn revenue_only_counts_confirmed_leads() {
        let now = Utc::now();
        let leads = vec![
            cab(LeadStatus::Confirmed, Some(1500), now),
            cab(LeadStatus::Pending, Some(9999), now),
            cab(LeadStatus::Rejected, Some(5000), now),
            enquiry(LeadStatus::Confirmed, Some(800), now),
        ];

        let stats = scope_stats(leads.iter());
        assert_eq!(stats.revenue, Decimal::from(2300));

        // pendente -> rejeitado nunca aumenta a receita
        let leads_rejected = vec![
            cab(LeadStatus::Confirmed, Some(1500), now),
            cab(LeadStatus::Rejected, Some(9999), now),
            cab(LeadStatus::Rejected, Some(5000), now),
            enquiry(LeadStatus::Confirmed, Some(800), now),
        ];
        let after = scope_stats(leads_rejected.iter());
        assert!(after.revenue <= stats.revenue);
    }

    #[test]
    fn conversion_rate_is_bounded_and_safe_on_empty() {
        assert_eq!(quick_stats(&[]).conversion_rate, 0);

        let now = Utc::now();
        let leads = vec![
            cab(LeadStatus::Confirmed, None, now),
            cab(LeadStatus::Pending, None, now),
            cab(LeadStatus::Rejected, None, now),
        ];
        let rate = quick_stats(&leads).conversion_rate;
        assert!(rate <= 100);
        assert_eq!(rate, 33);
    }

    #[test]
    fn filtered_list_is_sorted_most_recent_first() {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let leads = vec![
            cab(LeadStatus::Pending, None, base),
            cab(LeadStatus::Pending, None, base + Duration::hours(2)),
            enquiry(LeadStatus::Pending, None, base + Duration::hours(1)),
        ];

        let sorted = filter_leads(
            &leads,
            DashboardTab::All,
            StatusFilter::All,
            "",
            Local::now().date_naive(),
        );
        let times: Vec<_> = sorted.iter().map(|l| l.created_at()).collect();
        assert!(times.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn timestamp_ties_keep_insertion_order() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let first = cab(LeadStatus::Pending, None, ts);
        let second = enquiry(LeadStatus::Pending, None, ts);
        let leads = vec![first.clone(), second];

        let sorted = filter_leads(
            &leads,
            DashboardTab::All,
            StatusFilter::All,
            "",
            Local::now().date_naive(),
        );
        assert!(matches!(sorted[0], Lead::Cab(_)));
        assert!(matches!(sorted[1], Lead::Enquiry(_)));
    }

    #[test]
    fn status_and_tab_filters_compose() {
        let now = Utc::now();
        let leads = vec![
            cab(LeadStatus::Confirmed, None, now),
            cab(LeadStatus::Pending, None, now),
            enquiry(LeadStatus::Confirmed, None, now),
        ];

        let confirmed_cabs = filter_leads(
            &leads,
            DashboardTab::Cabs,
            StatusFilter::Confirmed,
            "",
            Local::now().date_naive(),
        );
        assert_eq!(confirmed_cabs.len(), 1);
        assert!(matches!(confirmed_cabs[0], Lead::Cab(_)));
    }

    #[test]
    fn search_filters_across_kind_specific_fields() {
        let now = Utc::now();
        let leads = vec![
            cab(LeadStatus::Pending, None, now),       // pickup Delhi
            enquiry(LeadStatus::Pending, None, now),   // service Tour Package
        ];

        let today = Local::now().date_naive();
        let delhi = filter_leads(&leads, DashboardTab::All, StatusFilter::All, "delhi", today);
        assert_eq!(delhi.len(), 1);
        assert!(matches!(delhi[0], Lead::Cab(_)));

        let tour = filter_leads(&leads, DashboardTab::All, StatusFilter::All, "TOUR", today);
        assert_eq!(tour.len(), 1);
        assert!(matches!(tour[0], Lead::Enquiry(_)));

        let none = filter_leads(&leads, DashboardTab::All, StatusFilter::All, "chennai", today);
        assert!(none.is_empty());
    }

    #[test]
    fn peak_hour_tie_prefers_lowest_hour() {
        let leads = vec![
            cab(LeadStatus::Pending, None, at_local_hour(9)),
            cab(LeadStatus::Pending, None, at_local_hour(9)),
            cab(LeadStatus::Pending, None, at_local_hour(15)),
            cab(LeadStatus::Pending, None, at_local_hour(15)),
        ];
        assert_eq!(quick_stats(&leads).peak_hour, 9);
    }

    #[test]
    fn top_service_counts_labels_with_fallback() {
        assert_eq!(quick_stats(&[]).top_service, "Cab Booking");

        let now = Utc::now();
        let leads = vec![
            enquiry(LeadStatus::Pending, None, now),
            enquiry(LeadStatus::Pending, None, now),
            cab(LeadStatus::Pending, None, now),
        ];
        assert_eq!(quick_stats(&leads).top_service, "Tour Package");
    }

    #[test]
    fn dashboard_view_combines_scopes_and_list() {
        let cabs = vec![CabRequest {
            id: Uuid::new_v4(),
            pickup_location: "Delhi".into(),
            drop_location: "Agra".into(),
            date: "2025-01-01".into(),
            time: "09:00".into(),
            car_type: "Sedan".into(),
            name: "Asha".into(),
            phone: "9876543210".into(),
            price: Some(Decimal::from(2000)),
            status: LeadStatus::Confirmed,
            assigned_to: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }];

        let view = dashboard_view(
            cabs,
            vec![],
            vec![],
            DashboardTab::All,
            StatusFilter::All,
            "",
        );
        assert_eq!(view.overall.total, 1);
        assert_eq!(view.overall.revenue, Decimal::from(2000));
        assert_eq!(view.daily.total, 1);
        assert_eq!(view.leads.len(), 1);
        assert_eq!(view.quick.conversion_rate, 100);
    }
}
