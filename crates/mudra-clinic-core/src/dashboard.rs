//! Landing page summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::appointments::{AppointmentBook, AppointmentFilter};
use crate::models::{Appointment, Clinic, LabJob, Patient, StockItem, User};

/// Counts shown on admin cards. Dental-only counts are `None` for meditouch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub todays_appointments: usize,
    pub patients: usize,
    pub stock_alerts: Option<usize>,
    pub pending_lab_work: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub greeting: String,
    pub clinic_name: &'static str,
    /// Admins only
    pub stats: Option<DashboardStats>,
    /// Next active appointments today, earliest first
    pub upcoming: Vec<Appointment>,
}

/// How many upcoming appointments the dashboard lists.
pub const UPCOMING_LIMIT: usize = 3;

/// Data the dashboard reads from.
pub struct DashboardSources<'a> {
    pub book: &'a AppointmentBook,
    pub patients: &'a [Patient],
    pub stock: &'a [StockItem],
    pub lab_jobs: &'a [LabJob],
}

impl DashboardSummary {
    pub fn build(
        user: &User,
        clinic: Clinic,
        today: NaiveDate,
        sources: DashboardSources<'_>,
    ) -> Self {
        let day = sources.book.daily_view(today, &AppointmentFilter::default());
        let upcoming = day
            .morning
            .iter()
            .chain(day.afternoon.iter())
            .take(UPCOMING_LIMIT)
            .map(|a| (*a).clone())
            .collect();

        let stats = user.is_admin().then(|| {
            let dental = clinic == Clinic::Dental;
            DashboardStats {
                todays_appointments: day.total(),
                patients: sources
                    .patients
                    .iter()
                    .filter(|p| p.clinic.includes(clinic))
                    .count(),
                stock_alerts: dental
                    .then(|| sources.stock.iter().filter(|s| s.is_low_stock()).count()),
                pending_lab_work: dental
                    .then(|| sources.lab_jobs.iter().filter(|j| j.is_pending()).count()),
            }
        });

        Self {
            greeting: format!(
                "Welcome back, {}! Here's an overview of {} Clinic.",
                user.name,
                clinic.display_name()
            ),
            clinic_name: clinic.display_name(),
            stats,
            upcoming,
        }
    }
}
