//! Reporting series and headline metrics.

use serde::{Deserialize, Serialize};

use super::clinic::Clinic;

/// One month of a two-clinic series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyFigure {
    /// Short month name ("Jan")
    pub month: String,
    pub dental: u64,
    pub meditouch: u64,
}

impl MonthlyFigure {
    pub fn for_clinic(&self, clinic: Clinic) -> u64 {
        match clinic {
            Clinic::Dental => self.dental,
            Clinic::Meditouch => self.meditouch,
        }
    }
}

/// Headline cards of the reports page. Changes are month-over-month percentages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyMetrics {
    pub total_patients: u32,
    pub new_patients: u32,
    pub new_patients_change: i32,
    pub appointments: u32,
    pub appointments_change: i32,
    /// Preformatted rupee amount ("₹4.2L")
    pub revenue: String,
    pub revenue_change: i32,
    pub avg_booking: String,
    pub avg_booking_change: i32,
}

/// Share of bookings taken by one service, in percent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceShare {
    pub name: String,
    pub value: u32,
}
