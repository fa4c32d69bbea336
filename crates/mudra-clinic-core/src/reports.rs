//! Admin reports for the active clinic.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Clinic, KeyMetrics, MonthlyFigure, ServiceShare};
use crate::seed;

/// Reporting window, counted back from the latest month.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Month,
    Quarter,
    #[default]
    Year,
}

impl ReportPeriod {
    pub fn months(&self) -> usize {
        match self {
            ReportPeriod::Month => 1,
            ReportPeriod::Quarter => 3,
            ReportPeriod::Year => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Month => "month",
            ReportPeriod::Quarter => "quarter",
            ReportPeriod::Year => "year",
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(ReportPeriod::Month),
            "quarter" => Ok(ReportPeriod::Quarter),
            "year" => Ok(ReportPeriod::Year),
            other => Err(format!("unknown report period: {}", other)),
        }
    }
}

/// One point of a per-clinic monthly series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub month: String,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicReport {
    pub clinic: Clinic,
    pub period: ReportPeriod,
    pub metrics: KeyMetrics,
    pub service_distribution: Vec<ServiceShare>,
    pub appointments: Vec<SeriesPoint>,
    pub revenue: Vec<SeriesPoint>,
}

impl ClinicReport {
    pub fn total_appointments(&self) -> u64 {
        self.appointments.iter().map(|p| p.value).sum()
    }

    pub fn total_revenue(&self) -> u64 {
        self.revenue.iter().map(|p| p.value).sum()
    }
}

/// Static yearly figures behind the reports page.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    appointments: Vec<MonthlyFigure>,
    revenue: Vec<MonthlyFigure>,
}

impl Default for ReportData {
    fn default() -> Self {
        Self {
            appointments: seed::monthly_appointments(),
            revenue: seed::monthly_revenue(),
        }
    }
}

impl ReportData {
    pub fn report(&self, clinic: Clinic, period: ReportPeriod) -> ClinicReport {
        ClinicReport {
            clinic,
            period,
            metrics: seed::key_metrics(clinic),
            service_distribution: seed::service_distribution(clinic),
            appointments: trailing(&self.appointments, clinic, period),
            revenue: trailing(&self.revenue, clinic, period),
        }
    }
}

fn trailing(series: &[MonthlyFigure], clinic: Clinic, period: ReportPeriod) -> Vec<SeriesPoint> {
    let skip = series.len().saturating_sub(period.months());
    series[skip..]
        .iter()
        .map(|figure| SeriesPoint {
            month: figure.month.clone(),
            value: figure.for_clinic(clinic),
        })
        .collect()
}
