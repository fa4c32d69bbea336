//! Lab-work tracking models (Dental Metrix only).

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a lab order currently stands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LabStatus {
    Pending,
    Sent,
    InProgress,
    Received,
    Ready,
    Delivered,
    Issue,
}

impl LabStatus {
    pub const ALL: [LabStatus; 7] = [
        LabStatus::Pending,
        LabStatus::Sent,
        LabStatus::InProgress,
        LabStatus::Received,
        LabStatus::Ready,
        LabStatus::Delivered,
        LabStatus::Issue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabStatus::Pending => "pending",
            LabStatus::Sent => "sent",
            LabStatus::InProgress => "in-progress",
            LabStatus::Received => "received",
            LabStatus::Ready => "ready",
            LabStatus::Delivered => "delivered",
            LabStatus::Issue => "issue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LabStatus::Pending => "Pending",
            LabStatus::Sent => "Sent to Lab",
            LabStatus::InProgress => "In Progress",
            LabStatus::Received => "Received (QC)",
            LabStatus::Ready => "Ready",
            LabStatus::Delivered => "Delivered",
            LabStatus::Issue => "Issue",
        }
    }
}

impl FromStr for LabStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LabStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown lab status: {}", s))
    }
}

/// A lab work order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabJob {
    /// Order id ("LJ001")
    pub id: String,
    pub patient: String,
    pub service: String,
    /// Prosthetic or appliance being fabricated
    pub lab_work_type: String,
    pub date_sent: NaiveDate,
    pub assigned_lab: String,
    pub expected_delivery: NaiveDate,
    pub status: LabStatus,
}

impl LabJob {
    /// Still outstanding: not yet delivered to the patient.
    pub fn is_pending(&self) -> bool {
        self.status != LabStatus::Delivered
    }

    /// Outstanding past its expected delivery date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_pending() && self.expected_delivery < today
    }
}

/// Input of the "New Lab Entry" dialog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewLabJob {
    pub patient: String,
    pub service: String,
    pub lab_work_type: String,
    pub assigned_lab: String,
    pub date_sent: Option<NaiveDate>,
    pub expected_delivery: Option<NaiveDate>,
    pub material_specs: Option<String>,
    pub notes: Option<String>,
}

impl NewLabJob {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.patient.trim().is_empty() {
            missing.push("patient");
        }
        if self.service.trim().is_empty() {
            missing.push("service");
        }
        if self.lab_work_type.trim().is_empty() {
            missing.push("lab work type");
        }
        if self.assigned_lab.trim().is_empty() {
            missing.push("assigned lab");
        }
        if self.date_sent.is_none() {
            missing.push("date sent");
        }
        if self.expected_delivery.is_none() {
            missing.push("expected delivery");
        }
        missing
    }

    /// Build the order. Returns `None` while required dates are missing.
    pub fn into_job(self, id: String) -> Option<LabJob> {
        Some(LabJob {
            id,
            patient: self.patient.trim().to_string(),
            service: self.service.trim().to_string(),
            lab_work_type: self.lab_work_type.trim().to_string(),
            date_sent: self.date_sent?,
            assigned_lab: self.assigned_lab.trim().to_string(),
            expected_delivery: self.expected_delivery?,
            status: LabStatus::Pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_kebab_case() {
        let json = serde_json::to_string(&LabStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        assert_eq!("in-progress".parse::<LabStatus>().unwrap(), LabStatus::InProgress);
        assert!("lost".parse::<LabStatus>().is_err());
    }

    #[test]
    fn test_overdue() {
        let job = LabJob {
            id: "LJ005".into(),
            patient: "Rajiv Malhotra".into(),
            service: "Implant Restoration".into(),
            lab_work_type: "Custom Abutment".into(),
            date_sent: NaiveDate::from_ymd_opt(2023, 10, 3).unwrap(),
            assigned_lab: "Implant Specialists".into(),
            expected_delivery: NaiveDate::from_ymd_opt(2023, 10, 10).unwrap(),
            status: LabStatus::Issue,
        };
        assert!(job.is_overdue(NaiveDate::from_ymd_opt(2023, 10, 15).unwrap()));
        assert!(!job.is_overdue(NaiveDate::from_ymd_opt(2023, 10, 9).unwrap()));
    }

    #[test]
    fn test_new_job_requires_dates() {
        let input = NewLabJob {
            patient: "Vikram Singh".into(),
            service: "Bridge Procedure".into(),
            lab_work_type: "Ceramic Bridge".into(),
            assigned_lab: "Dent Creations India".into(),
            ..Default::default()
        };
        assert_eq!(input.missing_fields(), vec!["date sent", "expected delivery"]);
        assert!(input.into_job("LJ007".into()).is_none());
    }
}
