//! Typed list queries, one per feature page.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Query, Record};
use crate::models::{
    ActionCategory, AuditLogEntry, Clinic, LabJob, LabStatus, Patient, StockItem,
};

impl Record for Patient {
    const KIND: &'static str = "Patient";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for StockItem {
    const KIND: &'static str = "Stock item";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for LabJob {
    const KIND: &'static str = "Lab job";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for AuditLogEntry {
    const KIND: &'static str = "Audit entry";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Case-insensitive substring test; a blank needle matches everything.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn needle(search: &Option<String>) -> Option<&str> {
    search.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Patients
// ============================================================================

/// Clinic tab of the patient list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PatientTab {
    /// Whatever clinic is active
    #[default]
    All,
    Dental,
    Meditouch,
}

impl PatientTab {
    pub fn resolve(&self, active: Clinic) -> Clinic {
        match self {
            PatientTab::All => active,
            PatientTab::Dental => Clinic::Dental,
            PatientTab::Meditouch => Clinic::Meditouch,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PatientSortKey {
    Name,
    Age,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatientQuery {
    /// Tab already resolved against the active clinic
    pub clinic: Clinic,
    pub search: Option<String>,
    pub sort: Option<(PatientSortKey, SortDirection)>,
}

impl PatientQuery {
    pub fn new(tab: PatientTab, active: Clinic) -> Self {
        Self {
            clinic: tab.resolve(active),
            search: None,
            sort: None,
        }
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn sorted_by(mut self, key: PatientSortKey, direction: SortDirection) -> Self {
        self.sort = Some((key, direction));
        self
    }
}

impl Query<Patient> for PatientQuery {
    fn matches(&self, patient: &Patient) -> bool {
        patient.clinic.includes(self.clinic)
            && needle(&self.search).map_or(true, |n| contains_ci(&patient.name, n))
    }

    fn sort(&self, items: &mut [&Patient]) {
        if let Some((key, direction)) = self.sort {
            items.sort_by(|a, b| {
                let ordering = match key {
                    PatientSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                    PatientSortKey::Age => a.age.cmp(&b.age),
                };
                direction.apply(ordering)
            });
        }
    }
}

// ============================================================================
// Stock
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StockFilter {
    #[default]
    All,
    Low,
    Expiring,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockQuery {
    pub filter: StockFilter,
    pub search: Option<String>,
    /// Items expiring before this date count as expiring
    pub expiry_cutoff: NaiveDate,
}

impl StockQuery {
    pub fn new(filter: StockFilter, expiry_cutoff: NaiveDate) -> Self {
        Self {
            filter,
            search: None,
            expiry_cutoff,
        }
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }
}

impl Query<StockItem> for StockQuery {
    fn matches(&self, item: &StockItem) -> bool {
        let text = needle(&self.search).map_or(true, |n| {
            contains_ci(&item.name, n) || contains_ci(&item.description, n)
        });
        let status = match self.filter {
            StockFilter::All => true,
            StockFilter::Low => item.is_low_stock(),
            StockFilter::Expiring => item.is_expiring_before(self.expiry_cutoff),
        };
        text && status
    }
}

// ============================================================================
// Lab work
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabJobQuery {
    pub search: Option<String>,
    pub status: Option<LabStatus>,
    pub lab: Option<String>,
}

impl Query<LabJob> for LabJobQuery {
    fn matches(&self, job: &LabJob) -> bool {
        let text = needle(&self.search).map_or(true, |n| {
            contains_ci(&job.patient, n)
                || contains_ci(&job.assigned_lab, n)
                || contains_ci(&job.lab_work_type, n)
        });
        text && self.status.map_or(true, |s| job.status == s)
            && self.lab.as_deref().map_or(true, |lab| job.assigned_lab == lab)
    }
}

/// Distinct lab names in first-seen order.
pub fn unique_labs<'a>(jobs: impl IntoIterator<Item = &'a LabJob>) -> Vec<String> {
    let mut labs: Vec<String> = Vec::new();
    for job in jobs {
        if !labs.contains(&job.assigned_lab) {
            labs.push(job.assigned_lab.clone());
        }
    }
    labs
}

// ============================================================================
// Audit log
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditQuery {
    pub search: Option<String>,
    pub category: Option<ActionCategory>,
    pub user: Option<String>,
}

impl Query<AuditLogEntry> for AuditQuery {
    fn matches(&self, entry: &AuditLogEntry) -> bool {
        needle(&self.search).map_or(true, |n| entry.matches_text(n))
            && self.category.map_or(true, |c| entry.category == c)
            && self.user.as_deref().map_or(true, |u| entry.user == u)
    }
}

/// Distinct user names in first-seen order.
pub fn unique_users<'a>(entries: impl IntoIterator<Item = &'a AuditLogEntry>) -> Vec<String> {
    let mut users: Vec<String> = Vec::new();
    for entry in entries {
        if !users.contains(&entry.user) {
            users.push(entry.user.clone());
        }
    }
    users
}
