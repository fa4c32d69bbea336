//! Mudra Clinic Core Library
//!
//! Application state for the Mudra Clinic staff portal, shared by two
//! co-branded clinics: Dental Metrix and Meditouch.
//!
//! # Architecture
//!
//! ```text
//!   UI shell ──► ClinicPortal (FFI) ──► Portal
//!                                         │
//!                    ┌────────────────────┼─────────────────────┐
//!                    ▼                    ▼                     ▼
//!              Route Guard        Appointment Books        Repositories
//!           (capability table)   (one per clinic)   (patients, stock, lab,
//!                    │                    │                 audit)
//!                    └──────────┬─────────┴─────────────────────┘
//!                               ▼
//!                    Toasts + audit entries
//!                               │
//!                 Session snapshot ──► local storage (SQLite)
//! ```
//!
//! # Modules
//!
//! - [`db`]: local storage (SQLite or in-memory key/value)
//! - [`models`]: domain types (Appointment, Patient, StockItem, LabJob, ...)
//! - [`session`]: mock authentication, clinic context, persisted snapshot
//! - [`routing`]: route capability table, guard, navigation menu
//! - [`appointments`]: per-clinic appointment book, slots, calendar views
//! - [`repository`]: in-memory repositories with typed queries
//! - [`portal`]: the application store wiring it all together

pub mod appointments;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod models;
pub mod notify;
pub mod portal;
pub mod reports;
pub mod repository;
pub mod routing;
pub mod seed;
pub mod session;
pub mod settings;

// Re-export commonly used types
pub use appointments::{AppointmentBook, AppointmentError, AppointmentFilter, SlotSchedule};
pub use config::PortalConfig;
pub use db::{Database, KeyValueStore, MemoryStore};
pub use models::{
    Appointment, AppointmentRequest, AppointmentStatus, Clinic, LabJob, LabStatus, Patient,
    Role, SlotTime, StockItem, User,
};
pub use portal::{Portal, PortalError};
pub use routing::{Access, Route, RouteGuard};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use models::{
    AuditLogEntry, ClinicAffiliation, ClinicDetails, ClinicSettings, DentalLab, DoctorProfile,
    Gender, LabWorkType, NewLabJob, NewPatient, NewStockItem, OperatingHours, Reschedule,
    ServiceOffering, SystemUser,
};
use repository::{AuditQuery, LabJobQuery, PatientQuery, PatientTab, RepositoryError, StockFilter};
use session::SessionError;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicPortalError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Not logged in: {0}")]
    NotAuthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<PortalError> for ClinicPortalError {
    fn from(e: PortalError) -> Self {
        let message = e.to_string();
        match e {
            PortalError::Session(SessionError::InvalidCredentials) => {
                ClinicPortalError::AuthenticationFailed(message)
            }
            PortalError::Session(SessionError::NotAuthenticated)
            | PortalError::NotAuthenticated => ClinicPortalError::NotAuthenticated(message),
            PortalError::Session(SessionError::Storage(_)) | PortalError::Storage(_) => {
                ClinicPortalError::StorageError(message)
            }
            PortalError::Appointment(AppointmentError::NotFound(_))
            | PortalError::Repository(RepositoryError::NotFound { .. }) => {
                ClinicPortalError::NotFound(message)
            }
            PortalError::Appointment(_) | PortalError::Repository(_) => {
                ClinicPortalError::ValidationError(message)
            }
            PortalError::Config(_) => ClinicPortalError::InvalidInput(message),
            PortalError::Forbidden { .. } => ClinicPortalError::Forbidden(message),
        }
    }
}

impl From<db::DbError> for ClinicPortalError {
    fn from(e: db::DbError) -> Self {
        ClinicPortalError::StorageError(e.to_string())
    }
}

impl From<config::ConfigError> for ClinicPortalError {
    fn from(e: config::ConfigError) -> Self {
        ClinicPortalError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicPortalError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicPortalError::StorageError(format!("Lock poisoned: {}", e))
    }
}

fn parse<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, ClinicPortalError> {
    value
        .parse()
        .map_err(|_| ClinicPortalError::InvalidInput(format!("{}: {}", field, value)))
}

fn parse_date(value: &str) -> Result<NaiveDate, ClinicPortalError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ClinicPortalError::InvalidInput(format!("date: {}", value)))
}

fn parse_optional_date(value: Option<String>) -> Result<Option<NaiveDate>, ClinicPortalError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_date(&v))
        .transpose()
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open the portal with local storage at the given path.
#[uniffi::export]
pub fn open_portal(path: String) -> Result<Arc<ClinicPortal>, ClinicPortalError> {
    let db = Database::open(&path)?;
    let portal = Portal::open(PortalConfig::default(), db)?;
    Ok(ClinicPortal::wrap(portal))
}

/// Open the portal with in-memory local storage (for testing).
#[uniffi::export]
pub fn open_portal_in_memory() -> Result<Arc<ClinicPortal>, ClinicPortalError> {
    let db = Database::open_in_memory()?;
    let portal = Portal::open(PortalConfig::instant(), db)?;
    Ok(ClinicPortal::wrap(portal))
}

/// Open the portal from a JSON configuration document.
#[uniffi::export]
pub fn open_portal_with_config(
    config_json: String,
) -> Result<Arc<ClinicPortal>, ClinicPortalError> {
    let config = PortalConfig::from_json_str(&config_json)?;
    let db = match &config.storage_path {
        Some(path) => Database::open(path)?,
        None => Database::open_in_memory()?,
    };
    let portal = Portal::open(config, db)?;
    Ok(ClinicPortal::wrap(portal))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe portal wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicPortal {
    portal: Arc<Mutex<Portal<Database>>>,
}

impl ClinicPortal {
    fn wrap(portal: Portal<Database>) -> Arc<Self> {
        Arc::new(Self {
            portal: Arc::new(Mutex::new(portal)),
        })
    }
}

#[uniffi::export]
impl ClinicPortal {
    // =========================================================================
    // Session
    // =========================================================================

    pub fn login(&self, email: String, password: String) -> Result<FfiUser, ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        Ok(portal.login(&email, &password)?.into())
    }

    pub fn logout(&self) -> Result<(), ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        portal.logout()?;
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<FfiUser>, ClinicPortalError> {
        let portal = self.portal.lock()?;
        Ok(portal.current_user().cloned().map(|u| u.into()))
    }

    /// Toasts queued since the last call.
    pub fn take_notifications(&self) -> Result<Vec<FfiNotification>, ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        Ok(portal.take_notifications().into_iter().map(|n| n.into()).collect())
    }

    // =========================================================================
    // Clinic and navigation
    // =========================================================================

    pub fn active_clinic(&self) -> Result<String, ClinicPortalError> {
        let portal = self.portal.lock()?;
        Ok(portal.active_clinic().as_str().to_string())
    }

    /// Switch clinic; returns the path the shell should now show.
    pub fn set_active_clinic(&self, clinic: String) -> Result<String, ClinicPortalError> {
        let clinic: Clinic = parse("clinic", &clinic)?;
        let mut portal = self.portal.lock()?;
        Ok(portal.set_active_clinic(clinic)?.path().to_string())
    }

    /// Body class list for the document theme.
    pub fn body_classes(&self) -> Result<Vec<String>, ClinicPortalError> {
        let portal = self.portal.lock()?;
        Ok(portal.clinic_context().body_classes().map(String::from).collect())
    }

    /// Resolve a navigation request; returns the path actually shown.
    pub fn navigate(&self, path: String) -> Result<String, ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        Ok(portal.navigate_path(&path).path().to_string())
    }

    pub fn current_route(&self) -> Result<String, ClinicPortalError> {
        let portal = self.portal.lock()?;
        Ok(portal.current_route().path().to_string())
    }

    pub fn menu(&self) -> Result<Vec<FfiNavItem>, ClinicPortalError> {
        let portal = self.portal.lock()?;
        Ok(portal
            .menu()
            .into_iter()
            .map(|item| FfiNavItem {
                title: item.title.to_string(),
                icon: item.icon.to_string(),
                path: item.path().to_string(),
            })
            .collect())
    }

    pub fn dashboard(&self) -> Result<FfiDashboard, ClinicPortalError> {
        let portal = self.portal.lock()?;
        Ok(portal.dashboard()?.into())
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    pub fn create_appointment(
        &self,
        request: FfiAppointmentRequest,
    ) -> Result<FfiAppointment, ClinicPortalError> {
        let request = AppointmentRequest {
            patient: request.patient,
            service: request.service,
            time: request.time,
            date: parse_optional_date(request.date)?,
            doctor: request.doctor,
            second_patient: request.second_patient,
            notes: request.notes,
        };
        let mut portal = self.portal.lock()?;
        Ok(portal.create_appointment(request)?.into())
    }

    pub fn reschedule_appointment(
        &self,
        id: String,
        time: String,
        date: String,
        service: String,
        doctor: Option<String>,
    ) -> Result<FfiAppointment, ClinicPortalError> {
        let change = Reschedule {
            time: parse("time", &time)?,
            date: parse_date(&date)?,
            service,
            doctor,
        };
        let mut portal = self.portal.lock()?;
        Ok(portal.reschedule_appointment(&id, change)?.into())
    }

    pub fn cancel_appointment(&self, id: String) -> Result<FfiAppointment, ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        Ok(portal.cancel_appointment(&id)?.into())
    }

    pub fn set_appointment_status(
        &self,
        id: String,
        status: String,
    ) -> Result<FfiAppointment, ClinicPortalError> {
        let status: AppointmentStatus = parse("status", &status)?;
        let mut portal = self.portal.lock()?;
        Ok(portal.set_appointment_status(&id, status)?.into())
    }

    /// Bookable times ("9:00 AM") on an ISO date.
    pub fn available_slots(&self, date: String) -> Result<Vec<String>, ClinicPortalError> {
        let date = parse_date(&date)?;
        let portal = self.portal.lock()?;
        Ok(portal.available_slots(date)?.iter().map(|s| s.to_string()).collect())
    }

    pub fn daily_view(
        &self,
        date: String,
        doctor: Option<String>,
        search: Option<String>,
    ) -> Result<FfiDailyView, ClinicPortalError> {
        let date = parse_date(&date)?;
        let filter = AppointmentFilter { doctor, search };
        let portal = self.portal.lock()?;
        let view = portal.daily_view(date, &filter)?;
        Ok(FfiDailyView {
            date: view.date.to_string(),
            morning: view.morning.into_iter().cloned().map(|a| a.into()).collect(),
            afternoon: view.afternoon.into_iter().cloned().map(|a| a.into()).collect(),
        })
    }

    pub fn weekly_view(
        &self,
        date: String,
        doctor: Option<String>,
        search: Option<String>,
    ) -> Result<Vec<FfiDayColumn>, ClinicPortalError> {
        let date = parse_date(&date)?;
        let filter = AppointmentFilter { doctor, search };
        let portal = self.portal.lock()?;
        let view = portal.weekly_view(date, &filter)?;
        Ok(view.days.into_iter().map(FfiDayColumn::from).collect())
    }

    /// Month grid cells, Sunday first, seven per week; blank cells have no date.
    pub fn monthly_view(
        &self,
        date: String,
        doctor: Option<String>,
        search: Option<String>,
    ) -> Result<Vec<FfiDayColumn>, ClinicPortalError> {
        let date = parse_date(&date)?;
        let filter = AppointmentFilter { doctor, search };
        let portal = self.portal.lock()?;
        let view = portal.monthly_view(date, &filter)?;
        Ok(view
            .cells
            .into_iter()
            .map(|cell| match cell {
                appointments::MonthCell::Day(day) => day.into(),
                appointments::MonthCell::Blank => FfiDayColumn {
                    date: None,
                    appointments: Vec::new(),
                },
            })
            .collect())
    }

    // =========================================================================
    // Patients
    // =========================================================================

    /// Patients on a clinic tab ("all", "dental", "meditouch").
    pub fn patients(
        &self,
        tab: String,
        search: Option<String>,
    ) -> Result<Vec<FfiPatient>, ClinicPortalError> {
        let tab: PatientTab = serde_json::from_value(serde_json::Value::String(tab.clone()))
            .map_err(|_| ClinicPortalError::InvalidInput(format!("tab: {}", tab)))?;
        let portal = self.portal.lock()?;
        let mut query = PatientQuery::new(tab, portal.active_clinic());
        query.search = search;
        Ok(portal
            .patients(&query)?
            .into_iter()
            .cloned()
            .map(|p| p.into())
            .collect())
    }

    pub fn add_patient(&self, patient: FfiNewPatient) -> Result<FfiPatient, ClinicPortalError> {
        let patient = NewPatient {
            name: patient.name,
            gender: parse::<Gender>("gender", &patient.gender)?,
            age: patient.age,
            email: patient.email,
            phone: patient.phone,
            address: patient.address,
            clinic: parse::<ClinicAffiliation>("clinic", &patient.clinic)?,
        };
        let mut portal = self.portal.lock()?;
        Ok(portal.add_patient(patient)?.into())
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// Stock list filtered by "all", "low" or "expiring".
    pub fn stock_items(
        &self,
        filter: String,
        search: Option<String>,
    ) -> Result<Vec<FfiStockItem>, ClinicPortalError> {
        let filter: StockFilter = serde_json::from_value(serde_json::Value::String(filter.clone()))
            .map_err(|_| ClinicPortalError::InvalidInput(format!("filter: {}", filter)))?;
        let portal = self.portal.lock()?;
        let mut query = portal.stock_query(filter);
        query.search = search;
        Ok(portal
            .stock_items(&query)?
            .into_iter()
            .cloned()
            .map(|s| s.into())
            .collect())
    }

    pub fn stock_summary(&self) -> Result<FfiStockSummary, ClinicPortalError> {
        let portal = self.portal.lock()?;
        let summary = portal.stock_summary()?;
        Ok(FfiStockSummary {
            total_items: summary.total_items as u32,
            low_stock: summary.low_stock as u32,
            expiring: summary.expiring as u32,
        })
    }

    pub fn add_stock_item(&self, item: FfiNewStockItem) -> Result<FfiStockItem, ClinicPortalError> {
        let item = NewStockItem {
            name: item.name,
            description: item.description,
            unit: item.unit,
            current_quantity: item.current_quantity,
            minimum_threshold: item.minimum_threshold,
            nearest_expiry_date: parse_optional_date(item.nearest_expiry_date)?,
        };
        let mut portal = self.portal.lock()?;
        Ok(portal.add_stock_item(item)?.into())
    }

    pub fn remove_stock_item(&self, id: String) -> Result<FfiStockItem, ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        Ok(portal.remove_stock_item(&id)?.into())
    }

    pub fn record_incoming(
        &self,
        id: String,
        quantity: u32,
    ) -> Result<FfiStockItem, ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        Ok(portal.record_incoming(&id, quantity)?.into())
    }

    pub fn record_consumption(
        &self,
        id: String,
        quantity: u32,
    ) -> Result<FfiStockItem, ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        Ok(portal.record_consumption(&id, quantity)?.into())
    }

    // =========================================================================
    // Lab work
    // =========================================================================

    pub fn lab_jobs(
        &self,
        search: Option<String>,
        status: Option<String>,
        lab: Option<String>,
    ) -> Result<Vec<FfiLabJob>, ClinicPortalError> {
        let status = status.map(|s| parse::<LabStatus>("status", &s)).transpose()?;
        let query = LabJobQuery { search, status, lab };
        let portal = self.portal.lock()?;
        let today = portal.today();
        Ok(portal
            .lab_jobs(&query)?
            .into_iter()
            .map(|j| FfiLabJob::new(j, today))
            .collect())
    }

    pub fn overdue_lab_jobs(&self) -> Result<Vec<FfiLabJob>, ClinicPortalError> {
        let portal = self.portal.lock()?;
        let today = portal.today();
        Ok(portal
            .overdue_lab_jobs()?
            .into_iter()
            .map(|j| FfiLabJob::new(j, today))
            .collect())
    }

    /// Distinct labs for the lab filter.
    pub fn lab_names(&self) -> Result<Vec<String>, ClinicPortalError> {
        let portal = self.portal.lock()?;
        Ok(portal.lab_names()?)
    }

    pub fn create_lab_job(&self, job: FfiNewLabJob) -> Result<FfiLabJob, ClinicPortalError> {
        let job = NewLabJob {
            patient: job.patient,
            service: job.service,
            lab_work_type: job.lab_work_type,
            assigned_lab: job.assigned_lab,
            date_sent: parse_optional_date(job.date_sent)?,
            expected_delivery: parse_optional_date(job.expected_delivery)?,
            material_specs: job.material_specs,
            notes: job.notes,
        };
        let mut portal = self.portal.lock()?;
        let created = portal.create_lab_job(job)?;
        Ok(FfiLabJob::new(&created, portal.today()))
    }

    pub fn update_lab_status(
        &self,
        id: String,
        status: String,
    ) -> Result<FfiLabJob, ClinicPortalError> {
        let status: LabStatus = parse("status", &status)?;
        let mut portal = self.portal.lock()?;
        let updated = portal.update_lab_status(&id, status)?;
        Ok(FfiLabJob::new(&updated, portal.today()))
    }

    // =========================================================================
    // Audit, reports, settings
    // =========================================================================

    pub fn audit_log(
        &self,
        search: Option<String>,
        category: Option<String>,
        user: Option<String>,
        page: u32,
    ) -> Result<FfiAuditPage, ClinicPortalError> {
        let category = category
            .map(|c| parse::<models::ActionCategory>("category", &c))
            .transpose()?;
        let query = AuditQuery {
            search,
            category,
            user,
        };
        let portal = self.portal.lock()?;
        let page = portal.audit_log(&query, page as usize)?;
        Ok(FfiAuditPage {
            page: page.page as u32,
            total_pages: page.total_pages as u32,
            total_items: page.total_items as u32,
            entries: page.items.into_iter().map(|e| e.into()).collect(),
        })
    }

    /// Distinct user names for the audit filter.
    pub fn audit_users(&self) -> Result<Vec<String>, ClinicPortalError> {
        let portal = self.portal.lock()?;
        Ok(portal.audit_users()?)
    }

    /// Report for "month", "quarter" or "year".
    pub fn report(&self, period: String) -> Result<FfiReport, ClinicPortalError> {
        let period: reports::ReportPeriod = parse("period", &period)?;
        let portal = self.portal.lock()?;
        Ok(portal.report(period)?.into())
    }

    pub fn clinic_details(&self) -> Result<FfiClinicDetails, ClinicPortalError> {
        let portal = self.portal.lock()?;
        Ok(portal.settings()?.details.clone().into())
    }

    /// Everything on the settings page for the active clinic.
    pub fn clinic_settings(&self) -> Result<FfiClinicSettings, ClinicPortalError> {
        let portal = self.portal.lock()?;
        Ok(portal.settings()?.clone().into())
    }

    pub fn update_clinic_details(
        &self,
        details: FfiClinicDetails,
    ) -> Result<(), ClinicPortalError> {
        let details = details.into_details()?;
        let mut portal = self.portal.lock()?;
        portal.update_clinic_details(details)?;
        Ok(())
    }

    /// Set the hours of one weekday ("Mon".."Sun").
    pub fn set_operating_hours(
        &self,
        weekday: String,
        hours: String,
    ) -> Result<(), ClinicPortalError> {
        let day: chrono::Weekday = parse("weekday", &weekday)?;
        let mut portal = self.portal.lock()?;
        portal.set_operating_hours(day, &hours)?;
        Ok(())
    }

    pub fn add_service(
        &self,
        name: String,
        duration_minutes: u32,
        price: u32,
    ) -> Result<FfiService, ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        Ok(portal.add_service(&name, duration_minutes, price)?.into())
    }

    pub fn add_doctor(
        &self,
        name: String,
        specialization: String,
        email: String,
    ) -> Result<FfiDoctor, ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        Ok(portal.add_doctor(&name, &specialization, &email)?.into())
    }

    pub fn add_lab(
        &self,
        name: String,
        contact: String,
        address: String,
        specialization: String,
    ) -> Result<FfiDentalLab, ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        Ok(portal.add_lab(&name, &contact, &address, &specialization)?.into())
    }

    pub fn add_lab_work_type(
        &self,
        name: String,
        turnaround: String,
    ) -> Result<FfiLabWorkType, ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        Ok(portal.add_lab_work_type(&name, &turnaround)?.into())
    }

    pub fn system_users(&self) -> Result<Vec<FfiSystemUser>, ClinicPortalError> {
        let portal = self.portal.lock()?;
        Ok(portal.system_users()?.iter().cloned().map(|u| u.into()).collect())
    }

    pub fn add_system_user(
        &self,
        name: String,
        email: String,
        role: String,
    ) -> Result<FfiSystemUser, ClinicPortalError> {
        let role: Role = parse("role", &role)?;
        let mut portal = self.portal.lock()?;
        Ok(portal.add_system_user(&name, &email, role)?.into())
    }

    pub fn set_system_user_active(
        &self,
        id: u32,
        active: bool,
    ) -> Result<FfiSystemUser, ClinicPortalError> {
        let mut portal = self.portal.lock()?;
        Ok(portal.set_system_user_active(id, active)?.into())
    }
}

// =========================================================================
// FFI Record Types
// =========================================================================

/// FFI-safe user.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub initials: String,
}

impl From<User> for FfiUser {
    fn from(user: User) -> Self {
        Self {
            initials: user.initials(),
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_string(),
        }
    }
}

/// FFI-safe toast.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNotification {
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

impl From<notify::Notification> for FfiNotification {
    fn from(n: notify::Notification) -> Self {
        Self {
            destructive: n.is_destructive(),
            title: n.title,
            description: n.description,
        }
    }
}

/// FFI-safe sidebar item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNavItem {
    pub title: String,
    pub icon: String,
    pub path: String,
}

/// FFI-safe booking form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentRequest {
    pub patient: String,
    pub service: String,
    pub time: String,
    /// ISO date
    pub date: Option<String>,
    pub doctor: Option<String>,
    pub second_patient: Option<String>,
    pub notes: Option<String>,
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub clinic: String,
    pub time: String,
    pub date: String,
    pub patient: String,
    pub service: String,
    pub doctor: Option<String>,
    pub second_patient: Option<String>,
    pub notes: Option<String>,
    pub status: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            clinic: a.clinic.as_str().to_string(),
            time: a.time.to_string(),
            date: a.date.to_string(),
            patient: a.patient,
            service: a.service,
            doctor: a.doctor,
            second_patient: a.second_patient,
            notes: a.notes,
            status: a.status.as_str().to_string(),
        }
    }
}

/// FFI-safe daily view.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDailyView {
    pub date: String,
    pub morning: Vec<FfiAppointment>,
    pub afternoon: Vec<FfiAppointment>,
}

/// FFI-safe calendar cell. `date` is `None` for month-grid padding.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDayColumn {
    pub date: Option<String>,
    pub appointments: Vec<FfiAppointment>,
}

impl From<appointments::DayColumn<'_>> for FfiDayColumn {
    fn from(day: appointments::DayColumn<'_>) -> Self {
        Self {
            date: Some(day.date.to_string()),
            appointments: day.appointments.into_iter().cloned().map(|a| a.into()).collect(),
        }
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub email: Option<String>,
    pub phone: String,
    pub address: String,
    /// "dental", "meditouch" or "both", as accepted by `add_patient`
    pub clinic: String,
    pub clinic_label: String,
    pub last_visit: Option<String>,
}

impl From<Patient> for FfiPatient {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            name: p.name,
            gender: p.gender.as_str().to_string(),
            age: p.age,
            email: p.email,
            phone: p.phone,
            address: p.address,
            clinic: p.clinic.as_str().to_string(),
            clinic_label: p.clinic.label().to_string(),
            last_visit: p.last_visit.map(|d| d.to_string()),
        }
    }
}

/// FFI-safe new patient form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub email: Option<String>,
    pub phone: String,
    pub address: String,
    /// "dental", "meditouch" or "both"
    pub clinic: String,
}

/// FFI-safe stock item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStockItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub unit: String,
    pub current_quantity: u32,
    pub minimum_threshold: u32,
    pub nearest_expiry_date: Option<String>,
    pub low_stock: bool,
}

impl From<StockItem> for FfiStockItem {
    fn from(s: StockItem) -> Self {
        Self {
            low_stock: s.is_low_stock(),
            id: s.id,
            name: s.name,
            description: s.description,
            unit: s.unit,
            current_quantity: s.current_quantity,
            minimum_threshold: s.minimum_threshold,
            nearest_expiry_date: s.nearest_expiry_date.map(|d| d.to_string()),
        }
    }
}

/// FFI-safe lab job.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLabJob {
    pub id: String,
    pub patient: String,
    pub service: String,
    pub lab_work_type: String,
    pub date_sent: String,
    pub assigned_lab: String,
    pub expected_delivery: String,
    pub status: String,
    pub status_label: String,
    /// Outstanding past the expected delivery date
    pub overdue: bool,
}

impl FfiLabJob {
    fn new(j: &LabJob, today: NaiveDate) -> Self {
        Self {
            id: j.id.clone(),
            patient: j.patient.clone(),
            service: j.service.clone(),
            lab_work_type: j.lab_work_type.clone(),
            date_sent: j.date_sent.to_string(),
            assigned_lab: j.assigned_lab.clone(),
            expected_delivery: j.expected_delivery.to_string(),
            status: j.status.as_str().to_string(),
            status_label: j.status.label().to_string(),
            overdue: j.is_overdue(today),
        }
    }
}

/// FFI-safe new lab job form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewLabJob {
    pub patient: String,
    pub service: String,
    pub lab_work_type: String,
    pub assigned_lab: String,
    pub date_sent: Option<String>,
    pub expected_delivery: Option<String>,
    pub material_specs: Option<String>,
    pub notes: Option<String>,
}

/// FFI-safe audit entry. Change sets are JSON text.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAuditEntry {
    pub id: String,
    pub timestamp: String,
    pub user: String,
    pub user_role: String,
    pub category: String,
    pub action_type: String,
    pub target_entity: String,
    pub details: String,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl From<AuditLogEntry> for FfiAuditEntry {
    fn from(e: AuditLogEntry) -> Self {
        let (before, after) = match &e.changes {
            Some(c) => (Some(c.before.to_string()), Some(c.after.to_string())),
            None => (None, None),
        };
        Self {
            id: e.id,
            timestamp: e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            user: e.user,
            user_role: e.user_role.as_str().to_string(),
            category: e.category.as_str().to_string(),
            action_type: e.action_type,
            target_entity: e.target_entity,
            details: e.details,
            before,
            after,
        }
    }
}

/// FFI-safe audit page.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAuditPage {
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u32,
    pub entries: Vec<FfiAuditEntry>,
}

/// FFI-safe monthly value.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSeriesPoint {
    pub month: String,
    pub value: u64,
}

/// FFI-safe service share.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiServiceShare {
    pub name: String,
    pub value: u32,
}

/// FFI-safe clinic report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReport {
    pub clinic: String,
    pub period: String,
    pub total_patients: u32,
    pub new_patients: u32,
    pub new_patients_change: i32,
    pub appointments_count: u32,
    pub appointments_change: i32,
    pub revenue: String,
    pub revenue_change: i32,
    pub avg_booking: String,
    pub avg_booking_change: i32,
    pub service_distribution: Vec<FfiServiceShare>,
    pub appointments: Vec<FfiSeriesPoint>,
    pub monthly_revenue: Vec<FfiSeriesPoint>,
}

impl From<reports::ClinicReport> for FfiReport {
    fn from(r: reports::ClinicReport) -> Self {
        let point = |p: reports::SeriesPoint| FfiSeriesPoint {
            month: p.month,
            value: p.value,
        };
        Self {
            clinic: r.clinic.as_str().to_string(),
            period: r.period.as_str().to_string(),
            total_patients: r.metrics.total_patients,
            new_patients: r.metrics.new_patients,
            new_patients_change: r.metrics.new_patients_change,
            appointments_count: r.metrics.appointments,
            appointments_change: r.metrics.appointments_change,
            revenue: r.metrics.revenue,
            revenue_change: r.metrics.revenue_change,
            avg_booking: r.metrics.avg_booking,
            avg_booking_change: r.metrics.avg_booking_change,
            service_distribution: r
                .service_distribution
                .into_iter()
                .map(|s| FfiServiceShare {
                    name: s.name,
                    value: s.value,
                })
                .collect(),
            appointments: r.appointments.into_iter().map(point).collect(),
            monthly_revenue: r.revenue.into_iter().map(point).collect(),
        }
    }
}

/// FFI-safe clinic details. Hours run Monday to Sunday.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub operating_hours: Vec<String>,
}

impl From<ClinicDetails> for FfiClinicDetails {
    fn from(d: ClinicDetails) -> Self {
        use chrono::Weekday::*;
        let hours = &d.operating_hours;
        let operating_hours = [Mon, Tue, Wed, Thu, Fri, Sat, Sun]
            .into_iter()
            .map(|day| hours.for_weekday(day).to_string())
            .collect();
        Self {
            name: d.name,
            address: d.address,
            phone: d.phone,
            email: d.email,
            operating_hours,
        }
    }
}

impl FfiClinicDetails {
    fn into_details(self) -> Result<ClinicDetails, ClinicPortalError> {
        let hours: [String; 7] = self.operating_hours.try_into().map_err(|v: Vec<String>| {
            ClinicPortalError::InvalidInput(format!("operating_hours: {} days", v.len()))
        })?;
        let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = hours;
        Ok(ClinicDetails {
            name: self.name,
            address: self.address,
            phone: self.phone,
            email: self.email,
            operating_hours: OperatingHours {
                monday,
                tuesday,
                wednesday,
                thursday,
                friday,
                saturday,
                sunday,
            },
        })
    }
}

/// FFI-safe stock figures.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStockSummary {
    pub total_items: u32,
    pub low_stock: u32,
    pub expiring: u32,
}

/// FFI-safe new stock item form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewStockItem {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub current_quantity: u32,
    pub minimum_threshold: u32,
    /// ISO date
    pub nearest_expiry_date: Option<String>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiService {
    pub id: u32,
    pub name: String,
    pub duration_minutes: u32,
    pub price: u32,
}

impl From<ServiceOffering> for FfiService {
    fn from(s: ServiceOffering) -> Self {
        Self {
            id: s.id,
            name: s.name,
            duration_minutes: s.duration_minutes,
            price: s.price,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctor {
    pub id: u32,
    pub name: String,
    pub specialization: String,
    pub email: String,
}

impl From<DoctorProfile> for FfiDoctor {
    fn from(d: DoctorProfile) -> Self {
        Self {
            id: d.id,
            name: d.name,
            specialization: d.specialization,
            email: d.email,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDentalLab {
    pub id: u32,
    pub name: String,
    pub contact: String,
    pub address: String,
    pub specialization: String,
}

impl From<DentalLab> for FfiDentalLab {
    fn from(l: DentalLab) -> Self {
        Self {
            id: l.id,
            name: l.name,
            contact: l.contact,
            address: l.address,
            specialization: l.specialization,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLabWorkType {
    pub id: u32,
    pub name: String,
    pub turnaround: String,
}

impl From<LabWorkType> for FfiLabWorkType {
    fn from(t: LabWorkType) -> Self {
        Self {
            id: t.id,
            name: t.name,
            turnaround: t.turnaround,
        }
    }
}

/// FFI-safe staff account.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSystemUser {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
}

impl From<SystemUser> for FfiSystemUser {
    fn from(u: SystemUser) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role.as_str().to_string(),
            active: u.active,
        }
    }
}

/// FFI-safe settings page. Doctors, labs and lab work types are empty for meditouch.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicSettings {
    pub details: FfiClinicDetails,
    pub services: Vec<FfiService>,
    pub doctors: Vec<FfiDoctor>,
    pub labs: Vec<FfiDentalLab>,
    pub lab_work_types: Vec<FfiLabWorkType>,
}

impl From<ClinicSettings> for FfiClinicSettings {
    fn from(s: ClinicSettings) -> Self {
        Self {
            details: s.details.into(),
            services: s.services.into_iter().map(Into::into).collect(),
            doctors: s.doctors.into_iter().map(Into::into).collect(),
            labs: s.labs.into_iter().map(Into::into).collect(),
            lab_work_types: s.lab_work_types.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-safe dashboard.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboard {
    pub greeting: String,
    pub clinic_name: String,
    pub todays_appointments: Option<u32>,
    pub patients: Option<u32>,
    pub stock_alerts: Option<u32>,
    pub pending_lab_work: Option<u32>,
    pub upcoming: Vec<FfiAppointment>,
}

impl From<dashboard::DashboardSummary> for FfiDashboard {
    fn from(d: dashboard::DashboardSummary) -> Self {
        let stats = d.stats.as_ref();
        Self {
            todays_appointments: stats.map(|s| s.todays_appointments as u32),
            patients: stats.map(|s| s.patients as u32),
            stock_alerts: stats.and_then(|s| s.stock_alerts).map(|n| n as u32),
            pending_lab_work: stats.and_then(|s| s.pending_lab_work).map(|n| n as u32),
            greeting: d.greeting,
            clinic_name: d.clinic_name.to_string(),
            upcoming: d.upcoming.into_iter().map(|a| a.into()).collect(),
        }
    }
}
