//! The application store.
//!
//! [`Portal`] owns every piece of state a UI shell needs and is the only
//! place that mutates it. Each operation checks the route guard first,
//! then mutates, then records an audit entry and queues a toast. Session
//! and clinic changes are written through to local storage immediately.

use chrono::{Days, Local, NaiveDate, Weekday};
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use crate::appointments::{
    AppointmentBook, AppointmentError, AppointmentFilter, DailyView, MonthlyView, WeeklyView,
};
use crate::config::{simulate_latency, ConfigError, PortalConfig};
use crate::dashboard::{DashboardSources, DashboardSummary};
use crate::db::{DbError, KeyValueStore};
use crate::models::{
    ActionCategory, Appointment, AppointmentRequest, AppointmentStatus, AuditChanges,
    AuditLogEntry, Clinic, ClinicDetails, ClinicSettings, DentalLab, DoctorProfile, LabJob,
    LabStatus, LabWorkType, NewLabJob, NewPatient, NewStockItem, Patient, Reschedule, Role,
    ServiceOffering, SlotTime, StockItem, SystemUser, User, weekday_key,
};
use crate::notify::{Notification, Toaster};
use crate::reports::{ClinicReport, ReportData, ReportPeriod};
use crate::repository::{
    unique_labs, unique_users, AuditQuery, LabJobQuery, Page, PatientQuery, Repository,
    RepositoryError, StockFilter, StockQuery,
};
use crate::routing::{navigation_menu, Access, NavItem, Navigator, Route, RouteGuard};
use crate::seed;
use crate::session::{ClinicContext, SessionError, SessionProvider, SessionSnapshot};
use crate::settings::SettingsStore;

/// Portal errors.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Appointment(#[from] AppointmentError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] DbError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Access to {route} denied")]
    Forbidden { route: Route },
}

pub type PortalResult<T> = Result<T, PortalError>;

/// Stock figures shown above the stock table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockSummary {
    pub total_items: usize,
    pub low_stock: usize,
    pub expiring: usize,
}

pub struct Portal<S: KeyValueStore> {
    config: PortalConfig,
    store: S,
    today: NaiveDate,
    session: SessionProvider,
    clinic: ClinicContext,
    navigator: Navigator,
    dental_book: AppointmentBook,
    meditouch_book: AppointmentBook,
    patients: Repository<Patient>,
    stock: Repository<StockItem>,
    lab_jobs: Repository<LabJob>,
    audit: Repository<AuditLogEntry>,
    settings: SettingsStore,
    reports: ReportData,
    toaster: Toaster,
}

impl<S: KeyValueStore> Portal<S> {
    /// Open the portal dated today in local time.
    pub fn open(config: PortalConfig, store: S) -> PortalResult<Self> {
        Self::open_at(config, store, Local::now().date_naive())
    }

    /// Open the portal with a fixed "today", restoring the saved session.
    pub fn open_at(config: PortalConfig, store: S, today: NaiveDate) -> PortalResult<Self> {
        config.validate()?;
        let snapshot = SessionSnapshot::load(&store)?;

        let mut session = SessionProvider::new(config.login_latency());
        session.restore(snapshot.user);
        let clinic = ClinicContext::new(snapshot.active_clinic);

        let book = |c: Clinic| {
            AppointmentBook::with_appointments(
                c,
                config.slot_schedule.clone(),
                seed::appointments(c, today),
            )
        };

        let mut portal = Self {
            dental_book: book(Clinic::Dental),
            meditouch_book: book(Clinic::Meditouch),
            patients: Repository::with_items("PT", 3, seed::patients()),
            stock: Repository::with_items("", 0, seed::stock_items()),
            lab_jobs: Repository::with_items("LJ", 3, seed::lab_jobs()),
            audit: Repository::with_items("AUD", 3, seed::audit_log()),
            settings: SettingsStore::default(),
            reports: ReportData::default(),
            toaster: Toaster::new(),
            navigator: Navigator::new(),
            session,
            clinic,
            today,
            store,
            config,
        };
        portal.navigate(Route::Root);

        info!(
            clinic = %portal.clinic.active_clinic(),
            restored = portal.session.is_authenticated(),
            "Portal opened"
        );
        Ok(portal)
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.session.current_user().cloned(),
            active_clinic: self.clinic.active_clinic(),
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.toaster.push(notification);
    }

    /// Queued toasts, oldest first. The queue is emptied.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.toaster.drain()
    }

    pub fn notifications(&self) -> &[Notification] {
        self.toaster.pending()
    }

    // ========================================================================
    // Session
    // ========================================================================

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Log in and land on the dashboard.
    pub fn login(&mut self, email: &str, password: &str) -> PortalResult<User> {
        let user = match self.session.login(email, password) {
            Ok(user) => user.clone(),
            Err(e) => {
                self.notify(Notification::error("Login failed", "Invalid email or password"));
                return Err(e.into());
            }
        };

        // The session only stands once it is persisted
        if let Err(e) = self.snapshot().save_user(&mut self.store) {
            warn!(error = %e, "Could not persist session, login rolled back");
            self.session.restore(None);
            self.notify(Notification::error("Login failed", "Could not save your session"));
            return Err(e.into());
        }
        self.notify(Notification::success("Login successful", "Welcome to Mudra Clinic"));
        self.record(
            ActionCategory::Auth,
            "Login Success",
            "System",
            format!("Successful login as {}", user.email),
            None,
        );
        self.navigate(Route::Dashboard);
        Ok(user)
    }

    /// Log out and land on the login page.
    pub fn logout(&mut self) -> PortalResult<()> {
        if self.session.is_authenticated() {
            self.record(ActionCategory::Auth, "Logout", "System", "User logged out".into(), None);
        }
        self.session.logout();
        self.snapshot().save_user(&mut self.store)?;
        self.navigate(Route::Login);
        Ok(())
    }

    // ========================================================================
    // Clinic context
    // ========================================================================

    pub fn clinic_context(&self) -> &ClinicContext {
        &self.clinic
    }

    pub fn active_clinic(&self) -> Clinic {
        self.clinic.active_clinic()
    }

    /// Switch clinic, persist it, and leave the current page if it no
    /// longer applies.
    pub fn set_active_clinic(&mut self, clinic: Clinic) -> PortalResult<Route> {
        self.clinic.set_active_clinic(clinic);
        self.snapshot().save_clinic(&mut self.store)?;
        let user = self.session.current_user();
        Ok(self.navigator.revalidate(user, clinic))
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn current_route(&self) -> Route {
        self.navigator.current()
    }

    pub fn navigate(&mut self, route: Route) -> Route {
        let user = self.session.current_user();
        self.navigator.navigate(route, user, self.clinic.active_clinic())
    }

    pub fn navigate_path(&mut self, path: &str) -> Route {
        self.navigate(Route::parse(path))
    }

    pub fn menu(&self) -> Vec<NavItem> {
        navigation_menu(self.session.current_user(), self.clinic.active_clinic())
    }

    /// Guard for direct calls: the current user must be allowed on `route`.
    fn require(&self, route: Route) -> PortalResult<&User> {
        let user = self.session.current_user().ok_or(PortalError::NotAuthenticated)?;
        match RouteGuard::authorize(Some(user), self.clinic.active_clinic(), route) {
            Access::Granted => Ok(user),
            Access::Redirect(_) => {
                warn!(%route, role = %user.role, "Operation denied");
                Err(PortalError::Forbidden { route })
            }
        }
    }

    // ========================================================================
    // Audit trail
    // ========================================================================

    fn record(
        &mut self,
        category: ActionCategory,
        action: &str,
        target: &str,
        details: String,
        changes: Option<AuditChanges>,
    ) {
        let Some(user) = self.session.current_user() else {
            return;
        };
        let (name, role) = (user.name.clone(), user.role);
        let id = self.audit.next_id();
        let entry = AuditLogEntry {
            id,
            timestamp: Local::now().naive_local(),
            user: name,
            user_role: role,
            category,
            action_type: action.to_string(),
            target_entity: target.to_string(),
            details,
            changes,
        };
        if let Err(e) = self.audit.insert(entry) {
            warn!(error = %e, "Audit entry dropped");
        }
    }

    /// One page of the filtered audit log.
    pub fn audit_log(&self, query: &AuditQuery, page: usize) -> PortalResult<Page<AuditLogEntry>> {
        self.require(Route::Audit)?;
        let matched = self.audit.filter(query).into_iter().cloned().collect();
        Ok(Page::of(matched, page, self.config.audit_page_size))
    }

    pub fn audit_users(&self) -> PortalResult<Vec<String>> {
        self.require(Route::Audit)?;
        Ok(unique_users(self.audit.list()))
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    fn book_mut(&mut self) -> &mut AppointmentBook {
        match self.clinic.active_clinic() {
            Clinic::Dental => &mut self.dental_book,
            Clinic::Meditouch => &mut self.meditouch_book,
        }
    }

    /// Appointment book of the active clinic.
    pub fn appointments(&self) -> &AppointmentBook {
        self.book(self.clinic.active_clinic())
    }

    pub fn book(&self, clinic: Clinic) -> &AppointmentBook {
        match clinic {
            Clinic::Dental => &self.dental_book,
            Clinic::Meditouch => &self.meditouch_book,
        }
    }

    /// Submit the booking form for the active clinic.
    pub fn create_appointment(&mut self, request: AppointmentRequest) -> PortalResult<Appointment> {
        self.require(Route::NewAppointment)?;

        let result = match self.appointments().check(&request) {
            Ok(()) => {
                simulate_latency(self.config.submit_latency());
                self.book_mut().create(request).cloned()
            }
            Err(e) => Err(e),
        };
        let appointment = match result {
            Ok(appointment) => appointment,
            Err(e) => {
                self.notify(Notification::error("Could not schedule appointment", e.to_string()));
                return Err(e.into());
            }
        };

        self.notify(Notification::success(
            "Appointment scheduled",
            format!(
                "{}'s appointment has been scheduled for {} at {}",
                appointment.patient,
                appointment.date.format("%B %-d, %Y"),
                appointment.time
            ),
        ));
        self.record(
            ActionCategory::Appointment,
            "Create Appointment",
            &appointment.patient,
            format!("Created new appointment for {}", appointment.service.to_lowercase()),
            None,
        );
        self.navigate(Route::Appointments);
        Ok(appointment)
    }

    pub fn reschedule_appointment(
        &mut self,
        id: &str,
        change: Reschedule,
    ) -> PortalResult<Appointment> {
        self.require(Route::Appointments)?;
        let before = self.appointments().get(id).map(|a| {
            json!({
                "date": a.date,
                "time": a.time,
                "service": a.service,
                "doctor": a.doctor,
            })
        });

        let appointment = match self.book_mut().reschedule(id, change) {
            Ok(appointment) => appointment.clone(),
            Err(e) => {
                self.notify(Notification::error("Could not reschedule", e.to_string()));
                return Err(e.into());
            }
        };

        let after = json!({
            "date": appointment.date,
            "time": appointment.time,
            "service": appointment.service,
            "doctor": appointment.doctor,
        });
        self.record(
            ActionCategory::Appointment,
            "Reschedule Appointment",
            &appointment.patient,
            format!("Rescheduled appointment to {} at {}", appointment.date, appointment.time),
            before.map(|before| AuditChanges { before, after }),
        );
        Ok(appointment)
    }

    pub fn cancel_appointment(&mut self, id: &str) -> PortalResult<Appointment> {
        self.require(Route::Appointments)?;
        let appointment = self.book_mut().cancel(id)?.clone();
        self.record(
            ActionCategory::Appointment,
            "Cancel Appointment",
            &appointment.patient,
            format!("Cancelled {} appointment", appointment.service),
            None,
        );
        Ok(appointment)
    }

    pub fn set_appointment_status(
        &mut self,
        id: &str,
        status: AppointmentStatus,
    ) -> PortalResult<Appointment> {
        self.require(Route::Appointments)?;
        Ok(self.book_mut().set_status(id, status)?.clone())
    }

    pub fn available_slots(&self, date: NaiveDate) -> PortalResult<Vec<SlotTime>> {
        self.require(Route::NewAppointment)?;
        Ok(self.appointments().available_slots(date))
    }

    pub fn daily_view(
        &self,
        date: NaiveDate,
        filter: &AppointmentFilter,
    ) -> PortalResult<DailyView<'_>> {
        self.require(Route::Appointments)?;
        Ok(self.appointments().daily_view(date, filter))
    }

    pub fn weekly_view(
        &self,
        date: NaiveDate,
        filter: &AppointmentFilter,
    ) -> PortalResult<WeeklyView<'_>> {
        self.require(Route::Appointments)?;
        Ok(self.appointments().weekly_view(date, filter))
    }

    pub fn monthly_view(
        &self,
        date: NaiveDate,
        filter: &AppointmentFilter,
    ) -> PortalResult<MonthlyView<'_>> {
        self.require(Route::Appointments)?;
        Ok(self.appointments().monthly_view(date, filter))
    }

    // ========================================================================
    // Patients
    // ========================================================================

    pub fn patients(&self, query: &PatientQuery) -> PortalResult<Vec<&Patient>> {
        self.require(Route::Patients)?;
        Ok(self.patients.filter(query))
    }

    pub fn add_patient(&mut self, patient: NewPatient) -> PortalResult<Patient> {
        self.require(Route::Patients)?;
        let missing = patient.missing_fields();
        if !missing.is_empty() {
            let err = RepositoryError::MissingFields(missing);
            self.notify(Notification::error("Could not add patient", err.to_string()));
            return Err(err.into());
        }
        simulate_latency(self.config.submit_latency());

        let created = self.patients.create(|id| patient.into_patient(id))?.clone();
        self.notify(Notification::success(
            "Patient Added",
            format!("{} has been added to the patient registry.", created.name),
        ));
        self.record(
            ActionCategory::Patient,
            "Create Patient",
            &created.name,
            "Added new patient record".into(),
            None,
        );
        Ok(created)
    }

    // ========================================================================
    // Stock
    // ========================================================================

    /// Stock expiring before this date is flagged.
    pub fn expiry_cutoff(&self) -> NaiveDate {
        self.today
            .checked_add_days(Days::new(u64::from(self.config.stock_expiry_warning_days)))
            .unwrap_or(self.today)
    }

    pub fn stock_query(&self, filter: StockFilter) -> StockQuery {
        StockQuery::new(filter, self.expiry_cutoff())
    }

    pub fn stock_items(&self, query: &StockQuery) -> PortalResult<Vec<&StockItem>> {
        self.require(Route::Stock)?;
        Ok(self.stock.filter(query))
    }

    pub fn stock_summary(&self) -> PortalResult<StockSummary> {
        self.require(Route::Stock)?;
        Ok(StockSummary {
            total_items: self.stock.len(),
            low_stock: self.stock.count(&self.stock_query(StockFilter::Low)),
            expiring: self.stock.count(&self.stock_query(StockFilter::Expiring)),
        })
    }

    pub fn add_stock_item(&mut self, item: NewStockItem) -> PortalResult<StockItem> {
        self.require(Route::Stock)?;
        let missing = item.missing_fields();
        if !missing.is_empty() {
            let err = RepositoryError::MissingFields(missing);
            self.notify(Notification::error("Could not add stock item", err.to_string()));
            return Err(err.into());
        }
        simulate_latency(self.config.submit_latency());

        let created = self.stock.create(|id| item.into_item(id))?.clone();
        self.notify(Notification::success(
            "Stock Item Added",
            format!("{} has been added to inventory.", created.name),
        ));
        self.record(
            ActionCategory::Stock,
            "Create Stock Item",
            &created.name,
            format!("Added {} {} to inventory", created.current_quantity, created.unit),
            None,
        );
        Ok(created)
    }

    /// Take an item off the inventory, as when expired stock is discarded.
    pub fn remove_stock_item(&mut self, id: &str) -> PortalResult<StockItem> {
        self.require(Route::Stock)?;
        let removed = self.stock.remove(id)?;
        self.notify(Notification::success(
            "Stock Item Removed",
            format!("{} has been removed from inventory.", removed.name),
        ));
        self.record(
            ActionCategory::Stock,
            "Delete Stock Item",
            &removed.name,
            format!("Removed {} {} from inventory", removed.current_quantity, removed.unit),
            None,
        );
        Ok(removed)
    }

    /// Receive `quantity` units of an item.
    pub fn record_incoming(&mut self, id: &str, quantity: u32) -> PortalResult<StockItem> {
        self.adjust_stock(id, quantity, true)
    }

    /// Use up `quantity` units. Cannot take more than is on hand.
    pub fn record_consumption(&mut self, id: &str, quantity: u32) -> PortalResult<StockItem> {
        self.adjust_stock(id, quantity, false)
    }

    fn adjust_stock(&mut self, id: &str, quantity: u32, incoming: bool) -> PortalResult<StockItem> {
        self.require(Route::Stock)?;
        if quantity == 0 {
            return Err(RepositoryError::Invalid("quantity must be positive".into()).into());
        }

        let mut before = 0;
        let updated = self
            .stock
            .update(id, |item| {
                before = item.current_quantity;
                item.current_quantity = if incoming {
                    item.current_quantity.checked_add(quantity)
                } else {
                    item.current_quantity.checked_sub(quantity)
                }
                .ok_or_else(|| {
                    RepositoryError::Invalid(format!(
                        "cannot consume {} {}, only {} on hand",
                        quantity, item.unit, item.current_quantity
                    ))
                })?;
                Ok(())
            })?
            .clone();

        let details = if incoming {
            format!("Added {} units to inventory", quantity)
        } else {
            format!("Consumed {} units from inventory", quantity)
        };
        self.record(
            ActionCategory::Stock,
            "Update Stock",
            &updated.name,
            details,
            Some(AuditChanges {
                before: json!({"quantity": before}),
                after: json!({"quantity": updated.current_quantity}),
            }),
        );
        Ok(updated)
    }

    // ========================================================================
    // Lab work
    // ========================================================================

    pub fn lab_jobs(&self, query: &LabJobQuery) -> PortalResult<Vec<&LabJob>> {
        self.require(Route::Lab)?;
        Ok(self.lab_jobs.filter(query))
    }

    /// Outstanding jobs past their expected delivery date.
    pub fn overdue_lab_jobs(&self) -> PortalResult<Vec<&LabJob>> {
        self.require(Route::Lab)?;
        Ok(self
            .lab_jobs
            .list()
            .iter()
            .filter(|job| job.is_overdue(self.today))
            .collect())
    }

    pub fn lab_names(&self) -> PortalResult<Vec<String>> {
        self.require(Route::Lab)?;
        Ok(unique_labs(self.lab_jobs.list()))
    }

    pub fn create_lab_job(&mut self, job: NewLabJob) -> PortalResult<LabJob> {
        self.require(Route::Lab)?;
        let missing = job.missing_fields();
        if !missing.is_empty() {
            let err = RepositoryError::MissingFields(missing);
            self.notify(Notification::error("Could not create lab entry", err.to_string()));
            return Err(err.into());
        }
        simulate_latency(self.config.submit_latency());

        let id = self.lab_jobs.next_id();
        let job = job
            .into_job(id)
            .ok_or_else(|| RepositoryError::MissingFields(vec!["date sent", "expected delivery"]))?;
        let created = self.lab_jobs.insert(job)?.clone();

        self.notify(Notification::success(
            "Lab Entry Created",
            "The new lab work entry has been added successfully.",
        ));
        self.record(
            ActionCategory::Lab,
            "Create Lab Work",
            &created.patient,
            format!("Created new lab work order for {}", created.lab_work_type),
            None,
        );
        Ok(created)
    }

    pub fn update_lab_status(&mut self, id: &str, status: LabStatus) -> PortalResult<LabJob> {
        self.require(Route::Lab)?;
        let mut previous = status;
        let updated = self
            .lab_jobs
            .update(id, |job| {
                previous = job.status;
                job.status = status;
                Ok(())
            })?
            .clone();

        self.record(
            ActionCategory::Lab,
            "Update Lab Work",
            &updated.patient,
            format!("Lab work {} marked {}", updated.id, status.label()),
            Some(AuditChanges {
                before: json!({"status": previous}),
                after: json!({"status": status}),
            }),
        );
        Ok(updated)
    }

    // ========================================================================
    // Reports and dashboard
    // ========================================================================

    pub fn report(&self, period: ReportPeriod) -> PortalResult<ClinicReport> {
        self.require(Route::Reports)?;
        Ok(self.reports.report(self.clinic.active_clinic(), period))
    }

    pub fn dashboard(&self) -> PortalResult<DashboardSummary> {
        let user = self.require(Route::Dashboard)?;
        let clinic = self.clinic.active_clinic();
        Ok(DashboardSummary::build(
            user,
            clinic,
            self.today,
            DashboardSources {
                book: self.book(clinic),
                patients: self.patients.list(),
                stock: self.stock.list(),
                lab_jobs: self.lab_jobs.list(),
            },
        ))
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Settings of the active clinic.
    pub fn settings(&self) -> PortalResult<&ClinicSettings> {
        self.require(Route::Settings)?;
        Ok(self.settings.clinic(self.clinic.active_clinic()))
    }

    fn settings_updated(&mut self) {
        let name = self.clinic.display_name();
        self.notify(Notification::success(
            "Settings Updated",
            format!("{} clinic details have been updated.", name),
        ));
    }

    pub fn update_clinic_details(&mut self, details: ClinicDetails) -> PortalResult<()> {
        self.require(Route::Settings)?;
        let clinic = self.clinic.active_clinic();
        self.settings.update_details(clinic, details)?;
        self.settings_updated();
        self.record(
            ActionCategory::Settings,
            "Update Settings",
            "Clinic Details",
            format!("Updated {} clinic details", clinic.display_name()),
            None,
        );
        Ok(())
    }

    pub fn set_operating_hours(&mut self, day: Weekday, hours: &str) -> PortalResult<()> {
        self.require(Route::Settings)?;
        let clinic = self.clinic.active_clinic();
        let previous = self.settings.set_operating_hours(clinic, day, hours)?;
        let key = weekday_key(day);
        let current = self
            .settings
            .clinic(clinic)
            .details
            .operating_hours
            .for_weekday(day)
            .to_string();

        self.settings_updated();
        self.record(
            ActionCategory::Settings,
            "Update Settings",
            "Clinic Hours",
            "Updated clinic opening hours".into(),
            Some(AuditChanges {
                before: json!({ key: previous }),
                after: json!({ key: current }),
            }),
        );
        Ok(())
    }

    pub fn add_service(
        &mut self,
        name: &str,
        duration_minutes: u32,
        price: u32,
    ) -> PortalResult<ServiceOffering> {
        self.require(Route::Settings)?;
        let clinic = self.clinic.active_clinic();
        let service = self.settings.add_service(clinic, name, duration_minutes, price)?.clone();
        self.notify(Notification::success(
            "Service Added",
            "The new service has been successfully added.",
        ));
        self.record(
            ActionCategory::Settings,
            "Create Service",
            &service.name,
            format!("Added service priced at {}", service.price),
            None,
        );
        Ok(service)
    }

    pub fn add_doctor(
        &mut self,
        name: &str,
        specialization: &str,
        email: &str,
    ) -> PortalResult<DoctorProfile> {
        self.require(Route::Settings)?;
        let clinic = self.clinic.active_clinic();
        let doctor = self.settings.add_doctor(clinic, name, specialization, email)?.clone();
        self.notify(Notification::success(
            "Doctor Added",
            "The new doctor has been successfully added.",
        ));
        self.record(
            ActionCategory::Settings,
            "Create Doctor",
            &doctor.name,
            format!("Added {} doctor", doctor.specialization),
            None,
        );
        Ok(doctor)
    }

    pub fn add_lab(
        &mut self,
        name: &str,
        contact: &str,
        address: &str,
        specialization: &str,
    ) -> PortalResult<DentalLab> {
        self.require(Route::Settings)?;
        let clinic = self.clinic.active_clinic();
        let lab = self.settings.add_lab(clinic, name, contact, address, specialization)?.clone();
        self.notify(Notification::success(
            "Laboratory Added",
            "The new dental laboratory has been successfully added.",
        ));
        self.record(
            ActionCategory::Settings,
            "Create Laboratory",
            &lab.name,
            "Added dental laboratory".into(),
            None,
        );
        Ok(lab)
    }

    pub fn add_lab_work_type(&mut self, name: &str, turnaround: &str) -> PortalResult<LabWorkType> {
        self.require(Route::Settings)?;
        let clinic = self.clinic.active_clinic();
        let work_type = self.settings.add_lab_work_type(clinic, name, turnaround)?.clone();
        self.notify(Notification::success(
            "Lab Work Type Added",
            "The new lab work type has been successfully added.",
        ));
        self.record(
            ActionCategory::Settings,
            "Create Lab Work Type",
            &work_type.name,
            format!("Added lab work type with {} turnaround", work_type.turnaround),
            None,
        );
        Ok(work_type)
    }

    pub fn system_users(&self) -> PortalResult<&[SystemUser]> {
        self.require(Route::Settings)?;
        Ok(self.settings.system_users())
    }

    pub fn add_system_user(
        &mut self,
        name: &str,
        email: &str,
        role: Role,
    ) -> PortalResult<SystemUser> {
        self.require(Route::Settings)?;
        let user = self.settings.add_system_user(name, email, role)?.clone();
        self.notify(Notification::success(
            "User Created",
            "The new user account has been created successfully.",
        ));
        self.record(
            ActionCategory::User,
            "Create User",
            &user.name,
            format!("Created new user with {} role", user.role),
            None,
        );
        Ok(user)
    }

    pub fn set_system_user_active(&mut self, id: u32, active: bool) -> PortalResult<SystemUser> {
        self.require(Route::Settings)?;
        let (previous, user) = self.settings.set_user_active(id, active)?;
        let user = user.clone();
        self.record(
            ActionCategory::User,
            "Update User",
            &user.name,
            if active { "Activated user account" } else { "Deactivated user account" }.into(),
            Some(AuditChanges {
                before: json!({"active": previous}),
                after: json!({"active": active}),
            }),
        );
        Ok(user)
    }
}
