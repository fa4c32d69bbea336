//! Portal integration tests: session, clinic context, feature pages.

use std::time::{Duration, Instant};

use chrono::{NaiveDate, Weekday};
use tempfile::TempDir;

use mudra_clinic_core::appointments::AppointmentFilter;
use mudra_clinic_core::db::{Database, DbError, DbResult, KeyValueStore, MemoryStore};
use mudra_clinic_core::models::{
    ActionCategory, AppointmentRequest, AppointmentStatus, Clinic, ClinicAffiliation, Gender,
    LabStatus, NewLabJob, NewPatient, Reschedule, Role, SlotTime,
};
use mudra_clinic_core::notify::ToastVariant;
use mudra_clinic_core::portal::{Portal, PortalError};
use mudra_clinic_core::reports::ReportPeriod;
use mudra_clinic_core::repository::{
    AuditQuery, LabJobQuery, PatientQuery, PatientTab, RepositoryError, StockFilter,
};
use mudra_clinic_core::routing::Route;
use mudra_clinic_core::session::{CLINIC_KEY, USER_KEY};
use mudra_clinic_core::{AppointmentError, PortalConfig};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn portal() -> Portal<MemoryStore> {
    Portal::open_at(PortalConfig::instant(), MemoryStore::new(), today()).unwrap()
}

fn logged_in(email: &str) -> Portal<MemoryStore> {
    let mut portal = portal();
    portal.login(email, "password").unwrap();
    portal.take_notifications();
    portal
}

fn admin() -> Portal<MemoryStore> {
    logged_in("admin@mudraclinic.com")
}

fn slot(text: &str) -> SlotTime {
    text.parse().unwrap()
}

// ============================================================================
// Session and persistence
// ============================================================================

#[test]
fn test_fresh_portal_lands_on_login() {
    let portal = portal();
    assert!(!portal.is_authenticated());
    assert_eq!(portal.current_route(), Route::Login);
    assert_eq!(portal.active_clinic(), Clinic::Dental);
    assert!(portal.menu().is_empty());
}

#[test]
fn test_login_success() {
    let mut portal = portal();
    let user = portal.login("admin@mudraclinic.com", "password").unwrap();

    assert_eq!(user.role, Role::Admin);
    assert_eq!(portal.current_route(), Route::Dashboard);
    assert!(portal.store().get_item(USER_KEY).unwrap().is_some());

    let toasts = portal.take_notifications();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Login successful");
    assert_eq!(toasts[0].description, "Welcome to Mudra Clinic");
}

#[test]
fn test_login_failure_queues_destructive_toast() {
    let mut portal = portal();
    let err = portal.login("admin@mudraclinic.com", "wrong").unwrap_err();

    assert!(matches!(err, PortalError::Session(_)));
    assert!(!portal.is_authenticated());
    let toast = portal.notifications().last().unwrap();
    assert_eq!(toast.title, "Login failed");
    assert_eq!(toast.description, "Invalid email or password");
    assert_eq!(toast.variant, ToastVariant::Destructive);
}

#[test]
fn test_logout_clears_storage() {
    let mut portal = admin();
    portal.logout().unwrap();

    assert!(!portal.is_authenticated());
    assert_eq!(portal.current_route(), Route::Login);
    assert!(portal.store().get_item(USER_KEY).unwrap().is_none());
}

#[test]
fn test_session_survives_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("portal.db");

    {
        let db = Database::open(&path).unwrap();
        let mut portal = Portal::open_at(PortalConfig::instant(), db, today()).unwrap();
        portal.login("inventory@mudraclinic.com", "password").unwrap();
        portal.set_active_clinic(Clinic::Meditouch).unwrap();
    }

    let db = Database::open(&path).unwrap();
    let portal = Portal::open_at(PortalConfig::instant(), db, today()).unwrap();
    assert_eq!(portal.current_user().unwrap().name, "Rajesh Kumar");
    assert_eq!(portal.active_clinic(), Clinic::Meditouch);
    assert_eq!(portal.current_route(), Route::Dashboard);
}

#[test]
fn test_malformed_storage_reads_as_logged_out() {
    let mut store = MemoryStore::new();
    store.set_item(USER_KEY, "{\"id\": 1").unwrap();
    store.set_item(CLINIC_KEY, "cardiology").unwrap();

    let portal = Portal::open_at(PortalConfig::instant(), store, today()).unwrap();
    assert!(!portal.is_authenticated());
    assert_eq!(portal.active_clinic(), Clinic::Dental);
}

/// Reads as empty and refuses every write.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get_item(&self, _key: &str) -> DbResult<Option<String>> {
        Ok(None)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> DbResult<()> {
        Err(read_only())
    }

    fn remove_item(&mut self, _key: &str) -> DbResult<()> {
        Err(read_only())
    }
}

fn read_only() -> DbError {
    DbError::Json(serde_json::from_str::<u8>("read-only").unwrap_err())
}

#[test]
fn test_login_rolled_back_when_session_cannot_be_saved() {
    let mut portal = Portal::open_at(PortalConfig::instant(), ReadOnlyStore, today()).unwrap();
    let err = portal.login("admin@mudraclinic.com", "password").unwrap_err();

    assert!(matches!(err, PortalError::Storage(_)));
    assert!(!portal.is_authenticated());
    assert!(portal.current_user().is_none());
    assert_eq!(portal.current_route(), Route::Login);

    let toasts = portal.take_notifications();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Login failed");
    assert_eq!(toasts[0].variant, ToastVariant::Destructive);
}

// ============================================================================
// Clinic context and navigation
// ============================================================================

#[test]
fn test_clinic_switch_updates_menu_theme_and_storage() {
    let mut portal = admin();
    let titles = |p: &Portal<MemoryStore>| p.menu().iter().map(|i| i.title).collect::<Vec<_>>();
    assert!(titles(&portal).contains(&"Stock Tracker"));

    portal.set_active_clinic(Clinic::Meditouch).unwrap();
    let menu = titles(&portal);
    assert!(!menu.contains(&"Stock Tracker"));
    assert!(!menu.contains(&"Lab Work"));
    assert_eq!(
        portal.clinic_context().body_classes().collect::<Vec<_>>(),
        vec!["theme-meditouch"]
    );
    assert_eq!(portal.store().get_item(CLINIC_KEY).unwrap().as_deref(), Some("meditouch"));
}

#[test]
fn test_switch_away_from_dental_page_lands_on_dashboard() {
    let mut portal = admin();
    assert_eq!(portal.navigate(Route::Lab), Route::Lab);
    assert_eq!(portal.set_active_clinic(Clinic::Meditouch).unwrap(), Route::Dashboard);
    assert_eq!(portal.current_route(), Route::Dashboard);
}

#[test]
fn test_role_redirects() {
    let mut portal = logged_in("receptionist@mudraclinic.com");
    assert_eq!(portal.navigate_path("/settings"), Route::Unauthorized);
    assert_eq!(portal.navigate_path("/lab"), Route::Lab);
    assert_eq!(portal.navigate_path("/no-such-page"), Route::NotFound);
}

// ============================================================================
// Appointments
// ============================================================================

fn booking(patient: &str, time: &str) -> AppointmentRequest {
    AppointmentRequest {
        patient: patient.into(),
        service: "Dental Checkup".into(),
        time: time.into(),
        date: Some(today()),
        doctor: Some("Dr. Khanna".into()),
        ..Default::default()
    }
}

#[test]
fn test_create_appointment_scenario() {
    let mut portal = admin();
    let before = portal.appointments().len();

    let created = portal.create_appointment(booking("Test Patient", "10:00 AM")).unwrap();
    assert_eq!(created.status, AppointmentStatus::Confirmed);
    assert_eq!(created.patient, "Test Patient");
    assert_eq!(created.service, "Dental Checkup");
    assert_eq!(created.time, slot("10:00 AM"));
    assert_eq!(created.date, today());
    assert_eq!(created.doctor.as_deref(), Some("Dr. Khanna"));
    assert_eq!(portal.appointments().len(), before + 1);
    assert_eq!(portal.current_route(), Route::Appointments);

    let toast = portal.take_notifications().pop().unwrap();
    assert_eq!(toast.title, "Appointment scheduled");
    assert_eq!(
        toast.description,
        "Test Patient's appointment has been scheduled for October 17, 2026 at 10:00 AM"
    );

    assert!(portal.available_slots(today()).unwrap().contains(&slot("10:00 AM")));
    portal.create_appointment(booking("Second Patient", "10:00 AM")).unwrap();
    assert!(!portal.available_slots(today()).unwrap().contains(&slot("10:00 AM")));

    let err = portal.create_appointment(booking("Third Patient", "10:00 AM")).unwrap_err();
    assert!(matches!(err, PortalError::Appointment(AppointmentError::SlotFull { .. })));
}

#[test]
fn test_missing_field_leaves_book_unchanged() {
    let mut portal = admin();
    let before = portal.appointments().len();

    let err = portal.create_appointment(booking("  ", "10:00 AM")).unwrap_err();
    assert!(matches!(
        err,
        PortalError::Appointment(AppointmentError::MissingFields(ref fields))
            if fields == &vec!["patient"]
    ));
    assert_eq!(portal.appointments().len(), before);
    assert!(portal.notifications().last().unwrap().is_destructive());
}

#[test]
fn test_invalid_booking_is_rejected_without_submit_delay() {
    let mut config = PortalConfig::instant();
    config.submit_latency_ms = 5_000;
    let mut portal = Portal::open_at(config, MemoryStore::new(), today()).unwrap();
    portal.login("receptionist@mudraclinic.com", "password").unwrap();

    let started = Instant::now();
    assert!(portal.create_appointment(booking("", "10:00 AM")).is_err());
    assert!(portal.create_appointment(booking("Ravi Kumar", "25:00 PM")).is_err());
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_meditouch_capacity_is_one_and_drops_doctor() {
    let mut portal = admin();
    portal.set_active_clinic(Clinic::Meditouch).unwrap();

    let mut request = booking("Kiran Rao", "11:00 AM");
    request.service = "Facial".into();
    request.second_patient = Some("Guest".into());
    let created = portal.create_appointment(request.clone()).unwrap();
    assert!(created.doctor.is_none());
    assert!(created.second_patient.is_none());

    request.patient = "Another".into();
    assert!(portal.create_appointment(request).is_err());
}

#[test]
fn test_cancel_hides_from_views() {
    let mut portal = admin();
    let filter = AppointmentFilter::default();
    let id = portal.appointments().all()[0].id.clone();
    let length = portal.appointments().len();
    let visible = portal.daily_view(today(), &filter).unwrap().total();
    let weekly = portal.weekly_view(today(), &filter).unwrap().total();
    let monthly = portal.monthly_view(today(), &filter).unwrap().total();

    let cancelled = portal.cancel_appointment(&id).unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert_eq!(portal.appointments().len(), length);
    assert_eq!(portal.daily_view(today(), &filter).unwrap().total(), visible - 1);
    assert_eq!(portal.weekly_view(today(), &filter).unwrap().total(), weekly - 1);
    assert_eq!(portal.monthly_view(today(), &filter).unwrap().total(), monthly - 1);
}

#[test]
fn test_reschedule_preserves_identity() {
    let mut portal = admin();
    let original = portal.appointments().all()[1].clone();
    let tomorrow = today().succ_opt().unwrap();

    let moved = portal
        .reschedule_appointment(
            &original.id,
            Reschedule {
                time: slot("11:00 AM"),
                date: tomorrow,
                service: "Teeth Cleaning".into(),
                doctor: Some("Dr. Sharma".into()),
            },
        )
        .unwrap();

    assert_eq!(moved.id, original.id);
    assert_eq!(moved.patient, original.patient);
    assert_eq!(moved.status, original.status);
    assert_eq!(moved.date, tomorrow);
    assert_eq!(moved.service, "Teeth Cleaning");
    assert_eq!(moved.doctor.as_deref(), Some("Dr. Sharma"));

    let entry = portal
        .audit_log(
            &AuditQuery {
                category: Some(ActionCategory::Appointment),
                ..Default::default()
            },
            1,
        )
        .unwrap();
    assert_eq!(entry.total_items, 3);
}

#[test]
fn test_daily_view_session_split() {
    let portal = admin();
    let view = portal.daily_view(today(), &AppointmentFilter::default()).unwrap();
    let morning: Vec<_> = view.morning.iter().map(|a| a.patient.as_str()).collect();
    let afternoon: Vec<_> = view.afternoon.iter().map(|a| a.patient.as_str()).collect();
    assert_eq!(morning, vec!["Aarav Sharma", "Priya Patel", "Arjun Singh", "Rohan Gupta"]);
    assert_eq!(afternoon, vec!["Sanjay Patel"]);
}

#[test]
fn test_views_require_login() {
    let portal = portal();
    let result = portal.daily_view(today(), &AppointmentFilter::default());
    assert!(matches!(result, Err(PortalError::NotAuthenticated)));
}

// ============================================================================
// Patients, stock, lab work
// ============================================================================

#[test]
fn test_patient_tabs_and_add() {
    let mut portal = admin();
    let dental = portal.patients(&PatientQuery::new(PatientTab::All, Clinic::Dental)).unwrap();
    assert_eq!(dental.len(), 6);

    let created = portal
        .add_patient(NewPatient {
            name: "Kavya Iyer".into(),
            gender: Gender::Female,
            age: 27,
            email: None,
            phone: "+91 99887 76655".into(),
            address: "12 Marine Drive, Mumbai".into(),
            clinic: ClinicAffiliation::Meditouch,
        })
        .unwrap();
    assert_eq!(created.id, "PT009");

    let meditouch = portal
        .patients(&PatientQuery::new(PatientTab::Meditouch, Clinic::Dental).search("kavya"))
        .unwrap();
    assert_eq!(meditouch.len(), 1);

    let err = portal
        .add_patient(NewPatient {
            name: "No Phone".into(),
            gender: Gender::Male,
            age: 40,
            email: None,
            phone: String::new(),
            address: String::new(),
            clinic: ClinicAffiliation::Dental,
        })
        .unwrap_err();
    assert!(matches!(err, PortalError::Repository(RepositoryError::MissingFields(_))));
}

#[test]
fn test_stock_filters_and_summary() {
    let portal = logged_in("inventory@mudraclinic.com");
    let summary = portal.stock_summary().unwrap();
    assert_eq!(summary.total_items, 7);
    assert_eq!(summary.low_stock, 3);
    assert_eq!(summary.expiring, 4);

    let search = portal.stock_query(StockFilter::All).search("benzocaine");
    let found = portal.stock_items(&search).unwrap();
    assert_eq!(found[0].name, "Topical Anesthetic");
}

#[test]
fn test_stock_movements() {
    let mut portal = logged_in("inventory@mudraclinic.com");

    let item = portal.record_incoming("1", 25).unwrap();
    assert_eq!(item.current_quantity, 27);

    let err = portal.record_consumption("3", 10).unwrap_err();
    assert!(matches!(err, PortalError::Repository(RepositoryError::Invalid(_))));

    let item = portal.record_consumption("3", 4).unwrap();
    assert_eq!(item.current_quantity, 0);
}

#[test]
fn test_remove_stock_item() {
    let mut portal = logged_in("inventory@mudraclinic.com");
    let removed = portal.remove_stock_item("7").unwrap();

    assert_eq!(portal.stock_summary().unwrap().total_items, 6);
    let toast = portal.take_notifications().pop().unwrap();
    assert_eq!(toast.title, "Stock Item Removed");
    assert_eq!(toast.description, format!("{} has been removed from inventory.", removed.name));
    assert!(matches!(
        portal.remove_stock_item("7"),
        Err(PortalError::Repository(RepositoryError::NotFound { .. }))
    ));

    let mut admin = admin();
    admin.remove_stock_item("1").unwrap();
    let stock = AuditQuery {
        category: Some(ActionCategory::Stock),
        ..Default::default()
    };
    let page = admin.audit_log(&stock, 1).unwrap();
    let latest = page.items.last().unwrap();
    assert_eq!(latest.action_type, "Delete Stock Item");
    assert_eq!(latest.user_role, Role::Admin);
}

#[test]
fn test_stock_access_rules() {
    let doctor = logged_in("doctor@mudraclinic.com");
    let query = doctor.stock_query(StockFilter::All);
    assert!(matches!(
        doctor.stock_items(&query),
        Err(PortalError::Forbidden { route: Route::Stock })
    ));

    let mut admin = admin();
    admin.set_active_clinic(Clinic::Meditouch).unwrap();
    assert!(matches!(admin.stock_summary(), Err(PortalError::Forbidden { .. })));
}

#[test]
fn test_lab_work_flow() {
    let mut portal = logged_in("doctor@mudraclinic.com");
    assert_eq!(portal.lab_names().unwrap().len(), 4);

    let created = portal
        .create_lab_job(NewLabJob {
            patient: "Arjun Nair".into(),
            service: "Crown Placement".into(),
            lab_work_type: "PFM Crown".into(),
            assigned_lab: "Precision Dental Lab".into(),
            date_sent: Some(today()),
            expected_delivery: today().checked_add_days(chrono::Days::new(10)),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(created.id, "LJ007");
    assert_eq!(created.status, LabStatus::Pending);
    assert_eq!(portal.take_notifications().pop().unwrap().title, "Lab Entry Created");

    portal.update_lab_status("LJ007", LabStatus::Sent).unwrap();
    let sent = portal
        .lab_jobs(&LabJobQuery { status: Some(LabStatus::Sent), ..Default::default() })
        .unwrap();
    assert_eq!(sent.len(), 2);

    let err = portal.create_lab_job(NewLabJob::default()).unwrap_err();
    assert!(matches!(err, PortalError::Repository(RepositoryError::MissingFields(_))));
}

#[test]
fn test_overdue_lab_jobs() {
    let portal = logged_in("doctor@mudraclinic.com");
    let overdue = portal.overdue_lab_jobs().unwrap();

    assert_eq!(overdue.len(), 5);
    assert!(overdue.iter().all(|job| job.status != LabStatus::Delivered));
    assert!(!overdue.iter().any(|job| job.id == "LJ006"));

    let inventory = logged_in("inventory@mudraclinic.com");
    assert!(inventory.overdue_lab_jobs().is_err());
}

// ============================================================================
// Audit, reports, settings, dashboard
// ============================================================================

#[test]
fn test_audit_pagination_and_filters() {
    let portal = admin();
    let first = portal.audit_log(&AuditQuery::default(), 1).unwrap();
    assert_eq!(first.total_items, 11);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.items.len(), 5);
    assert_eq!(first.items[0].id, "AUD001");

    let last = portal.audit_log(&AuditQuery::default(), 3).unwrap();
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].action_type, "Login Success");

    let auth = AuditQuery {
        category: Some(ActionCategory::Auth),
        ..Default::default()
    };
    assert_eq!(portal.audit_log(&auth, 1).unwrap().total_items, 3);

    let search = AuditQuery {
        search: Some("expired".into()),
        ..Default::default()
    };
    assert_eq!(portal.audit_log(&search, 1).unwrap().items[0].id, "AUD009");

    assert!(portal.audit_users().unwrap().contains(&"Lakshmi Menon".to_string()));
}

#[test]
fn test_admin_only_pages() {
    let receptionist = logged_in("receptionist@mudraclinic.com");
    assert!(matches!(
        receptionist.audit_log(&AuditQuery::default(), 1),
        Err(PortalError::Forbidden { route: Route::Audit })
    ));
    assert!(receptionist.report(ReportPeriod::Year).is_err());
    assert!(receptionist.settings().is_err());
}

#[test]
fn test_report_follows_active_clinic() {
    let mut portal = admin();
    portal.set_active_clinic(Clinic::Meditouch).unwrap();
    let report = portal.report(ReportPeriod::Quarter).unwrap();
    assert_eq!(report.clinic, Clinic::Meditouch);
    assert_eq!(report.appointments.len(), 3);
    assert_eq!(report.metrics.revenue, "₹3.5L");
}

#[test]
fn test_operating_hours_update_is_audited() {
    let mut portal = admin();
    portal.set_operating_hours(Weekday::Sun, "10:00 AM - 2:00 PM").unwrap();

    let toast = portal.take_notifications().pop().unwrap();
    assert_eq!(toast.title, "Settings Updated");
    assert_eq!(toast.description, "Dental Metrix clinic details have been updated.");

    let settings = AuditQuery {
        category: Some(ActionCategory::Settings),
        ..Default::default()
    };
    let page = portal.audit_log(&settings, 1).unwrap();
    let latest = page.items.last().unwrap();
    let changes = latest.changes.as_ref().unwrap();
    assert_eq!(changes.before["sunday"], "Closed");
    assert_eq!(changes.after["sunday"], "10:00 AM - 2:00 PM");
}

#[test]
fn test_dashboard_for_admin() {
    let portal = admin();
    let dashboard = portal.dashboard().unwrap();
    let stats = dashboard.stats.unwrap();
    assert_eq!(stats.todays_appointments, 5);
    assert_eq!(stats.stock_alerts, Some(3));
    assert_eq!(dashboard.upcoming.len(), 3);
    assert!(dashboard.greeting.starts_with("Welcome back, Dr. Khanna!"));
}

#[test]
fn test_user_activation_audit_records_previous_flag() {
    let mut portal = admin();
    let users = AuditQuery {
        category: Some(ActionCategory::User),
        ..Default::default()
    };

    let user = portal.set_system_user_active(1, true).unwrap();
    assert!(user.active);
    let page = portal.audit_log(&users, 1).unwrap();
    let changes = page.items.last().unwrap().changes.clone().unwrap();
    assert_eq!(changes.before["active"], true);
    assert_eq!(changes.after["active"], true);

    portal.set_system_user_active(5, true).unwrap();
    let page = portal.audit_log(&users, 1).unwrap();
    let latest = page.items.last().unwrap();
    assert_eq!(latest.details, "Activated user account");
    let changes = latest.changes.as_ref().unwrap();
    assert_eq!(changes.before["active"], false);
    assert_eq!(changes.after["active"], true);
}
