//! Demo data loaded into a fresh portal.
//!
//! Appointments are dated on the day the portal opens; everything else
//! carries fixed dates.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::json;

use crate::models::{
    ActionCategory, Appointment, AppointmentStatus, AuditChanges, AuditLogEntry, Clinic,
    ClinicAffiliation, ClinicDetails, ClinicSettings, DentalLab, DoctorProfile, Gender,
    KeyMetrics, LabJob, LabStatus, LabWorkType, MonthlyFigure, OperatingHours, Patient, Role,
    ServiceOffering, ServiceShare, SlotTime, StockItem, SystemUser,
};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn slot(hour: u32, minute: u32) -> SlotTime {
    SlotTime::from_hm(hour, minute).unwrap_or_default()
}

// ============================================================================
// Appointments
// ============================================================================

/// Today's bookings for `clinic`.
pub fn appointments(clinic: Clinic, today: NaiveDate) -> Vec<Appointment> {
    type Row = (u32, u32, &'static str, &'static str, AppointmentStatus, Option<&'static str>);
    use AppointmentStatus::*;

    let rows: &[Row] = match clinic {
        Clinic::Dental => &[
            (9, 0, "Aarav Sharma", "Dental Checkup", Confirmed, None),
            (9, 15, "Priya Patel", "Root Canal", Confirmed, None),
            (10, 30, "Arjun Singh", "Teeth Cleaning", Confirmed, Some("Neha Singh")),
            (11, 45, "Rohan Gupta", "Crown Fitting", Arrived, None),
            (14, 0, "Ishaan Desai", "Dental Filling", Cancelled, None),
            (15, 30, "Sanjay Patel", "Denture Adjustment", Confirmed, None),
        ],
        Clinic::Meditouch => &[
            (9, 15, "Meera Joshi", "Skin Consultation", Confirmed, None),
            (10, 0, "Ravi Kumar", "Hair Treatment", Arrived, None),
            (12, 45, "Vikram Mehta", "Hair Treatment", Confirmed, None),
            (14, 30, "Neha Kapoor", "Facial", Cancelled, None),
            (15, 30, "Aisha Khan", "Facial", Confirmed, None),
        ],
    };

    rows.iter()
        .map(|&(hour, minute, patient, service, status, second)| {
            let mut appointment =
                Appointment::new(clinic, patient.into(), service.into(), slot(hour, minute), today);
            appointment.status = status;
            if clinic.tracks_doctors() {
                appointment.doctor = Some("Dr. Khanna".into());
                appointment.second_patient = second.map(Into::into);
            }
            appointment
        })
        .collect()
}

// ============================================================================
// Patients
// ============================================================================

#[rustfmt::skip]
pub fn patients() -> Vec<Patient> {
    use ClinicAffiliation::*;
    use Gender::*;

    let rows = [
        ("PT001", "Aarav Sharma", Male, 34, Some("aarav.sharma@example.com"), "+91 98765 43210", "123 Modi Street, Mumbai", Both, ymd(2023, 10, 15)),
        ("PT002", "Priya Patel", Female, 28, Some("priya.patel@example.com"), "+91 87654 32109", "456 Gandhi Road, Delhi", Meditouch, ymd(2023, 10, 12)),
        ("PT003", "Vikram Singh", Male, 45, None, "+91 76543 21098", "789 Nehru Avenue, Chennai", Dental, ymd(2023, 10, 8)),
        ("PT004", "Neha Kapoor", Female, 31, Some("neha.kapoor@example.com"), "+91 65432 10987", "234 Tagore Lane, Bangalore", Dental, ymd(2023, 9, 30)),
        ("PT005", "Rajiv Malhotra", Male, 52, Some("rajiv.malhotra@example.com"), "+91 54321 09876", "567 Bose Street, Hyderabad", Both, ymd(2023, 10, 2)),
        ("PT006", "Ananya Reddy", Female, 25, Some("ananya.reddy@example.com"), "+91 43210 98765", "890 Raman Road, Pune", Meditouch, ymd(2023, 10, 10)),
        ("PT007", "Arjun Nair", Male, 38, None, "+91 32109 87654", "123 Krishnan Street, Kochi", Dental, ymd(2023, 9, 25)),
        ("PT008", "Divya Menon", Female, 29, Some("divya.menon@example.com"), "+91 21098 76543", "456 Patel Road, Ahmedabad", Both, ymd(2023, 10, 5)),
    ];

    rows.into_iter()
        .map(|(id, name, gender, age, email, phone, address, clinic, last_visit)| Patient {
            id: id.into(),
            name: name.into(),
            gender,
            age,
            email: email.map(Into::into),
            phone: phone.into(),
            address: address.into(),
            clinic,
            last_visit: Some(last_visit),
        })
        .collect()
}

// ============================================================================
// Stock
// ============================================================================

#[rustfmt::skip]
pub fn stock_items() -> Vec<StockItem> {
    let rows = [
        ("Dental Composite", "A2 Shade - Universal", "syringe", 2, 5, Some(ymd(2025, 8, 15))),
        ("Impression Material", "Alginate - Medium Set", "pack", 3, 5, Some(ymd(2025, 6, 30))),
        ("Orthodontic Wire", "0.016 inch - NiTi", "spool", 4, 6, None),
        ("Dental Cement", "Glass Ionomer - Light Cure", "bottle", 8, 4, Some(ymd(2025, 4, 25))),
        ("Dental Burs", "Diamond - Assorted", "pack", 12, 5, None),
        ("Topical Anesthetic", "Benzocaine 20%", "jar", 6, 3, Some(ymd(2024, 9, 10))),
        ("Face Masks", "Surgical - Level 3", "box", 15, 5, None),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (name, description, unit, quantity, threshold, expiry))| StockItem {
            id: (i + 1).to_string(),
            name: name.into(),
            description: description.into(),
            unit: unit.into(),
            current_quantity: quantity,
            minimum_threshold: threshold,
            nearest_expiry_date: expiry,
        })
        .collect()
}

// ============================================================================
// Lab work
// ============================================================================

#[rustfmt::skip]
pub fn lab_jobs() -> Vec<LabJob> {
    use LabStatus::*;

    let rows = [
        ("LJ001", "Aarav Sharma", "Crown Placement", "PFM Crown", ymd(2023, 10, 15), "Precision Dental Lab", ymd(2023, 10, 25), InProgress),
        ("LJ002", "Priya Patel", "Complete Denture", "Acrylic Denture", ymd(2023, 10, 16), "Nova Dental Solutions", ymd(2023, 10, 30), Pending),
        ("LJ003", "Vikram Singh", "Bridge Procedure", "Ceramic Bridge", ymd(2023, 10, 10), "Dent Creations India", ymd(2023, 10, 20), Sent),
        ("LJ004", "Neha Kapoor", "Removable Partial", "Cast Partial Framework", ymd(2023, 9, 28), "Precision Dental Lab", ymd(2023, 10, 18), Ready),
        ("LJ005", "Rajiv Malhotra", "Implant Restoration", "Custom Abutment", ymd(2023, 10, 3), "Implant Specialists", ymd(2023, 10, 10), Issue),
        ("LJ006", "Ananya Reddy", "Nightguard", "Hard Acrylic Splint", ymd(2023, 10, 12), "Nova Dental Solutions", ymd(2023, 10, 22), Delivered),
    ];

    rows.into_iter()
        .map(|(id, patient, service, work_type, sent, lab, expected, status)| LabJob {
            id: id.into(),
            patient: patient.into(),
            service: service.into(),
            lab_work_type: work_type.into(),
            date_sent: sent,
            assigned_lab: lab.into(),
            expected_delivery: expected,
            status,
        })
        .collect()
}

// ============================================================================
// Audit log
// ============================================================================

#[rustfmt::skip]
pub fn audit_log() -> Vec<AuditLogEntry> {
    use ActionCategory as C;

    let at = |h, m, s| {
        NaiveDateTime::new(
            ymd(2023, 10, 15),
            NaiveTime::from_hms_opt(h, m, s).unwrap_or_default(),
        )
    };
    let changes = |before, after| Some(AuditChanges { before, after });

    let rows = [
        (at(9, 32, 15), "Dr. Rajan Khanna", Role::Admin, C::Auth, "Login Success", "System", "Successful login from 192.168.1.105", None),
        (at(10, 15, 20), "Dr. Rajan Khanna", Role::Admin, C::Appointment, "Create Appointment", "Aarav Sharma", "Created new appointment for dental checkup", None),
        (
            at(11, 20, 35), "Lakshmi Menon", Role::Receptionist, C::Appointment, "Reschedule Appointment", "Priya Patel",
            "Rescheduled appointment from 16 Oct to 18 Oct",
            changes(json!({"date": "2023-10-16", "time": "10:00 AM"}), json!({"date": "2023-10-18", "time": "11:30 AM"})),
        ),
        (
            at(12, 5, 40), "Rajesh Sharma", Role::Inventory, C::Stock, "Update Stock", "Dental Composite",
            "Added 25 units to inventory",
            changes(json!({"quantity": 15}), json!({"quantity": 40})),
        ),
        (at(13, 45, 10), "Dr. Priya Desai", Role::Doctor, C::Lab, "Create Lab Work", "Vikram Singh", "Created new lab work order for PFM Crown", None),
        (at(14, 30, 25), "Dr. Rajan Khanna", Role::Admin, C::Patient, "Create Patient", "Divya Menon", "Added new patient record", None),
        (at(15, 20, 55), "Dr. Rajan Khanna", Role::Admin, C::User, "Create User", "Arjun Kumar", "Created new user with Inventory Manager role", None),
        (
            at(16, 45, 30), "Dr. Rajan Khanna", Role::Admin, C::Settings, "Update Settings", "Clinic Hours",
            "Updated clinic opening hours",
            changes(json!({"sunday": "Closed"}), json!({"sunday": "10:00 AM - 2:00 PM"})),
        ),
        (at(17, 30, 15), "Rajesh Sharma", Role::Inventory, C::Stock, "Delete Stock Item", "Expired Anesthetic", "Removed expired stock", None),
        (at(18, 0, 40), "Lakshmi Menon", Role::Receptionist, C::Auth, "Logout", "System", "User logged out", None),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (timestamp, user, role, category, action, target, details, changes))| {
            AuditLogEntry {
                id: format!("AUD{:03}", i + 1),
                timestamp,
                user: user.into(),
                user_role: role,
                category,
                action_type: action.into(),
                target_entity: target.into(),
                details: details.into(),
                changes,
            }
        })
        .collect()
}

// ============================================================================
// Settings
// ============================================================================

pub fn clinic_settings(clinic: Clinic) -> ClinicSettings {
    match clinic {
        Clinic::Dental => ClinicSettings {
            details: ClinicDetails {
                name: "Dental Metrix Clinic".into(),
                address: "123 Healthcare Avenue, Mumbai, Maharashtra 400001".into(),
                phone: "+91 22 4567 8901".into(),
                email: "contact@dentalmetrix.com".into(),
                operating_hours: OperatingHours::weekly("9:00 AM - 6:00 PM", "10:00 AM - 4:00 PM"),
            },
            services: services(&[
                ("General Checkup", 30, 500),
                ("Teeth Cleaning", 45, 1000),
                ("Root Canal Treatment", 60, 5000),
                ("Dental Filling", 30, 1500),
                ("Crown Placement", 60, 8000),
                ("Teeth Whitening", 45, 4000),
            ]),
            doctors: dental_doctors(),
            labs: dental_labs(),
            lab_work_types: lab_work_types(),
        },
        Clinic::Meditouch => ClinicSettings {
            details: ClinicDetails {
                name: "Meditouch Clinic".into(),
                address: "456 Wellness Road, Mumbai, Maharashtra 400001".into(),
                phone: "+91 22 9876 5432".into(),
                email: "care@meditouchclinic.com".into(),
                operating_hours: OperatingHours::weekly("10:00 AM - 7:00 PM", "10:00 AM - 5:00 PM"),
            },
            services: services(&[
                ("Skin Consultation", 30, 800),
                ("Hair Loss Treatment", 45, 1500),
                ("Facial", 60, 2000),
                ("Dermatology Consultation", 30, 1000),
                ("Hair Transplant Consultation", 45, 1200),
                ("Acne Treatment", 30, 1800),
            ]),
            doctors: Vec::new(),
            labs: Vec::new(),
            lab_work_types: Vec::new(),
        },
    }
}

fn services(rows: &[(&str, u32, u32)]) -> Vec<ServiceOffering> {
    rows.iter()
        .zip(1..)
        .map(|(&(name, duration_minutes, price), id)| ServiceOffering {
            id,
            name: name.into(),
            duration_minutes,
            price,
        })
        .collect()
}

fn dental_doctors() -> Vec<DoctorProfile> {
    [
        ("Dr. Rajan Khanna", "General Dentistry", "rajan.khanna@dentalmetrix.com"),
        ("Dr. Priya Desai", "Orthodontics", "priya.desai@dentalmetrix.com"),
        ("Dr. Vikram Mehta", "Endodontics", "vikram.mehta@dentalmetrix.com"),
        ("Dr. Ananya Sharma", "Pediatric Dentistry", "ananya.sharma@dentalmetrix.com"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, specialization, email), id)| DoctorProfile {
        id,
        name: name.into(),
        specialization: specialization.into(),
        email: email.into(),
    })
    .collect()
}

fn dental_labs() -> Vec<DentalLab> {
    [
        ("Precision Dental Lab", "+91 98765 43210", "Mumbai", "Crowns & Bridges"),
        ("Nova Dental Solutions", "+91 87654 32109", "Delhi", "Dentures"),
        ("Dent Creations India", "+91 76543 21098", "Bangalore", "Implants"),
        ("Implant Specialists", "+91 65432 10987", "Chennai", "Custom Abutments"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, contact, address, specialization), id)| DentalLab {
        id,
        name: name.into(),
        contact: contact.into(),
        address: address.into(),
        specialization: specialization.into(),
    })
    .collect()
}

fn lab_work_types() -> Vec<LabWorkType> {
    [
        ("PFM Crown", "7-10 days"),
        ("Ceramic Bridge", "8-12 days"),
        ("Acrylic Denture", "10-14 days"),
        ("Cast Partial Framework", "12-15 days"),
        ("Custom Abutment", "5-7 days"),
        ("Hard Acrylic Splint", "3-5 days"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, turnaround), id)| LabWorkType {
        id,
        name: name.into(),
        turnaround: turnaround.into(),
    })
    .collect()
}

/// Portal staff accounts shown on the settings page.
pub fn system_users() -> Vec<SystemUser> {
    [
        ("Dr. Rajan Khanna", "rajan.khanna", Role::Admin, true),
        ("Lakshmi Menon", "lakshmi.menon", Role::Receptionist, true),
        ("Dr. Priya Desai", "priya.desai", Role::Doctor, true),
        ("Rajesh Sharma", "rajesh.sharma", Role::Inventory, true),
        ("Arjun Kumar", "arjun.kumar", Role::Doctor, false),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, login, role, active), id)| SystemUser {
        id,
        name: name.into(),
        email: format!("{login}@mudraclinic.com"),
        role,
        active,
    })
    .collect()
}

// ============================================================================
// Reports
// ============================================================================

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn monthly(values: [(u64, u64); 12]) -> Vec<MonthlyFigure> {
    MONTHS
        .iter()
        .zip(values)
        .map(|(month, (dental, meditouch))| MonthlyFigure {
            month: (*month).into(),
            dental,
            meditouch,
        })
        .collect()
}

pub fn monthly_appointments() -> Vec<MonthlyFigure> {
    monthly([
        (65, 48),
        (72, 56),
        (80, 62),
        (75, 58),
        (85, 65),
        (90, 70),
        (100, 75),
        (95, 68),
        (105, 80),
        (110, 85),
        (120, 90),
        (130, 95),
    ])
}

pub fn monthly_revenue() -> Vec<MonthlyFigure> {
    monthly([
        (120_000, 90_000),
        (135_000, 98_000),
        (145_000, 105_000),
        (140_000, 100_000),
        (155_000, 110_000),
        (160_000, 115_000),
        (175_000, 120_000),
        (170_000, 118_000),
        (180_000, 125_000),
        (185_000, 130_000),
        (195_000, 135_000),
        (210_000, 145_000),
    ])
}

pub fn service_distribution(clinic: Clinic) -> Vec<ServiceShare> {
    let rows: &[(&str, u32)] = match clinic {
        Clinic::Dental => &[
            ("Regular Checkup", 35),
            ("Cleaning", 25),
            ("Fillings", 15),
            ("Root Canal", 10),
            ("Crowns", 8),
            ("Dentures", 7),
        ],
        Clinic::Meditouch => &[
            ("Hair Treatment", 40),
            ("Skin Consultation", 30),
            ("Facial", 15),
            ("Dermatology", 10),
            ("Other", 5),
        ],
    };
    rows.iter()
        .map(|&(name, value)| ServiceShare {
            name: name.into(),
            value,
        })
        .collect()
}

pub fn key_metrics(clinic: Clinic) -> KeyMetrics {
    match clinic {
        Clinic::Dental => KeyMetrics {
            total_patients: 1842,
            new_patients: 68,
            new_patients_change: 12,
            appointments: 342,
            appointments_change: 8,
            revenue: "₹4.2L".into(),
            revenue_change: 15,
            avg_booking: "₹1,250".into(),
            avg_booking_change: 5,
        },
        Clinic::Meditouch => KeyMetrics {
            total_patients: 1356,
            new_patients: 52,
            new_patients_change: 9,
            appointments: 245,
            appointments_change: -3,
            revenue: "₹3.5L".into(),
            revenue_change: 10,
            avg_booking: "₹1,450".into(),
            avg_booking_change: 12,
        },
    }
}
