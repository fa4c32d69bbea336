//! Appointment state manager.
//!
//! One [`AppointmentBook`] per clinic holds every appointment ever booked
//! there. Cancellation is a soft delete: the record keeps its place in the
//! book with status `cancelled`, frees its slot, and drops out of every view.
//! The slot capacity of the clinic (2 dental, 1 meditouch) is enforced on
//! create and on reschedule.

mod slots;
mod views;

pub use slots::*;
pub use views::*;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{
    Appointment, AppointmentRequest, AppointmentStatus, Clinic, Reschedule, SlotTime,
};

/// Appointment errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppointmentError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("{0} is not a bookable slot")]
    OutsideSchedule(SlotTime),

    #[error("The {time} slot on {date} is fully booked")]
    SlotFull { time: SlotTime, date: NaiveDate },

    #[error("Appointment not found: {0}")]
    NotFound(String),
}

pub type AppointmentResult<T> = Result<T, AppointmentError>;

/// All appointments of one clinic.
#[derive(Debug, Clone)]
pub struct AppointmentBook {
    clinic: Clinic,
    schedule: SlotSchedule,
    appointments: Vec<Appointment>,
}

impl AppointmentBook {
    /// Create an empty book.
    pub fn new(clinic: Clinic, schedule: SlotSchedule) -> Self {
        Self {
            clinic,
            schedule,
            appointments: Vec::new(),
        }
    }

    /// Create a book holding existing appointments (seed data).
    pub fn with_appointments(
        clinic: Clinic,
        schedule: SlotSchedule,
        appointments: Vec<Appointment>,
    ) -> Self {
        Self {
            clinic,
            schedule,
            appointments,
        }
    }

    pub fn clinic(&self) -> Clinic {
        self.clinic
    }

    pub fn schedule(&self) -> &SlotSchedule {
        &self.schedule
    }

    /// Every appointment, cancelled ones included, in booking order.
    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// Appointments that are not cancelled.
    pub fn active(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter().filter(|a| a.is_active())
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    fn get_mut(&mut self, id: &str) -> AppointmentResult<&mut Appointment> {
        self.appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppointmentError::NotFound(id.to_string()))
    }

    /// Run every check `create` makes without booking anything.
    pub fn check(&self, request: &AppointmentRequest) -> AppointmentResult<()> {
        self.validate(request).map(|_| ())
    }

    fn validate(&self, request: &AppointmentRequest) -> AppointmentResult<(SlotTime, NaiveDate)> {
        let missing = missing_fields(request);
        if !missing.is_empty() {
            warn!(clinic = %self.clinic, ?missing, "Rejected appointment with missing fields");
            return Err(AppointmentError::MissingFields(missing));
        }

        let time: SlotTime = request
            .time
            .parse()
            .map_err(|_| AppointmentError::InvalidTime(request.time.clone()))?;
        let date = request
            .date
            .ok_or(AppointmentError::MissingFields(vec!["date"]))?;
        self.ensure_bookable(date, time, None)?;
        Ok((time, date))
    }

    /// Book a new appointment from form input.
    ///
    /// Patient, service, time and date are required. Doctor and second
    /// patient are only kept for clinics that track doctors.
    pub fn create(&mut self, request: AppointmentRequest) -> AppointmentResult<&Appointment> {
        let (time, date) = self.validate(&request)?;

        let mut appointment = Appointment::new(
            self.clinic,
            request.patient.trim().to_string(),
            request.service.trim().to_string(),
            time,
            date,
        );
        if self.clinic.tracks_doctors() {
            appointment.doctor = non_blank(request.doctor);
            appointment.second_patient = non_blank(request.second_patient);
        }
        appointment.notes = non_blank(request.notes);

        info!(
            clinic = %self.clinic,
            id = %appointment.id,
            %time,
            %date,
            "Appointment created"
        );
        self.appointments.push(appointment);
        Ok(&self.appointments[self.appointments.len() - 1])
    }

    /// Move an appointment to a new time, date, service and doctor.
    ///
    /// Id, patient and status are preserved.
    pub fn reschedule(&mut self, id: &str, change: Reschedule) -> AppointmentResult<&Appointment> {
        if change.service.trim().is_empty() {
            return Err(AppointmentError::MissingFields(vec!["service"]));
        }

        let active = self
            .get(id)
            .map(|a| a.is_active())
            .ok_or_else(|| AppointmentError::NotFound(id.to_string()))?;
        if active {
            self.ensure_bookable(change.date, change.time, Some(id))?;
        } else if !self.schedule.contains(change.time) {
            return Err(AppointmentError::OutsideSchedule(change.time));
        }

        let tracks_doctors = self.clinic.tracks_doctors();
        let appointment = self.get_mut(id)?;
        appointment.time = change.time;
        appointment.date = change.date;
        appointment.service = change.service.trim().to_string();
        if tracks_doctors {
            appointment.doctor = non_blank(change.doctor);
        }
        appointment.touch();

        info!(id, time = %change.time, date = %change.date, "Appointment rescheduled");
        Ok(&*appointment)
    }

    /// Soft-cancel: the record stays in the book with status `cancelled`.
    pub fn cancel(&mut self, id: &str) -> AppointmentResult<&Appointment> {
        self.set_status(id, AppointmentStatus::Cancelled)
    }

    /// Set any status. Transitions are not validated.
    pub fn set_status(
        &mut self,
        id: &str,
        status: AppointmentStatus,
    ) -> AppointmentResult<&Appointment> {
        let appointment = self.get_mut(id)?;
        debug!(id, from = appointment.status.as_str(), to = status.as_str(), "Status change");
        appointment.status = status;
        appointment.touch();
        Ok(&*appointment)
    }

    /// Slot must be in the catalogue and below capacity, not counting `ignore_id`.
    fn ensure_bookable(
        &self,
        date: NaiveDate,
        time: SlotTime,
        ignore_id: Option<&str>,
    ) -> AppointmentResult<()> {
        if !self.schedule.contains(time) {
            return Err(AppointmentError::OutsideSchedule(time));
        }

        let taken = self
            .appointments
            .iter()
            .filter(|a| Some(a.id.as_str()) != ignore_id)
            .filter(|a| a.is_active() && a.date == date && a.time == time)
            .count();
        if taken >= self.clinic.slot_capacity() {
            warn!(clinic = %self.clinic, %time, %date, "Slot fully booked");
            return Err(AppointmentError::SlotFull { time, date });
        }
        Ok(())
    }
}

fn missing_fields(request: &AppointmentRequest) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if request.patient.trim().is_empty() {
        missing.push("patient");
    }
    if request.service.trim().is_empty() {
        missing.push("service");
    }
    if request.time.trim().is_empty() {
        missing.push("time");
    }
    if request.date.is_none() {
        missing.push("date");
    }
    missing
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn request(patient: &str, time: &str) -> AppointmentRequest {
        AppointmentRequest {
            patient: patient.into(),
            service: "Dental Checkup".into(),
            time: time.into(),
            date: Some(today()),
            doctor: Some("Dr. Khanna".into()),
            ..Default::default()
        }
    }

    fn dental_book() -> AppointmentBook {
        AppointmentBook::new(Clinic::Dental, SlotSchedule::default())
    }

    #[test]
    fn test_create_appends_confirmed() {
        let mut book = dental_book();
        let created = book.create(request("Test Patient", "10:00 AM")).unwrap().clone();

        assert_eq!(book.len(), 1);
        assert_eq!(created.status, AppointmentStatus::Confirmed);
        assert_eq!(created.patient, "Test Patient");
        assert_eq!(created.service, "Dental Checkup");
        assert_eq!(created.time.to_string(), "10:00 AM");
        assert_eq!(created.date, today());
        assert_eq!(created.doctor.as_deref(), Some("Dr. Khanna"));
    }

    #[test]
    fn test_create_missing_fields_leaves_book_unchanged() {
        let mut book = dental_book();
        let mut input = request("", "10:00 AM");
        input.date = None;

        let err = book.create(input).unwrap_err();
        assert_eq!(err, AppointmentError::MissingFields(vec!["patient", "date"]));
        assert!(book.is_empty());
    }

    #[test]
    fn test_create_rejects_unbookable_time() {
        let mut book = dental_book();
        assert!(matches!(
            book.create(request("A", "1:15 PM")),
            Err(AppointmentError::OutsideSchedule(_))
        ));
        assert!(matches!(
            book.create(request("A", "noonish")),
            Err(AppointmentError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_meditouch_drops_doctor() {
        let mut book = AppointmentBook::new(Clinic::Meditouch, SlotSchedule::default());
        let mut input = request("Meera Joshi", "9:15 AM");
        input.service = "Skin Consultation".into();
        input.second_patient = Some("Ravi Kumar".into());

        let created = book.create(input).unwrap();
        assert_eq!(created.doctor, None);
        assert_eq!(created.second_patient, None);
    }

    #[test]
    fn test_capacity_enforced() {
        let mut book = dental_book();
        book.create(request("One", "10:00 AM")).unwrap();
        book.create(request("Two", "10:00 AM")).unwrap();

        let err = book.create(request("Three", "10:00 AM")).unwrap_err();
        assert!(matches!(err, AppointmentError::SlotFull { .. }));
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_cancel_is_soft_and_frees_slot() {
        let mut book = AppointmentBook::new(Clinic::Meditouch, SlotSchedule::default());
        let id = book.create(request("One", "10:00 AM")).unwrap().id.clone();
        assert!(book.create(request("Two", "10:00 AM")).is_err());

        book.cancel(&id).unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.get(&id).unwrap().status, AppointmentStatus::Cancelled);
        assert_eq!(book.active().count(), 0);

        assert!(book.create(request("Two", "10:00 AM")).is_ok());
    }

    #[test]
    fn test_reschedule_preserves_identity() {
        let mut book = dental_book();
        let id = book.create(request("Priya Patel", "9:15 AM")).unwrap().id.clone();
        book.set_status(&id, AppointmentStatus::Arrived).unwrap();

        let new_date = today().succ_opt().unwrap();
        let moved = book
            .reschedule(
                &id,
                Reschedule {
                    time: "11:30 AM".parse().unwrap(),
                    date: new_date,
                    service: "Root Canal".into(),
                    doctor: Some("Dr. Patel".into()),
                },
            )
            .unwrap();

        assert_eq!(moved.id, id);
        assert_eq!(moved.patient, "Priya Patel");
        assert_eq!(moved.status, AppointmentStatus::Arrived);
        assert_eq!(moved.time.to_string(), "11:30 AM");
        assert_eq!(moved.date, new_date);
        assert_eq!(moved.service, "Root Canal");
        assert_eq!(moved.doctor.as_deref(), Some("Dr. Patel"));
    }

    #[test]
    fn test_reschedule_within_own_slot_is_allowed() {
        let mut book = AppointmentBook::new(Clinic::Meditouch, SlotSchedule::default());
        let id = book.create(request("One", "10:00 AM")).unwrap().id.clone();

        let same_slot = Reschedule {
            time: "10:00 AM".parse().unwrap(),
            date: today(),
            service: "Facial".into(),
            doctor: None,
        };
        assert!(book.reschedule(&id, same_slot).is_ok());
    }

    #[test]
    fn test_reschedule_into_full_slot_fails() {
        let mut book = AppointmentBook::new(Clinic::Meditouch, SlotSchedule::default());
        book.create(request("One", "10:00 AM")).unwrap();
        let id = book.create(request("Two", "10:15 AM")).unwrap().id.clone();

        let err = book
            .reschedule(
                &id,
                Reschedule {
                    time: "10:00 AM".parse().unwrap(),
                    date: today(),
                    service: "Facial".into(),
                    doctor: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppointmentError::SlotFull { .. }));
        assert_eq!(book.get(&id).unwrap().time.to_string(), "10:15 AM");
    }

    #[test]
    fn test_any_status_reachable() {
        let mut book = dental_book();
        let id = book.create(request("One", "10:00 AM")).unwrap().id.clone();

        book.cancel(&id).unwrap();
        book.set_status(&id, AppointmentStatus::Completed).unwrap();
        book.set_status(&id, AppointmentStatus::Confirmed).unwrap();
        assert_eq!(book.get(&id).unwrap().status, AppointmentStatus::Confirmed);

        assert_eq!(
            book.cancel("missing").unwrap_err(),
            AppointmentError::NotFound("missing".into())
        );
    }
}
