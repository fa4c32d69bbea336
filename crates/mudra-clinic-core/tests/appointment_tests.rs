//! Property tests for slot capacity.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use proptest::sample::select;

use mudra_clinic_core::models::{AppointmentRequest, Clinic};
use mudra_clinic_core::{AppointmentBook, AppointmentError, SlotSchedule};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn request(patient: usize, slot: usize, day: u64) -> AppointmentRequest {
    let time = SlotSchedule::default().slots()[slot];
    AppointmentRequest {
        patient: format!("Patient {}", patient),
        service: "Dental Checkup".into(),
        time: time.to_string(),
        date: base_date().checked_add_days(Days::new(day)),
        ..Default::default()
    }
}

fn clinics() -> impl Strategy<Value = Clinic> {
    select(vec![Clinic::Dental, Clinic::Meditouch])
}

/// Bookings drawn from a handful of slots over three days so collisions are common.
fn bookings() -> impl Strategy<Value = Vec<(usize, u64)>> {
    proptest::collection::vec((0usize..4, 0u64..3), 1..40)
}

proptest! {
    #[test]
    fn booked_count_never_exceeds_capacity(clinic in clinics(), plan in bookings()) {
        let mut book = AppointmentBook::new(clinic, SlotSchedule::default());
        let slots = book.schedule().slots();

        for (i, (slot, day)) in plan.into_iter().enumerate() {
            let date = base_date().checked_add_days(Days::new(day)).unwrap();
            let before = book.booked_count(date, slots[slot]);
            let result = book.create(request(i, slot, day));

            if before < clinic.slot_capacity() {
                prop_assert!(result.is_ok());
                prop_assert_eq!(book.booked_count(date, slots[slot]), before + 1);
            } else {
                let rejected = matches!(result, Err(AppointmentError::SlotFull { .. }));
                prop_assert!(rejected);
                prop_assert_eq!(book.booked_count(date, slots[slot]), before);
            }
            prop_assert!(book.booked_count(date, slots[slot]) <= clinic.slot_capacity());
        }
    }

    #[test]
    fn available_slots_are_exactly_those_with_room(clinic in clinics(), plan in bookings()) {
        let mut book = AppointmentBook::new(clinic, SlotSchedule::default());
        for (i, (slot, day)) in plan.into_iter().enumerate() {
            let _ = book.create(request(i, slot, day));
        }

        let date = base_date();
        let available = book.available_slots(date);
        for slot in book.schedule().slots() {
            let has_room = book.booked_count(date, slot) < clinic.slot_capacity();
            prop_assert_eq!(available.contains(&slot), has_room);
        }
    }

    #[test]
    fn cancelling_frees_the_slot(clinic in clinics(), slot in 0usize..4) {
        let mut book = AppointmentBook::new(clinic, SlotSchedule::default());
        let time = book.schedule().slots()[slot];
        let mut ids = Vec::new();
        for i in 0..clinic.slot_capacity() {
            ids.push(book.create(request(i, slot, 0)).unwrap().id.clone());
        }
        prop_assert!(!book.available_slots(base_date()).contains(&time));

        book.cancel(&ids[0]).unwrap();
        prop_assert!(book.available_slots(base_date()).contains(&time));
        prop_assert_eq!(book.len(), clinic.slot_capacity());
    }
}
