//! Appointment models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::clinic::Clinic;

/// Appointment status.
///
/// Intended flow is `Confirmed -> Arrived -> Completed`, with `Cancelled`
/// reachable from anywhere. Transitions are not validated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Arrived,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Arrived => "arrived",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Badge label ("Confirmed", "Arrived", ...).
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Arrived => "Arrived",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }

    /// Cancelled appointments stay in the book but occupy no slot and are hidden from views.
    pub fn is_active(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "arrived" => Ok(AppointmentStatus::Arrived),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("unknown appointment status: {}", other)),
        }
    }
}

/// Half of the clinic day an appointment falls into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DaySession {
    Morning,
    Afternoon,
}

/// Time of day of a booking slot.
///
/// Accepts both the 12-hour display form ("9:15 AM") and the 24-hour form
/// used by the booking form ("13:30"). Always displays in the 12-hour form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    /// Build from hour (0-23) and minute.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(SlotTime)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }

    /// Minutes since midnight.
    pub fn minutes_from_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    /// Every AM time, plus the 12 o'clock PM hour, is a morning slot.
    pub fn session(&self) -> DaySession {
        if self.0.hour() < 13 {
            DaySession::Morning
        } else {
            DaySession::Afternoon
        }
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%-I:%M %p"))
    }
}

impl FromStr for SlotTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_uppercase();
        NaiveTime::parse_from_str(&trimmed, "%I:%M %p")
            .or_else(|_| NaiveTime::parse_from_str(&trimmed, "%H:%M"))
            .map(SlotTime)
            .map_err(|_| format!("invalid time of day: {}", s))
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A booked appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Random UUID assigned at creation
    pub id: String,
    /// Clinic whose book holds this appointment
    pub clinic: Clinic,
    pub time: SlotTime,
    pub date: NaiveDate,
    /// Free-text patient name
    pub patient: String,
    pub service: String,
    /// Treating doctor (dental only)
    pub doctor: Option<String>,
    /// Companion booked into the same slot (dental only)
    pub second_patient: Option<String>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Appointment {
    /// Create a confirmed appointment with a fresh id.
    pub fn new(
        clinic: Clinic,
        patient: String,
        service: String,
        time: SlotTime,
        date: NaiveDate,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            clinic,
            time,
            date,
            patient,
            service,
            doctor: None,
            second_patient: None,
            notes: None,
            status: AppointmentStatus::Confirmed,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Case-insensitive match against patient, second patient and service.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.patient.to_lowercase().contains(&needle)
            || self.service.to_lowercase().contains(&needle)
            || self
                .second_patient
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(&needle))
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Booking form input. Every field may be blank until validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppointmentRequest {
    pub patient: String,
    pub service: String,
    /// "9:00 AM" or "09:00"
    pub time: String,
    pub date: Option<NaiveDate>,
    pub doctor: Option<String>,
    pub second_patient: Option<String>,
    pub notes: Option<String>,
}

/// Replacement values for a reschedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reschedule {
    pub time: SlotTime,
    pub date: NaiveDate,
    pub service: String,
    pub doctor: Option<String>,
}
