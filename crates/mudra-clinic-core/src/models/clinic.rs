//! Clinic tenants sharing the staff portal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two co-branded clinics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Clinic {
    #[default]
    Dental,
    Meditouch,
}

impl Clinic {
    pub const ALL: [Clinic; 2] = [Clinic::Dental, Clinic::Meditouch];

    pub fn as_str(&self) -> &'static str {
        match self {
            Clinic::Dental => "dental",
            Clinic::Meditouch => "meditouch",
        }
    }

    /// Brand name used in page titles and notifications.
    pub fn display_name(&self) -> &'static str {
        match self {
            Clinic::Dental => "Dental Metrix",
            Clinic::Meditouch => "Meditouch",
        }
    }

    /// Maximum number of appointments sharing one time slot.
    pub fn slot_capacity(&self) -> usize {
        match self {
            Clinic::Dental => 2,
            Clinic::Meditouch => 1,
        }
    }

    /// Body class applied while this clinic is active.
    pub fn theme_class(&self) -> &'static str {
        match self {
            Clinic::Dental => "theme-dental",
            Clinic::Meditouch => "theme-meditouch",
        }
    }

    /// Services offered on the booking form.
    pub fn services(&self) -> &'static [&'static str] {
        match self {
            Clinic::Dental => &[
                "Dental Checkup",
                "Teeth Cleaning",
                "Root Canal",
                "Crown Fitting",
                "Dental Filling",
                "Denture Adjustment",
            ],
            Clinic::Meditouch => &[
                "Skin Consultation",
                "Hair Treatment",
                "Facial",
                "Massage Therapy",
                "Cosmetic Procedure",
            ],
        }
    }

    /// Doctors selectable on the booking form. Meditouch bookings carry no doctor.
    pub fn doctors(&self) -> &'static [&'static str] {
        match self {
            Clinic::Dental => &["Dr. Khanna", "Dr. Sharma", "Dr. Patel"],
            Clinic::Meditouch => &[],
        }
    }

    /// Whether bookings for this clinic record a doctor and a second patient.
    pub fn tracks_doctors(&self) -> bool {
        matches!(self, Clinic::Dental)
    }
}

impl fmt::Display for Clinic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known clinic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown clinic: {0}")]
pub struct UnknownClinic(pub String);

impl FromStr for Clinic {
    type Err = UnknownClinic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dental" => Ok(Clinic::Dental),
            "meditouch" => Ok(Clinic::Meditouch),
            _ => Err(UnknownClinic(s.to_string())),
        }
    }
}
