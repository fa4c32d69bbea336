//! Patient registry models.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::clinic::Clinic;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown gender: {}", s))
    }
}

/// Which clinic(s) a patient is registered with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClinicAffiliation {
    Dental,
    Meditouch,
    Both,
}

impl ClinicAffiliation {
    pub const ALL: [ClinicAffiliation; 3] = [
        ClinicAffiliation::Dental,
        ClinicAffiliation::Meditouch,
        ClinicAffiliation::Both,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClinicAffiliation::Dental => "dental",
            ClinicAffiliation::Meditouch => "meditouch",
            ClinicAffiliation::Both => "both",
        }
    }

    /// Patients registered with both clinics show up under either.
    pub fn includes(&self, clinic: Clinic) -> bool {
        match self {
            ClinicAffiliation::Both => true,
            ClinicAffiliation::Dental => clinic == Clinic::Dental,
            ClinicAffiliation::Meditouch => clinic == Clinic::Meditouch,
        }
    }

    /// Badge label.
    pub fn label(&self) -> &'static str {
        match self {
            ClinicAffiliation::Both => "Both Clinics",
            ClinicAffiliation::Dental => "Dental Metrix",
            ClinicAffiliation::Meditouch => "Meditouch",
        }
    }
}

impl FromStr for ClinicAffiliation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClinicAffiliation::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown clinic affiliation: {}", s))
    }
}

impl From<Clinic> for ClinicAffiliation {
    fn from(clinic: Clinic) -> Self {
        match clinic {
            Clinic::Dental => ClinicAffiliation::Dental,
            Clinic::Meditouch => ClinicAffiliation::Meditouch,
        }
    }
}

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Registry id ("PT001")
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    pub email: Option<String>,
    pub phone: String,
    pub address: String,
    pub clinic: ClinicAffiliation,
    pub last_visit: Option<NaiveDate>,
}

/// Input of the "Add Patient" dialog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    pub email: Option<String>,
    pub phone: String,
    pub address: String,
    pub clinic: ClinicAffiliation,
}

impl NewPatient {
    /// Names of required fields left blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        missing
    }

    pub fn into_patient(self, id: String) -> Patient {
        Patient {
            id,
            name: self.name.trim().to_string(),
            gender: self.gender,
            age: self.age,
            email: self.email.filter(|e| !e.trim().is_empty()),
            phone: self.phone.trim().to_string(),
            address: self.address,
            clinic: self.clinic,
            last_visit: None,
        }
    }
}
