//! Clinic configuration records managed from the settings page.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::user::Role;

/// Lowercase field name of a weekday ("monday").
pub fn weekday_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Opening hours per weekday, as display strings ("9:00 AM - 6:00 PM", "Closed").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatingHours {
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
}

impl OperatingHours {
    /// Same hours Monday to Friday, separate Saturday hours, closed Sunday.
    pub fn weekly(weekdays: &str, saturday: &str) -> Self {
        Self {
            monday: weekdays.to_string(),
            tuesday: weekdays.to_string(),
            wednesday: weekdays.to_string(),
            thursday: weekdays.to_string(),
            friday: weekdays.to_string(),
            saturday: saturday.to_string(),
            sunday: "Closed".to_string(),
        }
    }

    pub fn for_weekday(&self, day: Weekday) -> &str {
        match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn set_weekday(&mut self, day: Weekday, hours: String) {
        let slot = match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        };
        *slot = hours;
    }

    pub fn is_closed(&self, day: Weekday) -> bool {
        self.for_weekday(day).eq_ignore_ascii_case("closed")
    }
}

/// Contact card of a clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub operating_hours: OperatingHours,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorProfile {
    pub id: u32,
    pub name: String,
    pub specialization: String,
    pub email: String,
}

/// A bookable service with its list price in rupees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceOffering {
    pub id: u32,
    pub name: String,
    pub duration_minutes: u32,
    pub price: u32,
}

/// External laboratory fabricating dental work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DentalLab {
    pub id: u32,
    pub name: String,
    pub contact: String,
    pub address: String,
    pub specialization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabWorkType {
    pub id: u32,
    pub name: String,
    /// Display range such as "7-10 days"
    pub turnaround: String,
}

/// Staff account listed on the user management tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemUser {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
}

/// Everything the settings page edits for one clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicSettings {
    pub details: ClinicDetails,
    pub services: Vec<ServiceOffering>,
    /// Empty for Meditouch
    pub doctors: Vec<DoctorProfile>,
    /// Empty for Meditouch
    pub labs: Vec<DentalLab>,
    /// Empty for Meditouch
    pub lab_work_types: Vec<LabWorkType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_hours() {
        let mut hours = OperatingHours::weekly("9:00 AM - 6:00 PM", "10:00 AM - 4:00 PM");
        assert_eq!(hours.for_weekday(Weekday::Wed), "9:00 AM - 6:00 PM");
        assert_eq!(hours.for_weekday(Weekday::Sat), "10:00 AM - 4:00 PM");
        assert!(hours.is_closed(Weekday::Sun));

        hours.set_weekday(Weekday::Sun, "10:00 AM - 2:00 PM".into());
        assert!(!hours.is_closed(Weekday::Sun));
    }
}
