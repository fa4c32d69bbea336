//! Editable clinic settings, held in memory.

use chrono::Weekday;
use tracing::info;

use crate::models::{
    Clinic, ClinicDetails, ClinicSettings, DentalLab, DoctorProfile, LabWorkType, Role,
    ServiceOffering, SystemUser,
};
use crate::repository::{RepositoryError, RepositoryResult};
use crate::seed;

/// Settings of both clinics plus the shared staff accounts.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsStore {
    dental: ClinicSettings,
    meditouch: ClinicSettings,
    users: Vec<SystemUser>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self {
            dental: seed::clinic_settings(Clinic::Dental),
            meditouch: seed::clinic_settings(Clinic::Meditouch),
            users: seed::system_users(),
        }
    }
}

fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().unwrap_or(0) + 1
}

fn require(fields: &[(&'static str, &str)]) -> RepositoryResult<()> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RepositoryError::MissingFields(missing))
    }
}

impl SettingsStore {
    pub fn clinic(&self, clinic: Clinic) -> &ClinicSettings {
        match clinic {
            Clinic::Dental => &self.dental,
            Clinic::Meditouch => &self.meditouch,
        }
    }

    fn clinic_mut(&mut self, clinic: Clinic) -> &mut ClinicSettings {
        match clinic {
            Clinic::Dental => &mut self.dental,
            Clinic::Meditouch => &mut self.meditouch,
        }
    }

    fn dental_only(clinic: Clinic, what: &str) -> RepositoryResult<()> {
        if clinic.tracks_doctors() {
            Ok(())
        } else {
            Err(RepositoryError::Invalid(format!(
                "{} clinic has no {}",
                clinic.display_name(),
                what
            )))
        }
    }

    pub fn update_details(
        &mut self,
        clinic: Clinic,
        details: ClinicDetails,
    ) -> RepositoryResult<()> {
        require(&[
            ("name", details.name.as_str()),
            ("phone", details.phone.as_str()),
            ("email", details.email.as_str()),
        ])?;
        self.clinic_mut(clinic).details = details;
        info!(%clinic, "Clinic details updated");
        Ok(())
    }

    /// Returns the previous hours of that day.
    pub fn set_operating_hours(
        &mut self,
        clinic: Clinic,
        day: Weekday,
        hours: &str,
    ) -> RepositoryResult<String> {
        require(&[("hours", hours)])?;
        let schedule = &mut self.clinic_mut(clinic).details.operating_hours;
        let previous = schedule.for_weekday(day).to_string();
        schedule.set_weekday(day, hours.trim().to_string());
        Ok(previous)
    }

    pub fn add_service(
        &mut self,
        clinic: Clinic,
        name: &str,
        duration_minutes: u32,
        price: u32,
    ) -> RepositoryResult<&ServiceOffering> {
        require(&[("name", name)])?;
        if duration_minutes == 0 {
            return Err(RepositoryError::Invalid("service duration must be positive".into()));
        }
        let services = &mut self.clinic_mut(clinic).services;
        let id = next_id(services.iter().map(|s| s.id));
        services.push(ServiceOffering {
            id,
            name: name.trim().to_string(),
            duration_minutes,
            price,
        });
        Ok(&services[services.len() - 1])
    }

    pub fn add_doctor(
        &mut self,
        clinic: Clinic,
        name: &str,
        specialization: &str,
        email: &str,
    ) -> RepositoryResult<&DoctorProfile> {
        Self::dental_only(clinic, "doctors")?;
        require(&[("name", name), ("specialization", specialization), ("email", email)])?;
        let doctors = &mut self.clinic_mut(clinic).doctors;
        let id = next_id(doctors.iter().map(|d| d.id));
        doctors.push(DoctorProfile {
            id,
            name: name.trim().to_string(),
            specialization: specialization.trim().to_string(),
            email: email.trim().to_string(),
        });
        Ok(&doctors[doctors.len() - 1])
    }

    pub fn add_lab(
        &mut self,
        clinic: Clinic,
        name: &str,
        contact: &str,
        address: &str,
        specialization: &str,
    ) -> RepositoryResult<&DentalLab> {
        Self::dental_only(clinic, "dental labs")?;
        require(&[("name", name), ("contact", contact)])?;
        let labs = &mut self.clinic_mut(clinic).labs;
        let id = next_id(labs.iter().map(|l| l.id));
        labs.push(DentalLab {
            id,
            name: name.trim().to_string(),
            contact: contact.trim().to_string(),
            address: address.trim().to_string(),
            specialization: specialization.trim().to_string(),
        });
        Ok(&labs[labs.len() - 1])
    }

    pub fn add_lab_work_type(
        &mut self,
        clinic: Clinic,
        name: &str,
        turnaround: &str,
    ) -> RepositoryResult<&LabWorkType> {
        Self::dental_only(clinic, "lab work types")?;
        require(&[("name", name), ("turnaround", turnaround)])?;
        let types = &mut self.clinic_mut(clinic).lab_work_types;
        let id = next_id(types.iter().map(|t| t.id));
        types.push(LabWorkType {
            id,
            name: name.trim().to_string(),
            turnaround: turnaround.trim().to_string(),
        });
        Ok(&types[types.len() - 1])
    }

    pub fn system_users(&self) -> &[SystemUser] {
        &self.users
    }

    pub fn add_system_user(
        &mut self,
        name: &str,
        email: &str,
        role: Role,
    ) -> RepositoryResult<&SystemUser> {
        require(&[("name", name), ("email", email)])?;
        if self.users.iter().any(|u| u.email.eq_ignore_ascii_case(email.trim())) {
            return Err(RepositoryError::Duplicate {
                kind: "User",
                id: email.trim().to_string(),
            });
        }
        let id = next_id(self.users.iter().map(|u| u.id));
        self.users.push(SystemUser {
            id,
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            role,
            active: true,
        });
        Ok(&self.users[self.users.len() - 1])
    }

    /// Returns the previous flag alongside the updated account.
    pub fn set_user_active(
        &mut self,
        id: u32,
        active: bool,
    ) -> RepositoryResult<(bool, &SystemUser)> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RepositoryError::NotFound {
                kind: "User",
                id: id.to_string(),
            })?;
        let previous = std::mem::replace(&mut user.active, active);
        Ok((previous, &*user))
    }
}
