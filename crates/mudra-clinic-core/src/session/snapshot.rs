//! The persisted part of the session.

use tracing::warn;

use crate::db::{DbResult, KeyValueStore};
use crate::models::{Clinic, User};

/// Local-storage key holding the JSON user record.
pub const USER_KEY: &str = "mudraUser";
/// Local-storage key holding the clinic string.
pub const CLINIC_KEY: &str = "mudraActiveClinic";

/// What survives a reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub active_clinic: Clinic,
}

impl SessionSnapshot {
    /// Read both keys.
    ///
    /// A malformed user record reads as logged out and an unknown clinic
    /// reads as the default. Only storage failures are errors.
    pub fn load(store: &impl KeyValueStore) -> DbResult<Self> {
        let user = match store.get_item(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(key = USER_KEY, error = %e, "Ignoring unreadable stored user");
                    None
                }
            },
            None => None,
        };

        let active_clinic = match store.get_item(CLINIC_KEY)? {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(key = CLINIC_KEY, value = %raw, "Ignoring unknown stored clinic");
                Clinic::default()
            }),
            None => Clinic::default(),
        };

        Ok(Self {
            user,
            active_clinic,
        })
    }

    /// Write the user key, or remove it when logged out.
    pub fn save_user(&self, store: &mut impl KeyValueStore) -> DbResult<()> {
        match &self.user {
            Some(user) => store.set_item(USER_KEY, &serde_json::to_string(user)?),
            None => store.remove_item(USER_KEY),
        }
    }

    pub fn save_clinic(&self, store: &mut impl KeyValueStore) -> DbResult<()> {
        store.set_item(CLINIC_KEY, self.active_clinic.as_str())
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> DbResult<()> {
        self.save_user(store)?;
        self.save_clinic(store)
    }
}
