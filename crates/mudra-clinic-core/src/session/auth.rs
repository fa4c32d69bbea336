//! Mock authentication against a fixed staff directory.

use std::time::Duration;

use tracing::{info, warn};

use super::{SessionError, SessionResult};
use crate::config::simulate_latency;
use crate::models::{Role, User};

/// The one password every directory account accepts.
pub const MOCK_PASSWORD: &str = "password";

/// The four demo staff accounts.
pub fn staff_directory() -> Vec<User> {
    vec![
        User::new("1", "Dr. Khanna", "admin@mudraclinic.com", Role::Admin),
        User::new("2", "Dr. Priya Sharma", "doctor@mudraclinic.com", Role::Doctor),
        User::new(
            "3",
            "Lakshmi Patel",
            "receptionist@mudraclinic.com",
            Role::Receptionist,
        ),
        User::new("4", "Rajesh Kumar", "inventory@mudraclinic.com", Role::Inventory),
    ]
}

/// Holds the current user, if any.
#[derive(Debug, Clone)]
pub struct SessionProvider {
    directory: Vec<User>,
    user: Option<User>,
    latency: Duration,
}

impl SessionProvider {
    pub fn new(latency: Duration) -> Self {
        Self::with_directory(staff_directory(), latency)
    }

    pub fn with_directory(directory: Vec<User>, latency: Duration) -> Self {
        Self {
            directory,
            user: None,
            latency,
        }
    }

    pub fn directory(&self) -> &[User] {
        &self.directory
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Adopt a user read back from storage.
    pub fn restore(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// Check credentials against the directory.
    ///
    /// Email must match exactly. A failed attempt leaves the current
    /// session untouched.
    pub fn login(&mut self, email: &str, password: &str) -> SessionResult<&User> {
        simulate_latency(self.latency);

        let found = self
            .directory
            .iter()
            .find(|u| u.email == email)
            .filter(|_| password == MOCK_PASSWORD)
            .cloned();

        match found {
            Some(user) => {
                info!(user_id = %user.id, role = %user.role, "Login succeeded");
                Ok(&*self.user.insert(user))
            }
            None => {
                warn!(email, "Login rejected");
                Err(SessionError::InvalidCredentials)
            }
        }
    }

    /// End the session, returning who was logged in.
    pub fn logout(&mut self) -> Option<User> {
        let user = self.user.take();
        if let Some(user) = &user {
            info!(user_id = %user.id, "Logged out");
        }
        user
    }
}

impl Default for SessionProvider {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}
