//! Access decisions for a single navigation.

use tracing::debug;

use super::Route;
use crate::models::{Clinic, User};

/// Outcome of checking one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(Route),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }
}

/// Stateless gate in front of every page.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Decide whether `user` may open `route` while `clinic` is active.
    ///
    /// Checks run in order: public, root redirect, login, role, clinic.
    pub fn authorize(user: Option<&User>, clinic: Clinic, route: Route) -> Access {
        let access = if route.is_public() {
            Access::Granted
        } else if route == Route::Root {
            Access::Redirect(Route::Dashboard)
        } else {
            match (user, route.capability()) {
                (None, _) => Access::Redirect(Route::Login),
                (Some(_), None) => Access::Granted,
                (Some(user), Some(capability)) => {
                    if !capability.allows_role(user.role) {
                        Access::Redirect(Route::Unauthorized)
                    } else if !capability.allows_clinic(clinic) {
                        Access::Redirect(Route::Dashboard)
                    } else {
                        Access::Granted
                    }
                }
            }
        };
        debug!(%route, role = ?user.map(|u| u.role), %clinic, ?access, "Route check");
        access
    }
}
