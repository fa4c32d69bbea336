//! Sidebar menu and redirect-following navigation.

use tracing::debug;

use super::{Access, Route, RouteGuard, CAPABILITIES};
use crate::models::{Clinic, User};

/// One visible sidebar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub icon: &'static str,
    pub route: Route,
}

impl NavItem {
    pub fn path(&self) -> &'static str {
        self.route.path()
    }
}

/// Sidebar items the user may see in `clinic`, in table order.
pub fn navigation_menu(user: Option<&User>, clinic: Clinic) -> Vec<NavItem> {
    let Some(user) = user else {
        return Vec::new();
    };
    CAPABILITIES
        .iter()
        .filter(|c| c.allows_role(user.role) && c.allows_clinic(clinic))
        .filter_map(|c| {
            c.menu.map(|menu| NavItem {
                title: menu.title,
                icon: menu.icon,
                route: c.route,
            })
        })
        .collect()
}

/// Redirect chains are at most root -> dashboard -> login.
const MAX_REDIRECTS: usize = 4;

/// Tracks the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: Route,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Route::Login,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Go to `route`, following redirects until a page is granted.
    pub fn navigate(&mut self, route: Route, user: Option<&User>, clinic: Clinic) -> Route {
        let mut target = route;
        for _ in 0..MAX_REDIRECTS {
            match RouteGuard::authorize(user, clinic, target) {
                Access::Granted => break,
                Access::Redirect(next) => target = next,
            }
        }
        debug!(requested = %route, landed = %target, "Navigated");
        self.current = target;
        target
    }

    pub fn navigate_path(&mut self, path: &str, user: Option<&User>, clinic: Clinic) -> Route {
        self.navigate(Route::parse(path), user, clinic)
    }

    /// Re-check the current page after the session or clinic changed.
    pub fn revalidate(&mut self, user: Option<&User>, clinic: Clinic) -> Route {
        self.navigate(self.current, user, clinic)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
