//! Routes and the capability table that gates them.
//!
//! [`CAPABILITIES`] is the single source of truth for who may open which
//! page in which clinic. The guard and the sidebar menu both read it.

mod guard;
mod navigation;

pub use guard::*;
pub use navigation::*;

use std::fmt;

use crate::models::{Clinic, Role};

/// Every page of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, always redirects
    Root,
    Login,
    Unauthorized,
    Dashboard,
    Appointments,
    NewAppointment,
    Stock,
    Lab,
    Patients,
    Reports,
    Audit,
    Settings,
    /// Catch-all for unknown paths
    NotFound,
}

impl Route {
    /// Resolve a path. Unknown paths land on [`Route::NotFound`].
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" if trimmed.starts_with('/') => "/",
            other => other,
        };
        match normalized {
            "/" => Route::Root,
            "/login" => Route::Login,
            "/unauthorized" => Route::Unauthorized,
            "/dashboard" => Route::Dashboard,
            "/appointments" => Route::Appointments,
            "/appointments/new" => Route::NewAppointment,
            "/stock" => Route::Stock,
            "/lab" => Route::Lab,
            "/patients" => Route::Patients,
            "/reports" => Route::Reports,
            "/audit" => Route::Audit,
            "/settings" => Route::Settings,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Unauthorized => "/unauthorized",
            Route::Dashboard => "/dashboard",
            Route::Appointments => "/appointments",
            Route::NewAppointment => "/appointments/new",
            Route::Stock => "/stock",
            Route::Lab => "/lab",
            Route::Patients => "/patients",
            Route::Reports => "/reports",
            Route::Audit => "/audit",
            Route::Settings => "/settings",
            Route::NotFound => "*",
        }
    }

    /// Reachable without logging in.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Unauthorized | Route::NotFound)
    }

    pub fn capability(&self) -> Option<&'static RouteCapability> {
        CAPABILITIES.iter().find(|c| c.route == *self)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Sidebar entry of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub title: &'static str,
    pub icon: &'static str,
}

/// Who may open a protected route. `None` means unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteCapability {
    pub route: Route,
    pub roles: Option<&'static [Role]>,
    pub clinics: Option<&'static [Clinic]>,
    /// `None` keeps the route out of the sidebar
    pub menu: Option<MenuEntry>,
}

impl RouteCapability {
    pub fn allows_role(&self, role: Role) -> bool {
        self.roles.map_or(true, |roles| roles.contains(&role))
    }

    pub fn allows_clinic(&self, clinic: Clinic) -> bool {
        self.clinics.map_or(true, |clinics| clinics.contains(&clinic))
    }
}

const fn entry(title: &'static str, icon: &'static str) -> Option<MenuEntry> {
    Some(MenuEntry { title, icon })
}

/// Protected routes in sidebar order.
pub const CAPABILITIES: &[RouteCapability] = &[
    RouteCapability {
        route: Route::Dashboard,
        roles: None,
        clinics: None,
        menu: entry("Dashboard", "layout-dashboard"),
    },
    RouteCapability {
        route: Route::Appointments,
        roles: None,
        clinics: None,
        menu: entry("Appointments", "calendar"),
    },
    RouteCapability {
        route: Route::NewAppointment,
        roles: None,
        clinics: None,
        menu: None,
    },
    RouteCapability {
        route: Route::Stock,
        roles: Some(&[Role::Admin, Role::Inventory]),
        clinics: Some(&[Clinic::Dental]),
        menu: entry("Stock Tracker", "package-open"),
    },
    RouteCapability {
        route: Route::Lab,
        roles: Some(&[Role::Admin, Role::Doctor, Role::Receptionist]),
        clinics: Some(&[Clinic::Dental]),
        menu: entry("Lab Work", "microscope"),
    },
    RouteCapability {
        route: Route::Patients,
        roles: None,
        clinics: None,
        menu: entry("Patients", "users"),
    },
    RouteCapability {
        route: Route::Reports,
        roles: Some(&[Role::Admin]),
        clinics: None,
        menu: entry("Reports", "file-text"),
    },
    RouteCapability {
        route: Route::Audit,
        roles: Some(&[Role::Admin]),
        clinics: None,
        menu: entry("Audit Log", "alert-circle"),
    },
    RouteCapability {
        route: Route::Settings,
        roles: Some(&[Role::Admin]),
        clinics: None,
        menu: entry("Settings", "settings"),
    },
];
