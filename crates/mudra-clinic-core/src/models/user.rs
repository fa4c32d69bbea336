//! Staff users and roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Staff role, which decides the routes a user may open.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Receptionist,
    Inventory,
}

impl Role {
    /// Every role, in directory order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Doctor, Role::Receptionist, Role::Inventory];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Receptionist => "receptionist",
            Role::Inventory => "inventory",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "receptionist" => Ok(Role::Receptionist),
            "inventory" => Ok(Role::Inventory),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// A logged-in staff member.
///
/// Created at login and immutable for the lifetime of the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn new(id: &str, name: &str, email: &str, role: Role) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Initials shown in the header avatar ("Dr. Priya Sharma" -> "DPS").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Receptionist).unwrap();
        assert_eq!(json, "\"receptionist\"");
    }

    #[test]
    fn test_initials() {
        let user = User::new("2", "Dr. Priya Sharma", "doctor@mudraclinic.com", Role::Doctor);
        assert_eq!(user.initials(), "DPS");
        assert!(!user.is_admin());
    }
}
