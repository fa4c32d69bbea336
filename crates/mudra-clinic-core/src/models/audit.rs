//! Audit trail models.

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::user::Role;

/// Area of the portal an audited action touched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    Auth,
    Appointment,
    Stock,
    Lab,
    Patient,
    User,
    Settings,
}

impl ActionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Auth => "auth",
            ActionCategory::Appointment => "appointment",
            ActionCategory::Stock => "stock",
            ActionCategory::Lab => "lab",
            ActionCategory::Patient => "patient",
            ActionCategory::User => "user",
            ActionCategory::Settings => "settings",
        }
    }
}

impl FromStr for ActionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auth" => Ok(ActionCategory::Auth),
            "appointment" => Ok(ActionCategory::Appointment),
            "stock" => Ok(ActionCategory::Stock),
            "lab" => Ok(ActionCategory::Lab),
            "patient" => Ok(ActionCategory::Patient),
            "user" => Ok(ActionCategory::User),
            "settings" => Ok(ActionCategory::Settings),
            other => Err(format!("unknown action category: {}", other)),
        }
    }
}

/// Badge family derived from the free-text action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Create,
    Update,
    Delete,
    Login,
    Logout,
    Reschedule,
    Other,
}

impl ActionKind {
    /// First keyword found wins, in badge precedence order.
    pub fn classify(action_type: &str) -> Self {
        const KEYWORDS: [(&str, ActionKind); 6] = [
            ("Create", ActionKind::Create),
            ("Update", ActionKind::Update),
            ("Delete", ActionKind::Delete),
            ("Login", ActionKind::Login),
            ("Logout", ActionKind::Logout),
            ("Reschedule", ActionKind::Reschedule),
        ];
        KEYWORDS
            .iter()
            .find(|(keyword, _)| action_type.contains(keyword))
            .map(|(_, kind)| *kind)
            .unwrap_or(ActionKind::Other)
    }
}

/// Before/after snapshot of the fields an action changed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditChanges {
    pub before: serde_json::Value,
    pub after: serde_json::Value,
}

/// One line of the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditLogEntry {
    /// Entry id ("AUD001")
    pub id: String,
    pub timestamp: NaiveDateTime,
    /// Display name of the acting user
    pub user: String,
    pub user_role: Role,
    pub category: ActionCategory,
    /// Free text such as "Create Appointment"
    pub action_type: String,
    pub target_entity: String,
    pub details: String,
    pub changes: Option<AuditChanges>,
}

impl AuditLogEntry {
    pub fn kind(&self) -> ActionKind {
        ActionKind::classify(&self.action_type)
    }

    /// Case-insensitive match against user, action, target and details.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [&self.user, &self.action_type, &self.target_entity, &self.details]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
