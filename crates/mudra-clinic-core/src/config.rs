//! Portal configuration.
//!
//! Every field has a default, so `{}` is a valid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::appointments::SlotSchedule;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PortalConfig {
    /// SQLite file backing local storage. `None` keeps it in memory.
    pub storage_path: Option<PathBuf>,
    /// Simulated delay of a login request
    pub login_latency_ms: u64,
    /// Simulated delay of a form submission
    pub submit_latency_ms: u64,
    pub slot_schedule: SlotSchedule,
    /// Audit log rows per page
    pub audit_page_size: usize,
    /// Stock expiring within this many days is flagged
    pub stock_expiry_warning_days: u32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            login_latency_ms: 800,
            submit_latency_ms: 1000,
            slot_schedule: SlotSchedule::default(),
            audit_page_size: 5,
            stock_expiry_warning_days: 90,
        }
    }
}

impl PortalConfig {
    /// Defaults with every simulated delay removed.
    pub fn instant() -> Self {
        Self {
            login_latency_ms: 0,
            submit_latency_ms: 0,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.audit_page_size == 0 {
            return Err(ConfigError::Invalid("audit_page_size must be positive".into()));
        }
        self.slot_schedule.validate().map_err(ConfigError::Invalid)
    }

    pub fn login_latency(&self) -> Duration {
        Duration::from_millis(self.login_latency_ms)
    }

    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }
}

/// Block for a simulated network round trip.
pub(crate) fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}
