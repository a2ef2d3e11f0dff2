//! Configuration loading and validation
//!
//! The candidate list and static identifiers come from a JSON config file.
//! Credentials (bearer token and checksum secret) come from the environment
//! only — a missing credential aborts the run before any flow starts.

use crate::error::ConfigError;
use crate::types::Candidate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the bearer credential.
pub const TOKEN_ENV: &str = "COURTRACE_TOKEN";

/// Environment variable holding the checksum secret.
pub const SECRET_ENV: &str = "COURTRACE_SECRET";

/// Device identity reported in the fixed header set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceIdentity {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_app_version")]
    pub app_version: String,

    #[serde(default = "default_device_inf")]
    pub device_inf: String,

    #[serde(default = "default_device_id")]
    pub device_id: String,

    #[serde(default = "default_language")]
    pub language: String,
}

fn default_user_agent() -> String {
    "Dart/3.7 (dart:io)".to_string()
}

fn default_app_version() -> String {
    "1.5.5".to_string()
}

fn default_device_inf() -> String {
    "PHY110 OPPO 35".to_string()
}

fn default_device_id() -> String {
    "51a9e0d3fcb8574c".to_string()
}

fn default_language() -> String {
    "vi".to_string()
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            app_version: default_app_version(),
            device_inf: default_device_inf(),
            device_id: default_device_id(),
            language: default_language(),
        }
    }
}

/// Race configuration: the remote endpoint, static identifiers, slot
/// targeting, and the candidate list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RaceConfig {
    /// Base URL of the reservation API, including any path prefix, without a
    /// trailing slash.
    pub base_url: String,

    pub utility_id: i64,
    pub classify_id: i64,

    /// Target local hour of the slot, used to cross-check the discovered
    /// slot start. Discovery stays authoritative.
    #[serde(default)]
    pub target_hour: Option<u32>,

    /// How many local calendar days ahead the slot lies.
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,

    pub candidates: Vec<Candidate>,

    #[serde(default)]
    pub device: DeviceIdentity,
}

fn default_days_ahead() -> u32 {
    1
}

impl RaceConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut config: RaceConfig =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        while config.base_url.ends_with('/') {
            config.base_url.pop();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate field values. Called by [`RaceConfig::load`]; exposed for
    /// configs built in code.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::invalid("base_url", "must not be empty"));
        }
        if self.utility_id <= 0 {
            return Err(ConfigError::invalid("utility_id", "must be positive"));
        }
        if self.classify_id <= 0 {
            return Err(ConfigError::invalid("classify_id", "must be positive"));
        }
        if let Some(hour) = self.target_hour {
            if hour > 23 {
                return Err(ConfigError::invalid(
                    "target_hour",
                    format!("{hour} is not a valid hour of day"),
                ));
            }
        }
        if self.candidates.is_empty() {
            return Err(ConfigError::invalid(
                "candidates",
                "at least one candidate is required",
            ));
        }
        for (index, candidate) in self.candidates.iter().enumerate() {
            let field = format!("candidates[{index}]");
            if candidate.place_id <= 0 {
                return Err(ConfigError::invalid(&field, "place_id must be positive"));
            }
            if candidate.place_utility_id <= 0 {
                return Err(ConfigError::invalid(
                    &field,
                    "place_utility_id must be positive",
                ));
            }
            if candidate.time_constraint_id <= 0 {
                return Err(ConfigError::invalid(
                    &field,
                    "time_constraint_id must be positive",
                ));
            }
            if candidate.label.is_empty() {
                return Err(ConfigError::invalid(&field, "label must not be empty"));
            }
        }
        Ok(())
    }
}

/// Runtime credentials, sourced from the environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Bearer credential sent as the auth header on every call.
    pub token: String,

    /// Shared secret mixed into the commit checksum.
    pub secret: String,
}

impl Credentials {
    /// Read both credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either variable is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            token: require_env(TOKEN_ENV)?,
            secret: require_env(SECRET_ENV)?,
        })
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyCredential(name)),
        Ok(value) => Ok(value),
        Err(_) => Err(ConfigError::MissingCredential(name)),
    }
}
