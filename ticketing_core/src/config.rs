//! Terminal configuration file support.
//!
//! This module provides utilities for reading terminal configuration from
//! TOML configuration files: where the database lives, where ticket
//! artifacts are written, and the fare policy constants.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::repository::StoreError;
use crate::fare::FarePolicy;

/// Terminal configuration from file.
///
/// ```toml
/// [store]
/// database_path = "terminal.db"
///
/// [artifacts]
/// output_dir = "qrcodes"
///
/// [fare]
/// per_km_rate = 3
/// minimum_fare = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub artifacts: ArtifactSettings,
    #[serde(default)]
    pub fare: FareSettings,
}

/// Database location settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

/// Artifact output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Fare policy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareSettings {
    #[serde(default = "default_per_km_rate")]
    pub per_km_rate: i64,
    #[serde(default = "default_minimum_fare")]
    pub minimum_fare: i64,
}

fn default_database_path() -> String {
    "terminal.db".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("qrcodes")
}

fn default_per_km_rate() -> i64 {
    3
}

fn default_minimum_fare() -> i64 {
    5
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Default for FareSettings {
    fn default() -> Self {
        Self {
            per_km_rate: default_per_km_rate(),
            minimum_fare: default_minimum_fare(),
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            store: StoreSettings::default(),
            artifacts: ArtifactSettings::default(),
            fare: FareSettings::default(),
        }
    }
}

impl TerminalConfig {
    /// Load terminal configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            StoreError::Configuration(format!("Failed to read config file: {e}"))
        })?;

        toml::from_str(&content)
            .map_err(|e| StoreError::Configuration(format!("Failed to parse config file: {e}")))
    }

    /// Load from the first `terminal.toml` found in standard locations,
    /// falling back to the built-in defaults when none exists.
    pub fn from_default_location() -> Result<Self, StoreError> {
        let search_paths = [
            PathBuf::from("terminal.toml"),
            PathBuf::from("ticketing_core/terminal.toml"),
            PathBuf::from("../terminal.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// The fare policy described by this configuration.
    pub fn fare_policy(&self) -> FarePolicy {
        FarePolicy {
            per_km_rate: self.fare.per_km_rate,
            minimum_fare: self.fare.minimum_fare,
        }
    }
}
