//! Optional TOML settings file.
//!
//! ```toml
//! timezone = "Europe/Berlin"
//! days_to_check = 3
//! duration_minutes = 45
//!
//! [working_hours]
//! start_hour = 8
//! end_hour = 16
//!
//! [search]
//! step_minutes = 15
//! display_cap = 5
//! dst_policy = "skip"
//! ```
//!
//! Command-line flags override anything set here.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use slot_engine::{SearchConfig, WorkingHours};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timezone: Option<String>,
    pub days_to_check: Option<u32>,
    pub duration_minutes: Option<u32>,
    pub working_hours: Option<WorkingHours>,
    pub search: SearchConfig,
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
