//! # Configuration
//!
//! Settings are read from an optional YAML file and then overridden by
//! environment variables.
//!
//! ## YAML Format
//!
//! ```yaml
//! server:
//!   host: "127.0.0.1"
//!   port: 3000
//!   cors_origin: "http://localhost:8080"
//! calendar:
//!   week_start: "sunday"
//!   max_visible_events: 3
//!   seed_sample_events: true
//! ```
//!
//! The file path comes from `CAREER_CALENDAR_CONFIG` and defaults to
//! `career_calendar.yaml` in the working directory. A missing file is not an
//! error.

use anyhow::{Context, Result};
use chrono::Weekday;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "CAREER_CALENDAR_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "career_calendar.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed to call the API from a browser
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origin: "http://localhost:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// First column of every grid, e.g. "sunday" or "monday"
    pub week_start: String,
    /// Events listed per month-view cell before the "+N more" counter
    pub max_visible_events: usize,
    /// Start with a few demo events around today
    pub seed_sample_events: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_start: "sunday".to_string(),
            max_visible_events: 3,
            seed_sample_events: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub calendar: CalendarConfig,
}

impl AppConfig {
    /// Load from the configured YAML file and the process environment
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path, |key| std::env::var(key).ok())
    }

    /// Load from `path` (if it exists) and apply overrides from `env`
    pub fn load_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = if path.exists() {
            let yaml_content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {:?}", path))?;
            let config: AppConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse config file {:?}", path))?;
            info!("Loaded configuration from {:?}", path);
            config
        } else {
            debug!("No config file at {:?}, using defaults", path);
            AppConfig::default()
        };

        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = env("CAREER_CALENDAR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env("CAREER_CALENDAR_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid CAREER_CALENDAR_PORT: {}", port))?;
        }
        if let Some(origin) = env("CAREER_CALENDAR_CORS_ORIGIN") {
            self.server.cors_origin = origin;
        }
        if let Some(week_start) = env("CAREER_CALENDAR_WEEK_START") {
            self.calendar.week_start = week_start;
        }
        if let Some(limit) = env("CAREER_CALENDAR_MAX_VISIBLE_EVENTS") {
            self.calendar.max_visible_events = limit
                .parse()
                .with_context(|| format!("Invalid CAREER_CALENDAR_MAX_VISIBLE_EVENTS: {}", limit))?;
        }
        if let Some(seed) = env("CAREER_CALENDAR_SEED_SAMPLE_EVENTS") {
            self.calendar.seed_sample_events = matches!(
                seed.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.week_start()?;
        self.socket_addr()?;
        Ok(())
    }

    /// Configured first day of the week
    pub fn week_start(&self) -> Result<Weekday> {
        self.calendar
            .week_start
            .parse::<Weekday>()
            .map_err(|_| anyhow::anyhow!("Invalid week_start: {}", self.calendar.week_start))
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.server.host, self.server.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp_dir.path().join("missing.yaml"), no_env).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.week_start().unwrap(), Weekday::Sun);
        assert_eq!(config.calendar.max_visible_events, 3);
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_load_partial_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("career_calendar.yaml");
        fs::write(&path, "calendar:\n  week_start: monday\n  seed_sample_events: true\n").unwrap();

        let config = AppConfig::load_from(&path, no_env).unwrap();

        assert_eq!(config.week_start().unwrap(), Weekday::Mon);
        assert!(config.calendar.seed_sample_events);
        assert_eq!(config.calendar.max_visible_events, 3);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("career_calendar.yaml");
        fs::write(&path, "server:\n  port: 4000\n").unwrap();
        let env: HashMap<&str, &str> = [
            ("CAREER_CALENDAR_PORT", "5000"),
            ("CAREER_CALENDAR_MAX_VISIBLE_EVENTS", "5"),
            ("CAREER_CALENDAR_SEED_SAMPLE_EVENTS", "yes"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::load_from(&path, |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.calendar.max_visible_events, 5);
        assert!(config.calendar.seed_sample_events);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("career_calendar.yaml");

        let bad_port = AppConfig::load_from(&path, |key| {
            (key == "CAREER_CALENDAR_PORT").then(|| "not-a-port".to_string())
        });
        assert!(bad_port.is_err());

        fs::write(&path, "calendar:\n  week_start: someday\n").unwrap();
        assert!(AppConfig::load_from(&path, no_env).is_err());

        fs::write(&path, "server: [not, a, map]\n").unwrap();
        assert!(AppConfig::load_from(&path, no_env).is_err());
    }
}
