//! Configuration for the helper function table.
//!
//! The only tunable today is the time zone used by `dateFormat`: it decides
//! which wall clock "now" is read from and how timestamps without an explicit
//! offset (`"2024-05-01 10:00:00"`) are interpreted.
//!
//! ## Sources
//!
//! 1. **Config file**: `$FUNCMAP_CONFIG`, or `config.toml` in the platform
//!    config directory (`~/.config/funcmap/config.toml` on Linux)
//! 2. **Environment**: `FUNCMAP_TIMEZONE` overrides the file's zone
//!
//! ## Example Configuration File
//!
//! ```toml
//! [time]
//! zone = "+05:30"   # or "utc" (default), "local"
//! ```
//!
//! ```rust
//! use funcmap_core::{Config, TimeZone};
//!
//! let config = Config::from_toml_str("[time]\nzone = \"local\"\n")?;
//! assert_eq!(config.time.zone, TimeZone::Local);
//! # Ok::<(), funcmap_core::Error>(())
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone as _, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FUNCMAP_CONFIG";
/// Environment variable overriding the configured time zone.
pub const TIMEZONE_ENV: &str = "FUNCMAP_TIMEZONE";

/// Settings shared by every helper in a [`FuncMap`](crate::FuncMap).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Time handling for `dateFormat`.
    pub time: TimeConfig,
}

/// Time handling settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Zone for the current time and for timestamps without an offset.
    pub zone: TimeZone,
}

/// The zone a naive timestamp or the current time is resolved in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeZone {
    /// Coordinated Universal Time.
    #[default]
    Utc,
    /// The host's local zone.
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl TimeZone {
    /// The current wall-clock time in this zone.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.convert(&Utc::now())
    }

    /// Express an instant in this zone.
    pub fn convert(&self, instant: &DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Self::Utc => instant.fixed_offset(),
            Self::Local => instant.with_timezone(&Local).fixed_offset(),
            Self::Fixed(offset) => instant.with_timezone(offset),
        }
    }

    /// Interpret a timestamp without offset information in this zone.
    ///
    /// Returns `None` for local times that do not exist (inside a DST gap).
    /// Ambiguous local times resolve to the earlier instant.
    pub fn from_naive(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Utc => Some(naive.and_utc().fixed_offset()),
            Self::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|t| t.fixed_offset()),
            Self::Fixed(offset) => offset.from_local_datetime(naive).single(),
        }
    }
}

impl FromStr for TimeZone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "utc" | "z" | "" => return Ok(Self::Utc),
            "local" => return Ok(Self::Local),
            _ => {},
        }
        parse_offset(trimmed)
            .map(Self::Fixed)
            .ok_or_else(|| Error::Config(format!("invalid time zone {s:?}: expected utc, local, or an offset like +05:30")))
    }
}

/// Parse `+hh`, `+hhmm` or `+hh:mm` (or with `-`).
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, body) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = body.chars().filter(|&c| c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl TryFrom<String> for TimeZone {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TimeZone> for String {
    fn from(zone: TimeZone) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => f.write_str("utc"),
            Self::Local => f.write_str("local"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl Config {
    /// Load configuration from `$FUNCMAP_CONFIG` or the platform config
    /// directory, falling back to defaults when no file exists, then apply
    /// the `FUNCMAP_TIMEZONE` override.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed,
    /// or if the environment override is not a valid zone.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_path(&path)?,
            Some(path) => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Self::default()
            },
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config {}: {e}", path.display())))?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))
    }

    /// Apply the `FUNCMAP_TIMEZONE` override, if set.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(zone) = std::env::var(TIMEZONE_ENV) {
            self.time.zone = zone.parse()?;
            tracing::debug!(zone = %self.time.zone, "time zone overridden from environment");
        }
        Ok(())
    }

    fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("dev", "outfitter", "funcmap")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::io::Write;

    #[test]
    fn test_default_is_utc() {
        let config = Config::default();
        assert_eq!(config.time.zone, TimeZone::Utc);
        assert_eq!(TimeZone::Utc.now().offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_zones() {
        assert_eq!("UTC".parse::<TimeZone>().unwrap(), TimeZone::Utc);
        assert_eq!(" local ".parse::<TimeZone>().unwrap(), TimeZone::Local);
        assert_eq!(
            "+05:30".parse::<TimeZone>().unwrap(),
            TimeZone::Fixed(FixedOffset::east_opt(19_800).unwrap())
        );
        assert_eq!(
            "-0800".parse::<TimeZone>().unwrap(),
            TimeZone::Fixed(FixedOffset::west_opt(28_800).unwrap())
        );
        assert_eq!(
            "+02".parse::<TimeZone>().unwrap(),
            TimeZone::Fixed(FixedOffset::east_opt(7_200).unwrap())
        );
    }

    #[test]
    fn test_parse_zone_rejects_garbage() {
        for bad in ["Mars/Olympus", "+5", "+05:75", "+123456", "05:00"] {
            let err = bad.parse::<TimeZone>().unwrap_err();
            assert_eq!(err.category(), "config", "input {bad}");
        }
    }

    #[test]
    fn test_from_naive_fixed_offset() {
        let naive = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let zone: TimeZone = "+02:00".parse().unwrap();
        let t = zone.from_naive(&naive).unwrap();
        assert_eq!(t.to_rfc3339(), "2024-05-01T10:00:00+02:00");
        assert_eq!(
            TimeZone::Utc.from_naive(&naive).unwrap().to_rfc3339(),
            "2024-05-01T10:00:00+00:00"
        );
    }

    #[test]
    fn test_toml_roundtrip_of_fixed_zone() {
        let config = Config::from_toml_str("[time]\nzone = \"-03:00\"\n").unwrap();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("zone = \"-03:00\""));
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_from_path_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[time]\nzone = 42").unwrap();

        let err = Config::from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    proptest! {
        #[test]
        fn test_offsets_roundtrip_through_display(hours in -14i32..=14, minutes in 0i32..60) {
            let secs = hours.signum() * (hours.abs() * 3600 + minutes * 60);
            let offset = FixedOffset::east_opt(secs).unwrap();
            let zone = TimeZone::Fixed(offset);
            prop_assert_eq!(zone.to_string().parse::<TimeZone>().unwrap(), zone);
        }
    }
}
