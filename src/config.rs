//! Dashboard configuration.
//! Reads `meteor-dash.json` from the current directory or the path in the
//! `METEOR_DASH_CONFIG` env var; every field falls back to a built-in default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "METEOR_DASH_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "meteor-dash.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// File loaded at startup, if any.
    #[serde(default)]
    pub data_path: Option<PathBuf>,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

/// Initial values and slider ranges of the three controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    #[serde(default = "default_mass_min")]
    pub mass_min: f64,
    #[serde(default = "default_year_range")]
    pub year_range: (i32, i32),
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_mass_bounds")]
    pub mass_bounds: (f64, f64),
    #[serde(default = "default_year_bounds")]
    pub year_bounds: (i32, i32),
    #[serde(default = "default_top_n_bounds")]
    pub top_n_bounds: (usize, usize),
}

fn default_histogram_bins() -> usize {
    40
}

fn default_mass_min() -> f64 {
    1000.0
}

fn default_year_range() -> (i32, i32) {
    (1850, 2025)
}

fn default_top_n() -> usize {
    10
}

fn default_mass_bounds() -> (f64, f64) {
    (1.0, 1.0e7)
}

fn default_year_bounds() -> (i32, i32) {
    (1400, 2025)
}

fn default_top_n_bounds() -> (usize, usize) {
    (5, 30)
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            mass_min: default_mass_min(),
            year_range: default_year_range(),
            top_n: default_top_n(),
            mass_bounds: default_mass_bounds(),
            year_bounds: default_year_bounds(),
            top_n_bounds: default_top_n_bounds(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            controls: ControlsConfig::default(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

impl DashboardConfig {
    /// Load from `METEOR_DASH_CONFIG`, then `./meteor-dash.json`, then defaults.
    ///
    /// A path named by the env var must exist; the default file is optional.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::from_file(default_path);
        }
        log::debug!("No {DEFAULT_CONFIG_FILE} found, using built-in defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.controls;
        let (mass_lo, mass_hi) = c.mass_bounds;
        if !(mass_lo > 0.0 && mass_lo < mass_hi && mass_hi.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "mass_bounds must satisfy 0 < low < high, got ({mass_lo}, {mass_hi})"
            )));
        }
        if !(mass_lo..=mass_hi).contains(&c.mass_min) {
            return Err(ConfigError::Invalid(format!(
                "mass_min {} is outside mass_bounds",
                c.mass_min
            )));
        }

        let (year_lo, year_hi) = c.year_bounds;
        let (year_min, year_max) = c.year_range;
        if year_lo > year_hi {
            return Err(ConfigError::Invalid("year_bounds are inverted".into()));
        }
        if year_min > year_max || year_min < year_lo || year_max > year_hi {
            return Err(ConfigError::Invalid(format!(
                "year_range ({year_min}, {year_max}) must be ordered and within year_bounds"
            )));
        }

        let (top_lo, top_hi) = c.top_n_bounds;
        if top_lo == 0 || top_lo > top_hi || !(top_lo..=top_hi).contains(&c.top_n) {
            return Err(ConfigError::Invalid(format!(
                "top_n {} must lie in top_n_bounds ({top_lo}, {top_hi}) with a lower bound >= 1",
                c.top_n
            )));
        }

        if self.histogram_bins == 0 {
            return Err(ConfigError::Invalid("histogram_bins must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_dashboard_controls() {
        let config = DashboardConfig::default();
        assert_eq!(config.controls.mass_min, 1000.0);
        assert_eq!(config.controls.year_range, (1850, 2025));
        assert_eq!(config.controls.top_n, 10);
        assert_eq!(config.controls.year_bounds, (1400, 2025));
        assert_eq!(config.controls.top_n_bounds, (5, 30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let file = write_config(r#"{ "data_path": "landings.csv", "controls": { "top_n": 20 } }"#);
        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("landings.csv")));
        assert_eq!(config.controls.top_n, 20);
        assert_eq!(config.controls.mass_min, 1000.0);
        assert_eq!(config.histogram_bins, 40);
    }

    #[test]
    fn out_of_bounds_default_is_rejected() {
        let file = write_config(r#"{ "controls": { "year_range": [1300, 2025] } }"#);
        assert!(matches!(
            DashboardConfig::from_file(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn zero_bins_are_rejected() {
        let config = DashboardConfig {
            histogram_bins: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let file = write_config("{ controls: ");
        assert!(matches!(
            DashboardConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
