//! TOML configuration.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [extraction]
//! remove_origin = true
//!
//! [extraction.names]
//! dead_load = ["Dead Load", "Self Weight"]
//!
//! [loads]
//! snow_load_per_area = 25.0
//! building_height = 12.0
//! ```
//!
//! Every table and key is optional.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use takeoff_core::loads::LoadInputs;
use takeoff_core::quantities::QuantityNames;

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "TAKEOFF_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TakeoffConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Design inputs used when the command line gives none
    #[serde(default)]
    pub loads: LoadInputs,
}

impl TakeoffConfig {
    /// Load an explicit file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// `TAKEOFF_CONFIG` if set, else `./config/takeoff.toml` if present,
    /// else defaults.
    pub fn discover() -> Result<Self> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = env::current_dir()
            .context("reading current directory")?
            .join("config")
            .join("takeoff.toml");
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// `--config` wins over discovery
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::discover(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// How quantities are read from the model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub remove_origin: bool,
    #[serde(default)]
    pub names: QuantityNames,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TakeoffConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(!config.extraction.remove_origin);
        assert_eq!(config.extraction.names, QuantityNames::default());
        assert_eq!(config.loads, LoadInputs::default());
    }

    #[test]
    fn test_load_from_temp_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [logging]
            level = "debug"

            [extraction]
            remove_origin = true

            [extraction.names]
            dead_load = ["Self Weight"]

            [loads]
            snow_load_per_area = 25.0
            building_height = 12.0
            "#
        )
        .unwrap();

        let config = TakeoffConfig::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.extraction.remove_origin);
        assert_eq!(config.extraction.names.dead_load, vec!["Self Weight".to_string()]);
        // lists left out keep their defaults
        assert_eq!(config.extraction.names.uplift, QuantityNames::default().uplift);
        assert_eq!(config.loads.snow_load_per_area, 25.0);
        assert_eq!(config.loads.wind_force, 0.0);
    }

    #[test]
    fn test_explicit_path_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();
        let config = TakeoffConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging\nlevel = 3").unwrap();
        let err = TakeoffConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }

    #[test]
    fn test_missing_file() {
        let err = TakeoffConfig::from_file("/nonexistent/takeoff.toml").unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
