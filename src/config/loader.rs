//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! enhanced-release eligibility configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{CommencementWindows, EligibilityConfig, OffenceLists, ScheduleMetadata};

/// Loads and provides access to the eligibility configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// assembles them into an [`EligibilityConfig`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/sds_plus/
/// ├── schedule.yaml      # Schedule metadata
/// ├── offence_lists.yaml # Offence lists A-D plus the legacy list
/// └── commencement.yaml  # Legislative commencement thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use sentence_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/sds_plus").unwrap();
/// let markers = loader.eligibility().markers_for("SX03001");
/// println!("list A: {}", markers.in_list_a);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EligibilityConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/sds_plus")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ScheduleMetadata>(&path.join("schedule.yaml"))?;
        let lists = Self::load_yaml::<OffenceLists>(&path.join("offence_lists.yaml"))?;
        let windows = Self::load_yaml::<CommencementWindows>(&path.join("commencement.yaml"))?;

        Ok(Self {
            config: EligibilityConfig::new(metadata, lists, windows),
        })
    }

    /// The assembled eligibility configuration.
    pub fn eligibility(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_directory_is_config_not_found() {
        match ConfigLoader::load("./does-not-exist") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("schedule.yaml"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_shipped_configuration() {
        let loader = ConfigLoader::load("./config/sds_plus").unwrap();
        let config = loader.eligibility();
        assert!(!config.metadata().name.is_empty());
        assert!(
            config.windows().original_window_start < config.windows().formal_commencement
        );
        assert!(config.markers_for("SX03001").in_list_a);
    }
}
