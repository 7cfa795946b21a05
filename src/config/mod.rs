//! Configuration loading and management for the sentence calculation engine.
//!
//! This module provides functionality to load the enhanced-release
//! eligibility configuration from YAML files: the offence lists the
//! classifier consults and the legislative commencement windows.
//!
//! # Example
//!
//! ```no_run
//! use sentence_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/sds_plus").unwrap();
//! println!("Loaded schedule: {}", loader.eligibility().metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CommencementWindows, EligibilityConfig, OffenceLists, OffenceMarkers, ScheduleMetadata,
};
