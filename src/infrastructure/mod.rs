//! Infrastructure layer
//!
//! Configuration loading and logging setup.

mod config;
mod logging;

pub use config::{CONFIG_DIR, DEFAULT_JAR_PATH, JenkinsConfig, LEGACY_CONFIG_DIR};
pub use logging::init_logging;
