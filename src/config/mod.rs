//! Configuration loading and management.

mod config_data;
mod config_update;
mod extractor_kind;
mod strategy;

use std::fs;
use std::path::{Path, PathBuf};

pub use config_data::{Config, EmacsConfig};
pub use config_update::{ConfigUpdate, EmacsUpdate};
pub use extractor_kind::ExtractorKind;
pub use strategy::Strategy;

use crate::errors::Result;

/// Standard configuration file names to search for.
const CONFIG_FILES: &[&str] = &["orgtangle.toml", ".orgtangle.toml"];

/// Finds the configuration file in the given directory or its parents.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for name in CONFIG_FILES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Reads configuration from a TOML file.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let update: ConfigUpdate = toml::from_str(&content)?;
    let mut config = update.merge_into(&Config::default());

    // A relative default document is relative to the config file.
    if let (Some(doc), Some(dir)) = (config.document.as_ref(), path.parent()) {
        if doc.is_relative() {
            config.document = Some(dir.join(doc));
        }
    }

    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Reads configuration, searching from the given directory.
///
/// If no config file is found, returns the default configuration.
pub fn read_config(start_dir: &Path) -> Result<Config> {
    match find_config_file(start_dir) {
        Some(path) => read_config_file(&path),
        None => Ok(Config::default()),
    }
}
