//! Codec settings persistence.
//!
//! Settings live in a small JSON file chosen by the host application.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::Result;
use super::hash::HashAlgorithm;

/// Persisted codec settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecSettings {
    /// Digest algorithm for newly encoded fields and for change detection.
    /// Fields encoded under another algorithm decode as changed.
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,
}

/// Loads settings from `path`; returns defaults if the file is missing or corrupt.
pub fn load_settings(path: &Path) -> CodecSettings {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("ignoring corrupt settings file {}: {e}", path.display());
            CodecSettings::default()
        }),
        Err(_) => CodecSettings::default(),
    }
}

/// Saves settings to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`crate::AutoankiError::Io`] if the directory or file cannot be
/// written, or [`crate::AutoankiError::Json`] if serialization fails.
pub fn save_settings(path: &Path, settings: &CodecSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}
