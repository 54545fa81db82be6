//! TOML configuration file loading
//!
//! Supports `~/.config/vox/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct VoxConfigFile {
    /// Speech input/output configuration
    #[serde(default)]
    pub speech: SpeechFileConfig,

    /// Reminder defaults
    #[serde(default)]
    pub reminders: RemindersFileConfig,

    /// Image text extraction stub
    #[serde(default)]
    pub ocr: OcrFileConfig,
}

/// Speech configuration
#[derive(Debug, Default, Deserialize)]
pub struct SpeechFileConfig {
    /// Speak responses aloud
    pub enabled: Option<bool>,

    /// Language tag (e.g. "en-US")
    pub language: Option<String>,

    /// Synthesis rate multiplier
    pub rate: Option<f32>,

    /// Synthesis pitch multiplier
    pub pitch: Option<f32>,

    /// Synthesis volume (0.0 to 1.0)
    pub volume: Option<f32>,

    /// Substrings marking high-quality voice names (e.g. "natural")
    pub preferred_voice_markers: Option<Vec<String>>,
}

/// Reminder configuration
#[derive(Debug, Default, Deserialize)]
pub struct RemindersFileConfig {
    /// Hours between creation and due time when none is given
    pub lead_hours: Option<i64>,
}

/// Image text stub configuration
#[derive(Debug, Default, Deserialize)]
pub struct OcrFileConfig {
    /// Simulated processing delay in milliseconds
    pub delay_ms: Option<u64>,
}

/// Parse config file contents
///
/// # Errors
///
/// Returns error if the contents are not valid TOML for this schema
pub fn parse_config(content: &str) -> Result<VoxConfigFile> {
    Ok(toml::from_str(content)?)
}

/// Load the TOML config file from the standard path
///
/// Returns `VoxConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> VoxConfigFile {
    config_file_path().map_or_else(VoxConfigFile::default, |path| load_config_from(&path))
}

/// Load a TOML config file from an explicit path, falling back to defaults
pub fn load_config_from(path: &Path) -> VoxConfigFile {
    if !path.exists() {
        return VoxConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match parse_config(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                VoxConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            VoxConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/vox/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("vox").join("config.toml"))
}
