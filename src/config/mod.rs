//! Configuration management for the voice assistant

pub mod file;

use std::time::Duration;

use serde::Serialize;

use crate::{Error, Result};

use file::VoxConfigFile;

/// Default language tag for recognition and synthesis
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Default hours between reminder creation and due time
pub const DEFAULT_REMINDER_LEAD_HOURS: i64 = 24;

/// Longest accepted reminder lead time, in hours (about a century)
pub const MAX_REMINDER_LEAD_HOURS: i64 = 24 * 365 * 100;

/// Default simulated delay of the image text stub
pub const DEFAULT_OCR_DELAY_MS: u64 = 2000;

/// Assistant configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// User-adjustable settings
    pub settings: Settings,
}

/// Settings shown in the settings panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    /// Speak responses aloud
    pub voice_enabled: bool,

    /// BCP-47 language tag used for recognition and voice selection
    pub language: String,

    /// Synthesis rate multiplier (0.1 to 10.0)
    pub rate: f32,

    /// Synthesis pitch multiplier (0.0 to 2.0)
    pub pitch: f32,

    /// Synthesis volume (0.0 to 1.0)
    pub volume: f32,

    /// Case-insensitive voice name substrings preferred over other voices
    pub preferred_voice_markers: Vec<String>,

    /// Hours until a reminder without an explicit due time is due
    pub reminder_lead_hours: i64,

    /// Simulated processing delay of the image text stub, in milliseconds
    pub ocr_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            voice_enabled: true,
            language: DEFAULT_LANGUAGE.to_string(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            preferred_voice_markers: vec!["natural".to_string(), "enhanced".to_string()],
            reminder_lead_hours: DEFAULT_REMINDER_LEAD_HOURS,
            ocr_delay_ms: DEFAULT_OCR_DELAY_MS,
        }
    }
}

impl Settings {
    /// Language prefix used for voice matching (`en` for `en-US`)
    #[must_use]
    pub fn language_prefix(&self) -> &str {
        self.language.split(['-', '_']).next().unwrap_or(&self.language)
    }

    /// Default reminder lead time, saturating for unvalidated values
    #[must_use]
    pub fn reminder_lead(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::try_hours(self.reminder_lead_hours).unwrap_or(chrono::TimeDelta::MAX)
    }

    /// Simulated image text delay
    #[must_use]
    pub const fn ocr_delay(&self) -> Duration {
        Duration::from_millis(self.ocr_delay_ms)
    }

    /// Check ranges of the synthesis parameters and lead time
    ///
    /// # Errors
    ///
    /// Returns error naming the first out-of-range field
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(Error::Config("language must not be empty".to_string()));
        }
        if !(0.1..=10.0).contains(&self.rate) {
            return Err(Error::Config(format!("rate {} outside 0.1..=10.0", self.rate)));
        }
        if !(0.0..=2.0).contains(&self.pitch) {
            return Err(Error::Config(format!("pitch {} outside 0.0..=2.0", self.pitch)));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(Error::Config(format!("volume {} outside 0.0..=1.0", self.volume)));
        }
        if !(1..=MAX_REMINDER_LEAD_HOURS).contains(&self.reminder_lead_hours) {
            return Err(Error::Config(format!(
                "reminder lead time {}h outside 1..={MAX_REMINDER_LEAD_HOURS}h",
                self.reminder_lead_hours
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from the config file and process environment
    ///
    /// # Errors
    ///
    /// Returns error if the resolved settings are out of range
    pub fn load() -> Result<Self> {
        let fc = file::load_config_file();
        Self::resolve(fc, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from a parsed file and an environment lookup
    ///
    /// Precedence is env > toml > default.
    ///
    /// # Errors
    ///
    /// Returns error if an environment value cannot be parsed or the
    /// resolved settings are out of range
    pub fn resolve<F>(fc: VoxConfigFile, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let settings = Settings {
            voice_enabled: env_parse(&env, "VOX_VOICE_ENABLED", parse_bool)?
                .or(fc.speech.enabled)
                .unwrap_or(defaults.voice_enabled),
            language: env("VOX_LANGUAGE")
                .or(fc.speech.language)
                .unwrap_or(defaults.language),
            rate: env_parse(&env, "VOX_SPEECH_RATE", |s| s.parse::<f32>().ok())?
                .or(fc.speech.rate)
                .unwrap_or(defaults.rate),
            pitch: env_parse(&env, "VOX_SPEECH_PITCH", |s| s.parse::<f32>().ok())?
                .or(fc.speech.pitch)
                .unwrap_or(defaults.pitch),
            volume: env_parse(&env, "VOX_SPEECH_VOLUME", |s| s.parse::<f32>().ok())?
                .or(fc.speech.volume)
                .unwrap_or(defaults.volume),
            preferred_voice_markers: fc
                .speech
                .preferred_voice_markers
                .map(|markers| markers.into_iter().map(|m| m.to_lowercase()).collect())
                .unwrap_or(defaults.preferred_voice_markers),
            reminder_lead_hours: env_parse(&env, "VOX_REMINDER_LEAD_HOURS", |s| s.parse::<i64>().ok())?
                .or(fc.reminders.lead_hours)
                .unwrap_or(defaults.reminder_lead_hours),
            ocr_delay_ms: env_parse(&env, "VOX_OCR_DELAY_MS", |s| s.parse::<u64>().ok())?
                .or(fc.ocr.delay_ms)
                .unwrap_or(defaults.ocr_delay_ms),
        };

        settings.validate()?;

        tracing::debug!(?settings, "resolved settings");

        Ok(Self { settings })
    }
}

/// Read and parse an environment value, rejecting unparsable input
fn env_parse<F, T, P>(env: &F, key: &str, parse: P) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    match env(key) {
        Some(raw) => parse(raw.trim())
            .map(Some)
            .ok_or_else(|| Error::Config(format!("invalid value for {key}: {raw:?}"))),
        None => Ok(None),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
