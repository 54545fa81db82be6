//! Speech output adapter
//!
//! At most one utterance is active: speaking again cancels whatever is in
//! flight instead of queueing behind it.

use std::fmt;

use serde::Serialize;

use crate::Result;
use crate::config::Settings;

use super::Capability;

/// A platform voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceInfo {
    pub name: String,
    /// BCP-47 language tag
    pub lang: String,
}

impl VoiceInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Identifier of an utterance handed to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UtteranceId(u64);

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of text submitted for synthesis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    /// `None` leaves the choice to the platform
    pub voice: Option<VoiceInfo>,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// Platform speech synthesizer
pub trait SynthesisBackend {
    /// Voices the platform offers
    fn voices(&self) -> Vec<VoiceInfo>;

    /// Begin speaking an utterance
    ///
    /// # Errors
    ///
    /// Returns error if the platform rejects the utterance
    fn speak(&mut self, utterance: &Utterance) -> Result<()>;

    /// Silence the current utterance
    fn cancel(&mut self);
}

/// Lifecycle notifications from the platform synthesizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisEvent {
    Started(UtteranceId),
    Ended(UtteranceId),
    Failed(UtteranceId, String),
}

impl SynthesisEvent {
    /// Utterance the event refers to
    #[must_use]
    pub const fn utterance(&self) -> UtteranceId {
        match self {
            Self::Started(id) | Self::Ended(id) | Self::Failed(id, _) => *id,
        }
    }
}

/// State of the speech output adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerState {
    Idle,
    Speaking,
}

/// Pick a voice: a preferred-quality name, then a language match, then none
///
/// `markers` are matched case-insensitively against voice names, and
/// `lang_prefix` against the start of language tags.
#[must_use]
pub fn select_voice<'a>(
    voices: &'a [VoiceInfo],
    markers: &[String],
    lang_prefix: &str,
) -> Option<&'a VoiceInfo> {
    let lang_prefix = lang_prefix.to_lowercase();

    voices
        .iter()
        .find(|v| {
            let name = v.name.to_lowercase();
            markers.iter().any(|m| name.contains(&m.to_lowercase()))
        })
        .or_else(|| {
            voices
                .iter()
                .find(|v| v.lang.to_lowercase().starts_with(&lang_prefix))
        })
}

/// Text-to-speech adapter
pub struct SpeechOutput<B> {
    backend: Capability<B>,
    settings: Settings,
    state: SpeakerState,
    active: Option<UtteranceId>,
    next_id: u64,
}

impl<B: SynthesisBackend> SpeechOutput<B> {
    /// Create an adapter over a detected synthesizer
    #[must_use]
    pub fn new(backend: Capability<B>, settings: Settings) -> Self {
        if !backend.is_supported() {
            tracing::warn!("speech synthesis is not supported on this platform");
        }

        Self {
            backend,
            settings,
            state: SpeakerState::Idle,
            active: None,
            next_id: 1,
        }
    }

    /// Check whether a synthesizer is available
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.backend.is_supported()
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> SpeakerState {
        self.state
    }

    /// Check if the platform reports audible speech
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.state == SpeakerState::Speaking
    }

    /// Utterance handed to the backend and not yet finished
    #[must_use]
    pub const fn active(&self) -> Option<UtteranceId> {
        self.active
    }

    /// Get the underlying synthesizer if supported
    #[must_use]
    pub const fn backend(&self) -> Option<&B> {
        self.backend.handle()
    }

    /// Replace the voice parameters used for later utterances
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Speak `text`, cancelling any utterance in flight
    ///
    /// Returns the new utterance id, or `None` when unsupported or the
    /// platform rejected it.
    pub fn speak(&mut self, text: &str) -> Option<UtteranceId> {
        self.cancel();

        let Some(backend) = self.backend.handle_mut() else {
            return None;
        };

        let voices = backend.voices();
        let voice = select_voice(
            &voices,
            &self.settings.preferred_voice_markers,
            self.settings.language_prefix(),
        )
        .cloned();

        let id = UtteranceId(self.next_id);
        self.next_id += 1;

        let utterance = Utterance {
            id,
            text: text.to_string(),
            voice,
            lang: self.settings.language.clone(),
            rate: self.settings.rate,
            pitch: self.settings.pitch,
            volume: self.settings.volume,
        };

        tracing::debug!(
            %id,
            voice = utterance.voice.as_ref().map(|v| v.name.as_str()),
            text,
            "speaking"
        );

        match backend.speak(&utterance) {
            Ok(()) => {
                self.active = Some(id);
                Some(id)
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "synthesizer rejected utterance");
                None
            }
        }
    }

    /// Silence the active utterance
    pub fn cancel(&mut self) {
        let Some(id) = self.active.take() else {
            return;
        };
        if let Some(backend) = self.backend.handle_mut() {
            backend.cancel();
        }
        self.state = SpeakerState::Idle;
        tracing::debug!(%id, "utterance cancelled");
    }

    /// Handle a platform event
    ///
    /// Events for utterances other than the active one are ignored.
    pub fn handle(&mut self, event: &SynthesisEvent) {
        if self.active != Some(event.utterance()) {
            tracing::trace!(?event, "ignoring event for inactive utterance");
            return;
        }

        match event {
            SynthesisEvent::Started(_) => {
                self.state = SpeakerState::Speaking;
            }
            SynthesisEvent::Ended(_) => {
                self.state = SpeakerState::Idle;
                self.active = None;
            }
            SynthesisEvent::Failed(id, message) => {
                tracing::warn!(%id, error = %message, "synthesis error");
                self.state = SpeakerState::Idle;
                self.active = None;
            }
        }
    }
}
