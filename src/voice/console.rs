//! Terminal speech backends
//!
//! Typed lines stand in for recognized speech and spoken output is written to
//! stdout. Synthesis lifecycle events are delivered over a channel the same
//! way a platform would deliver them asynchronously.

use tokio::sync::mpsc;

use crate::{Error, Result};

use super::{RecognitionBackend, SynthesisBackend, SynthesisEvent, Utterance, VoiceInfo};

/// Recognizer fed by typed lines
#[derive(Debug, Default)]
pub struct ConsoleRecognition {
    sessions: usize,
    active: bool,
}

impl ConsoleRecognition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions started
    #[must_use]
    pub const fn sessions(&self) -> usize {
        self.sessions
    }
}

impl RecognitionBackend for ConsoleRecognition {
    fn start(&mut self, language: &str) -> Result<()> {
        if self.active {
            return Err(Error::Recognition("session already active".to_string()));
        }
        self.active = true;
        self.sessions += 1;
        tracing::trace!(language, session = self.sessions, "console recognition started");
        Ok(())
    }

    fn stop(&mut self) {
        self.active = false;
    }
}

/// Synthesizer that prints utterances
pub struct ConsoleSynthesis {
    voices: Vec<VoiceInfo>,
    events: mpsc::UnboundedSender<SynthesisEvent>,
}

impl ConsoleSynthesis {
    /// Create a synthesizer reporting lifecycle events on `events`
    #[must_use]
    pub fn new(events: mpsc::UnboundedSender<SynthesisEvent>) -> Self {
        Self {
            voices: vec![VoiceInfo::new("Terminal", "en-US")],
            events,
        }
    }

    /// Replace the advertised voices
    #[must_use]
    pub fn with_voices(mut self, voices: Vec<VoiceInfo>) -> Self {
        self.voices = voices;
        self
    }

    fn emit(&self, event: SynthesisEvent) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| Error::Synthesis("event receiver dropped".to_string()))
    }
}

impl SynthesisBackend for ConsoleSynthesis {
    fn voices(&self) -> Vec<VoiceInfo> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        self.emit(SynthesisEvent::Started(utterance.id))?;
        println!("🔊 {}", utterance.text);
        self.emit(SynthesisEvent::Ended(utterance.id))
    }

    fn cancel(&mut self) {
        // Printed output cannot be taken back
    }
}
