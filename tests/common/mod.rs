//! Shared test utilities

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use vox_assistant::voice::{
    Capability, RecognitionBackend, SynthesisBackend, Utterance, UtteranceId, VoiceInfo,
};
use vox_assistant::{Assistant, Error, Result, Settings};

/// Fixed clock: Sunday, October 18, 2026 at 3:45 PM
#[must_use]
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(15, 45, 0)
        .unwrap()
}

/// Recognizer that records calls
#[derive(Debug, Default)]
pub struct FakeRecognizer {
    pub starts: usize,
    pub stops: usize,
    pub languages: Vec<String>,
    pub fail_start: bool,
}

impl RecognitionBackend for FakeRecognizer {
    fn start(&mut self, language: &str) -> Result<()> {
        if self.fail_start {
            return Err(Error::Recognition("microphone blocked".to_string()));
        }
        self.starts += 1;
        self.languages.push(language.to_string());
        Ok(())
    }

    fn stop(&mut self) {
        self.stops += 1;
    }
}

/// Synthesizer that records utterances and the last one started
#[derive(Debug, Default)]
pub struct FakeSynthesizer {
    pub voices: Vec<VoiceInfo>,
    pub spoken: Vec<Utterance>,
    pub cancels: usize,
    pub playing: Option<UtteranceId>,
    pub fail: bool,
}

impl FakeSynthesizer {
    pub fn with_voices(voices: Vec<VoiceInfo>) -> Self {
        Self {
            voices,
            ..Self::default()
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.spoken.iter().map(|u| u.text.as_str()).collect()
    }
}

impl SynthesisBackend for FakeSynthesizer {
    fn voices(&self) -> Vec<VoiceInfo> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        if self.fail {
            return Err(Error::Synthesis("audio device busy".to_string()));
        }
        self.playing = Some(utterance.id);
        self.spoken.push(utterance.clone());
        Ok(())
    }

    fn cancel(&mut self) {
        self.cancels += 1;
        self.playing = None;
    }
}

pub type TestAssistant = Assistant<FakeRecognizer, FakeSynthesizer>;

/// Assistant with both capabilities supported
pub fn assistant() -> TestAssistant {
    assistant_with(Settings::default())
}

/// Assistant with both capabilities supported and custom settings
pub fn assistant_with(settings: Settings) -> TestAssistant {
    Assistant::new(
        settings,
        Capability::Supported(FakeRecognizer::default()),
        Capability::Supported(FakeSynthesizer::default()),
    )
    .expect("failed to create test assistant")
}

/// Texts the assistant has spoken so far
pub fn spoken(assistant: &TestAssistant) -> Vec<String> {
    assistant
        .output()
        .backend()
        .expect("synthesis supported")
        .texts()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}
