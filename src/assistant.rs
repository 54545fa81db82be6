//! Voice command pipeline
//!
//! Transcript → interpreter → store mutation → spoken response. The
//! [`Assistant`] owns the state, both speech adapters and the
//! last-interaction slot; nothing else holds them.

use std::path::Path;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::Result;
use crate::config::Settings;
use crate::interpreter::{Interpretation, Interpreter};
use crate::store::AppState;
use crate::view::Action;
use crate::voice::{
    Capability, RecognitionBackend, RecognitionEvent, SpeechInput, SpeechOutput,
    SynthesisBackend, SynthesisEvent,
};

/// The most recent voice turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoiceInteraction {
    pub listening: bool,
    pub processing: bool,
    pub last_transcript: Option<String>,
    pub last_response: Option<String>,
}

/// Voice assistant session
pub struct Assistant<R, S> {
    state: AppState,
    interpreter: Interpreter,
    input: SpeechInput<R>,
    output: SpeechOutput<S>,
    interaction: VoiceInteraction,
    settings: Settings,
}

/// Current wall-clock time
fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<R: RecognitionBackend, S: SynthesisBackend> Assistant<R, S> {
    /// Create a session over detected speech capabilities
    ///
    /// # Errors
    ///
    /// Returns error if the settings are invalid or the interpreter cannot
    /// be built
    pub fn new(settings: Settings, recognition: Capability<R>, synthesis: Capability<S>) -> Result<Self> {
        settings.validate()?;

        let interpreter = Interpreter::new(&settings)?;
        let input = SpeechInput::new(recognition, settings.language.clone());
        let output = SpeechOutput::new(synthesis, settings.clone());

        tracing::info!(
            recognition = input.is_supported(),
            synthesis = output.is_supported(),
            language = %settings.language,
            "assistant ready"
        );

        Ok(Self {
            state: AppState::new(),
            interpreter,
            input,
            output,
            interaction: VoiceInteraction::default(),
            settings,
        })
    }

    /// Get the application state
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Get the last voice turn
    #[must_use]
    pub const fn interaction(&self) -> &VoiceInteraction {
        &self.interaction
    }

    /// Get the speech input adapter
    #[must_use]
    pub const fn input(&self) -> &SpeechInput<R> {
        &self.input
    }

    /// Get the speech output adapter
    #[must_use]
    pub const fn output(&self) -> &SpeechOutput<S> {
        &self.output
    }

    /// Get the current settings
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Notices for capabilities the platform lacks
    #[must_use]
    pub fn notices(&self) -> Vec<&'static str> {
        let mut notices = Vec::new();
        if !self.input.is_supported() {
            notices.push("Speech recognition is not supported here; voice input is disabled.");
        }
        if !self.output.is_supported() {
            notices.push("Speech synthesis is not supported here; responses are shown only.");
        }
        notices
    }

    /// Replace the settings used by synthesis and later commands
    ///
    /// # Errors
    ///
    /// Returns error if the new settings are invalid
    pub fn update_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        self.interpreter = Interpreter::new(&settings)?;
        self.input.set_language(settings.language.clone());
        self.output.update_settings(settings.clone());
        if !settings.voice_enabled {
            self.output.cancel();
        }
        self.settings = settings;
        tracing::info!("settings updated");
        Ok(())
    }

    /// Start listening (no-op when already listening or unsupported)
    pub fn start_listening(&mut self) {
        if self.input.start() {
            self.interaction.last_transcript = None;
        }
        self.sync_listening();
    }

    /// Stop listening, running the command spoken in the session
    ///
    /// # Errors
    ///
    /// Returns error if applying the command's mutation fails
    pub fn stop_listening(&mut self) -> Result<Option<Interpretation>> {
        self.stop_listening_at(local_now())
    }

    /// [`Self::stop_listening`] with an explicit clock
    ///
    /// # Errors
    ///
    /// Returns error if applying the command's mutation fails
    pub fn stop_listening_at(&mut self, now: NaiveDateTime) -> Result<Option<Interpretation>> {
        let transcript = self.input.stop();
        self.sync_listening();
        self.run_transcript(transcript, now)
    }

    /// Toggle listening, as the hotkey does
    ///
    /// # Errors
    ///
    /// Returns error if stopping runs a command whose mutation fails
    pub fn toggle_listening(&mut self) -> Result<Option<Interpretation>> {
        if self.input.is_listening() {
            self.stop_listening()
        } else {
            self.start_listening();
            Ok(None)
        }
    }

    fn sync_listening(&mut self) {
        self.interaction.listening = self.input.is_listening();
    }

    /// Handle a recognizer event, running the command when the session ends
    ///
    /// # Errors
    ///
    /// Returns error if applying the command's mutation fails
    pub fn on_recognition(&mut self, event: RecognitionEvent) -> Result<Option<Interpretation>> {
        self.on_recognition_at(event, local_now())
    }

    /// [`Self::on_recognition`] with an explicit clock
    ///
    /// # Errors
    ///
    /// Returns error if applying the command's mutation fails
    pub fn on_recognition_at(
        &mut self,
        event: RecognitionEvent,
        now: NaiveDateTime,
    ) -> Result<Option<Interpretation>> {
        let transcript = self.input.handle(event);
        self.sync_listening();
        self.run_transcript(transcript, now)
    }

    fn run_transcript(
        &mut self,
        transcript: Option<String>,
        now: NaiveDateTime,
    ) -> Result<Option<Interpretation>> {
        match transcript {
            Some(transcript) => self.process_command_at(&transcript, now).map(Some),
            None => Ok(None),
        }
    }

    /// Handle a synthesizer event
    pub fn on_synthesis(&mut self, event: &SynthesisEvent) {
        self.output.handle(event);
    }

    /// Interpret a transcript, apply its mutation and speak the response
    ///
    /// # Errors
    ///
    /// Returns error if applying the mutation fails
    pub fn process_command(&mut self, transcript: &str) -> Result<Interpretation> {
        self.process_command_at(transcript, local_now())
    }

    /// [`Self::process_command`] with an explicit clock
    ///
    /// # Errors
    ///
    /// Returns error if applying the mutation fails
    pub fn process_command_at(&mut self, transcript: &str, now: NaiveDateTime) -> Result<Interpretation> {
        self.interaction.processing = true;
        self.interaction.last_transcript = Some(transcript.to_string());

        let interpretation = self.interpreter.interpret(transcript, &self.state, now);
        tracing::info!(
            intent = interpretation.intent.as_str(),
            mutates = interpretation.mutation.is_some(),
            "command interpreted"
        );

        if let Some(mutation) = interpretation.mutation.clone() {
            if let Err(e) = self.state.apply(mutation) {
                self.interaction.processing = false;
                return Err(e);
            }
        }

        self.interaction.last_response = Some(interpretation.response.clone());
        self.speak(&interpretation.response);
        self.interaction.processing = false;

        Ok(interpretation)
    }

    /// Apply a view action through the shared mutation path
    ///
    /// # Errors
    ///
    /// Returns error if the action is invalid or refers to an unknown id
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        self.dispatch_at(action, local_now())
    }

    /// [`Self::dispatch`] with an explicit clock
    ///
    /// # Errors
    ///
    /// Returns error if the action is invalid or refers to an unknown id
    pub fn dispatch_at(&mut self, action: Action, now: NaiveDateTime) -> Result<()> {
        let mutation = action.into_mutation(&self.state, now, self.settings.reminder_lead())?;
        self.state.apply(mutation)
    }

    /// Run the image text stub and speak what it returns
    ///
    /// # Errors
    ///
    /// Returns error if the file is not an accepted image
    pub async fn ingest_image(&mut self, path: &Path) -> Result<String> {
        self.interaction.processing = true;
        let result = crate::ocr::extract_text(path, self.settings.ocr_delay()).await;
        self.interaction.processing = false;

        let text = result?;
        self.interaction.last_response = Some(text.clone());
        self.speak(&text);
        Ok(text)
    }

    /// Speak `text` unless voice responses are turned off
    fn speak(&mut self, text: &str) {
        if self.settings.voice_enabled {
            self.output.speak(text);
        }
    }

    /// Silence any response in progress
    pub fn cancel_speech(&mut self) {
        self.output.cancel();
    }
}
