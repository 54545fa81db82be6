//! Speech input adapter
//!
//! Wraps a platform speech recognizer. Only finalized result segments are
//! committed to the session transcript; interim segments are dropped. The
//! transcript is published once, when the session ends.

use crate::Result;

use super::Capability;

/// Platform speech recognizer
pub trait RecognitionBackend {
    /// Begin a recognition session in `language`
    ///
    /// # Errors
    ///
    /// Returns error if the platform refuses to start
    fn start(&mut self, language: &str) -> Result<()>;

    /// End the current session
    ///
    /// Also called after the platform reports an end or an error, so the
    /// next `start` begins from a released session.
    fn stop(&mut self);
}

/// One recognized segment of speech
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSegment {
    pub text: String,
    /// Marked stable by the platform
    pub is_final: bool,
}

impl ResultSegment {
    /// A finalized segment
    #[must_use]
    pub fn finalized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }

    /// An interim segment
    #[must_use]
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }
}

/// Lifecycle notifications from the platform recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Newly recognized segments
    Results(Vec<ResultSegment>),
    /// Platform-reported failure
    Error(String),
    /// Natural end of input
    End,
}

/// State of the speech input adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Idle,
    Listening,
}

/// Speech-to-text adapter
pub struct SpeechInput<B> {
    backend: Capability<B>,
    language: String,
    state: ListenerState,
    transcript: String,
}

impl<B: RecognitionBackend> SpeechInput<B> {
    /// Create an adapter over a detected recognizer
    #[must_use]
    pub fn new(backend: Capability<B>, language: impl Into<String>) -> Self {
        if !backend.is_supported() {
            tracing::warn!("speech recognition is not supported on this platform");
        }

        Self {
            backend,
            language: language.into(),
            state: ListenerState::Idle,
            transcript: String::new(),
        }
    }

    /// Check whether a recognizer is available
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.backend.is_supported()
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> ListenerState {
        self.state
    }

    /// Check if a session is in progress
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.state == ListenerState::Listening
    }

    /// Finalized text of the current or most recent session
    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Get the underlying recognizer if supported
    #[must_use]
    pub const fn backend(&self) -> Option<&B> {
        self.backend.handle()
    }

    /// Change the language used by later sessions
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// Start a session, clearing the previous transcript
    ///
    /// Ignored when already listening or unsupported. Returns whether a new
    /// session started.
    pub fn start(&mut self) -> bool {
        if self.state == ListenerState::Listening {
            tracing::trace!("already listening");
            return false;
        }
        let Some(backend) = self.backend.handle_mut() else {
            return false;
        };

        self.transcript.clear();
        match backend.start(&self.language) {
            Ok(()) => {
                self.state = ListenerState::Listening;
                tracing::debug!(language = %self.language, "listening");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "recognizer failed to start");
                false
            }
        }
    }

    /// Stop the session, returning its transcript
    ///
    /// The finalized text of a session is published exactly once, here or
    /// on [`RecognitionEvent::End`], whichever comes first.
    #[must_use = "the returned transcript is the command to run"]
    pub fn stop(&mut self) -> Option<String> {
        if !self.release() {
            return None;
        }

        let transcript = self.transcript.trim();
        if transcript.is_empty() {
            return None;
        }
        tracing::debug!(transcript, "session transcript");
        Some(transcript.to_string())
    }

    /// Start when idle, stop when listening
    ///
    /// Returns the transcript of a session it stopped.
    #[must_use = "the returned transcript is the command to run"]
    pub fn toggle(&mut self) -> Option<String> {
        if self.is_listening() {
            self.stop()
        } else {
            self.start();
            None
        }
    }

    /// Release the backend session; false when none was running
    fn release(&mut self) -> bool {
        if self.state == ListenerState::Idle {
            return false;
        }
        if let Some(backend) = self.backend.handle_mut() {
            backend.stop();
        }
        self.state = ListenerState::Idle;
        tracing::debug!("stopped listening");
        true
    }

    /// Handle a platform event
    ///
    /// Finalized segments accumulate while listening. The session transcript
    /// is returned once, when the platform ends the session.
    pub fn handle(&mut self, event: RecognitionEvent) -> Option<String> {
        match event {
            RecognitionEvent::Results(segments) => {
                if !self.is_listening() {
                    tracing::trace!("ignoring results outside a session");
                    return None;
                }
                for segment in segments.iter().filter(|s| s.is_final) {
                    self.transcript.push_str(&segment.text);
                }
                None
            }
            RecognitionEvent::Error(message) => {
                // No retry: the user has to start again
                tracing::warn!(error = %message, "recognition error");
                self.release();
                self.transcript.clear();
                None
            }
            RecognitionEvent::End => {
                tracing::debug!("recognition ended");
                self.stop()
            }
        }
    }
}
