//! Speech input and output adapters
//!
//! Both adapters wrap a platform capability behind a small backend trait and
//! track its lifecycle as an explicit state machine driven by events the
//! platform delivers. Terminal backends live in [`console`].

mod capability;
pub mod console;
mod recognition;
mod synthesis;

pub use capability::Capability;
pub use recognition::{
    ListenerState, RecognitionBackend, RecognitionEvent, ResultSegment, SpeechInput,
};
pub use synthesis::{
    SpeakerState, SpeechOutput, SynthesisBackend, SynthesisEvent, Utterance, UtteranceId,
    VoiceInfo, select_voice,
};
