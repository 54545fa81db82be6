//! Speech adapter tests
//!
//! Exercises the input and output state machines against recording fakes

use vox_assistant::Settings;
use vox_assistant::voice::{
    Capability, ListenerState, RecognitionEvent, ResultSegment, SpeakerState, SpeechInput,
    SpeechOutput, SynthesisEvent, VoiceInfo,
};

mod common;

use common::{FakeRecognizer, FakeSynthesizer};

fn input() -> SpeechInput<FakeRecognizer> {
    SpeechInput::new(Capability::Supported(FakeRecognizer::default()), "en-US")
}

fn output() -> SpeechOutput<FakeSynthesizer> {
    SpeechOutput::new(
        Capability::Supported(FakeSynthesizer::default()),
        Settings::default(),
    )
}

#[test]
fn test_input_starts_idle() {
    let input = input();
    assert!(input.is_supported());
    assert_eq!(input.state(), ListenerState::Idle);
    assert_eq!(input.transcript(), "");
}

#[test]
fn test_start_ignored_while_listening() {
    let mut input = input();

    assert!(input.start());
    assert!(!input.start());
    assert_eq!(input.state(), ListenerState::Listening);
    assert_eq!(input.backend().unwrap().starts, 1);
    assert_eq!(input.backend().unwrap().languages, ["en-US"]);
}

#[test]
fn test_stop_returns_to_idle() {
    let mut input = input();
    input.start();
    assert!(input.stop().is_none());

    assert_eq!(input.state(), ListenerState::Idle);
    assert_eq!(input.backend().unwrap().stops, 1);

    // Stopping again does nothing
    assert!(input.stop().is_none());
    assert_eq!(input.backend().unwrap().stops, 1);
}

#[test]
fn test_toggle() {
    let mut input = input();
    assert!(input.toggle().is_none());
    assert!(input.is_listening());
    assert!(input.toggle().is_none());
    assert!(!input.is_listening());
}

#[test]
fn test_interim_results_not_committed() {
    let mut input = input();
    input.start();

    let published = input.handle(RecognitionEvent::Results(vec![ResultSegment::interim(
        "take no",
    )]));
    assert!(published.is_none());
    assert_eq!(input.transcript(), "");

    input.handle(RecognitionEvent::Results(vec![
        ResultSegment::finalized("take note buy milk"),
        ResultSegment::interim(" and eggs"),
    ]));
    assert_eq!(input.transcript(), "take note buy milk");

    let published = input.handle(RecognitionEvent::End);
    assert_eq!(published.as_deref(), Some("take note buy milk"));
}

#[test]
fn test_session_transcript_published_once_at_end() {
    let mut input = input();
    input.start();

    let first = input.handle(RecognitionEvent::Results(vec![ResultSegment::finalized(
        "remind me",
    )]));
    let second = input.handle(RecognitionEvent::Results(vec![ResultSegment::finalized(
        " to stretch",
    )]));
    assert!(first.is_none());
    assert!(second.is_none());

    let published = input.handle(RecognitionEvent::End);
    assert_eq!(published.as_deref(), Some("remind me to stretch"));

    // A second end for the same session publishes nothing
    assert!(input.handle(RecognitionEvent::End).is_none());
}

#[test]
fn test_stop_publishes_session_transcript() {
    let mut input = input();
    input.start();
    input.handle(RecognitionEvent::Results(vec![ResultSegment::finalized(
        "what time is it",
    )]));

    assert_eq!(input.stop().as_deref(), Some("what time is it"));
    assert!(input.handle(RecognitionEvent::End).is_none());
}

#[test]
fn test_results_after_session_are_ignored() {
    let mut input = input();
    input.start();
    input.handle(RecognitionEvent::Results(vec![ResultSegment::finalized(
        "take note milk",
    )]));
    input.handle(RecognitionEvent::End);

    input.handle(RecognitionEvent::Results(vec![ResultSegment::finalized(
        " late",
    )]));
    assert_eq!(input.transcript(), "take note milk");
    assert!(input.handle(RecognitionEvent::End).is_none());
}

#[test]
fn test_empty_session_publishes_nothing() {
    let mut input = input();
    input.start();
    input.handle(RecognitionEvent::Results(vec![ResultSegment::finalized("   ")]));

    assert!(input.handle(RecognitionEvent::End).is_none());
    assert!(!input.is_listening());
}

#[test]
fn test_restart_clears_transcript() {
    let mut input = input();
    input.start();
    input.handle(RecognitionEvent::Results(vec![ResultSegment::finalized(
        "first session",
    )]));
    let published = input.handle(RecognitionEvent::End);
    assert_eq!(published.as_deref(), Some("first session"));
    assert_eq!(input.state(), ListenerState::Idle);
    assert_eq!(input.transcript(), "first session");

    input.start();
    assert_eq!(input.transcript(), "");
    input.handle(RecognitionEvent::Results(vec![ResultSegment::finalized(
        "second",
    )]));
    assert_eq!(input.handle(RecognitionEvent::End).as_deref(), Some("second"));
}

#[test]
fn test_error_forces_idle_without_retry() {
    let mut input = input();
    input.start();
    input.handle(RecognitionEvent::Results(vec![ResultSegment::finalized(
        "take note half",
    )]));

    let published = input.handle(RecognitionEvent::Error("network".to_string()));
    assert!(published.is_none());
    assert_eq!(input.state(), ListenerState::Idle);
    assert_eq!(input.backend().unwrap().starts, 1);
    assert!(input.handle(RecognitionEvent::End).is_none());
}

#[test]
fn test_failed_start_stays_idle() {
    let backend = FakeRecognizer {
        fail_start: true,
        ..FakeRecognizer::default()
    };
    let mut input = SpeechInput::new(Capability::Supported(backend), "en-US");

    assert!(!input.start());
    assert_eq!(input.state(), ListenerState::Idle);
}

#[test]
fn test_unsupported_input_is_inert() {
    let mut input: SpeechInput<FakeRecognizer> = SpeechInput::new(Capability::detect(None), "en-US");

    assert!(!input.is_supported());
    assert!(!input.start());
    assert!(input.stop().is_none());
    assert_eq!(input.state(), ListenerState::Idle);
    assert!(input
        .handle(RecognitionEvent::Results(vec![ResultSegment::finalized("hi")]))
        .is_none());
    assert!(input.handle(RecognitionEvent::End).is_none());
}

#[test]
fn test_speak_reports_status_from_events() {
    let mut output = output();
    let id = output.speak("hello").unwrap();

    assert_eq!(output.active(), Some(id));
    assert_eq!(output.state(), SpeakerState::Idle);

    output.handle(&SynthesisEvent::Started(id));
    assert!(output.is_speaking());

    output.handle(&SynthesisEvent::Ended(id));
    assert_eq!(output.state(), SpeakerState::Idle);
    assert!(output.active().is_none());
}

#[test]
fn test_second_speak_cancels_first() {
    let mut output = output();
    let first = output.speak("first").unwrap();
    output.handle(&SynthesisEvent::Started(first));

    let second = output.speak("second").unwrap();

    let backend = output.backend().unwrap();
    assert_eq!(backend.cancels, 1);
    assert_eq!(backend.playing, Some(second));
    assert_eq!(backend.texts(), ["first", "second"]);
    assert_eq!(output.active(), Some(second));
    assert_ne!(first, second);
}

#[test]
fn test_stale_end_does_not_silence_new_utterance() {
    let mut output = output();
    let first = output.speak("first").unwrap();
    let second = output.speak("second").unwrap();
    output.handle(&SynthesisEvent::Started(second));

    // The cancelled utterance reports its end late
    output.handle(&SynthesisEvent::Ended(first));
    assert!(output.is_speaking());
    assert_eq!(output.active(), Some(second));
}

#[test]
fn test_error_forces_not_speaking() {
    let mut output = output();
    let id = output.speak("hello").unwrap();
    output.handle(&SynthesisEvent::Started(id));
    output.handle(&SynthesisEvent::Failed(id, "interrupted".to_string()));

    assert_eq!(output.state(), SpeakerState::Idle);
    assert!(output.active().is_none());
}

#[test]
fn test_cancel() {
    let mut output = output();
    let id = output.speak("long answer").unwrap();
    output.handle(&SynthesisEvent::Started(id));

    output.cancel();
    assert!(!output.is_speaking());
    assert_eq!(output.backend().unwrap().cancels, 1);

    // Nothing active, nothing to cancel
    output.cancel();
    assert_eq!(output.backend().unwrap().cancels, 1);
}

#[test]
fn test_rejected_utterance() {
    let backend = FakeSynthesizer {
        fail: true,
        ..FakeSynthesizer::default()
    };
    let mut output = SpeechOutput::new(Capability::Supported(backend), Settings::default());

    assert!(output.speak("hello").is_none());
    assert!(output.active().is_none());
}

#[test]
fn test_unsupported_output_is_inert() {
    let mut output: SpeechOutput<FakeSynthesizer> =
        SpeechOutput::new(Capability::Unsupported, Settings::default());

    assert!(!output.is_supported());
    assert!(output.speak("hello").is_none());
    assert_eq!(output.state(), SpeakerState::Idle);
}

#[test]
fn test_utterance_carries_voice_and_settings() {
    let backend = FakeSynthesizer::with_voices(vec![
        VoiceInfo::new("Daniel", "en-GB"),
        VoiceInfo::new("Samantha (Enhanced)", "en-US"),
    ]);
    let settings = Settings {
        rate: 1.5,
        ..Settings::default()
    };
    let mut output = SpeechOutput::new(Capability::Supported(backend), settings);
    output.speak("hi");

    let utterance = &output.backend().unwrap().spoken[0];
    assert_eq!(
        utterance.voice.as_ref().map(|v| v.name.as_str()),
        Some("Samantha (Enhanced)")
    );
    assert_eq!(utterance.lang, "en-US");
    assert!((utterance.rate - 1.5).abs() < f32::EPSILON);
}

#[test]
fn test_language_voice_used_without_marker_voice() {
    let backend = FakeSynthesizer::with_voices(vec![
        VoiceInfo::new("Thomas", "fr-FR"),
        VoiceInfo::new("Daniel", "en-GB"),
    ]);
    let mut output = SpeechOutput::new(Capability::Supported(backend), Settings::default());
    output.speak("hi");

    let utterance = &output.backend().unwrap().spoken[0];
    assert_eq!(utterance.voice.as_ref().map(|v| v.name.as_str()), Some("Daniel"));
}

#[test]
fn test_platform_default_voice_when_nothing_matches() {
    let backend = FakeSynthesizer::with_voices(vec![VoiceInfo::new("Anna", "de-DE")]);
    let mut output = SpeechOutput::new(Capability::Supported(backend), Settings::default());
    output.speak("hallo");

    assert!(output.backend().unwrap().spoken[0].voice.is_none());
}

#[test]
fn test_end_releases_backend_session() {
    let mut input = SpeechInput::new(
        Capability::Supported(vox_assistant::voice::console::ConsoleRecognition::new()),
        "en-US",
    );

    assert!(input.start());
    input.handle(RecognitionEvent::End);
    assert!(input.start());
    assert_eq!(input.backend().unwrap().sessions(), 2);
}
