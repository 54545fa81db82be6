//! Vox - a voice assistant for notes and reminders
//!
//! This library provides the core of the assistant:
//! - Speech input and output adapters over platform capabilities
//! - Keyword command interpretation
//! - In-memory notes and reminders
//! - Text views and user action dispatch
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  transcript  ┌──────────────┐  mutation  ┌──────────────┐
//! │ Speech Input │─────────────▶│ Interpreter  │───────────▶│   AppState   │
//! └──────────────┘              └──────┬───────┘            └──────▲───────┘
//!                                      │ response                  │ Action
//!                               ┌──────▼───────┐            ┌──────┴───────┐
//!                               │ Speech Output│            │    Views     │
//!                               └──────────────┘            └──────────────┘
//! ```

pub mod assistant;
pub mod config;
pub mod error;
pub mod hotkey;
pub mod interpreter;
pub mod ocr;
pub mod store;
pub mod view;
pub mod voice;

pub use assistant::{Assistant, VoiceInteraction};
pub use config::{Config, Settings};
pub use error::{Error, Result};
pub use interpreter::{Intent, Interpretation, Interpreter};
pub use store::{AppState, Mutation, Note, NoteId, Reminder, ReminderId};
pub use view::Action;
pub use voice::{Capability, SpeechInput, SpeechOutput};
