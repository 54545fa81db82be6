//! Voice command interpretation
//!
//! Maps a transcript to an [`Intent`], an optional [`Mutation`] and the text
//! to speak back. Matching is an ordered list of case-insensitive trigger
//! phrases; the first trigger found anywhere in the transcript decides the
//! intent, even when a later one would also match.

pub mod spoken;

use chrono::{NaiveDateTime, TimeDelta};
use regex::Regex;
use serde::Serialize;

use crate::config::Settings;
use crate::store::{AppState, Mutation};
use crate::{Error, Result};

/// Classified purpose of a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    CreateReminder,
    CreateNote,
    QueryTime,
    QueryDate,
    ListReminders,
    ReadNotes,
    Help,
    Unrecognized,
}

impl Intent {
    /// Stable name for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateReminder => "create_reminder",
            Self::CreateNote => "create_note",
            Self::QueryTime => "query_time",
            Self::QueryDate => "query_date",
            Self::ListReminders => "list_reminders",
            Self::ReadNotes => "read_notes",
            Self::Help => "help",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Commands reachable through a trigger phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    AddReminder,
    AddNote,
    Time,
    Date,
    ListReminders,
    ReadNotes,
    Help,
}

impl Command {
    const fn intent(self) -> Intent {
        match self {
            Self::AddReminder => Intent::CreateReminder,
            Self::AddNote => Intent::CreateNote,
            Self::Time => Intent::QueryTime,
            Self::Date => Intent::QueryDate,
            Self::ListReminders => Intent::ListReminders,
            Self::ReadNotes => Intent::ReadNotes,
            Self::Help => Intent::Help,
        }
    }
}

/// Trigger phrases in match order
const TRIGGERS: &[(Command, &[&str])] = &[
    (Command::AddReminder, &["add reminder", "remind me"]),
    (Command::AddNote, &["take note", "add note"]),
    (Command::Time, &["what time", "current time"]),
    (Command::Date, &["what date", "today"]),
    (Command::ListReminders, &["my reminders", "upcoming reminders"]),
    (Command::ReadNotes, &["my notes", "read notes"]),
    (Command::Help, &["help", "what can you do"]),
];

/// Asked when a reminder command carries no title
pub const REMINDER_CLARIFICATION: &str = "What would you like me to remind you about?";

/// Asked when a note command carries no content
pub const NOTE_CLARIFICATION: &str = "What would you like me to note down?";

/// Reply when no reminder is upcoming
pub const NO_REMINDERS: &str = "You have no upcoming reminders.";

/// Reply when there are no notes
pub const NO_NOTES: &str = "You don't have any notes yet.";

/// Capability summary
pub const HELP: &str = "I can add reminders, take notes, tell you the time or the date, \
    and read back your reminders and notes. Try saying \"remind me to call mom\" \
    or \"take note buy milk\".";

/// Outcome of interpreting one transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub intent: Intent,
    /// State change to apply, at most one per command
    pub mutation: Option<Mutation>,
    /// Text to speak back
    pub response: String,
}

impl Interpretation {
    fn reply(intent: Intent, response: impl Into<String>) -> Self {
        Self {
            intent,
            mutation: None,
            response: response.into(),
        }
    }
}

/// Compiled trigger phrases for one intent
struct Trigger {
    command: Command,
    pattern: Regex,
}

/// Keyword-matching command interpreter
pub struct Interpreter {
    triggers: Vec<Trigger>,
    reminder_lead: TimeDelta,
}

impl Interpreter {
    /// Create an interpreter using the reminder lead time from `settings`
    ///
    /// # Errors
    ///
    /// Returns error if a trigger pattern fails to compile
    pub fn new(settings: &Settings) -> Result<Self> {
        let triggers = TRIGGERS
            .iter()
            .map(|(command, phrases)| {
                let alternatives: Vec<String> = phrases.iter().copied().map(regex::escape).collect();
                Regex::new(&format!("(?i){}", alternatives.join("|")))
                    .map(|pattern| Trigger {
                        command: *command,
                        pattern,
                    })
                    .map_err(|e| Error::Config(format!("trigger pattern: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            triggers,
            reminder_lead: settings.reminder_lead(),
        })
    }

    /// Classify a transcript without building a response
    #[must_use]
    pub fn classify(&self, transcript: &str) -> Intent {
        self.matching(transcript)
            .map_or(Intent::Unrecognized, |t| t.command.intent())
    }

    fn matching(&self, transcript: &str) -> Option<&Trigger> {
        self.triggers.iter().find(|t| t.pattern.is_match(transcript))
    }

    /// Interpret a transcript against a snapshot of the state
    ///
    /// Pure: `state` is only read, and `now` is the only clock consulted.
    #[must_use]
    pub fn interpret(&self, transcript: &str, state: &AppState, now: NaiveDateTime) -> Interpretation {
        let Some(trigger) = self.matching(transcript) else {
            return Interpretation::reply(
                Intent::Unrecognized,
                format!(
                    "I heard you say: \"{}\". Say \"help\" to hear what I can do.",
                    transcript.trim()
                ),
            );
        };

        let intent = trigger.command.intent();
        tracing::debug!(intent = intent.as_str(), transcript, "matched command");

        match trigger.command {
            Command::AddReminder => {
                let title = strip_trigger(&trigger.pattern, transcript);
                if title.is_empty() {
                    return Interpretation::reply(intent, REMINDER_CLARIFICATION);
                }
                let reminder = state.new_reminder(title, "", None, now, self.reminder_lead);
                Interpretation {
                    intent,
                    response: format!("Reminder added: {}", reminder.title),
                    mutation: Some(Mutation::AddReminder(reminder)),
                }
            }
            Command::AddNote => {
                let content = strip_trigger(&trigger.pattern, transcript);
                if content.is_empty() {
                    return Interpretation::reply(intent, NOTE_CLARIFICATION);
                }
                let note = state.new_note(content, now);
                Interpretation {
                    intent,
                    response: format!("Note saved: {}", note.content),
                    mutation: Some(Mutation::AddNote(note)),
                }
            }
            Command::Time => {
                Interpretation::reply(intent, format!("The current time is {}", spoken::time(now)))
            }
            Command::Date => {
                Interpretation::reply(intent, format!("Today is {}", spoken::date(now)))
            }
            Command::ListReminders => {
                let titles: Vec<&str> = state
                    .upcoming_reminders(now)
                    .map(|r| r.title.as_str())
                    .collect();
                if titles.is_empty() {
                    return Interpretation::reply(intent, NO_REMINDERS);
                }
                Interpretation::reply(
                    intent,
                    format!(
                        "You have {}: {}",
                        spoken::count(titles.len(), "upcoming reminder", "upcoming reminders"),
                        titles.join(", ")
                    ),
                )
            }
            Command::ReadNotes => match state.latest_note() {
                None => Interpretation::reply(intent, NO_NOTES),
                Some(latest) => Interpretation::reply(
                    intent,
                    format!(
                        "You have {}. Your latest note says: {}",
                        spoken::count(state.notes().len(), "note", "notes"),
                        latest.content
                    ),
                ),
            },
            Command::Help => Interpretation::reply(intent, HELP),
        }
    }
}

/// Remove the first occurrence of the trigger and trim what is left
fn strip_trigger(pattern: &Regex, transcript: &str) -> String {
    pattern.replace(transcript, "").trim().to_string()
}
