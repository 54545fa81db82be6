//! Text views and user action dispatch
//!
//! Views render the notes list, the reminders list and the settings panel.
//! User actions become [`Mutation`]s and go through [`AppState::apply`], the
//! same path voice commands take.

use std::fmt::Write as _;

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::config::Settings;
use crate::store::{AppState, Mutation, NoteId, ReminderId};
use crate::{Error, Result};

/// A user action from a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Note form submission
    AddNote { content: String },
    /// Reminder form submission; `due` defaults to the reminder lead time
    AddReminder {
        title: String,
        description: String,
        due: Option<NaiveDateTime>,
    },
    DeleteNote(NoteId),
    ToggleReminder(ReminderId),
}

impl Action {
    /// Turn the action into a mutation of `state`
    ///
    /// # Errors
    ///
    /// Returns error if a form field that must have text is blank
    pub fn into_mutation(
        self,
        state: &AppState,
        now: NaiveDateTime,
        lead: TimeDelta,
    ) -> Result<Mutation> {
        match self {
            Self::AddNote { content } => {
                let content = content.trim();
                if content.is_empty() {
                    return Err(Error::InvalidInput("note content is empty".to_string()));
                }
                Ok(Mutation::AddNote(state.new_note(content, now)))
            }
            Self::AddReminder {
                title,
                description,
                due,
            } => {
                let title = title.trim();
                if title.is_empty() {
                    return Err(Error::InvalidInput("reminder title is empty".to_string()));
                }
                Ok(Mutation::AddReminder(state.new_reminder(
                    title,
                    description.trim(),
                    due,
                    now,
                    lead,
                )))
            }
            Self::DeleteNote(id) => Ok(Mutation::DeleteNote(id)),
            Self::ToggleReminder(id) => Ok(Mutation::ToggleReminder(id)),
        }
    }
}

/// Render the notes list, oldest first
#[must_use]
pub fn render_notes(state: &AppState) -> String {
    if state.notes().is_empty() {
        return "No notes yet.\n".to_string();
    }

    let mut out = format!("Notes ({})\n", state.notes().len());
    for note in state.notes() {
        let _ = writeln!(
            out,
            "  [{}] {}  ({})",
            note.id,
            note.content,
            note.created_at.format("%b %-d %-I:%M %p")
        );
    }
    out
}

/// Render the reminders list, oldest first
#[must_use]
pub fn render_reminders(state: &AppState, now: NaiveDateTime) -> String {
    if state.reminders().is_empty() {
        return "No reminders yet.\n".to_string();
    }

    let upcoming = state.upcoming_reminders(now).count();
    let mut out = format!(
        "Reminders ({}, {upcoming} upcoming)\n",
        state.reminders().len()
    );
    for reminder in state.reminders() {
        let mark = if reminder.completed {
            "x"
        } else if reminder.due <= now {
            "!"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "  [{mark}] [{}] {}  due {}",
            reminder.id,
            reminder.title,
            reminder.due.format("%b %-d %-I:%M %p")
        );
        if !reminder.description.is_empty() {
            let _ = writeln!(out, "        {}", reminder.description);
        }
    }
    out
}

/// Render the settings panel
#[must_use]
pub fn render_settings(settings: &Settings) -> String {
    let mut out = String::from("Settings\n");
    let _ = writeln!(
        out,
        "  voice responses   {}",
        if settings.voice_enabled { "on" } else { "off" }
    );
    let _ = writeln!(out, "  language          {}", settings.language);
    let _ = writeln!(out, "  rate              {:.2}", settings.rate);
    let _ = writeln!(out, "  pitch             {:.2}", settings.pitch);
    let _ = writeln!(out, "  volume            {:.2}", settings.volume);
    let _ = writeln!(
        out,
        "  preferred voices  {}",
        settings.preferred_voice_markers.join(", ")
    );
    let _ = writeln!(out, "  reminder lead     {}h", settings.reminder_lead_hours);
    out
}

/// Render any view model as pretty JSON
///
/// # Errors
///
/// Returns error if serialization fails
pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
