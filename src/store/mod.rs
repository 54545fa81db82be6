//! In-memory application state
//!
//! Notes and reminders live here and nowhere else. Voice commands and view
//! actions both reach this module as [`Mutation`]s, so there is one path by
//! which state changes.

mod types;

pub use types::{Note, NoteId, Reminder, ReminderId};

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single change to the application state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Mutation {
    AddNote(Note),
    AddReminder(Reminder),
    DeleteNote(NoteId),
    ToggleReminder(ReminderId),
}

/// Notes and reminders in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppState {
    notes: Vec<Note>,
    reminders: Vec<Reminder>,
}

impl AppState {
    /// Create an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes in creation order
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Reminders in creation order
    #[must_use]
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    /// Most recently added note
    #[must_use]
    pub fn latest_note(&self) -> Option<&Note> {
        self.notes.last()
    }

    /// Reminders not completed and due after `now`, in creation order
    pub fn upcoming_reminders(&self, now: NaiveDateTime) -> impl Iterator<Item = &Reminder> {
        self.reminders.iter().filter(move |r| r.is_upcoming(now))
    }

    /// Look up a note
    #[must_use]
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Look up a reminder
    #[must_use]
    pub fn reminder(&self, id: ReminderId) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    /// Id for a note generated at `now`, distinct from every existing note id
    #[must_use]
    pub fn next_note_id(&self, now: NaiveDateTime) -> NoteId {
        NoteId::generate(now, self.notes.iter().map(|n| n.id).max())
    }

    /// Id for a reminder generated at `now`, distinct from every existing reminder id
    #[must_use]
    pub fn next_reminder_id(&self, now: NaiveDateTime) -> ReminderId {
        ReminderId::generate(now, self.reminders.iter().map(|r| r.id).max())
    }

    /// Build a note stamped with `now`
    #[must_use]
    pub fn new_note(&self, content: impl Into<String>, now: NaiveDateTime) -> Note {
        Note {
            id: self.next_note_id(now),
            content: content.into(),
            created_at: now,
        }
    }

    /// Build an incomplete reminder due `lead` after `now` unless `due` is given
    ///
    /// A lead running past the calendar's end is clamped to the latest
    /// representable time.
    #[must_use]
    pub fn new_reminder(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        due: Option<NaiveDateTime>,
        now: NaiveDateTime,
        lead: TimeDelta,
    ) -> Reminder {
        Reminder {
            id: self.next_reminder_id(now),
            title: title.into(),
            description: description.into(),
            due: due.unwrap_or_else(|| {
                now.checked_add_signed(lead).unwrap_or(NaiveDateTime::MAX)
            }),
            completed: false,
        }
    }

    /// Append a note
    ///
    /// # Errors
    ///
    /// Returns error if a note with the same id already exists
    pub fn append_note(&mut self, note: Note) -> Result<()> {
        if self.note(note.id).is_some() {
            return Err(Error::InvalidInput(format!("duplicate note id {}", note.id)));
        }
        tracing::info!(id = %note.id, "note added");
        self.notes.push(note);
        Ok(())
    }

    /// Append a reminder
    ///
    /// # Errors
    ///
    /// Returns error if a reminder with the same id already exists
    pub fn append_reminder(&mut self, reminder: Reminder) -> Result<()> {
        if self.reminder(reminder.id).is_some() {
            return Err(Error::InvalidInput(format!(
                "duplicate reminder id {}",
                reminder.id
            )));
        }
        tracing::info!(id = %reminder.id, due = %reminder.due, "reminder added");
        self.reminders.push(reminder);
        Ok(())
    }

    /// Remove a note, keeping the order of the rest
    ///
    /// # Errors
    ///
    /// Returns error if no note has this id
    pub fn delete_note(&mut self, id: NoteId) -> Result<Note> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| Error::NotFound(format!("note {id}")))?;
        tracing::info!(%id, "note deleted");
        Ok(self.notes.remove(index))
    }

    /// Flip a reminder's completed flag, returning the new value
    ///
    /// # Errors
    ///
    /// Returns error if no reminder has this id
    pub fn toggle_reminder(&mut self, id: ReminderId) -> Result<bool> {
        let reminder = self
            .reminders
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("reminder {id}")))?;
        reminder.completed = !reminder.completed;
        tracing::info!(%id, completed = reminder.completed, "reminder toggled");
        Ok(reminder.completed)
    }

    /// Apply a mutation through the matching operation
    ///
    /// # Errors
    ///
    /// Returns error if the operation rejects the mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<()> {
        match mutation {
            Mutation::AddNote(note) => self.append_note(note),
            Mutation::AddReminder(reminder) => self.append_reminder(reminder),
            Mutation::DeleteNote(id) => self.delete_note(id).map(drop),
            Mutation::ToggleReminder(id) => self.toggle_reminder(id).map(drop),
        }
    }
}
