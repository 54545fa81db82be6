//! Note and reminder types

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Error;

macro_rules! timestamp_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Derive an id from a generation timestamp, bumped past `last`
            #[must_use]
            pub fn generate(now: NaiveDateTime, last: Option<Self>) -> Self {
                let millis = now.and_utc().timestamp_millis();
                match last {
                    Some(Self(prev)) if prev >= millis => Self(prev + 1),
                    _ => Self(millis),
                }
            }

            /// Raw numeric value
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse()
                    .map(Self)
                    .map_err(|_| Error::InvalidInput(format!("not an id: {s:?}")))
            }
        }
    };
}

timestamp_id!(
    /// Identifier of a [`Note`], derived from its creation time
    NoteId
);

timestamp_id!(
    /// Identifier of a [`Reminder`], derived from its creation time
    ReminderId
);

/// A free-text note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// A reminder with a due time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due: NaiveDateTime,
    #[serde(default)]
    pub completed: bool,
}

impl Reminder {
    /// Not completed and due strictly after `now`
    #[must_use]
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        !self.completed && self.due > now
    }
}
