//! Identifiers for board entities and the generators that mint them.
//!
//! Tasks and subtasks are identified by UUIDs wrapped in dedicated newtypes so
//! that a subtask id can never be passed where a task id is expected. Columns
//! are identified by short, stable string slugs such as `"todo"`.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of hex characters shown by the short form of an identifier.
const SHORT_LEN: usize = 8;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the first eight hex characters, suitable for display.
            #[must_use]
            pub fn short(&self) -> String {
                self.0.simple().to_string().chars().take(SHORT_LEN).collect()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id! {
    /// Unique identifier for a task, unique across the whole board.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_protocol::TaskId;
    ///
    /// let id = TaskId::new_v4();
    /// assert_eq!(id.short().len(), 8);
    /// ```
    TaskId
}

uuid_id! {
    /// Unique identifier for a subtask, unique within its owning task.
    SubtaskId
}

/// Identifier of a board column.
///
/// Column ids are fixed when the board is constructed. The well-known ids used
/// by the seed board are available as associated constants.
///
/// # Examples
///
/// ```
/// use taskflow_protocol::ColumnId;
///
/// assert_eq!(ColumnId::TODO.as_str(), "todo");
/// assert_eq!(ColumnId::new("todo"), ColumnId::TODO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(Cow<'static, str>);

impl ColumnId {
    /// The "To Do" column.
    pub const TODO: Self = Self(Cow::Borrowed("todo"));
    /// The "In Progress" column.
    pub const IN_PROGRESS: Self = Self(Cow::Borrowed("in-progress"));

    /// Creates a column id from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A source of collision-resistant identifiers.
///
/// The store asks its generator for a fresh UUID every time it creates a task
/// or a subtask. Production code uses [`RandomIds`]; tests use
/// [`SequentialIds`] to get reproducible output.
pub trait IdGenerator: fmt::Debug + Send {
    /// Returns the next identifier.
    fn next_uuid(&mut self) -> Uuid;
}

/// Generates random UUID v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_uuid(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Generates deterministic, strictly increasing identifiers starting at 1.
///
/// # Examples
///
/// ```
/// use taskflow_protocol::{IdGenerator, SequentialIds};
///
/// let mut ids = SequentialIds::default();
/// assert_eq!(ids.next_uuid().as_u128(), 1);
/// assert_eq!(ids.next_uuid().as_u128(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    issued: u128,
}

impl IdGenerator for SequentialIds {
    fn next_uuid(&mut self) -> Uuid {
        self.issued = self.issued.wrapping_add(1);
        Uuid::from_u128(self.issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form_is_prefix_of_simple_form() {
        let id = TaskId::from_uuid(Uuid::from_u128(0xabcd_ef01_2345_6789_abcd_ef01_2345_6789));
        assert_eq!(id.short(), "abcdef01");
    }

    #[test]
    fn task_and_subtask_ids_serialize_as_plain_uuid() {
        let uuid = Uuid::from_u128(42);
        let json = serde_json::to_string(&TaskId::from(uuid)).expect("serialize");
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn column_id_constants_match_owned_ids() {
        assert_eq!(ColumnId::TODO, ColumnId::from("todo"));
        assert_eq!(ColumnId::IN_PROGRESS, ColumnId::new("in-progress"));
        assert_ne!(ColumnId::TODO, ColumnId::IN_PROGRESS);
    }

    #[test]
    fn column_id_json_roundtrip() {
        let json = serde_json::to_string(&ColumnId::IN_PROGRESS).expect("serialize");
        assert_eq!(json, r#""in-progress""#);
        let parsed: ColumnId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, ColumnId::IN_PROGRESS);
    }

    #[test]
    fn sequential_ids_never_repeat() {
        let mut ids = SequentialIds::default();
        let issued: Vec<Uuid> = (0..100).map(|_| ids.next_uuid()).collect();
        let mut deduped = issued.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(issued.len(), deduped.len());
    }
}
