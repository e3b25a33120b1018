//! Typed identifiers for boards, lists, and tasks.
//!
//! All ID types wrap UUIDv7 (time-ordered, globally unique). They serialize
//! transparently as standard UUID text for the wire and display the same way
//! for logging. The `short()` form (first 8 hex chars) is for human-facing
//! output only — never used as a lookup key.
//!
//! Drag gestures arrive with *untyped* node ids (the gesture layer does not
//! know whether a card is a list or a task); `as_uuid()` is the bridge the
//! engine uses for membership lookups against raw gesture ids.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A board identifier (UUIDv7).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(uuid::Uuid);

/// A list identifier (UUIDv7).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(uuid::Uuid);

/// A task identifier (UUIDv7).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(uuid::Uuid);

// ── Shared behavior ─────────────────────────────────────────────────────────

macro_rules! impl_typed_id {
    ($T:ident, $name:literal) => {
        impl $T {
            /// Create a new time-ordered ID (UUIDv7).
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// First 8 hex characters — for human display only, not lookup.
            pub fn short(&self) -> String {
                self.0.as_simple().to_string()[..8].to_string()
            }

            /// The raw UUID, for comparison against untyped gesture node ids.
            pub fn as_uuid(&self) -> uuid::Uuid {
                self.0
            }

            /// Parse from standard UUID text.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl Default for $T {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<uuid::Uuid> for $T {
            fn from(u: uuid::Uuid) -> Self {
                Self(u)
            }
        }

        impl From<$T> for uuid::Uuid {
            fn from(id: $T) -> uuid::Uuid {
                id.0
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // Full UUID with hyphens for log readability
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $name, self.short())
            }
        }
    };
}

impl_typed_id!(BoardId, "BoardId");
impl_typed_id!(ListId, "ListId");
impl_typed_id!(TaskId, "TaskId");
