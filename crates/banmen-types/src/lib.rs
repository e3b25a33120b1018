//! Shared identifier and card types for banmen.
//!
//! This crate is the relational foundation: typed IDs, the board/list/task
//! card models, and the abstract drag-gesture events. It has **no internal
//! banmen dependencies** — a pure leaf crate that the engine builds on.
//!
//! # Entity-Relationship Overview
//!
//! ```text
//! Board (BoardId)
//!     └── contains Lists, ordered by position 1..=N
//!
//! List (ListId) ← a positioned container
//!     └── parented to one Board
//!     └── contains Tasks, ordered by position 1..=N
//!
//! Task (TaskId) ← a positioned element
//!     └── parented to one List (may change on cross-list drag)
//! ```
//!
//! # Key Types
//!
//! |--------------|------------------------------------------------|
//! | Type         | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | [`ListCard`] | A list within a board (a container)            |
//! | [`TaskCard`] | A task within a list (an element)              |
//! | [`Card`]     | Generic seam: id + parent + position           |
//! | [`Priority`] | Task priority (low / medium / high)            |
//! | [`DragStart`]| Gesture began on an (untyped) node             |
//! | [`DragEnd`]  | Gesture released near another node, or nowhere |
//! |--------------|------------------------------------------------|

pub mod card;
pub mod event;
pub mod ids;

// Re-export primary types at crate root for convenience.
pub use card::{Card, ListCard, Priority, TaskCard};
pub use event::{DragEnd, DragStart};
pub use ids::{BoardId, ListId, TaskId};
