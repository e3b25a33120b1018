//! Card models — the position-ordered records the engine reorders.
//!
//! Two concrete kinds: [`ListCard`] (a list within a board) and [`TaskCard`]
//! (a task within a list). Both carry a 1-based `position` assigned by the
//! server; within one parent the settled positions are exactly `1..=N`.
//!
//! The [`Card`] trait is the seam that lets the store, overlay, and planner
//! stay generic over the two kinds. It deliberately exposes only what the
//! reorder machinery needs: identity, parentage, and position.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::ids::{BoardId, ListId, TaskId};

/// A position-ordered record living under a single parent.
///
/// `set_parent` only ever fires for cross-container moves; for kinds that
/// cannot change parent mid-gesture (lists stay on their board) it still
/// rewrites the field, which is harmless.
pub trait Card: Clone {
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display;
    type Parent: Copy + Eq + Hash + fmt::Debug + fmt::Display;

    fn id(&self) -> Self::Id;
    fn parent(&self) -> Self::Parent;
    fn position(&self) -> u32;
    fn set_position(&mut self, position: u32);
    fn set_parent(&mut self, parent: Self::Parent);

    /// The card's id as a raw UUID, for matching untyped gesture node ids.
    fn uuid(&self) -> uuid::Uuid;
}

/// Task priority, lowest to highest.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A list within a board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCard {
    pub id: ListId,
    pub board_id: BoardId,
    pub name: String,
    /// 1-based position within the board.
    pub position: u32,
}

impl ListCard {
    pub fn new(board_id: BoardId, name: impl Into<String>, position: u32) -> Self {
        Self {
            id: ListId::new(),
            board_id,
            name: name.into(),
            position,
        }
    }
}

impl Card for ListCard {
    type Id = ListId;
    type Parent = BoardId;

    fn id(&self) -> ListId {
        self.id
    }

    fn parent(&self) -> BoardId {
        self.board_id
    }

    fn position(&self) -> u32 {
        self.position
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    fn set_parent(&mut self, parent: BoardId) {
        self.board_id = parent;
    }

    fn uuid(&self) -> uuid::Uuid {
        self.id.as_uuid()
    }
}

/// A task within a list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCard {
    pub id: TaskId,
    pub list_id: ListId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO-8601 date from the server; opaque to the reorder engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    /// 1-based position within the list.
    pub position: u32,
}

impl TaskCard {
    pub fn new(list_id: ListId, title: impl Into<String>, position: u32) -> Self {
        Self {
            id: TaskId::new(),
            list_id,
            title: title.into(),
            description: None,
            due_date: None,
            priority: Priority::default(),
            position,
        }
    }
}

impl Card for TaskCard {
    type Id = TaskId;
    type Parent = ListId;

    fn id(&self) -> TaskId {
        self.id
    }

    fn parent(&self) -> ListId {
        self.list_id
    }

    fn position(&self) -> u32 {
        self.position
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    fn set_parent(&mut self, parent: ListId) {
        self.list_id = parent;
    }

    fn uuid(&self) -> uuid::Uuid {
        self.id.as_uuid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_serde_is_lowercase() {
        let json = serde_json::to_string(&Priority::High).expect("serialize");
        assert_eq!(json, "\"high\"");
        let back: Priority = serde_json::from_str("\"low\"").expect("deserialize");
        assert_eq!(back, Priority::Low);
    }

    #[test]
    fn priority_display_matches_wire_form() {
        assert_eq!(Priority::Medium.to_string(), "medium");
    }

    #[test]
    fn task_card_optional_fields_default() {
        let list = ListId::new();
        let json = format!(
            "{{\"id\":\"{}\",\"list_id\":\"{}\",\"title\":\"t\",\"position\":1}}",
            TaskId::new(),
            list,
        );
        let task: TaskCard = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.description.is_none());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn set_parent_moves_task_between_lists() {
        let mut task = TaskCard::new(ListId::new(), "t", 1);
        let dest = ListId::new();
        task.set_parent(dest);
        assert_eq!(task.parent(), dest);
    }
}
