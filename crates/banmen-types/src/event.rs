//! Abstract drag-gesture events.
//!
//! The gesture layer (pointer sensors, collision detection) is an external
//! collaborator; all the engine sees is "a drag started on node X" and
//! "a drag ended on node X near node Y". Node ids are *untyped* UUIDs: the
//! gesture layer cannot tell a list card from a task card, so the engine
//! resolves the kind by membership lookup at drag-start.

use serde::{Deserialize, Serialize};

/// A drag gesture began on the node with this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragStart {
    pub active: uuid::Uuid,
}

/// A drag gesture ended.
///
/// `over` is the node the pointer was released near: another card, a
/// container, or nothing at all (dropped outside every droppable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEnd {
    pub active: uuid::Uuid,
    pub over: Option<uuid::Uuid>,
}

impl DragEnd {
    /// True when the gesture cannot possibly describe a move: released
    /// outside every droppable, or released on itself.
    pub fn is_trivial(&self) -> bool {
        match self.over {
            None => true,
            Some(over) => over == self.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_outside_is_trivial() {
        let ev = DragEnd { active: uuid::Uuid::now_v7(), over: None };
        assert!(ev.is_trivial());
    }

    #[test]
    fn drop_on_self_is_trivial() {
        let id = uuid::Uuid::now_v7();
        let ev = DragEnd { active: id, over: Some(id) };
        assert!(ev.is_trivial());
    }

    #[test]
    fn drop_on_other_is_not_trivial() {
        let ev = DragEnd {
            active: uuid::Uuid::now_v7(),
            over: Some(uuid::Uuid::now_v7()),
        };
        assert!(!ev.is_trivial());
    }
}
