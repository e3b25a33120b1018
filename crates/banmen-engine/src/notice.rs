//! User-facing notices, published over a broadcast channel.
//!
//! The engine never surfaces remote failures to its caller as errors: every
//! failure is recovered locally (rollback + refetch) and reported here for
//! the UI layer to toast. Per-instruction failures are not itemized: one
//! gesture produces at most one [`Notice::ReorderFailed`].
//!
//! Broadcast semantics are deliberately lossy: a receiver that lags far
//! enough loses old notices, which for toasts is acceptable. Engine state is
//! never derived from this channel.

use std::fmt;

use banmen_types::{BoardId, ListId};

/// What kind of collection a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderScope {
    /// Lists within a board.
    Lists(BoardId),
    /// Tasks within one or two lists (source, destination on cross-moves).
    Tasks { source: ListId, dest: ListId },
}

/// A user-facing event the embedding UI should surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// One or more position updates of a reorder gesture were rejected;
    /// the optimistic order was rolled back.
    ReorderFailed(ReorderScope),
    /// A refresh of remote state failed; the display may lag the server
    /// until the next successful fetch.
    RefreshFailed(ReorderScope),
}

impl Notice {
    /// Suggested toast text, mirroring what the board UI shows.
    pub fn user_message(&self) -> &'static str {
        match self {
            Notice::ReorderFailed(ReorderScope::Lists(_)) => {
                "Failed to save list order. Please try again."
            }
            Notice::ReorderFailed(ReorderScope::Tasks { .. }) => "Failed to move task",
            Notice::RefreshFailed(_) => "Failed to refresh board data",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        let board = BoardId::new();
        let list = ListId::new();
        assert_eq!(
            Notice::ReorderFailed(ReorderScope::Lists(board)).to_string(),
            "Failed to save list order. Please try again."
        );
        assert_eq!(
            Notice::ReorderFailed(ReorderScope::Tasks { source: list, dest: list })
                .user_message(),
            "Failed to move task"
        );
    }
}
