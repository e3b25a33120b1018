//! The remote-API seam.
//!
//! The REST transport, its envelope validation, and authentication are
//! external collaborators; the engine only ever talks through this trait.
//! Every method maps to one backend endpoint of the board service:
//!
//! | Method                 | Endpoint                      |
//! |------------------------|-------------------------------|
//! | `fetch_lists`          | `GET  /lists/board/:boardId`  |
//! | `fetch_tasks`          | `GET  /tasks/list/:listId`    |
//! | `move_list`            | `PATCH /lists/:id/move`       |
//! | `move_task`            | `PATCH /tasks/:id/move` (with target list) |
//! | `update_task_position` | `PATCH /tasks/:id/move`       |
//!
//! Rejections carry no structure the engine cares about: any failed
//! instruction triggers the same rollback-and-refetch recovery, so
//! [`RemoteError`] is an opaque message.

use async_trait::async_trait;
use banmen_types::{BoardId, ListCard, ListId, TaskCard, TaskId};
use thiserror::Error;

/// Opaque remote failure. The engine treats every rejection identically.
#[derive(Debug, Clone, Error)]
#[error("remote call failed: {0}")]
pub struct RemoteError(String);

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Async surface of the board service, injected into the engine.
///
/// Implementations decide their own timeout/retry policy; the engine issues
/// each call exactly once and treats a hang as a permanently pending parent
/// (see the session controller docs).
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// All lists of a board, server-ordered.
    async fn fetch_lists(&self, board: BoardId) -> Result<Vec<ListCard>, RemoteError>;

    /// All tasks of a list, server-ordered.
    async fn fetch_tasks(&self, list: ListId) -> Result<Vec<TaskCard>, RemoteError>;

    /// Reposition a list within its board.
    async fn move_list(&self, list: ListId, new_position: u32) -> Result<ListCard, RemoteError>;

    /// Move a task to (possibly another) list at the given position.
    async fn move_task(
        &self,
        task: TaskId,
        new_list: ListId,
        new_position: u32,
    ) -> Result<TaskCard, RemoteError>;

    /// Reposition a task within its current list.
    async fn update_task_position(
        &self,
        task: TaskId,
        new_position: u32,
    ) -> Result<TaskCard, RemoteError>;
}
