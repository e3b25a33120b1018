//! Drag session controller — one gesture from commit to settle.
//!
//! Orchestrates the full reorder lifecycle over the stores, overlay,
//! planner, and remote seam:
//!
//! ```text
//!   gesture layer
//!        │ handle_drag_start / handle_drag_end
//!        ▼
//!   BoardEngine ──reads──▶ CollectionStore + Overlay (merged display)
//!        │ plan::same_container / plan::cross_container
//!        ├─ overlay.begin + mark_pending   (synchronous, before any await)
//!        ├─ join_all(remote position updates)  (fire all, await all)
//!        ├─ refetch affected parents
//!        └─ overlay.settle → reconcile          (or rollback + Notice)
//! ```
//!
//! # State Machine
//!
//! ```text
//! +-------+  drag_start   +----------+  drag_end, real move  +-------------+
//! | Idle  | ────────────▶ | Dragging | ────────────────────▶ | Reconciling |
//! +-------+               +----------+                       +------+------+
//!     ▲                        │ drag_end, no real move             │
//!     └────────────────────────┴──────────── all pending settled ◀──┘
//! ```
//!
//! A drag may start while a prior gesture is still reconciling; the new
//! gesture plans against the merged display view, so the last committed
//! overlay wins. There is no queue beyond that.
//!
//! # Hangs
//!
//! No timeout is imposed here: a remote call that never resolves leaves its
//! parent pending and its overlay pinned. Implementations of
//! [`RemoteApi`] that want deadlines should enforce them internally and
//! resolve to an error, which converts the hang into a normal failure
//! settle (rollback + refetch + notice).

use std::sync::Arc;

use banmen_types::{BoardId, Card, DragEnd, DragStart, ListCard, ListId, TaskCard, TaskId};
use futures::future::join_all;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::notice::{Notice, ReorderScope};
use crate::order;
use crate::overlay::{Overlay, SettleOutcome};
use crate::plan::{self, PositionUpdate};
use crate::remote::{RemoteApi, RemoteError};
use crate::store::CollectionStore;

/// Engine tuning, injected by the embedder.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Capacity of the notice broadcast channel. Lagging receivers lose the
    /// oldest notices (toasts, so acceptable).
    pub notice_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { notice_capacity: 16 }
    }
}

/// Where the controller currently is in the gesture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Dragging,
    Reconciling,
}

/// The item currently being dragged, for preview rendering and for picking
/// the reorder path at drag-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveDrag {
    List(ListId),
    Task(TaskId),
}

/// The client-side reconciliation engine for one board service connection.
///
/// Owns the confirmed stores and optimistic overlays for both card kinds and
/// drives them from gesture events and remote confirmations. All mutation
/// happens through `&mut self` on one logical thread of control; suspension
/// points are exactly the awaited remote calls.
pub struct BoardEngine {
    remote: Arc<dyn RemoteApi>,
    lists: CollectionStore<ListCard>,
    tasks: CollectionStore<TaskCard>,
    list_overlay: Overlay<ListCard>,
    task_overlay: Overlay<TaskCard>,
    active: Option<ActiveDrag>,
    phase: SessionPhase,
    notices: broadcast::Sender<Notice>,
}

impl BoardEngine {
    pub fn new(remote: Arc<dyn RemoteApi>) -> Self {
        Self::with_config(remote, EngineConfig::default())
    }

    pub fn with_config(remote: Arc<dyn RemoteApi>, config: EngineConfig) -> Self {
        let (notices, _) = broadcast::channel(config.notice_capacity.max(1));
        Self {
            remote,
            lists: CollectionStore::new(),
            tasks: CollectionStore::new(),
            list_overlay: Overlay::new(),
            task_overlay: Overlay::new(),
            active: None,
            phase: SessionPhase::Idle,
            notices,
        }
    }

    /// Subscribe to user-facing notices (reorder/refresh failures).
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn active_drag(&self) -> Option<ActiveDrag> {
        self.active
    }

    // ========================================================================
    // Display view (store overlaid with optimistic data)
    // ========================================================================

    /// The displayed list order for a board.
    pub fn lists(&self, board: BoardId) -> &[ListCard] {
        self.list_overlay
            .entry(board)
            .unwrap_or_else(|| self.lists.get(board))
    }

    /// The displayed task order for a list.
    pub fn tasks(&self, list: ListId) -> &[TaskCard] {
        self.task_overlay
            .entry(list)
            .unwrap_or_else(|| self.tasks.get(list))
    }

    /// The dragged list, for preview rendering.
    pub fn active_list(&self) -> Option<&ListCard> {
        match self.active {
            Some(ActiveDrag::List(id)) => self.display_list_card(id.as_uuid()),
            _ => None,
        }
    }

    /// The dragged task, for preview rendering.
    pub fn active_task(&self) -> Option<&TaskCard> {
        match self.active {
            Some(ActiveDrag::Task(id)) => self.display_task_card(id.as_uuid()),
            _ => None,
        }
    }

    // ========================================================================
    // Fetch + confirmation intake
    // ========================================================================

    /// Fetch a board's lists and replace the confirmed store wholesale.
    pub async fn refresh_lists(&mut self, board: BoardId) -> Result<(), RemoteError> {
        let fetched = self.remote.fetch_lists(board).await?;
        self.lists.replace_all(board, fetched);
        self.list_overlay.reconcile(&self.lists);
        Ok(())
    }

    /// Fetch several lists' tasks concurrently and replace each confirmed
    /// sequence. Lists that fail leave their previous sequence in place;
    /// the first error is returned after all fetches resolve.
    pub async fn refresh_tasks(&mut self, lists: &[ListId]) -> Result<(), RemoteError> {
        let fetches = lists.iter().map(|&list| {
            let remote = Arc::clone(&self.remote);
            async move { (list, remote.fetch_tasks(list).await) }
        });
        let mut first_err = None;
        for (list, result) in join_all(fetches).await {
            match result {
                Ok(items) => self.tasks.replace_all(list, items),
                Err(e) => {
                    warn!(list = %list, error = %e, "task refresh failed");
                    first_err.get_or_insert(e);
                }
            }
        }
        self.task_overlay.reconcile(&self.tasks);
        match first_err {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }

    /// Fetch a board's lists and then every list's tasks.
    pub async fn load_board(&mut self, board: BoardId) -> Result<(), RemoteError> {
        self.refresh_lists(board).await?;
        let lists: Vec<ListId> = self.lists.get(board).iter().map(|l| l.id).collect();
        self.refresh_tasks(&lists).await
    }

    /// A list create/update/move confirmation from outside a drag gesture.
    pub fn confirm_list(&mut self, list: ListCard) {
        self.lists.upsert(list);
        self.list_overlay.reconcile(&self.lists);
    }

    /// A list delete confirmation.
    pub fn confirm_list_deleted(&mut self, id: ListId) {
        self.lists.remove(id);
        self.list_overlay.reconcile(&self.lists);
    }

    /// A task create/update/move confirmation from outside a drag gesture.
    pub fn confirm_task(&mut self, task: TaskCard) {
        self.tasks.upsert(task);
        self.task_overlay.reconcile(&self.tasks);
    }

    /// A task delete confirmation.
    pub fn confirm_task_deleted(&mut self, id: TaskId) {
        self.tasks.remove(id);
        self.task_overlay.reconcile(&self.tasks);
    }

    // ========================================================================
    // Gesture entry points
    // ========================================================================

    /// A drag began. Resolve the node's kind by membership (overlay first,
    /// then store; lists before tasks) and record the active-drag
    /// reference. No overlay mutation happens here.
    pub fn handle_drag_start(&mut self, event: DragStart) {
        if let Some(id) = self.display_list_card(event.active).map(|c| c.id) {
            debug!(list = %id, "drag started on list");
            self.active = Some(ActiveDrag::List(id));
            self.phase = SessionPhase::Dragging;
            return;
        }
        if let Some(id) = self.display_task_card(event.active).map(|c| c.id) {
            debug!(task = %id, "drag started on task");
            self.active = Some(ActiveDrag::Task(id));
            self.phase = SessionPhase::Dragging;
            return;
        }
        debug!(node = %event.active, "drag started on unknown node, ignoring");
    }

    /// A drag ended. Trivial gestures (no target, dropped on itself, same
    /// resolved index) clear the active reference and nothing else; a real
    /// move installs the overlay synchronously and then reconciles with the
    /// remote.
    pub async fn handle_drag_end(&mut self, event: DragEnd) {
        match self.active.take() {
            Some(ActiveDrag::List(id)) if !event.is_trivial() => {
                self.finish_list_drag(id, event).await;
            }
            Some(ActiveDrag::Task(id)) if !event.is_trivial() => {
                self.finish_task_drag(id, event).await;
            }
            _ => {}
        }
        self.sync_phase();
    }

    // ========================================================================
    // List path (same-container only: lists never change boards mid-drag)
    // ========================================================================

    async fn finish_list_drag(&mut self, active: ListId, event: DragEnd) {
        let Some(over) = event.over else { return };
        let Some((board, old_index)) = self.locate_display_list(active.as_uuid()) else {
            // Stale gesture: the list vanished between start and end
            warn!(list = %active, "dragged list no longer displayed, ignoring");
            return;
        };
        let display = self.lists(board).to_vec();
        let Some(new_index) = display.iter().position(|l| l.uuid() == over) else {
            debug!(board = %board, "drop target is not a list on this board, ignoring");
            return;
        };
        if old_index == new_index {
            return;
        }

        info!(
            board = %board,
            list = %active,
            from = old_index,
            to = new_index,
            "list reorder committed"
        );

        // Synchronous commit: the display shows the new order before any await
        let tentative = order::reorder(&display, old_index, new_index);
        self.list_overlay.begin([(board, tentative)]);
        self.list_overlay.mark_pending([board]);
        self.phase = SessionPhase::Reconciling;

        let instructions = plan::same_container(&display, old_index, new_index);
        let calls = instructions.iter().map(|update| {
            let remote = Arc::clone(&self.remote);
            let (item, position) = (update.item, update.new_position);
            async move { remote.move_list(item, position).await }
        });
        let all_ok = join_all(calls).await.iter().all(|r| r.is_ok());

        let scope = ReorderScope::Lists(board);
        if all_ok {
            if self.refresh_lists(board).await.is_err() {
                self.notify(Notice::RefreshFailed(scope));
            }
            self.list_overlay.settle(&[board], SettleOutcome::Success);
            self.list_overlay.reconcile(&self.lists);
        } else {
            warn!(board = %board, "list reorder rejected, rolling back");
            self.list_overlay.settle(&[board], SettleOutcome::Failure);
            self.notify(Notice::ReorderFailed(scope));
            if self.refresh_lists(board).await.is_err() {
                self.notify(Notice::RefreshFailed(scope));
            }
        }
    }

    // ========================================================================
    // Task path (same-list reorder or cross-list move)
    // ========================================================================

    async fn finish_task_drag(&mut self, active: TaskId, event: DragEnd) {
        let Some(over) = event.over else { return };
        let Some((source, old_index)) = self.locate_display_task(active.as_uuid()) else {
            warn!(task = %active, "dragged task no longer displayed, ignoring");
            return;
        };
        let source_seq = self.tasks(source).to_vec();

        // Released over another task → that task's list and index.
        // Released over a list card → that list, appended at the end.
        let (dest, new_index) = if let Some((list, index)) = self.locate_display_task(over) {
            (list, index)
        } else if let Some(list) = self.display_list_card(over).map(|l| l.id) {
            (list, self.tasks(list).len())
        } else {
            debug!(task = %active, "drop target unknown, ignoring");
            return;
        };

        if dest == source {
            // Dropping on the source list card resolves past the end; clamp
            let new_index = new_index.min(source_seq.len().saturating_sub(1));
            if new_index == old_index {
                return;
            }
            info!(
                list = %source,
                task = %active,
                from = old_index,
                to = new_index,
                "task reorder committed"
            );
            let tentative = order::reorder(&source_seq, old_index, new_index);
            self.task_overlay.begin([(source, tentative)]);
            self.task_overlay.mark_pending([source]);
            self.phase = SessionPhase::Reconciling;

            let instructions = plan::same_container(&source_seq, old_index, new_index);
            let all_ok = self.run_task_plan(&instructions).await;
            self.settle_task_gesture(source, dest, all_ok).await;
        } else {
            let dest_seq = self.tasks(dest).to_vec();
            let new_index = new_index.min(dest_seq.len());
            info!(
                source = %source,
                dest = %dest,
                task = %active,
                from = old_index,
                to = new_index,
                "cross-list move committed"
            );
            let (tentative_source, tentative_dest) =
                order::transfer(&source_seq, &dest_seq, old_index, new_index, dest);
            self.task_overlay
                .begin([(source, tentative_source), (dest, tentative_dest)]);
            self.task_overlay.mark_pending([source, dest]);
            self.phase = SessionPhase::Reconciling;

            let instructions =
                plan::cross_container(&source_seq, &dest_seq, old_index, new_index, dest);
            let all_ok = self.run_task_plan(&instructions).await;
            self.settle_task_gesture(source, dest, all_ok).await;
        }
    }

    /// Fire every instruction of one gesture concurrently and await all.
    ///
    /// A `new_parent` instruction is the dragged item of a cross-list move;
    /// everything else is a same-list position shift.
    async fn run_task_plan(&self, instructions: &[PositionUpdate<TaskCard>]) -> bool {
        let calls = instructions.iter().map(|update| {
            let remote = Arc::clone(&self.remote);
            let (item, parent, position) =
                (update.item, update.new_parent, update.new_position);
            async move {
                match parent {
                    Some(list) => remote.move_task(item, list, position).await.map(|_| ()),
                    None => remote.update_task_position(item, position).await.map(|_| ()),
                }
            }
        });
        join_all(calls).await.iter().all(|r| r.is_ok())
    }

    async fn settle_task_gesture(&mut self, source: ListId, dest: ListId, all_ok: bool) {
        let affected: Vec<ListId> = if source == dest {
            vec![source]
        } else {
            vec![source, dest]
        };
        let scope = ReorderScope::Tasks { source, dest };

        if all_ok {
            if self.refresh_tasks(&affected).await.is_err() {
                self.notify(Notice::RefreshFailed(scope));
            }
            self.task_overlay.settle(&affected, SettleOutcome::Success);
            self.task_overlay.reconcile(&self.tasks);
        } else {
            warn!(source = %source, dest = %dest, "task move rejected, rolling back");
            self.task_overlay.settle(&affected, SettleOutcome::Failure);
            self.notify(Notice::ReorderFailed(scope));
            if self.refresh_tasks(&affected).await.is_err() {
                self.notify(Notice::RefreshFailed(scope));
            }
        }
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn notify(&self, notice: Notice) {
        // No subscribers is fine; notices are advisory
        let _ = self.notices.send(notice);
    }

    fn sync_phase(&mut self) {
        self.phase = if self.active.is_some() {
            SessionPhase::Dragging
        } else if self.list_overlay.has_pending() || self.task_overlay.has_pending() {
            SessionPhase::Reconciling
        } else {
            SessionPhase::Idle
        };
    }

    /// Locate a raw gesture node among displayed lists: `(board, index)`.
    fn locate_display_list(&self, node: uuid::Uuid) -> Option<(BoardId, usize)> {
        for board in self.display_parents(&self.lists, &self.list_overlay) {
            if let Some(index) = self.lists(board).iter().position(|l| l.uuid() == node) {
                return Some((board, index));
            }
        }
        None
    }

    /// Locate a raw gesture node among displayed tasks: `(list, index)`.
    ///
    /// Scans the *display* sequences, not the store: a task optimistically
    /// moved out of a list must not be found there while the move settles.
    fn locate_display_task(&self, node: uuid::Uuid) -> Option<(ListId, usize)> {
        for list in self.display_parents(&self.tasks, &self.task_overlay) {
            if let Some(index) = self.tasks(list).iter().position(|t| t.uuid() == node) {
                return Some((list, index));
            }
        }
        None
    }

    fn display_list_card(&self, node: uuid::Uuid) -> Option<&ListCard> {
        let (board, index) = self.locate_display_list(node)?;
        Some(&self.lists(board)[index])
    }

    fn display_task_card(&self, node: uuid::Uuid) -> Option<&TaskCard> {
        let (list, index) = self.locate_display_task(node)?;
        Some(&self.tasks(list)[index])
    }

    /// Store parents followed by overlay-only parents, deduped.
    fn display_parents<C: Card>(
        &self,
        store: &CollectionStore<C>,
        overlay: &Overlay<C>,
    ) -> Vec<C::Parent> {
        let mut parents: Vec<C::Parent> = store.parents().collect();
        for parent in overlay.parents() {
            if !parents.contains(&parent) {
                parents.push(parent);
            }
        }
        parents
    }
}
