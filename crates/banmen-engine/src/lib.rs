//! Optimistic drag-reorder reconciliation engine for banmen boards.
//!
//! A board is rendered from two layers of state: the **remote collection
//! store** (last-known-good, server-confirmed sequences) and the
//! **optimistic overlay** (tentative orders installed the instant a drag
//! commits). The [`BoardEngine`] merges the two into the display view,
//! plans the remote position updates a gesture implies, fires them
//! concurrently, and reconciles (or rolls back) when they settle.
//!
//! # Data Flow
//!
//! ```text
//! gesture layer ──▶ BoardEngine ──reads──▶ CollectionStore + Overlay
//!                       │
//!                       ├── plan (pure): {item, new_position} instructions
//!                       ├── Overlay::begin (synchronous, zero-latency UI)
//!                       ├── RemoteApi calls (fire all, await all)
//!                       ├── refetch affected parents
//!                       └── Overlay::settle → reconcile | rollback + Notice
//! ```
//!
//! The engine is single-threaded in spirit: every mutation happens through
//! `&mut self` between awaits, so no handler ever observes a half-applied
//! write. Concurrency exists only across the remote calls of one gesture.
//!
//! # Ordering Invariant
//!
//! Within any parent, the settled positions of its children are exactly
//! `1..=N` — no gaps, no duplicates. The optimistic view may transiently
//! disagree while a reorder is in flight; once the gesture settles and the
//! refetch lands, the invariant holds again.

pub mod notice;
pub mod order;
pub mod overlay;
pub mod plan;
pub mod remote;
pub mod session;
pub mod store;

pub use notice::{Notice, ReorderScope};
pub use overlay::{Overlay, SettleOutcome};
pub use plan::PositionUpdate;
pub use remote::{RemoteApi, RemoteError};
pub use session::{ActiveDrag, BoardEngine, EngineConfig, SessionPhase};
pub use store::CollectionStore;
