//! Optimistic overlay + pending-update tracking.
//!
//! When a drag commits, the tentative order is installed here *synchronously*
//! so the display never flashes stale state, and the affected parents are
//! marked pending while their remote position updates are in flight. The
//! overlay shadows the remote collection store for exactly those parents;
//! everything else reads straight from the store.
//!
//! # Clearing discipline
//!
//! An overlay entry may be discarded only when BOTH hold:
//!
//! - no update for its parent is pending, and
//! - the store's id-order for that parent matches the overlay's (the server
//!   has confirmed the very order we are showing).
//!
//! Clearing on store mutation alone would flash the display back to stale
//! remote data while the gesture's own refetch is still in flight; the
//! pending set gates that. On a failure settle the entry is dropped
//! immediately instead, falling the display back to last-known-good.

use banmen_types::Card;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace, warn};

use crate::store::CollectionStore;

/// How one gesture's remote calls resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Every position update was confirmed.
    Success,
    /// At least one position update was rejected; the optimistic guess is
    /// discarded wholesale.
    Failure,
}

/// Parent-keyed optimistic shadow over a [`CollectionStore`].
#[derive(Debug, Clone)]
pub struct Overlay<C: Card> {
    entries: IndexMap<C::Parent, Vec<C>>,
    pending: IndexSet<C::Parent>,
}

impl<C: Card> Default for Overlay<C> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            pending: IndexSet::new(),
        }
    }
}

impl<C: Card> Overlay<C> {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Installation ─────────────────────────────────────────────────────

    /// Install tentative sequences for the affected parents.
    ///
    /// A later `begin` for the same parent replaces the earlier entry:
    /// gestures are sequential from the UI's perspective, last committed
    /// overlay wins.
    pub fn begin(&mut self, seeds: impl IntoIterator<Item = (C::Parent, Vec<C>)>) {
        for (parent, items) in seeds {
            trace!(parent = %parent, items = items.len(), "overlay installed");
            self.entries.insert(parent, items);
        }
    }

    /// Mark parents as awaiting at least one remote confirmation.
    pub fn mark_pending(&mut self, parents: impl IntoIterator<Item = C::Parent>) {
        for parent in parents {
            self.pending.insert(parent);
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// The tentative sequence for a parent, if one is installed.
    pub fn entry(&self, parent: C::Parent) -> Option<&[C]> {
        self.entries.get(&parent).map(Vec::as_slice)
    }

    pub fn is_pending(&self, parent: C::Parent) -> bool {
        self.pending.contains(&parent)
    }

    /// Whether any parent is still awaiting confirmation.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Parents with an installed overlay entry, in installation order.
    pub fn parents(&self) -> impl Iterator<Item = C::Parent> + '_ {
        self.entries.keys().copied()
    }

    // ── Settlement ───────────────────────────────────────────────────────

    /// All remote calls for `parents` have resolved.
    ///
    /// On success the parents are merely unmarked; the entries stay up
    /// until [`reconcile`](Self::reconcile) observes the store catching up.
    /// On failure the entries are dropped on the spot so the display falls
    /// back to whatever the store currently holds.
    pub fn settle(&mut self, parents: &[C::Parent], outcome: SettleOutcome) {
        for parent in parents {
            self.pending.shift_remove(parent);
            if outcome == SettleOutcome::Failure {
                if self.entries.shift_remove(parent).is_some() {
                    warn!(parent = %parent, "overlay rolled back to last-known-good");
                }
            }
        }
    }

    /// Drop every non-pending entry whose id-order the store has confirmed.
    ///
    /// Runs after store mutations and after a success settle. Compares the
    /// ordered id sequence only; content differences (a renamed card) do
    /// not keep an overlay alive.
    pub fn reconcile(&mut self, store: &CollectionStore<C>) {
        if self.entries.is_empty() {
            return;
        }
        let converged: Vec<C::Parent> = self
            .entries
            .iter()
            .filter(|(parent, seq)| {
                !self.pending.contains(*parent)
                    && store.id_order(**parent)
                        == seq.iter().map(|c| c.id()).collect::<Vec<_>>()
            })
            .map(|(parent, _)| *parent)
            .collect();
        for parent in converged {
            debug!(parent = %parent, "store converged, overlay cleared");
            self.entries.shift_remove(&parent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banmen_types::{ListId, TaskCard};

    fn seeded(list: ListId, titles: &[&str]) -> Vec<TaskCard> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| TaskCard::new(list, *t, i as u32 + 1))
            .collect()
    }

    #[test]
    fn entry_shadows_until_settled() {
        let list = ListId::new();
        let mut overlay: Overlay<TaskCard> = Overlay::new();
        let tentative = seeded(list, &["b", "a"]);

        overlay.begin([(list, tentative.clone())]);
        overlay.mark_pending([list]);

        assert!(overlay.is_pending(list));
        assert_eq!(overlay.entry(list).unwrap().len(), 2);
    }

    #[test]
    fn failure_settle_drops_entry_immediately() {
        let list = ListId::new();
        let mut overlay: Overlay<TaskCard> = Overlay::new();
        overlay.begin([(list, seeded(list, &["a"]))]);
        overlay.mark_pending([list]);

        overlay.settle(&[list], SettleOutcome::Failure);

        assert!(overlay.entry(list).is_none());
        assert!(!overlay.is_pending(list));
    }

    #[test]
    fn success_settle_keeps_entry_until_store_converges() {
        let list = ListId::new();
        let mut overlay: Overlay<TaskCard> = Overlay::new();
        let mut store: CollectionStore<TaskCard> = CollectionStore::new();

        let confirmed = seeded(list, &["a", "b"]);
        store.replace_all(list, confirmed.clone());

        // Optimistic swap: [b, a], renumbered 1..=2
        let mut tentative = vec![confirmed[1].clone(), confirmed[0].clone()];
        tentative[0].position = 1;
        tentative[1].position = 2;
        overlay.begin([(list, tentative.clone())]);
        overlay.mark_pending([list]);

        overlay.settle(&[list], SettleOutcome::Success);
        overlay.reconcile(&store);
        // Store still has the old order — overlay must survive
        assert!(overlay.entry(list).is_some());

        // Refetch lands with the confirmed new order
        store.replace_all(list, tentative);
        overlay.reconcile(&store);
        assert!(overlay.entry(list).is_none());
    }

    #[test]
    fn reconcile_never_clears_pending_parents() {
        let list = ListId::new();
        let mut overlay: Overlay<TaskCard> = Overlay::new();
        let mut store: CollectionStore<TaskCard> = CollectionStore::new();

        let items = seeded(list, &["a", "b"]);
        store.replace_all(list, items.clone());
        overlay.begin([(list, items)]);
        overlay.mark_pending([list]);

        // Orders are identical, but the parent is pending — keep the overlay
        overlay.reconcile(&store);
        assert!(overlay.entry(list).is_some());
    }

    #[test]
    fn later_begin_wins() {
        let list = ListId::new();
        let mut overlay: Overlay<TaskCard> = Overlay::new();
        overlay.begin([(list, seeded(list, &["a", "b"]))]);
        overlay.begin([(list, seeded(list, &["c"]))]);
        assert_eq!(overlay.entry(list).unwrap()[0].title, "c");
    }
}
