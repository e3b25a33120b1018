//! Remote collection store — last-known-good server state, per parent.
//!
//! One store per card kind (lists-by-board, tasks-by-list). Only
//! server-confirmed data lives here: bulk fetches overwrite a parent's
//! sequence wholesale, individual create/update/move confirmations upsert,
//! delete confirmations remove. The optimistic overlay is layered on top by
//! the session controller; this store never sees tentative data.
//!
//! All mutations are synchronous and infallible. Duplicate ids or position
//! gaps are a caller error and are not signaled here; the next bulk fetch
//! overwrites whatever state they produced.

use banmen_types::Card;
use indexmap::IndexMap;

/// Per-parent ordered sequences of one card kind.
#[derive(Debug, Clone)]
pub struct CollectionStore<C: Card> {
    by_parent: IndexMap<C::Parent, Vec<C>>,
}

impl<C: Card> Default for CollectionStore<C> {
    fn default() -> Self {
        Self { by_parent: IndexMap::new() }
    }
}

impl<C: Card> CollectionStore<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a parent's entire sequence from a bulk fetch.
    ///
    /// Items are stable-sorted by position; positions are unique after any
    /// settled reconciliation, so ties only occur on malformed input and
    /// resolve to server response order.
    pub fn replace_all(&mut self, parent: C::Parent, mut items: Vec<C>) {
        items.sort_by_key(|c| c.position());
        self.by_parent.insert(parent, items);
    }

    /// Insert or replace a single confirmed card, re-sorting its parent's
    /// sequence by position afterwards.
    ///
    /// If the card is currently held under a *different* parent (a task
    /// whose move confirmation arrives before the refetch), the stale entry
    /// is dropped from the old parent first.
    pub fn upsert(&mut self, item: C) {
        let id = item.id();
        let parent = item.parent();

        for (p, seq) in self.by_parent.iter_mut() {
            if *p != parent {
                seq.retain(|c| c.id() != id);
            }
        }

        let seq = self.by_parent.entry(parent).or_default();
        match seq.iter_mut().find(|c| c.id() == id) {
            Some(existing) => *existing = item,
            None => seq.push(item),
        }
        seq.sort_by_key(|c| c.position());
    }

    /// Drop a card by id from whichever parent holds it.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove(&mut self, id: C::Id) -> bool {
        let mut removed = false;
        for seq in self.by_parent.values_mut() {
            let before = seq.len();
            seq.retain(|c| c.id() != id);
            removed |= seq.len() != before;
        }
        removed
    }

    /// The confirmed sequence for a parent (empty if never fetched).
    pub fn get(&self, parent: C::Parent) -> &[C] {
        self.by_parent.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a bulk fetch has ever populated this parent.
    pub fn knows(&self, parent: C::Parent) -> bool {
        self.by_parent.contains_key(&parent)
    }

    /// All parents with a (possibly empty) confirmed sequence, in first-seen
    /// order.
    pub fn parents(&self) -> impl Iterator<Item = C::Parent> + '_ {
        self.by_parent.keys().copied()
    }

    /// Locate a card by its raw UUID: `(parent, index)`.
    pub fn locate(&self, id: uuid::Uuid) -> Option<(C::Parent, usize)> {
        for (parent, seq) in &self.by_parent {
            if let Some(idx) = seq.iter().position(|c| c.uuid() == id) {
                return Some((*parent, idx));
            }
        }
        None
    }

    /// The ordered id sequence for a parent — the cheap equality key the
    /// overlay reconciliation check compares against.
    pub fn id_order(&self, parent: C::Parent) -> Vec<C::Id> {
        self.get(parent).iter().map(|c| c.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banmen_types::{ListId, TaskCard};

    fn task(list: ListId, title: &str, position: u32) -> TaskCard {
        TaskCard::new(list, title, position)
    }

    fn titles(items: &[TaskCard]) -> Vec<&str> {
        items.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn replace_all_sorts_by_position() {
        let list = ListId::new();
        let mut store = CollectionStore::new();
        store.replace_all(
            list,
            vec![task(list, "c", 3), task(list, "a", 1), task(list, "b", 2)],
        );
        assert_eq!(titles(store.get(list)), vec!["a", "b", "c"]);
    }

    #[test]
    fn upsert_replaces_in_place_and_resorts() {
        let list = ListId::new();
        let mut store = CollectionStore::new();
        let a = task(list, "a", 1);
        let b = task(list, "b", 2);
        store.replace_all(list, vec![a.clone(), b.clone()]);

        // Confirmation moves "a" to the back
        let mut moved = a.clone();
        moved.position = 3;
        store.upsert(moved);

        assert_eq!(titles(store.get(list)), vec!["b", "a"]);
        assert_eq!(store.get(list).len(), 2);
    }

    #[test]
    fn upsert_inserts_new_card() {
        let list = ListId::new();
        let mut store = CollectionStore::new();
        store.replace_all(list, vec![task(list, "a", 1)]);
        store.upsert(task(list, "b", 2));
        assert_eq!(titles(store.get(list)), vec!["a", "b"]);
    }

    #[test]
    fn upsert_evicts_stale_entry_under_old_parent() {
        let src = ListId::new();
        let dst = ListId::new();
        let mut store = CollectionStore::new();
        let t = task(src, "t", 1);
        store.replace_all(src, vec![t.clone()]);
        store.replace_all(dst, vec![]);

        let mut moved = t.clone();
        moved.list_id = dst;
        moved.position = 1;
        store.upsert(moved);

        assert!(store.get(src).is_empty());
        assert_eq!(titles(store.get(dst)), vec!["t"]);
    }

    #[test]
    fn remove_scans_every_parent() {
        let a = ListId::new();
        let b = ListId::new();
        let mut store = CollectionStore::new();
        let victim = task(b, "victim", 1);
        store.replace_all(a, vec![task(a, "keep", 1)]);
        store.replace_all(b, vec![victim.clone()]);

        assert!(store.remove(victim.id));
        assert!(!store.remove(victim.id));
        assert_eq!(store.get(a).len(), 1);
        assert!(store.get(b).is_empty());
    }

    #[test]
    fn locate_finds_parent_and_index() {
        let list = ListId::new();
        let mut store = CollectionStore::new();
        let b = task(list, "b", 2);
        store.replace_all(list, vec![task(list, "a", 1), b.clone()]);
        assert_eq!(store.locate(b.id.as_uuid()), Some((list, 1)));
        assert_eq!(store.locate(uuid::Uuid::now_v7()), None);
    }

    #[test]
    fn unfetched_parent_reads_empty() {
        let store: CollectionStore<TaskCard> = CollectionStore::new();
        let list = ListId::new();
        assert!(store.get(list).is_empty());
        assert!(!store.knows(list));
    }
}
