//! Position model — the arithmetic of contiguous 1-based ordering.
//!
//! Within one parent, settled positions are exactly `1..=N`: no gaps, no
//! duplicates. The functions here perform the structural part of a reorder
//! (relocate within a sequence, or remove-then-insert across two sequences)
//! and then renumber every touched sequence in full, so the result always
//! satisfies the invariant regardless of what the inputs looked like.
//!
//! All functions are pure over owned/borrowed data; no I/O, no engine state.

use banmen_types::Card;

/// Relocate the element at `from` so it lands at index `to`.
///
/// The element is removed and re-inserted, shifting everything between
/// `from` and `to` by one slot. Out-of-range indices are clamped; a move
/// past the end lands on the last slot.
pub fn relocate<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if items.is_empty() || from >= items.len() {
        return;
    }
    let to = to.min(items.len() - 1);
    if from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Reassign `position = index + 1` across the whole sequence.
pub fn renumber<C: Card>(items: &mut [C]) {
    for (idx, item) in items.iter_mut().enumerate() {
        item.set_position(idx as u32 + 1);
    }
}

/// A same-container reorder: relocate, then renumber.
///
/// Returns the tentative sequence the optimistic overlay displays while the
/// remote confirms.
pub fn reorder<C: Card>(items: &[C], from: usize, to: usize) -> Vec<C> {
    let mut next = items.to_vec();
    relocate(&mut next, from, to);
    renumber(&mut next);
    next
}

/// A cross-container move: close the gap in `source`, open one in `dest`,
/// reparent the moved card, then renumber both sequences in full.
///
/// `from` indexes into `source`; `to` is the insertion index within `dest`
/// (clamped to its length, so "dropped on the container" appends).
pub fn transfer<C: Card>(
    source: &[C],
    dest: &[C],
    from: usize,
    to: usize,
    dest_parent: C::Parent,
) -> (Vec<C>, Vec<C>) {
    let mut new_source = source.to_vec();
    let mut new_dest = dest.to_vec();

    if from < new_source.len() {
        let mut moved = new_source.remove(from);
        moved.set_parent(dest_parent);
        let to = to.min(new_dest.len());
        new_dest.insert(to, moved);
    }

    renumber(&mut new_source);
    renumber(&mut new_dest);
    (new_source, new_dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use banmen_types::{BoardId, ListCard, ListId, TaskCard};

    fn lists(names: &[&str]) -> Vec<ListCard> {
        let board = BoardId::new();
        names
            .iter()
            .enumerate()
            .map(|(i, n)| ListCard::new(board, *n, i as u32 + 1))
            .collect()
    }

    fn names(items: &[ListCard]) -> Vec<&str> {
        items.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn reorder_moves_head_to_middle() {
        // [A(1),B(2),C(3),D(4)] moving index 0 to index 2 → [B(1),C(2),A(3),D(4)]
        let items = lists(&["A", "B", "C", "D"]);
        let next = reorder(&items, 0, 2);
        assert_eq!(names(&next), vec!["B", "C", "A", "D"]);
        let positions: Vec<u32> = next.iter().map(|l| l.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn reorder_moves_tail_to_front() {
        let items = lists(&["A", "B", "C"]);
        let next = reorder(&items, 2, 0);
        assert_eq!(names(&next), vec!["C", "A", "B"]);
        assert_eq!(next[0].position, 1);
        assert_eq!(next[2].position, 3);
    }

    #[test]
    fn relocate_same_index_is_identity() {
        let mut items = lists(&["A", "B", "C"]);
        relocate(&mut items, 1, 1);
        assert_eq!(names(&items), vec!["A", "B", "C"]);
    }

    #[test]
    fn relocate_clamps_past_end() {
        let mut items = lists(&["A", "B", "C"]);
        relocate(&mut items, 0, 99);
        assert_eq!(names(&items), vec!["B", "C", "A"]);
    }

    #[test]
    fn renumber_closes_gaps() {
        let mut items = lists(&["A", "B", "C"]);
        items[0].position = 4;
        items[2].position = 9;
        renumber(&mut items);
        let positions: Vec<u32> = items.iter().map(|l| l.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn transfer_reparents_and_renumbers_both_sides() {
        let src_list = ListId::new();
        let dst_list = ListId::new();
        let source: Vec<TaskCard> = (1..=3)
            .map(|i| TaskCard::new(src_list, format!("T{i}"), i))
            .collect();
        let dest: Vec<TaskCard> = (1..=2)
            .map(|i| TaskCard::new(dst_list, format!("D{i}"), i))
            .collect();

        let (new_source, new_dest) = transfer(&source, &dest, 1, 1, dst_list);

        let src_titles: Vec<&str> = new_source.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(src_titles, vec!["T1", "T3"]);
        assert_eq!(new_source[1].position, 2);

        let dst_titles: Vec<&str> = new_dest.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(dst_titles, vec!["D1", "T2", "D2"]);
        assert_eq!(new_dest[1].list_id, dst_list);
        let positions: Vec<u32> = new_dest.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn transfer_to_end_appends() {
        let src_list = ListId::new();
        let dst_list = ListId::new();
        let source = vec![TaskCard::new(src_list, "T1", 1)];
        let dest = vec![TaskCard::new(dst_list, "D1", 1)];

        let (new_source, new_dest) = transfer(&source, &dest, 0, 5, dst_list);
        assert!(new_source.is_empty());
        assert_eq!(new_dest.len(), 2);
        assert_eq!(new_dest[1].title, "T1");
        assert_eq!(new_dest[1].position, 2);
    }
}
