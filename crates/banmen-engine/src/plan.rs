//! Reorder planner — pure computation of remote position updates.
//!
//! Given the sequences as the user saw them at gesture commit, produce the
//! ordered list of `{item, new_position}` instructions the session
//! controller fires at the remote. Planning is deterministic and
//! side-effect free: identical inputs yield identical instruction lists.
//!
//! The planner assumes valid indices. Callers resolve indices against the
//! display view and abort *before* planning when anything is stale
//! (item missing, index out of range); no validation happens here.

use banmen_types::Card;

use crate::order;

/// One remote position update.
///
/// `new_parent` is `Some` only for the dragged item of a cross-container
/// move; every other instruction keeps its item in place and adjusts the
/// position alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionUpdate<C: Card> {
    pub item: C::Id,
    pub new_parent: Option<C::Parent>,
    pub new_position: u32,
}

/// Plan a same-container move of the element at `old` to index `new`.
///
/// Emits one instruction for EVERY element of the relocated sequence, in
/// final-sequence order, positions `1..=N`. Elements whose position happens
/// to be unchanged are not skipped: the update set stays simple and each
/// instruction is an idempotent absolute assignment, so replays and
/// partial completions cannot corrupt anything the refetch will not heal.
pub fn same_container<C: Card>(items: &[C], old: usize, new: usize) -> Vec<PositionUpdate<C>> {
    order::reorder(items, old, new)
        .iter()
        .map(|item| PositionUpdate {
            item: item.id(),
            new_parent: None,
            new_position: item.position(),
        })
        .collect()
}

/// Plan a cross-container move.
///
/// `source`/`dest` are the sequences as displayed at commit time (dest
/// pre-insertion), `old` indexes the moved item within `source`, `new` is
/// the insertion index within `dest`. Instructions, in order:
///
/// 1. the moved item → `dest_parent`, position `new + 1`;
/// 2. destination items at or after `new`, shifted to `position + 1`;
/// 3. source items after `old`, shifted down to close the gap.
///
/// Destination-opening instructions precede source-closing ones. Each
/// instruction targets a distinct item so the order carries no correctness
/// weight; it is fixed for deterministic output.
pub fn cross_container<C: Card>(
    source: &[C],
    dest: &[C],
    old: usize,
    new: usize,
    dest_parent: C::Parent,
) -> Vec<PositionUpdate<C>> {
    let new = new.min(dest.len());
    let moved_position = new as u32 + 1;

    let mut plan = Vec::with_capacity(1 + dest.len().saturating_sub(new) + source.len() - old);

    plan.push(PositionUpdate {
        item: source[old].id(),
        new_parent: Some(dest_parent),
        new_position: moved_position,
    });

    // Open the gap in the destination
    for (offset, item) in dest[new..].iter().enumerate() {
        plan.push(PositionUpdate {
            item: item.id(),
            new_parent: None,
            new_position: moved_position + 1 + offset as u32,
        });
    }

    // Close the gap in the source
    for (offset, item) in source[old + 1..].iter().enumerate() {
        plan.push(PositionUpdate {
            item: item.id(),
            new_parent: None,
            new_position: old as u32 + 1 + offset as u32,
        });
    }

    plan
}
