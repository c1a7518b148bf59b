//! Reorder Operations
//!
//! Turns drag-and-drop intents into `display_order` updates.
//!
//! `reorder_groups` and `reorder_within_group_global` renumber the whole
//! collection, so their output is contiguous and unique across groups.
//! `reorder_within_group` only renumbers one group with local indices, which
//! can tie with other groups' values.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::{derive_groups, DisplayOrderUpdate, GroupKey, Orderable, ReorderError};

type Updates<Id> = Vec<DisplayOrderUpdate<Id>>;

enum Mismatch<'a, K> {
    Missing(&'a K),
    Unexpected(&'a K),
    Duplicate(&'a K),
}

/// First difference between `submitted` and a permutation of `expected`.
fn find_mismatch<'a, K: Eq + Hash>(expected: &[&'a K], submitted: &'a [K]) -> Option<Mismatch<'a, K>> {
    let expected_set: HashSet<&K> = expected.iter().copied().collect();
    let mut seen: HashSet<&K> = HashSet::with_capacity(submitted.len());

    for key in submitted {
        if !expected_set.contains(key) {
            return Some(Mismatch::Unexpected(key));
        }
        if !seen.insert(key) {
            return Some(Mismatch::Duplicate(key));
        }
    }

    expected
        .iter()
        .copied()
        .find(|key| !seen.contains(key))
        .map(Mismatch::Missing)
}

fn check_members<T: Orderable>(members: &[&T], ordered_ids: &[T::Id]) -> Result<(), ReorderError> {
    let expected: Vec<&T::Id> = members.iter().map(|member| member.id()).collect();
    match find_mismatch(&expected, ordered_ids) {
        None => Ok(()),
        Some(Mismatch::Missing(id)) => Err(ReorderError::MissingId(id.to_string())),
        Some(Mismatch::Unexpected(id)) => Err(ReorderError::UnexpectedId(id.to_string())),
        Some(Mismatch::Duplicate(id)) => Err(ReorderError::DuplicateId(id.to_string())),
    }
}

fn check_groups(current: &[GroupKey], requested: &[GroupKey]) -> Result<(), ReorderError> {
    let expected: Vec<&GroupKey> = current.iter().collect();
    match find_mismatch(&expected, requested) {
        None => Ok(()),
        Some(Mismatch::Missing(key)) => Err(ReorderError::MissingGroup(key.to_string())),
        Some(Mismatch::Unexpected(key)) => Err(ReorderError::UnexpectedGroup(key.to_string())),
        Some(Mismatch::Duplicate(key)) => Err(ReorderError::DuplicateGroup(key.to_string())),
    }
}

/// Number blocks back to back from 0.
fn lay_out<'g, 'a: 'g, T: Orderable + 'a>(blocks: impl IntoIterator<Item = &'g [&'a T]>) -> Updates<T::Id> {
    blocks
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(position, item)| DisplayOrderUpdate::new(item.id().clone(), position as u32))
        .collect()
}

/// Renumber one group `0..N` in the order of `ordered_ids`.
///
/// `ordered_ids` must be exactly the group's current members. Items outside
/// the group get no update.
pub fn reorder_within_group<T: Orderable>(
    items: &[T],
    group: &str,
    ordered_ids: &[T::Id],
) -> Result<Updates<T::Id>, ReorderError> {
    let grouping = derive_groups(items);
    check_members(grouping.members(group), ordered_ids)?;

    Ok(ordered_ids
        .iter()
        .enumerate()
        .map(|(position, id)| DisplayOrderUpdate::new(id.clone(), position as u32))
        .collect())
}

/// Apply a new order inside one group, then renumber the whole collection.
///
/// Group order and every other group's internal order are kept. The result
/// holds one update per item with values `0..len`.
pub fn reorder_within_group_global<T: Orderable>(
    items: &[T],
    group: &str,
    ordered_ids: &[T::Id],
) -> Result<Updates<T::Id>, ReorderError> {
    let grouping = derive_groups(items);
    let members = grouping.members(group);
    check_members(members, ordered_ids)?;

    let by_id: HashMap<&T::Id, &T> = members.iter().map(|member| (member.id(), *member)).collect();
    let reordered: Vec<&T> = ordered_ids
        .iter()
        .filter_map(|id| by_id.get(id).copied())
        .collect();

    Ok(lay_out(grouping.group_order.iter().map(|key| {
        if key == group {
            reordered.as_slice()
        } else {
            grouping.members(key.as_str())
        }
    })))
}

/// Lay groups out in `new_group_order`, renumbering every item.
///
/// `new_group_order` must be a permutation of the groups derived from
/// `items`. Members keep their order inside each group; the result holds one
/// update per item with values `0..len`.
pub fn reorder_groups<T: Orderable>(
    items: &[T],
    new_group_order: &[GroupKey],
) -> Result<Updates<T::Id>, ReorderError> {
    let grouping = derive_groups(items);
    check_groups(&grouping.group_order, new_group_order)?;

    Ok(lay_out(
        new_group_order
            .iter()
            .map(|key| grouping.members(key.as_str())),
    ))
}

/// `display_order` that puts a new item last in `group`; 0 for an empty group.
pub fn append_to_group<T: Orderable>(items: &[T], group: &str) -> u32 {
    items
        .iter()
        .filter(|item| item.group_key() == group)
        .map(|item| item.display_order().saturating_add(1))
        .max()
        .unwrap_or(0)
}

/// `display_order` that puts a new item last in the flat order; 0 when empty.
pub fn append_to_flat_order<T: Orderable>(items: &[T]) -> u32 {
    items
        .iter()
        .map(|item| item.display_order().saturating_add(1))
        .max()
        .unwrap_or(0)
}
