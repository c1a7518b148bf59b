//! Group Derivation
//!
//! Buckets a flat snapshot by group key and recovers the group order.

use std::collections::HashMap;

use crate::{GroupKey, Orderable};

/// Groups derived from one snapshot.
#[derive(Debug)]
pub struct Grouping<'a, T> {
    /// Distinct keys in the order their first member appears in the flat sequence
    pub group_order: Vec<GroupKey>,
    /// Members of each group, ascending by `display_order`
    pub groups: HashMap<GroupKey, Vec<&'a T>>,
}

impl<'a, T> Grouping<'a, T> {
    /// Members of `key`, empty if the group does not exist
    pub fn members(&self, key: &str) -> &[&'a T] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Groups in group order, each with its members
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[&'a T])> + '_ {
        self.group_order
            .iter()
            .map(move |key| (key, self.members(key.as_str())))
    }

    /// All members, group blocks laid out in group order
    pub fn flatten(&self) -> Vec<&'a T> {
        self.iter()
            .flat_map(|(_, members)| members.iter().copied())
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.group_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group_order.is_empty()
    }
}

/// Derive groups and group order from a snapshot in any order.
///
/// Items are stably sorted by `display_order`, so ties keep their relative
/// position in `items`. A group's position is fixed by its first member.
pub fn derive_groups<T: Orderable>(items: &[T]) -> Grouping<'_, T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| item.display_order());

    let mut group_order = Vec::new();
    let mut groups: HashMap<GroupKey, Vec<&T>> = HashMap::new();
    for item in sorted {
        match groups.get_mut(item.group_key()) {
            Some(bucket) => bucket.push(item),
            None => {
                let key = GroupKey::from(item.group_key());
                group_order.push(key.clone());
                groups.insert(key, vec![item]);
            }
        }
    }

    Grouping {
        group_order,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{entry, Entry};

    fn ids(members: &[&Entry]) -> Vec<String> {
        members.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn test_derive_groups_concrete_scenario() {
        let items = vec![
            entry("a", "Exec", 0),
            entry("b", "Exec", 1),
            entry("c", "Events", 2),
        ];

        let grouping = derive_groups(&items);

        assert_eq!(grouping.group_order, vec![GroupKey::from("Exec"), GroupKey::from("Events")]);
        assert_eq!(ids(grouping.members("Exec")), vec!["a", "b"]);
        assert_eq!(ids(grouping.members("Events")), vec!["c"]);
    }

    #[test]
    fn test_group_order_follows_first_member_not_input_order() {
        let items = vec![
            entry("late", "Marketing", 9),
            entry("x", "Finance", 4),
            entry("early", "Marketing", 1),
        ];

        let grouping = derive_groups(&items);

        assert_eq!(grouping.group_order, vec![GroupKey::from("Marketing"), GroupKey::from("Finance")]);
        assert_eq!(ids(grouping.members("Marketing")), vec!["early", "late"]);
    }

    #[test]
    fn test_ties_keep_input_position() {
        // Two groups both written with local indices 0..N
        let items = vec![
            entry("p", "Events", 0),
            entry("q", "Exec", 0),
            entry("r", "Exec", 1),
            entry("s", "Events", 1),
        ];

        let grouping = derive_groups(&items);

        assert_eq!(grouping.group_order, vec![GroupKey::from("Events"), GroupKey::from("Exec")]);
        assert_eq!(ids(&grouping.flatten()), vec!["p", "s", "q", "r"]);
    }

    #[test]
    fn test_gaps_are_tolerated() {
        let items = vec![entry("a", "Exec", 3), entry("b", "Exec", 40)];
        let grouping = derive_groups(&items);
        assert_eq!(ids(grouping.members("Exec")), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_snapshot() {
        let items: Vec<Entry> = Vec::new();
        let grouping = derive_groups(&items);
        assert!(grouping.is_empty());
        assert!(grouping.members("Exec").is_empty());
        assert!(!grouping.contains("Exec"));
    }
}
