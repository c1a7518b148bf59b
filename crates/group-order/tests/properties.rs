use std::collections::HashMap;

use group_order::{
    derive_groups, reorder_groups, reorder_within_group, reorder_within_group_global,
    DisplayOrderUpdate, GroupKey, Orderable,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Member {
    id: String,
    team: String,
    order: u32,
}

impl Orderable for Member {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }

    fn group_key(&self) -> &str {
        &self.team
    }

    fn display_order(&self) -> u32 {
        self.order
    }
}

const TEAMS: [&str; 4] = ["Exec", "Events", "Marketing", "Finance"];

/// Members with arbitrary teams and arbitrary (possibly tied) orders.
fn members_strategy() -> impl Strategy<Value = Vec<Member>> {
    proptest::collection::vec((0..TEAMS.len(), 0u32..40), 0..24).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (team, order))| Member {
                id: format!("m{index}"),
                team: TEAMS[team].to_string(),
                order,
            })
            .collect()
    })
}

fn apply(items: &[Member], updates: &[DisplayOrderUpdate<String>]) -> Vec<Member> {
    let by_id: HashMap<&str, u32> = updates
        .iter()
        .map(|u| (u.id.as_str(), u.display_order))
        .collect();
    items
        .iter()
        .map(|item| Member {
            order: by_id.get(item.id.as_str()).copied().unwrap_or(item.order),
            ..item.clone()
        })
        .collect()
}

fn flat_ids(items: &[Member]) -> Vec<String> {
    derive_groups(items)
        .flatten()
        .into_iter()
        .map(|m| m.id.clone())
        .collect()
}

proptest! {
    #[test]
    fn grouping_only_partitions(items in members_strategy()) {
        let grouping = derive_groups(&items);
        let flat = grouping.flatten();
        prop_assert_eq!(flat.len(), items.len());

        let mut sorted = items.clone();
        sorted.sort_by_key(|m| m.order);
        let mut first_seen: Vec<&str> = Vec::new();
        for member in &sorted {
            if !first_seen.contains(&member.team.as_str()) {
                first_seen.push(&member.team);
            }
        }
        let derived: Vec<&str> = grouping.group_order.iter().map(GroupKey::as_str).collect();
        prop_assert_eq!(derived, first_seen);

        for (team, members) in grouping.iter() {
            let expected: Vec<&str> = sorted
                .iter()
                .filter(|m| m.team == team.as_str())
                .map(|m| m.id.as_str())
                .collect();
            let actual: Vec<&str> = members.iter().map(|m| m.id.as_str()).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn within_group_reorder_is_a_bijection(
        (items, permutation) in members_strategy().prop_flat_map(|items| {
            let ids: Vec<String> = items
                .iter()
                .filter(|m| m.team == "Exec")
                .map(|m| m.id.clone())
                .collect();
            (Just(items), Just(ids).prop_shuffle())
        })
    ) {
        let updates = reorder_within_group(&items, "Exec", &permutation).unwrap();

        prop_assert_eq!(updates.len(), permutation.len());
        for (position, (update, id)) in updates.iter().zip(&permutation).enumerate() {
            prop_assert_eq!(&update.id, id);
            prop_assert_eq!(update.display_order, position as u32);
        }
    }

    #[test]
    fn group_reorder_is_total_and_contiguous(
        (items, order) in members_strategy().prop_flat_map(|items| {
            let groups = derive_groups(&items).group_order;
            (Just(items), Just(groups).prop_shuffle())
        })
    ) {
        let before = derive_groups(&items);
        let updates = reorder_groups(&items, &order).unwrap();

        let mut values: Vec<u32> = updates.iter().map(|u| u.display_order).collect();
        values.sort_unstable();
        prop_assert_eq!(values, (0..items.len() as u32).collect::<Vec<_>>());

        let applied = apply(&items, &updates);
        let after = derive_groups(&applied);
        prop_assert_eq!(&after.group_order, &order);

        // Each group is one contiguous block, with its internal order intact.
        let mut next = 0u32;
        for key in &order {
            let old: Vec<&str> = before.members(key.as_str()).iter().map(|m| m.id.as_str()).collect();
            let new: Vec<&str> = after.members(key.as_str()).iter().map(|m| m.id.as_str()).collect();
            prop_assert_eq!(&new, &old);
            for member in after.members(key.as_str()) {
                prop_assert_eq!(member.order, next);
                next += 1;
            }
        }
    }

    #[test]
    fn reordering_to_current_order_is_a_no_op(items in members_strategy()) {
        let current = derive_groups(&items).group_order;
        let once = apply(&items, &reorder_groups(&items, &current).unwrap());
        prop_assert_eq!(flat_ids(&once), flat_ids(&items));

        let twice = apply(&once, &reorder_groups(&once, &current).unwrap());
        let unchanged: Vec<u32> = once.iter().map(|m| m.order).collect();
        prop_assert_eq!(twice.iter().map(|m| m.order).collect::<Vec<_>>(), unchanged);
    }

    #[test]
    fn global_within_group_reorder_keeps_other_groups(
        (items, permutation) in members_strategy().prop_flat_map(|items| {
            let ids: Vec<String> = items
                .iter()
                .filter(|m| m.team == "Events")
                .map(|m| m.id.clone())
                .collect();
            (Just(items), Just(ids).prop_shuffle())
        })
    ) {
        let before = derive_groups(&items);
        let updates = reorder_within_group_global(&items, "Events", &permutation).unwrap();
        let applied = apply(&items, &updates);
        let after = derive_groups(&applied);

        let mut values: Vec<u32> = updates.iter().map(|u| u.display_order).collect();
        values.sort_unstable();
        prop_assert_eq!(values, (0..items.len() as u32).collect::<Vec<_>>());

        prop_assert_eq!(&after.group_order, &before.group_order);
        let events: Vec<&String> = after.members("Events").iter().map(|m| &m.id).collect();
        prop_assert_eq!(events, permutation.iter().collect::<Vec<_>>());
        for key in before.group_order.iter().filter(|key| key.as_str() != "Events") {
            let old: Vec<&str> = before.members(key.as_str()).iter().map(|m| m.id.as_str()).collect();
            let new: Vec<&str> = after.members(key.as_str()).iter().map(|m| m.id.as_str()).collect();
            prop_assert_eq!(new, old);
        }
    }
}
