//! Group Order
//!
//! Keeps a single flat `display_order` sequence over records that are also
//! bucketed by a group key (a team, a slideshow, ...).
//!
//! Groups are never stored. They are derived from the flat order: a group's
//! position is the position of its first member in the flat sequence.
//!
//! Every reorder operation is pure. It validates the request against a snapshot
//! and returns the `display_order` updates to persist; nothing is written here.

mod error;
mod grouping;
mod key;
mod reorder;

pub use error::ReorderError;
pub use grouping::{derive_groups, Grouping};
pub use key::GroupKey;
pub use reorder::{
    append_to_flat_order, append_to_group, reorder_groups, reorder_within_group,
    reorder_within_group_global,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// A record that takes part in the flat order.
pub trait Orderable {
    /// Opaque identifier, unique across the whole collection
    type Id: Clone + Eq + Hash + fmt::Display;

    fn id(&self) -> &Self::Id;

    /// Name of the group this record belongs to
    fn group_key(&self) -> &str;

    fn display_order(&self) -> u32;
}

/// New `display_order` for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOrderUpdate<Id> {
    pub id: Id,
    pub display_order: u32,
}

impl<Id> DisplayOrderUpdate<Id> {
    pub fn new(id: Id, display_order: u32) -> Self {
        Self { id, display_order }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Orderable;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Entry {
        pub id: String,
        pub group: String,
        pub order: u32,
    }

    pub fn entry(id: &str, group: &str, order: u32) -> Entry {
        Entry {
            id: id.to_string(),
            group: group.to_string(),
            order,
        }
    }

    impl Orderable for Entry {
        type Id = String;

        fn id(&self) -> &String {
            &self.id
        }

        fn group_key(&self) -> &str {
            &self.group
        }

        fn display_order(&self) -> u32 {
            self.order
        }
    }
}
