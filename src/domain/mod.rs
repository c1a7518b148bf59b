//! Domain Layer
//!
//! Contains the domain entities and core abstractions.
//! No storage or HTTP concerns live here.

mod entity;
mod member;
mod team;

pub use entity::{DomainError, DomainResult, Entity};
pub use member::{Member, MemberPatch, NewMember};
pub use team::{TeamBlock, TeamLayout};
