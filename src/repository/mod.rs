//! Repository Layer
//!
//! Data access abstractions and implementations.

mod db;
mod member;
mod traits;


pub use db::{init_db, DbState};
pub use member::{MemberOrderingOperations, MemberRepository};
pub use traits::Repository;
