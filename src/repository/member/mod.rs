//! Member Repository Module
//!
//! - member_repo: Core CRUD operations
//! - member_ordering: Display order management (append, reorder, bulk writes)

mod member_ordering;
mod member_repo;

pub use member_ordering::MemberOrderingOperations;
pub use member_repo::MemberRepository;
