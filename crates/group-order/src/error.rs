use thiserror::Error;

/// A reorder request that is not a permutation of the current members.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("id `{0}` belongs to the group but is missing from the requested order")]
    MissingId(String),

    #[error("id `{0}` is not a member of the group being reordered")]
    UnexpectedId(String),

    #[error("id `{0}` appears more than once in the requested order")]
    DuplicateId(String),

    #[error("group `{0}` is missing from the requested group order")]
    MissingGroup(String),

    #[error("group `{0}` does not exist")]
    UnexpectedGroup(String),

    #[error("group `{0}` appears more than once in the requested group order")]
    DuplicateGroup(String),
}

impl ReorderError {
    /// Short machine-readable name of the mismatch
    pub fn kind(&self) -> &'static str {
        match self {
            ReorderError::MissingId(_) => "missing_id",
            ReorderError::UnexpectedId(_) => "unexpected_id",
            ReorderError::DuplicateId(_) => "duplicate_id",
            ReorderError::MissingGroup(_) => "missing_group",
            ReorderError::UnexpectedGroup(_) => "unexpected_group",
            ReorderError::DuplicateGroup(_) => "duplicate_group",
        }
    }
}
