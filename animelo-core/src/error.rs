use crate::types::ItemId;

/// Everything that can go wrong inside the rating engine.
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    /// The identity is not in the store. Seen during an update this means
    /// the selector handed out an item that does not exist.
    #[error("item {0} not found in the rating store")]
    NotFound(ItemId),

    #[error("item {0} already exists in the rating store")]
    DuplicateIdentity(ItemId),

    #[error("need at least two eligible items to compare, found {found}")]
    InsufficientCandidates { found: usize },

    #[error("rating store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("malformed catalog: {0}")]
    ImportFormat(String),
}

pub type Result<T, E = RatingError> = std::result::Result<T, E>;
