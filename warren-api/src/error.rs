use crate::{CommentId, PostId};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Post not found {0:?}")]
    PostNotFound(PostId),

    #[error("Comment not found {0:?}")]
    CommentNotFound(CommentId),

    #[error("Parent comment {0:?} is not part of this discussion")]
    UnknownParent(CommentId),

    #[error("Maximum discussion depth reached (depth {depth})")]
    DepthLimitExceeded { depth: u32 },

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("Comment text must not be empty")]
    EmptyText,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl Error {
    /// Transient failures are the only ones worth a retry prompt; everything
    /// else is either a caller bug or a definitive refusal.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::StoreUnavailable(_))
    }
}
