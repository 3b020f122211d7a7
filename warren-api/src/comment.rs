use uuid::Uuid;

use crate::{Error, PostId, Time, UserId, STUB_UUID};

/// Replies may be created down to this depth; anything deeper is refused
/// before a write is attempted.
pub const MAX_COMMENT_DEPTH: u32 = 3;

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn stub() -> CommentId {
        CommentId(STUB_UUID)
    }
}

/// A comment as stored: flat, with threading expressed only through
/// `parent_id`. Tree assembly happens client-side and is never persisted.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    /// `None` for a top-level comment. If set, must reference a comment of
    /// the same post; the store does not re-check this.
    pub parent_id: Option<CommentId>,
    pub author_id: UserId,

    pub text: String,
    pub created_at: Time,

    /// Running vote total, maintained by relative increments only
    pub votes: i64,
    /// 0 for a top-level comment, parent depth + 1 for a reply. Computed by
    /// the client at creation time, not re-derived by the store.
    pub depth: u32,
    pub is_edited: bool,
}

/// Creation payload; the store assigns id and timestamp and starts the
/// comment at zero votes, unedited.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: PostId,
    pub parent_id: Option<CommentId>,
    pub author_id: UserId,
    pub text: String,
    pub depth: u32,
}

impl NewComment {
    // See comments on other `validate` functions throughout warren-api
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.text)?;
        if self.text.trim().is_empty() {
            return Err(Error::EmptyText);
        }
        if self.depth > MAX_COMMENT_DEPTH {
            return Err(Error::DepthLimitExceeded { depth: self.depth });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn comment_document_shape() {
        // Field names must match the documents the managed store already
        // holds, so renames here are breaking changes.
        let c = Comment {
            id: CommentId::stub(),
            post_id: PostId::stub(),
            parent_id: None,
            author_id: UserId::stub(),
            text: String::from("hello"),
            created_at: Utc::now(),
            votes: 0,
            depth: 0,
            is_edited: false,
        };
        let doc = serde_json::to_value(&c).expect("serializing comment");
        for field in [
            "id",
            "postId",
            "parentId",
            "authorId",
            "text",
            "createdAt",
            "votes",
            "depth",
            "isEdited",
        ] {
            assert!(doc.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn new_comment_validation() {
        let mut c = NewComment {
            post_id: PostId::stub(),
            parent_id: None,
            author_id: UserId::stub(),
            text: String::from("fine"),
            depth: 0,
        };
        assert_eq!(c.validate(), Ok(()));

        c.text = String::from("   ");
        assert_eq!(c.validate(), Err(Error::EmptyText));

        c.text = String::from("nul\0byte");
        assert_eq!(
            c.validate(),
            Err(Error::NullByteInString(String::from("nul\0byte")))
        );

        c.text = String::from("too deep");
        c.depth = MAX_COMMENT_DEPTH + 1;
        assert_eq!(c.validate(), Err(Error::DepthLimitExceeded { depth: 4 }));
    }
}
