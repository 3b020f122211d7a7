use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::{Comment, CommentId, Error, NewComment, Post, PostId, User, UserId, VoteTarget, VoteValue};

/// The managed document backend, as seen by the client core. Implementations
/// wrap whatever SDK actually talks to the platform; tests use the in-memory
/// mock server.
#[async_trait]
pub trait Store {
    /// Identity of the session this store handle was opened for
    fn current_user(&self) -> UserId;

    async fn fetch_users(&mut self) -> Result<Vec<User>, Error>;

    /// Point read of one post
    async fn post(&mut self, post: PostId) -> Result<Post, Error>;

    /// All comments of one post, in no promised order
    async fn post_comments(&mut self, post: PostId) -> Result<Vec<Comment>, Error>;

    /// Inserts the comment and additively bumps the owning post's comment
    /// count by one
    async fn create_comment(&mut self, comment: NewComment) -> Result<CommentId, Error>;

    /// Replaces the text and marks the comment edited; only the author may
    /// do this
    async fn edit_comment(&mut self, comment: CommentId, text: String) -> Result<(), Error>;

    /// Atomic dual write: upsert the (target, user) vote record to `value`
    /// AND adjust the target's aggregate by `value - previous`, all or
    /// nothing. The aggregate mutation must be a relative increment so
    /// concurrent voters compose.
    async fn record_vote(
        &mut self,
        target: VoteTarget,
        user: UserId,
        value: VoteValue,
        previous: VoteValue,
    ) -> Result<(), Error>;

    /// The user's standing vote on a target, `Neutral` when no record exists
    async fn vote_status(&mut self, target: VoteTarget, user: UserId)
        -> Result<VoteValue, Error>;

    /// Live subscription: delivers the full flat comment set of the post
    /// immediately, then again after every change
    async fn comment_feed(
        &mut self,
        post: PostId,
    ) -> Result<mpsc::UnboundedReceiver<Vec<Comment>>, Error>;
}
