use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;
use uuid::Uuid;
use warren_client::api::{
    Comment, CommentId, Error, NewComment, Post, PostId, Store, User, UserId, VoteTarget,
    VoteValue,
};

/// In-memory stand-in for the managed document backend, with the semantics
/// tests care about: honest all-or-nothing vote writes, additive counters,
/// full-snapshot feed fan-out, and injectable write failures.
pub struct MockServer {
    owner: UserId,
    users: HashMap<UserId, User>,
    posts: HashMap<PostId, Post>,
    /// Arrival order, which is also createdAt order
    comments: Vec<Comment>,
    votes: HashMap<(VoteTarget, UserId), VoteValue>,
    feeds: HashMap<PostId, Vec<mpsc::UnboundedSender<Vec<Comment>>>>,
    fail_writes: bool,
}

impl MockServer {
    /// A store handle opened for `owner`'s session
    pub fn new(owner: User) -> MockServer {
        let mut users = HashMap::new();
        let owner_id = owner.id;
        users.insert(owner.id, owner);
        MockServer {
            owner: owner_id,
            users,
            posts: HashMap::new(),
            comments: Vec::new(),
            votes: HashMap::new(),
            feeds: HashMap::new(),
            fail_writes: false,
        }
    }

    pub fn add_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn add_post(&mut self, author_id: UserId, title: &str, body: &str) -> PostId {
        let id = PostId(Uuid::new_v4());
        self.posts.insert(
            id,
            Post {
                id,
                author_id,
                created_at: Utc::now(),
                title: title.to_string(),
                body: body.to_string(),
                votes: 0,
                comment_count: 0,
            },
        );
        id
    }

    /// While set, every write fails with `StoreUnavailable` and mutates
    /// nothing; reads keep working.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    fn check_write(&self) -> Result<(), Error> {
        match self.fail_writes {
            true => Err(Error::StoreUnavailable(String::from(
                "injected write failure",
            ))),
            false => Ok(()),
        }
    }

    fn snapshot(&self, post: PostId) -> Vec<Comment> {
        self.comments
            .iter()
            .filter(|c| c.post_id == post)
            .cloned()
            .collect()
    }

    fn relay(&mut self, post: PostId) {
        let snapshot = self.snapshot(post);
        if let Some(feeds) = self.feeds.get_mut(&post) {
            feeds.retain(|f| matches!(f.send(snapshot.clone()), Ok(())));
        }
    }
}

#[async_trait]
impl Store for MockServer {
    fn current_user(&self) -> UserId {
        self.owner
    }

    async fn fetch_users(&mut self) -> Result<Vec<User>, Error> {
        Ok(self.users.values().cloned().collect())
    }

    async fn post(&mut self, post: PostId) -> Result<Post, Error> {
        self.posts.get(&post).cloned().ok_or(Error::PostNotFound(post))
    }

    async fn post_comments(&mut self, post: PostId) -> Result<Vec<Comment>, Error> {
        // A query over an absent post id is just an empty result set
        Ok(self.snapshot(post))
    }

    async fn create_comment(&mut self, comment: NewComment) -> Result<CommentId, Error> {
        self.check_write()?;
        comment.validate()?;
        let post = self
            .posts
            .get_mut(&comment.post_id)
            .ok_or(Error::PostNotFound(comment.post_id))?;
        post.comment_count += 1;
        let id = CommentId(Uuid::new_v4());
        self.comments.push(Comment {
            id,
            post_id: comment.post_id,
            parent_id: comment.parent_id,
            author_id: comment.author_id,
            text: comment.text,
            created_at: Utc::now(),
            votes: 0,
            depth: comment.depth,
            is_edited: false,
        });
        self.relay(comment.post_id);
        Ok(id)
    }

    async fn edit_comment(&mut self, comment: CommentId, text: String) -> Result<(), Error> {
        self.check_write()?;
        warren_client::api::validate_string(&text)?;
        let c = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment)
            .ok_or(Error::CommentNotFound(comment))?;
        if c.author_id != self.owner {
            return Err(Error::PermissionDenied);
        }
        c.text = text;
        c.is_edited = true;
        let post = c.post_id;
        self.relay(post);
        Ok(())
    }

    async fn record_vote(
        &mut self,
        target: VoteTarget,
        user: UserId,
        value: VoteValue,
        previous: VoteValue,
    ) -> Result<(), Error> {
        self.check_write()?;
        // Aggregates only ever move by the relative change so concurrent
        // voters compose instead of overwriting each other
        let delta = value.score() - previous.score();
        let relay_post = match target {
            VoteTarget::Post(p) => {
                let post = self.posts.get_mut(&p).ok_or(Error::PostNotFound(p))?;
                post.votes += delta;
                None
            }
            VoteTarget::Comment(c) => {
                let comment = self
                    .comments
                    .iter_mut()
                    .find(|comment| comment.id == c)
                    .ok_or(Error::CommentNotFound(c))?;
                comment.votes += delta;
                Some(comment.post_id)
            }
        };
        self.votes.insert((target, user), value);
        if let Some(post) = relay_post {
            self.relay(post);
        }
        Ok(())
    }

    async fn vote_status(
        &mut self,
        target: VoteTarget,
        user: UserId,
    ) -> Result<VoteValue, Error> {
        Ok(self.votes.get(&(target, user)).copied().unwrap_or_default())
    }

    async fn comment_feed(
        &mut self,
        post: PostId,
    ) -> Result<mpsc::UnboundedReceiver<Vec<Comment>>, Error> {
        let (sender, receiver) = mpsc::unbounded_channel();
        // The feed fires once immediately with the current result set
        let _ = sender.send(self.snapshot(post));
        self.feeds.entry(post).or_default().push(sender);
        Ok(receiver)
    }
}
