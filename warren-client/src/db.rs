use std::collections::HashMap;

use crate::{
    api::{Comment, CommentId, Error, NewComment, Post, PostId, Store, User, UserId},
    build_comment_tree, reply_depth, ThreadComment,
};

/// Everything the presentation layer holds for one open post: the post
/// itself, who the authors are, and the flat comment set as last delivered
/// by a fetch or by the live feed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PostThread {
    pub post: Post,
    pub users: HashMap<UserId, User>,
    comments: Vec<Comment>,
}

impl PostThread {
    pub async fn fetch<S: Store>(store: &mut S, post: PostId) -> Result<PostThread, Error> {
        let post = store.post(post).await?;
        let users = store
            .fetch_users()
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        let comments = store.post_comments(post.id).await?;
        Ok(PostThread {
            post,
            users,
            comments,
        })
    }

    /// Replace the flat comment set wholesale; the feed always delivers full
    /// snapshots, never diffs.
    pub fn set_comments(&mut self, comments: Vec<Comment>) {
        self.comments = comments;
    }

    pub fn author_name(&self, user: &UserId) -> Option<&str> {
        self.users.get(user).map(|u| &u.name as &str)
    }

    /// The forest to render. Rebuilt from the flat set on every call, never
    /// cached across snapshots.
    pub fn tree(&self) -> Vec<ThreadComment> {
        build_comment_tree(self.comments.clone())
    }

    /// Validates depth and text before any write reaches the store, then
    /// creates the comment with the depth it computed.
    pub async fn submit_reply<S: Store>(
        &self,
        store: &mut S,
        parent_id: Option<CommentId>,
        text: String,
    ) -> Result<CommentId, Error> {
        let depth = reply_depth(&self.tree(), parent_id)?;
        let comment = NewComment {
            post_id: self.post.id,
            parent_id,
            author_id: store.current_user(),
            text,
            depth,
        };
        comment.validate()?;
        store.create_comment(comment).await
    }
}
