use std::collections::HashMap;

use crate::api::{Comment, CommentId, Error, MAX_COMMENT_DEPTH};

/// A comment with its replies attached, ready for rendering. Only ever built
/// in memory; the store never sees this shape.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThreadComment {
    pub comment: Comment,
    /// Direct replies, in chronological order
    pub replies: Vec<ThreadComment>,
}

/// Assembles the flat comment set of one post into an ordered forest.
///
/// Root comments come out sorted by votes, highest first, ties keeping
/// chronological order. Reply lists stay purely chronological and are never
/// re-sorted by votes; the thread UI relies on that asymmetry.
///
/// A comment whose parent is not part of the input set is dropped from the
/// result. This mirrors what the UI has always shown for partial fetches; do
/// not quietly promote such comments to roots.
pub fn build_comment_tree(mut comments: Vec<Comment>) -> Vec<ThreadComment> {
    // Timestamps have second granularity in stored documents, so sorting by
    // whole seconds (stably) keeps arrival order within the same second.
    comments.sort_by_key(|c| c.created_at.timestamp());

    let index: HashMap<CommentId, usize> = comments
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id, i))
        .collect();

    // Arena of reply links: children[i] holds the indices of the direct
    // replies to comments[i], already in chronological order.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); comments.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (i, c) in comments.iter().enumerate() {
        match c.parent_id {
            None => roots.push(i),
            Some(parent) => match index.get(&parent) {
                Some(&p) => children[p].push(i),
                None => {
                    tracing::warn!(comment = ?c.id, ?parent, "dropping reply whose parent is not in the fetched set")
                }
            },
        }
    }

    roots.sort_by_key(|&i| std::cmp::Reverse(comments[i].votes));

    roots
        .into_iter()
        .map(|i| assemble(i, &comments, &children))
        .collect()
}

fn assemble(i: usize, comments: &[Comment], children: &[Vec<usize>]) -> ThreadComment {
    ThreadComment {
        comment: comments[i].clone(),
        replies: children[i]
            .iter()
            .map(|&c| assemble(c, comments, children))
            .collect(),
    }
}

/// Depth-first lookup of a comment's stored depth, `None` when the id is
/// nowhere in the forest. Callers must not treat absence as depth zero.
pub fn find_comment_depth(forest: &[ThreadComment], target: CommentId) -> Option<u32> {
    for node in forest {
        if node.comment.id == target {
            return Some(node.comment.depth);
        }
        if let Some(depth) = find_comment_depth(&node.replies, target) {
            return Some(depth);
        }
    }
    None
}

/// Depth the new comment would be created at, or why it cannot be. This is
/// the value to store on the comment; the store does not re-derive it.
pub fn reply_depth(forest: &[ThreadComment], parent: Option<CommentId>) -> Result<u32, Error> {
    let depth = match parent {
        None => 0,
        Some(p) => find_comment_depth(forest, p).ok_or(Error::UnknownParent(p))? + 1,
    };
    if depth > MAX_COMMENT_DEPTH {
        return Err(Error::DepthLimitExceeded { depth });
    }
    Ok(depth)
}
