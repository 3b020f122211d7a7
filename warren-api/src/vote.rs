use crate::{CommentId, PostId};

/// A user's standing vote on one target. `Neutral` is what a missing record
/// reads back as, so writing `Neutral` is how a vote gets cleared.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize,
)]
pub enum VoteValue {
    Down,
    #[default]
    Neutral,
    Up,
}

impl VoteValue {
    /// Contribution of this vote to the target's aggregate
    pub fn score(self) -> i64 {
        match self {
            VoteValue::Down => -1,
            VoteValue::Neutral => 0,
            VoteValue::Up => 1,
        }
    }
}

/// The two buttons a user can actually press
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum VoteDirection {
    Down,
    Up,
}

impl From<VoteDirection> for VoteValue {
    fn from(d: VoteDirection) -> VoteValue {
        match d {
            VoteDirection::Down => VoteValue::Down,
            VoteDirection::Up => VoteValue::Up,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum VoteTarget {
    Post(PostId),
    Comment(CommentId),
}
