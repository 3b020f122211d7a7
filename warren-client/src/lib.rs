mod thread;
pub use thread::{build_comment_tree, find_comment_depth, reply_depth, ThreadComment};

mod vote;
pub use vote::{cast_vote, fetch_vote_state, VoteCast, VoteState};

mod db;
pub use db::PostThread;

pub mod api {
    pub use warren_api::*;
}
