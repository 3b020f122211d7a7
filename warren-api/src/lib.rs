mod comment;
pub use comment::{Comment, CommentId, NewComment, MAX_COMMENT_DEPTH};

mod error;
pub use error::Error;

mod post;
pub use post::{Post, PostId};

mod store;
pub use store::Store;

mod user;
pub use user::{User, UserId};

mod vote;
pub use vote::{VoteDirection, VoteTarget, VoteValue};

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<chrono::Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

// See comments on the `validate` functions throughout warren-api: anything
// that ends up in a stored document goes through here first.
pub fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(s.to_string())),
        false => Ok(()),
    }
}
