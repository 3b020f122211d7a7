use crate::api::{Error, Store, VoteDirection, VoteTarget, VoteValue};

/// Local view of one target's votes: what the user's vote currently is and
/// what total the UI shows. The displayed total is always the last-confirmed
/// server aggregate plus at most one in-flight delta.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VoteState {
    pub current: VoteValue,
    pub displayed: i64,
}

impl VoteState {
    /// State before the user's own vote is known; use [`fetch_vote_state`]
    /// to get the real one.
    pub fn new(aggregate: i64) -> VoteState {
        VoteState {
            current: VoteValue::Neutral,
            displayed: aggregate,
        }
    }

    pub fn with_status(aggregate: i64, current: VoteValue) -> VoteState {
        VoteState {
            current,
            displayed: aggregate,
        }
    }

    /// Applies one button press locally: pressing the already-active
    /// direction clears the vote, anything else replaces it. Returns the
    /// record needed to confirm the cast against the store or undo it.
    pub fn cast(&mut self, direction: VoteDirection) -> VoteCast {
        let before = *self;
        let pressed = VoteValue::from(direction);
        let value = match self.current == pressed {
            true => VoteValue::Neutral,
            false => pressed,
        };
        let delta = value.score() - self.current.score();
        self.current = value;
        self.displayed += delta;
        VoteCast {
            before,
            value,
            previous: before.current,
            delta,
        }
    }

    /// Restores the exact pre-cast state. Restored, not recomputed: another
    /// code path recomputing the delta here is how displayed totals drift.
    pub fn rollback(&mut self, cast: &VoteCast) {
        *self = cast.before;
    }
}

/// One applied-but-unconfirmed cast
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VoteCast {
    before: VoteState,
    pub value: VoteValue,
    pub previous: VoteValue,
    pub delta: i64,
}

/// Initial state for a vote widget: last-known aggregate plus the user's
/// stored vote, fetched per target.
pub async fn fetch_vote_state<S: Store>(
    store: &mut S,
    target: VoteTarget,
    aggregate: i64,
) -> Result<VoteState, Error> {
    let user = store.current_user();
    let current = store.vote_status(target, user).await?;
    Ok(VoteState::with_status(aggregate, current))
}

/// Optimistic vote cast: local state flips before the write is even started,
/// and flips back if the write fails. The error is returned for a transient
/// user-facing notice; no retry is attempted here.
///
/// Holding `&mut VoteState` across the await means casts through one state
/// handle are serialized; two handles for the same target still race, as the
/// original UI's did.
pub async fn cast_vote<S: Store>(
    store: &mut S,
    target: VoteTarget,
    state: &mut VoteState,
    direction: VoteDirection,
) -> Result<(), Error> {
    let user = store.current_user();
    let cast = state.cast(direction);
    tracing::debug!(?target, value = ?cast.value, delta = cast.delta, "casting vote");
    match store.record_vote(target, user, cast.value, cast.previous).await {
        Ok(()) => Ok(()),
        Err(err) => {
            state.rollback(&cast);
            tracing::debug!(?target, ?err, "vote write failed, rolled back local state");
            Err(err)
        }
    }
}
