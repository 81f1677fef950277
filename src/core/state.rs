//! Game state: the running count of a single Fizz Buzz session.
//!
//! ## GameState
//!
//! A session owns exactly one `GameState`. It is a plain `Copy` value that
//! is threaded through every turn and carried between requests in the
//! session attributes. Nothing else holds or mutates it.
//!
//! ## TurnRecord
//!
//! One answered turn, kept in the session transcript for logging and replay.

use serde::{Deserialize, Serialize};

use crate::error::SkillError;

/// Current position in the count.
///
/// `count` is the last number that has been said, by either side.
/// It is always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GameStateRepr")]
pub struct GameState {
    count: u64,
}

#[derive(Deserialize)]
struct GameStateRepr {
    count: u64,
}

impl TryFrom<GameStateRepr> for GameState {
    type Error = SkillError;

    fn try_from(repr: GameStateRepr) -> Result<Self, Self::Error> {
        Self::try_at(repr.count).ok_or_else(|| {
            SkillError::InvalidState(format!("count must be at least 1, got {}", repr.count))
        })
    }
}

impl GameState {
    /// Create the state of a fresh game (count = 1).
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 1 }
    }

    /// Create a state positioned at `count`.
    ///
    /// Panics if `count` is 0.
    #[must_use]
    pub fn at(count: u64) -> Self {
        assert!(count >= 1, "Count must be at least 1");
        Self { count }
    }

    /// Create a state positioned at `count`, or `None` if `count` is 0.
    #[must_use]
    pub const fn try_at(count: u64) -> Option<Self> {
        if count >= 1 {
            Some(Self { count })
        } else {
            None
        }
    }

    /// The last number said.
    #[must_use]
    pub const fn count(self) -> u64 {
        self.count
    }

    /// Advance the count by one, or `None` past `u64::MAX`.
    #[must_use]
    pub(crate) const fn next(self) -> Option<Self> {
        match self.count.checked_add(1) {
            Some(count) => Some(Self { count }),
            None => None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// A recorded player turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// The number the player had to say.
    pub count: u64,

    /// The normalized answer given.
    pub answer: String,

    /// Whether the answer matched.
    pub correct: bool,
}

impl TurnRecord {
    /// Create a new turn record.
    #[must_use]
    pub fn new(count: u64, answer: impl Into<String>, correct: bool) -> Self {
        Self {
            count,
            answer: answer.into(),
            correct,
        }
    }
}
