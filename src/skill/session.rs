//! Per-session game data carried in the session attributes.
//!
//! The platform echoes `sessionAttributes` from each response into the
//! next request of the same session. That round trip is the only place
//! a game's state lives between turns.

use im::Vector;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{GameState, TurnRecord};
use crate::error::{Result, SkillError};

use super::request::RequestEnvelope;

/// Most recent turns kept in the transcript.
pub const TRANSCRIPT_LIMIT: usize = 10;

/// Everything the skill remembers within one session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionAttributes {
    /// Current count.
    pub game: GameState,

    /// The last `TRANSCRIPT_LIMIT` answered turns, oldest first.
    pub transcript: Vector<TurnRecord>,

    /// Answered turns this game, including ones dropped from the transcript.
    pub turns: u64,
}

impl SessionAttributes {
    /// Start a fresh game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read attributes from a request.
    ///
    /// A new session, or one without attributes, starts a fresh game.
    pub fn from_envelope(envelope: &RequestEnvelope) -> Result<Self> {
        match envelope.attributes() {
            Some(attributes) if !envelope.is_new_session() => Self::from_map(attributes),
            _ => Ok(Self::new()),
        }
    }

    /// Parse attributes from a JSON object.
    pub fn from_map(attributes: &Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(attributes.clone())).map_err(SkillError::from)
    }

    /// Serialize to a JSON object for the response.
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(SkillError::InvalidState(format!(
                "session attributes serialized to {other}"
            ))),
        }
    }

    /// Record an answered turn, dropping the oldest past the limit.
    pub fn record(&mut self, record: TurnRecord) {
        self.turns = self.turns.saturating_add(1);
        self.transcript.push_back(record);
        if self.transcript.len() > TRANSCRIPT_LIMIT {
            let excess = self.transcript.len() - TRANSCRIPT_LIMIT;
            self.transcript = self.transcript.split_off(excess);
        }
    }

    /// Number of answered turns.
    #[must_use]
    pub const fn turns_played(&self) -> u64 {
        self.turns
    }
}
