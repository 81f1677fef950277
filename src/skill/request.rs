//! Inbound request envelope.
//!
//! The platform posts one JSON envelope per user interaction:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "session": { "new": false, "sessionId": "s-1", "attributes": { ... } },
//!   "request": {
//!     "type": "IntentRequest",
//!     "requestId": "r-1",
//!     "locale": "en-US",
//!     "intent": {
//!       "name": "FizzBuzzIntent",
//!       "slots": { "number": { "name": "number", "value": "2" } }
//!     }
//!   }
//! }
//! ```
//!
//! Only the fields the skill reads are modeled; everything else is ignored.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `request.type` for a skill launch.
pub const LAUNCH_REQUEST: &str = "LaunchRequest";
/// `request.type` for an intent.
pub const INTENT_REQUEST: &str = "IntentRequest";
/// `request.type` when the platform closes the session.
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

/// The answer intent.
pub const FIZZ_BUZZ_INTENT: &str = "FizzBuzzIntent";
/// Repeat the engine's last number.
pub const REPEAT_INTENT: &str = "RepeatIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const FALLBACK_INTENT: &str = "AMAZON.FallbackIntent";

/// Slot holding a spoken number.
pub const NUMBER_SLOT: &str = "number";
/// Slot holding a spoken keyword.
pub const KEYWORD_SLOT: &str = "keyword";

/// Slots checked for an answer, in order.
pub const ANSWER_SLOTS: [&str; 2] = [NUMBER_SLOT, KEYWORD_SLOT];

/// Top-level request envelope.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    pub request: Request,
}

impl RequestEnvelope {
    /// Parse an envelope from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Session attributes, if the platform sent any.
    #[must_use]
    pub fn attributes(&self) -> Option<&Map<String, Value>> {
        self.session.as_ref().and_then(|s| s.attributes.as_ref())
    }

    /// Is this the first request of a session?
    #[must_use]
    pub fn is_new_session(&self) -> bool {
        self.session.as_ref().map_or(true, |s| s.new)
    }
}

/// Session block of the envelope.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,

    #[serde(default)]
    pub session_id: String,

    /// Opaque attributes echoed back from the previous response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
}

/// Request block of the envelope.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Platform request type (`LaunchRequest`, `IntentRequest`, ...).
    #[serde(rename = "type")]
    pub request_type: String,

    #[serde(default)]
    pub request_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,

    /// Why the session ended (`SessionEndedRequest` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Request {
    /// Classify the request.
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self.request_type.as_str() {
            LAUNCH_REQUEST => RequestKind::Launch,
            SESSION_ENDED_REQUEST => RequestKind::SessionEnded,
            INTENT_REQUEST => match &self.intent {
                Some(intent) => RequestKind::Intent(intent.name.clone()),
                None => RequestKind::Unknown(self.request_type.clone()),
            },
            other => RequestKind::Unknown(other.to_string()),
        }
    }
}

/// An intent with its slots.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,

    #[serde(default)]
    pub slots: FxHashMap<String, Slot>,
}

impl Intent {
    /// Create an intent with no slots.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: FxHashMap::default(),
        }
    }

    /// Add a filled slot (builder pattern).
    #[must_use]
    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.slots.insert(
            name.clone(),
            Slot {
                name,
                value: Some(value.into()),
            },
        );
        self
    }

    /// A slot's value, if present and not blank.
    #[must_use]
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .and_then(|slot| slot.value.as_deref())
            .filter(|v| !v.trim().is_empty())
    }

    /// The player's answer: the `number` slot if filled, else `keyword`.
    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        ANSWER_SLOTS.iter().find_map(|slot| self.slot_value(slot))
    }
}

/// A single slot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// What kind of event a request is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Launch,
    /// An intent request, by intent name.
    Intent(String),
    SessionEnded,
    /// Any other request type (or an intent request without an intent).
    Unknown(String),
}

impl RequestKind {
    /// Is this the named intent?
    #[must_use]
    pub fn is_intent(&self, name: &str) -> bool {
        matches!(self, RequestKind::Intent(n) if n == name)
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestKind::Launch => f.write_str(LAUNCH_REQUEST),
            RequestKind::Intent(name) => write!(f, "{INTENT_REQUEST}({name})"),
            RequestKind::SessionEnded => f.write_str(SESSION_ENDED_REQUEST),
            RequestKind::Unknown(t) => f.write_str(t),
        }
    }
}
