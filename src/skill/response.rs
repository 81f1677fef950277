//! Outbound response envelope and its builder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope version sent back to the platform.
pub const RESPONSE_VERSION: &str = "1.0";

/// Top-level response envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,

    /// Carried into the next request of the same session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<Map<String, Value>>,

    pub response: Response,
}

impl ResponseEnvelope {
    /// Wrap a response with the given attributes.
    #[must_use]
    pub fn new(response: Response, session_attributes: Option<Map<String, Value>>) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            session_attributes,
            response,
        }
    }
}

/// What to say and whether to keep listening.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,

    /// `None` leaves the decision to the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

impl Response {
    /// Start building a response.
    #[must_use]
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }

    /// Spoken text, if any.
    #[must_use]
    pub fn speech(&self) -> Option<&str> {
        self.output_speech.as_ref().map(|s| s.text.as_str())
    }

    /// Reprompt text, if any.
    #[must_use]
    pub fn reprompt_speech(&self) -> Option<&str> {
        self.reprompt.as_ref().map(|r| r.output_speech.text.as_str())
    }

    /// Does this response close the session?
    #[must_use]
    pub fn ends_session(&self) -> bool {
        self.should_end_session == Some(true)
    }
}

/// Plain-text speech.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: String,
    pub text: String,
}

impl OutputSpeech {
    /// Plain text speech.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            speech_type: "PlainText".to_string(),
            text: text.into(),
        }
    }
}

/// Spoken if the player stays silent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Builder for `Response`.
#[derive(Clone, Debug, Default)]
pub struct ResponseBuilder {
    response: Response,
}

impl ResponseBuilder {
    /// Set the spoken text.
    #[must_use]
    pub fn speak(mut self, text: impl Into<String>) -> Self {
        self.response.output_speech = Some(OutputSpeech::plain(text));
        self
    }

    /// Set the reprompt text.
    #[must_use]
    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::plain(text),
        });
        self
    }

    /// Say whether the session ends after this response.
    #[must_use]
    pub fn with_should_end_session(mut self, end: bool) -> Self {
        self.response.should_end_session = Some(end);
        self
    }

    /// Finish the response.
    #[must_use]
    pub fn build(self) -> Response {
        self.response
    }
}
