//! Error type for the skill adapter.
//!
//! The turn engine itself never fails: a wrong answer is a game outcome,
//! not an error. These variants cover everything around it.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = SkillError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SkillError {
    /// Request envelope or session attributes were not valid JSON for their shape.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Session attributes held an impossible game state.
    #[error("invalid game state: {0}")]
    InvalidState(String),

    /// The answer intent arrived without a `number` or `keyword` value.
    #[error("intent {intent} has no value in slots {slots:?}")]
    MissingSlot {
        intent: String,
        slots: Vec<&'static str>,
    },

    /// No locale in the fallback chain defines this message.
    #[error("no message {key} for locale {locale}")]
    MissingMessage { key: String, locale: String },

    /// No registered handler accepted the request.
    #[error("no handler for request {kind}")]
    NoHandler { kind: String },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SkillError::MissingSlot {
            intent: "FizzBuzzIntent".to_string(),
            slots: vec!["number", "keyword"],
        };
        assert_eq!(
            err.to_string(),
            r#"intent FizzBuzzIntent has no value in slots ["number", "keyword"]"#
        );

        let err = SkillError::NoHandler { kind: "CanFulfillIntentRequest".to_string() };
        assert_eq!(err.to_string(), "no handler for request CanFulfillIntentRequest");
    }

    #[test]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SkillError = json_err.into();
        assert!(matches!(err, SkillError::Json(_)));
    }
}
