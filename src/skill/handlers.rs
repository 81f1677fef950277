//! Request handlers.
//!
//! The dispatcher asks each handler in registration order whether it can
//! handle a request; the first one that says yes produces the response.
//!
//! Handlers get a `HandlerInput` with the classified request, the resolved
//! locale and the session's attributes. Only `LaunchRequestHandler` and
//! `FizzBuzzIntentHandler` change the attributes.

use tracing::info;

use crate::core::{normalize_answer, SkillConfig, TurnRecord};
use crate::error::{Result, SkillError};
use crate::locale::{Locale, MessageCatalog, MessageKey};
use crate::rules::{TurnEngine, TurnOutcome};

use super::request::{
    RequestEnvelope, RequestKind, ANSWER_SLOTS, CANCEL_INTENT, FALLBACK_INTENT, FIZZ_BUZZ_INTENT,
    HELP_INTENT, REPEAT_INTENT, STOP_INTENT,
};
use super::response::Response;
use super::session::SessionAttributes;

/// Everything a handler may read, plus the session it may update.
pub struct HandlerInput<'a> {
    /// The raw request.
    pub envelope: &'a RequestEnvelope,

    /// Classified request.
    pub kind: RequestKind,

    /// Locale messages are resolved in.
    pub locale: Locale,

    /// Session data; written back into the response.
    pub session: SessionAttributes,

    pub engine: &'a TurnEngine,
    pub catalog: &'a MessageCatalog,
    pub config: &'a SkillConfig,
}

impl HandlerInput<'_> {
    /// Resolve a message in the request's locale.
    pub fn translate(&self, key: MessageKey, args: &[(&str, &str)]) -> Result<String> {
        self.catalog.resolve(&self.locale, key, args)
    }
}

/// A request handler.
pub trait RequestHandler {
    /// Name for logs.
    fn name(&self) -> &'static str;

    /// Can this handler handle the request?
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool;

    /// Handle the request.
    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response>;

    /// Does the response depend on the game carried over from earlier
    /// requests? If so, attributes that fail to load are an error rather
    /// than a fresh start.
    fn reads_stored_game(&self) -> bool {
        false
    }
}

/// Starts a new game.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaunchRequestHandler;

impl RequestHandler for LaunchRequestHandler {
    fn name(&self) -> &'static str {
        "LaunchRequestHandler"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.kind == RequestKind::Launch
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response> {
        let speech = input.translate(MessageKey::Launch, &[])?;
        let reprompt = input.translate(MessageKey::LaunchReprompt, &[])?;

        let (state, _) = input.engine.start();
        input.session = SessionAttributes::new();
        input.session.game = state;
        info!(locale = %input.locale, "game started");

        Ok(Response::builder()
            .speak(speech)
            .reprompt(reprompt)
            .with_should_end_session(false)
            .build())
    }
}

/// Takes the player's answer and plays the turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct FizzBuzzIntentHandler;

impl RequestHandler for FizzBuzzIntentHandler {
    fn name(&self) -> &'static str {
        "FizzBuzzIntentHandler"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.kind.is_intent(FIZZ_BUZZ_INTENT)
    }

    fn reads_stored_game(&self) -> bool {
        true
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response> {
        let answer = input
            .envelope
            .request
            .intent
            .as_ref()
            .and_then(|intent| intent.answer())
            .map(normalize_answer)
            .ok_or_else(|| SkillError::MissingSlot {
                intent: FIZZ_BUZZ_INTENT.to_string(),
                slots: ANSWER_SLOTS.to_vec(),
            })?;

        let count = input.session.game.count();
        let turn = input
            .engine
            .try_advance(input.session.game, &answer)
            .ok_or_else(|| SkillError::InvalidState(format!("count {count} cannot advance")))?;
        let player_count = turn.player_count();

        match turn.outcome {
            TurnOutcome::Continue(next) => {
                let speech = next.to_string();
                let mut builder = Response::builder().speak(speech.clone());
                if input.config.reprompt_on_continue {
                    builder = builder.reprompt(speech);
                }

                input.session.game = turn.state;
                input.session.record(TurnRecord::new(player_count, answer, true));

                Ok(builder.with_should_end_session(false).build())
            }
            TurnOutcome::GameOver(expected) => {
                let expected = expected.to_string();
                let speech = input.translate(MessageKey::WrongAnswer, &[("answer", &expected)])?;

                input.session.game = turn.state;
                input.session.record(TurnRecord::new(player_count, answer.clone(), false));
                info!(
                    count = turn.state.count(),
                    answer = %answer,
                    expected = %expected,
                    turns = input.session.turns_played(),
                    "game over"
                );

                Ok(Response::builder()
                    .speak(speech)
                    .with_should_end_session(true)
                    .build())
            }
        }
    }
}

/// Says the engine's last number again.
#[derive(Clone, Copy, Debug, Default)]
pub struct RepeatIntentHandler;

impl RequestHandler for RepeatIntentHandler {
    fn name(&self) -> &'static str {
        "RepeatIntentHandler"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.kind.is_intent(REPEAT_INTENT)
    }

    fn reads_stored_game(&self) -> bool {
        true
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response> {
        let speech = input.engine.current_utterance(input.session.game).to_string();

        Ok(Response::builder()
            .speak(speech)
            .with_should_end_session(false)
            .build())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HelpIntentHandler;

impl RequestHandler for HelpIntentHandler {
    fn name(&self) -> &'static str {
        "HelpIntentHandler"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.kind.is_intent(HELP_INTENT)
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response> {
        let speech = input.translate(MessageKey::Help, &[])?;

        Ok(Response::builder().speak(speech.clone()).reprompt(speech).build())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CancelAndStopIntentHandler;

impl RequestHandler for CancelAndStopIntentHandler {
    fn name(&self) -> &'static str {
        "CancelAndStopIntentHandler"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.kind.is_intent(CANCEL_INTENT) || input.kind.is_intent(STOP_INTENT)
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response> {
        let speech = input.translate(MessageKey::Stop, &[])?;

        Ok(Response::builder()
            .speak(speech)
            .with_should_end_session(true)
            .build())
    }
}

/// Utterances that map to no intent.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackIntentHandler;

impl RequestHandler for FallbackIntentHandler {
    fn name(&self) -> &'static str {
        "FallbackIntentHandler"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.kind.is_intent(FALLBACK_INTENT)
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response> {
        let speech = input.translate(MessageKey::Fallback, &[])?;

        Ok(Response::builder().speak(speech.clone()).reprompt(speech).build())
    }
}

/// The platform closed the session. Nothing is spoken.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionEndedRequestHandler;

impl RequestHandler for SessionEndedRequestHandler {
    fn name(&self) -> &'static str {
        "SessionEndedRequestHandler"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.kind == RequestKind::SessionEnded
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response> {
        let session_id = input
            .envelope
            .session
            .as_ref()
            .map_or("", |s| s.session_id.as_str());
        info!(
            session_id,
            reason = input.envelope.request.reason.as_deref().unwrap_or("unknown"),
            count = input.session.game.count(),
            turns = input.session.turns_played(),
            "session ended"
        );

        Ok(Response::builder().build())
    }
}

/// Echoes any other intent by name. Registered last.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntentReflectorHandler;

impl RequestHandler for IntentReflectorHandler {
    fn name(&self) -> &'static str {
        "IntentReflectorHandler"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        matches!(input.kind, RequestKind::Intent(_))
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<Response> {
        let intent = match &input.kind {
            RequestKind::Intent(name) => name.clone(),
            other => other.to_string(),
        };
        let speech = input.translate(MessageKey::Reflector, &[("intent", &intent)])?;

        Ok(Response::builder().speak(speech).build())
    }
}

/// The handler chain, in evaluation order.
#[must_use]
pub fn default_handlers() -> Vec<Box<dyn RequestHandler + Send + Sync>> {
    vec![
        Box::new(LaunchRequestHandler),
        Box::new(FizzBuzzIntentHandler),
        Box::new(RepeatIntentHandler),
        Box::new(HelpIntentHandler),
        Box::new(CancelAndStopIntentHandler),
        Box::new(FallbackIntentHandler),
        Box::new(SessionEndedRequestHandler),
        Box::new(IntentReflectorHandler),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameState, Utterance};
    use crate::skill::request::{Intent, Request, KEYWORD_SLOT, NUMBER_SLOT};

    struct Fixture {
        engine: TurnEngine,
        catalog: MessageCatalog,
        config: SkillConfig,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                engine: TurnEngine::new(),
                catalog: MessageCatalog::builtin(),
                config: SkillConfig::default(),
            }
        }

        fn input<'a>(&'a self, envelope: &'a RequestEnvelope, game: GameState) -> HandlerInput<'a> {
            HandlerInput {
                envelope,
                kind: envelope.request.kind(),
                locale: Locale::new("en-US"),
                session: SessionAttributes {
                    game,
                    ..SessionAttributes::default()
                },
                engine: &self.engine,
                catalog: &self.catalog,
                config: &self.config,
            }
        }
    }

    fn intent_envelope(intent: Intent) -> RequestEnvelope {
        RequestEnvelope {
            request: Request {
                request_type: "IntentRequest".to_string(),
                intent: Some(intent),
                ..Request::default()
            },
            ..RequestEnvelope::default()
        }
    }

    #[test]
    fn test_fizz_buzz_handler_continue() {
        let fixture = Fixture::new();
        let envelope = intent_envelope(Intent::new(FIZZ_BUZZ_INTENT).with_slot(NUMBER_SLOT, "2"));
        let mut input = fixture.input(&envelope, GameState::new());

        assert!(FizzBuzzIntentHandler.can_handle(&input));
        let response = FizzBuzzIntentHandler.handle(&mut input).unwrap();

        assert_eq!(response.speech(), Some("fizz"));
        assert_eq!(response.should_end_session, Some(false));
        assert_eq!(response.reprompt, None);
        assert_eq!(input.session.game.count(), 3);
        assert_eq!(input.session.transcript[0], TurnRecord::new(2, "2", true));
    }

    #[test]
    fn test_fizz_buzz_handler_keyword_slot() {
        let fixture = Fixture::new();
        let envelope =
            intent_envelope(Intent::new(FIZZ_BUZZ_INTENT).with_slot(KEYWORD_SLOT, "Fizz Buzz"));
        let mut input = fixture.input(&envelope, GameState::at(14));

        let response = FizzBuzzIntentHandler.handle(&mut input).unwrap();

        assert_eq!(response.speech(), Some("16"));
        assert_eq!(input.session.game.count(), 16);
    }

    #[test]
    fn test_fizz_buzz_handler_game_over() {
        let fixture = Fixture::new();
        let envelope = intent_envelope(Intent::new(FIZZ_BUZZ_INTENT).with_slot(NUMBER_SLOT, "9"));
        let mut input = fixture.input(&envelope, GameState::at(8));

        let response = FizzBuzzIntentHandler.handle(&mut input).unwrap();

        assert!(response.ends_session());
        assert!(response.speech().unwrap().contains("the correct response was fizz."));
        assert_eq!(input.session.game.count(), 9);
        assert!(!input.session.transcript[0].correct);
    }

    #[test]
    fn test_fizz_buzz_handler_count_overflow() {
        let fixture = Fixture::new();
        let envelope =
            intent_envelope(Intent::new(FIZZ_BUZZ_INTENT).with_slot(KEYWORD_SLOT, "fizz buzz"));
        let mut input = fixture.input(&envelope, GameState::at(u64::MAX - 1));

        let err = FizzBuzzIntentHandler.handle(&mut input).unwrap_err();

        assert!(matches!(err, SkillError::InvalidState(_)));
        assert_eq!(input.session.game.count(), u64::MAX - 1);
        assert!(input.session.transcript.is_empty());
    }

    #[test]
    fn test_fizz_buzz_handler_missing_slot() {
        let fixture = Fixture::new();
        let envelope = intent_envelope(Intent::new(FIZZ_BUZZ_INTENT));
        let mut input = fixture.input(&envelope, GameState::at(4));

        let err = FizzBuzzIntentHandler.handle(&mut input).unwrap_err();

        assert!(matches!(err, SkillError::MissingSlot { .. }));
        assert_eq!(input.session.game.count(), 4);
    }

    #[test]
    fn test_reprompt_on_continue() {
        let mut fixture = Fixture::new();
        fixture.config = SkillConfig::default().with_reprompt_on_continue(true);
        let envelope = intent_envelope(Intent::new(FIZZ_BUZZ_INTENT).with_slot(NUMBER_SLOT, "4"));
        let mut input = fixture.input(&envelope, GameState::at(3));

        let response = FizzBuzzIntentHandler.handle(&mut input).unwrap();

        assert_eq!(response.reprompt_speech(), Some("buzz"));
    }

    #[test]
    fn test_repeat_handler() {
        let fixture = Fixture::new();
        let envelope = intent_envelope(Intent::new(REPEAT_INTENT));
        let mut input = fixture.input(&envelope, GameState::at(10));

        let response = RepeatIntentHandler.handle(&mut input).unwrap();

        assert_eq!(response.speech(), Some(Utterance::Buzz.to_string().as_str()));
        assert_eq!(input.session.game.count(), 10);
    }

    #[test]
    fn test_launch_resets_game() {
        let fixture = Fixture::new();
        let envelope = RequestEnvelope {
            request: Request {
                request_type: "LaunchRequest".to_string(),
                ..Request::default()
            },
            ..RequestEnvelope::default()
        };
        let mut input = fixture.input(&envelope, GameState::at(12));

        assert!(LaunchRequestHandler.can_handle(&input));
        let response = LaunchRequestHandler.handle(&mut input).unwrap();

        assert!(response.speech().unwrap().starts_with("Welcome to Fizz Buzz"));
        assert!(response.reprompt_speech().unwrap().contains("number 2"));
        assert_eq!(input.session.game, GameState::new());
    }

    #[test]
    fn test_reflector_only_takes_intents() {
        let fixture = Fixture::new();
        let envelope = intent_envelope(Intent::new("OrderPizzaIntent"));
        let mut input = fixture.input(&envelope, GameState::new());

        assert!(IntentReflectorHandler.can_handle(&input));
        let response = IntentReflectorHandler.handle(&mut input).unwrap();
        assert_eq!(response.speech(), Some("You just triggered OrderPizzaIntent."));

        input.kind = RequestKind::Unknown("Connections.Response".to_string());
        assert!(!IntentReflectorHandler.can_handle(&input));
    }

    #[test]
    fn test_only_game_handlers_read_stored_game() {
        let readers: Vec<_> = default_handlers()
            .iter()
            .filter(|h| h.reads_stored_game())
            .map(|h| h.name())
            .collect();
        assert_eq!(readers, ["FizzBuzzIntentHandler", "RepeatIntentHandler"]);
    }

    #[test]
    fn test_default_chain_order() {
        let names: Vec<_> = default_handlers().iter().map(|h| h.name()).collect();
        assert_eq!(names.first(), Some(&"LaunchRequestHandler"));
        assert_eq!(names.last(), Some(&"IntentReflectorHandler"));
        assert_eq!(names.len(), 8);
    }
}
