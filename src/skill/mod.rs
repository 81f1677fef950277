//! Voice-platform adapter around the turn engine.
//!
//! `Skill` takes a request envelope, classifies it, restores the session's
//! game, runs the first matching handler and wraps the result in a response
//! envelope carrying the updated session attributes.
//!
//! Any handler failure (or no matching handler) becomes a spoken error
//! response with the session left as it was. Session attributes that cannot
//! be read are replaced by a fresh game; only handlers that play on from the
//! stored game answer such a request with the error response. Only a request
//! that is not a valid envelope at all fails `dispatch_json`.

pub mod handlers;
pub mod request;
pub mod response;
pub mod session;

pub use handlers::{
    default_handlers, CancelAndStopIntentHandler, FallbackIntentHandler, FizzBuzzIntentHandler,
    HandlerInput, HelpIntentHandler, IntentReflectorHandler, LaunchRequestHandler,
    RepeatIntentHandler, RequestHandler, SessionEndedRequestHandler,
};
pub use request::{Intent, Request, RequestEnvelope, RequestKind, Session, Slot};
pub use response::{OutputSpeech, Reprompt, Response, ResponseBuilder, ResponseEnvelope};
pub use session::{SessionAttributes, TRANSCRIPT_LIMIT};

use tracing::{debug, warn};

use crate::core::SkillConfig;
use crate::error::{Result, SkillError};
use crate::locale::{Locale, MessageCatalog, MessageKey};
use crate::rules::TurnEngine;

/// Spoken when even the error message cannot be resolved.
const LAST_RESORT_ERROR: &str = "Sorry, I had trouble doing what you asked. Please try again.";

type BoxedHandler = Box<dyn RequestHandler + Send + Sync>;

/// The request dispatcher.
///
/// Immutable once built; every request carries its own game state.
pub struct Skill {
    engine: TurnEngine,
    catalog: MessageCatalog,
    config: SkillConfig,
    handlers: Vec<BoxedHandler>,
}

impl Skill {
    /// A skill with the built-in catalog and handler chain.
    #[must_use]
    pub fn new(config: SkillConfig) -> Self {
        SkillBuilder::new().config(config).build()
    }

    /// Start building a custom skill.
    #[must_use]
    pub fn builder() -> SkillBuilder {
        SkillBuilder::new()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    /// Get the message catalog.
    #[must_use]
    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Handler names in evaluation order.
    pub fn handler_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.iter().map(|h| h.name())
    }

    /// Parse a JSON request, dispatch it and serialize the response.
    pub fn dispatch_json(&self, json: &str) -> Result<String> {
        let envelope = RequestEnvelope::from_json(json)?;
        let response = self.dispatch(&envelope);
        Ok(serde_json::to_string(&response)?)
    }

    /// Handle one request.
    #[must_use]
    pub fn dispatch(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        let kind = envelope.request.kind();
        let locale = envelope
            .request
            .locale
            .as_deref()
            .map_or_else(|| self.catalog.default_locale().clone(), Locale::new);

        let (session, restore_error) = match SessionAttributes::from_envelope(envelope) {
            Ok(session) => (session, None),
            Err(e) => {
                warn!(
                    request_id = %envelope.request.request_id,
                    error = %e,
                    "unreadable session attributes, starting a fresh game"
                );
                (SessionAttributes::new(), Some(e))
            }
        };
        let restored = session.clone();

        let mut input = HandlerInput {
            envelope,
            kind,
            locale,
            session,
            engine: &self.engine,
            catalog: &self.catalog,
            config: &self.config,
        };

        let response = match self.run_handlers(&mut input, restore_error) {
            Ok(response) => response,
            Err(err) => {
                // Discard anything a failing handler wrote.
                input.session = restored;
                self.handle_error(&input, &err)
            }
        };

        let attributes = match input.session.to_map() {
            Ok(map) => Some(map),
            Err(e) => {
                warn!(error = %e, "dropping session attributes");
                None
            }
        };

        ResponseEnvelope::new(response, attributes)
    }

    fn run_handlers(
        &self,
        input: &mut HandlerInput<'_>,
        restore_error: Option<SkillError>,
    ) -> Result<Response> {
        let handler = self
            .handlers
            .iter()
            .find(|h| h.can_handle(input))
            .ok_or_else(|| SkillError::NoHandler {
                kind: input.kind.to_string(),
            })?;

        if let Some(err) = restore_error {
            if handler.reads_stored_game() {
                return Err(err);
            }
        }

        debug!(
            request_id = %input.envelope.request.request_id,
            kind = %input.kind,
            locale = %input.locale,
            count = input.session.game.count(),
            handler = handler.name(),
            "dispatching request"
        );

        handler.handle(input)
    }

    fn handle_error(&self, input: &HandlerInput<'_>, err: &SkillError) -> Response {
        warn!(
            request_id = %input.envelope.request.request_id,
            kind = %input.kind,
            error = %err,
            "request failed"
        );

        let speech = input
            .translate(MessageKey::Error, &[])
            .unwrap_or_else(|_| LAST_RESORT_ERROR.to_string());

        Response::builder().speak(speech.clone()).reprompt(speech).build()
    }
}

impl Default for Skill {
    fn default() -> Self {
        Self::new(SkillConfig::default())
    }
}

/// Builder for `Skill`.
pub struct SkillBuilder {
    config: SkillConfig,
    catalog: Option<MessageCatalog>,
    handlers: Vec<BoxedHandler>,
}

impl Default for SkillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillBuilder {
    /// Defaults: built-in catalog, built-in handler chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SkillConfig::default(),
            catalog: None,
            handlers: default_handlers(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: SkillConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom catalog. Its default locale is replaced by the config's.
    #[must_use]
    pub fn catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Replace the whole handler chain.
    #[must_use]
    pub fn handlers(mut self, handlers: Vec<BoxedHandler>) -> Self {
        self.handlers = handlers;
        self
    }

    /// Insert a handler ahead of the built-in ones.
    #[must_use]
    pub fn prepend_handler(mut self, handler: impl RequestHandler + Send + Sync + 'static) -> Self {
        self.handlers.insert(0, Box::new(handler));
        self
    }

    /// Build the skill.
    #[must_use]
    pub fn build(self) -> Skill {
        let default_locale = Locale::new(&self.config.default_locale);
        let catalog = self
            .catalog
            .unwrap_or_else(MessageCatalog::builtin)
            .with_default_locale(default_locale);

        Skill {
            engine: TurnEngine::new(),
            catalog,
            config: self.config,
            handlers: self.handlers,
        }
    }
}
