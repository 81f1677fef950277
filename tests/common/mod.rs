//! Shared helpers for integration tests.

#![allow(dead_code)]

use fizzbuzz_skill::skill::request::{Intent, Request, RequestEnvelope, Session};
use fizzbuzz_skill::{ResponseEnvelope, Skill};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize test logging once. Level from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Plays a session against a skill, threading attributes between requests
/// the way the platform does.
pub struct Conversation<'a> {
    skill: &'a Skill,
    locale: String,
    attributes: Option<serde_json::Map<String, serde_json::Value>>,
    started: bool,
}

impl<'a> Conversation<'a> {
    pub fn new(skill: &'a Skill, locale: &str) -> Self {
        Self {
            skill,
            locale: locale.to_string(),
            attributes: None,
            started: false,
        }
    }

    pub fn send(&mut self, request_type: &str, intent: Option<Intent>) -> ResponseEnvelope {
        let envelope = RequestEnvelope {
            version: "1.0".to_string(),
            session: Some(Session {
                new: !self.started,
                session_id: "test-session".to_string(),
                attributes: self.attributes.clone(),
            }),
            request: Request {
                request_type: request_type.to_string(),
                request_id: "test-request".to_string(),
                locale: Some(self.locale.clone()),
                intent,
                reason: None,
            },
        };

        let out = self.skill.dispatch(&envelope);
        self.started = true;
        self.attributes = out.session_attributes.clone();
        out
    }

    pub fn launch(&mut self) -> ResponseEnvelope {
        self.send("LaunchRequest", None)
    }

    pub fn intent(&mut self, intent: Intent) -> ResponseEnvelope {
        self.send("IntentRequest", Some(intent))
    }

    pub fn count(&self) -> u64 {
        self.attributes
            .as_ref()
            .and_then(|a| a.get("game"))
            .and_then(|g| g.get("count"))
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0)
    }
}
