//! # fizzbuzz-skill
//!
//! A voice-driven Fizz Buzz counting game.
//!
//! The engine and the player take turns counting up from one. Multiples of
//! 3 are said as "fizz", multiples of 5 as "buzz", multiples of both as
//! "fizz buzz". The first wrong answer ends the game.
//!
//! ## Design Principles
//!
//! 1. **State Is Passed, Not Held**: `GameState` is a `Copy` value threaded
//!    through every turn. The engine and the dispatcher own no game state.
//!
//! 2. **The Engine Knows No Platform**: `rules` sees normalized strings and
//!    counts only. Requests, slots, sessions and locales live in `skill`
//!    and `locale`.
//!
//! 3. **Wrong Answers Are Outcomes**: the engine cannot fail. Errors only
//!    exist in the adapter, and become a spoken apology there.
//!
//! ## Modules
//!
//! - `core`: Game state, utterances, answer normalization, configuration
//! - `rules`: The counting rule and the turn engine
//! - `locale`: Per-locale message tables with fallback
//! - `skill`: Request envelopes, handler chain, session attributes
//! - `error`: Adapter error type
//! - `logging`: `tracing` subscriber setup

pub mod core;
pub mod error;
pub mod locale;
pub mod logging;
pub mod rules;
pub mod skill;

// Re-export commonly used types
pub use crate::core::{normalize_answer, GameState, SkillConfig, TurnRecord, Utterance};

pub use crate::error::{Result, SkillError};

pub use crate::locale::{Locale, MessageCatalog, MessageKey};

pub use crate::rules::{FizzBuzzRules, Rules, Turn, TurnEngine, TurnOutcome};

pub use crate::skill::{
    HandlerInput, RequestEnvelope, RequestHandler, RequestKind, Response, ResponseEnvelope,
    SessionAttributes, Skill, SkillBuilder,
};
