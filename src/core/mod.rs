//! Core game types: state, utterances, configuration.
//!
//! These types know nothing about the voice platform. The `skill`
//! module maps requests onto them.

pub mod config;
pub mod state;
pub mod utterance;

pub use config::SkillConfig;
pub use state::{GameState, TurnRecord};
pub use utterance::{normalize_answer, Utterance, BUZZ, FIZZ, FIZZ_BUZZ};
