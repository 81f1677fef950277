//! Turn engine and the counting rule.
//!
//! `Rules` defines what must be said for each count. `TurnEngine`
//! validates answers and advances a `GameState`. Neither knows about
//! requests, sessions or locales.

pub mod engine;

pub use engine::{FizzBuzzRules, Rules, Turn, TurnEngine, TurnOutcome};
