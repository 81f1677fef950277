//! Utterances and answer normalization.
//!
//! An `Utterance` is the token expected (or spoken) for a given count:
//! a literal number or one of the keywords. Its `Display` form is the
//! canonical lowercase string a correct answer must match.

use serde::{Deserialize, Serialize};

/// The word for multiples of 3.
pub const FIZZ: &str = "fizz";
/// The word for multiples of 5.
pub const BUZZ: &str = "buzz";
/// The phrase for multiples of both.
pub const FIZZ_BUZZ: &str = "fizz buzz";

/// What should be said for a count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Utterance {
    /// Say the number itself.
    Number(u64),
    /// Divisible by 3 only.
    Fizz,
    /// Divisible by 5 only.
    Buzz,
    /// Divisible by 3 and 5.
    FizzBuzz,
}

impl Utterance {
    /// Check a normalized answer against this utterance.
    #[must_use]
    pub fn matches(self, normalized: &str) -> bool {
        match self {
            Utterance::Fizz => normalized == FIZZ,
            Utterance::Buzz => normalized == BUZZ,
            Utterance::FizzBuzz => normalized == FIZZ_BUZZ,
            Utterance::Number(n) => normalized == n.to_string(),
        }
    }
}

impl std::fmt::Display for Utterance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Utterance::Number(n) => write!(f, "{n}"),
            Utterance::Fizz => f.write_str(FIZZ),
            Utterance::Buzz => f.write_str(BUZZ),
            Utterance::FizzBuzz => f.write_str(FIZZ_BUZZ),
        }
    }
}

/// Normalize a raw answer: trim, lowercase, collapse whitespace runs.
///
/// No other rewriting happens, so `"fizzbuzz"` and `"007"` stay as given.
///
/// ```
/// use fizzbuzz_skill::core::normalize_answer;
///
/// assert_eq!(normalize_answer("  Fizz   BUZZ "), "fizz buzz");
/// assert_eq!(normalize_answer("12"), "12");
/// ```
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
