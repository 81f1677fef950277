//! Turn engine.
//!
//! `Rules` says what must be said for a count; `TurnEngine` runs the
//! back-and-forth:
//! - The engine says a number (starting with 1)
//! - The player answers for the next number
//! - A correct answer makes the engine say the number after that
//! - A wrong answer ends the game, disclosing the correct value

use crate::core::{normalize_answer, GameState, Utterance};

/// Result of one player turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Correct answer. The engine says this next.
    Continue(Utterance),
    /// Wrong answer. This is what the player should have said.
    GameOver(Utterance),
}

impl TurnOutcome {
    /// Does the game end with this outcome?
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self, TurnOutcome::GameOver(_))
    }
}

/// State after a turn plus what happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    /// State to carry into the next request.
    pub state: GameState,
    /// Outcome of the turn.
    pub outcome: TurnOutcome,
}

impl Turn {
    /// The number the player answered for.
    #[must_use]
    pub const fn player_count(&self) -> u64 {
        match self.outcome {
            TurnOutcome::Continue(_) => self.state.count() - 1,
            TurnOutcome::GameOver(_) => self.state.count(),
        }
    }
}

/// Counting rule.
///
/// `expected_utterance` must be a pure function of `n`.
pub trait Rules {
    /// What must be said for `n`.
    fn expected_utterance(&self, n: u64) -> Utterance;

    /// Is `answer` what must be said for `n`? Case-insensitive.
    ///
    /// Anything malformed is simply wrong.
    fn is_correct(&self, n: u64, answer: &str) -> bool {
        self.expected_utterance(n).matches(&normalize_answer(answer))
    }
}

/// The classic rule: 3 → fizz, 5 → buzz, both → fizz buzz.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FizzBuzzRules;

impl Rules for FizzBuzzRules {
    fn expected_utterance(&self, n: u64) -> Utterance {
        match (n % 3 == 0, n % 5 == 0) {
            (true, true) => Utterance::FizzBuzz,
            (true, false) => Utterance::Fizz,
            (false, true) => Utterance::Buzz,
            (false, false) => Utterance::Number(n),
        }
    }
}

/// Drives a game turn by turn.
///
/// Holds no game state; each call takes the current `GameState` and
/// returns the next one.
///
/// ## Example
///
/// ```
/// use fizzbuzz_skill::rules::{TurnEngine, TurnOutcome};
/// use fizzbuzz_skill::core::Utterance;
///
/// let engine = TurnEngine::new();
/// let (state, opening) = engine.start();
/// assert_eq!(opening, Utterance::Number(1));
///
/// let turn = engine.advance(state, "2");
/// assert_eq!(turn.outcome, TurnOutcome::Continue(Utterance::Fizz));
/// assert_eq!(turn.state.count(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TurnEngine<R = FizzBuzzRules> {
    rules: R,
}

impl TurnEngine<FizzBuzzRules> {
    /// Create an engine with the classic rule.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(FizzBuzzRules)
    }
}

impl<R: Rules> TurnEngine<R> {
    /// Create an engine with the given rule.
    #[must_use]
    pub fn with_rules(rules: R) -> Self {
        Self { rules }
    }

    /// Start a game: count = 1, and the engine says it.
    #[must_use]
    pub fn start(&self) -> (GameState, Utterance) {
        let state = GameState::new();
        (state, self.current_utterance(state))
    }

    /// What must be said for `n`.
    #[must_use]
    pub fn expected_utterance(&self, n: u64) -> Utterance {
        self.rules.expected_utterance(n)
    }

    /// Is `answer` correct for `n`?
    #[must_use]
    pub fn is_correct(&self, n: u64, answer: &str) -> bool {
        self.rules.is_correct(n, answer)
    }

    /// What the engine said last (for repeats). Does not touch state.
    #[must_use]
    pub fn current_utterance(&self, state: GameState) -> Utterance {
        self.rules.expected_utterance(state.count())
    }

    /// Play one player turn.
    ///
    /// The count moves to the player's number. A correct answer moves it
    /// once more to the engine's number; a wrong one leaves it on the
    /// player's number and ends the game.
    ///
    /// Panics if the count would pass `u64::MAX`; see `try_advance`.
    #[must_use]
    pub fn advance(&self, state: GameState, answer: &str) -> Turn {
        match self.try_advance(state, answer) {
            Some(turn) => turn,
            None => panic!("Count overflowed at {}", state.count()),
        }
    }

    /// Like `advance`, but `None` if the count would pass `u64::MAX`.
    #[must_use]
    pub fn try_advance(&self, state: GameState, answer: &str) -> Option<Turn> {
        let player = state.next()?;

        let turn = if self.is_correct(player.count(), answer) {
            let engine = player.next()?;
            Turn {
                state: engine,
                outcome: TurnOutcome::Continue(self.current_utterance(engine)),
            }
        } else {
            Turn {
                state: player,
                outcome: TurnOutcome::GameOver(self.current_utterance(player)),
            }
        };
        Some(turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_utterance() {
        let engine = TurnEngine::new();

        assert_eq!(engine.expected_utterance(15).to_string(), "fizz buzz");
        assert_eq!(engine.expected_utterance(9).to_string(), "fizz");
        assert_eq!(engine.expected_utterance(10).to_string(), "buzz");
        assert_eq!(engine.expected_utterance(7).to_string(), "7");
        assert_eq!(engine.expected_utterance(1).to_string(), "1");
    }

    #[test]
    fn test_is_correct_case_insensitive() {
        let engine = TurnEngine::new();

        assert!(engine.is_correct(3, "Fizz"));
        assert!(engine.is_correct(30, "FIZZ BUZZ"));
        assert!(engine.is_correct(4, " 4 "));
        assert!(!engine.is_correct(3, "3"));
        assert!(!engine.is_correct(15, "fizz"));
        assert!(!engine.is_correct(2, ""));
    }

    #[test]
    fn test_start() {
        let engine = TurnEngine::new();
        let (state, opening) = engine.start();

        assert_eq!(state.count(), 1);
        assert_eq!(opening, Utterance::Number(1));
    }

    #[test]
    fn test_correct_turn_advances_twice() {
        let engine = TurnEngine::new();
        let turn = engine.advance(GameState::at(3), "4");

        assert_eq!(turn.state.count(), 5);
        assert_eq!(turn.outcome, TurnOutcome::Continue(Utterance::Buzz));
        assert!(!turn.outcome.is_game_over());
        assert_eq!(turn.player_count(), 4);
    }

    #[test]
    fn test_wrong_turn_stops_on_player_count() {
        let engine = TurnEngine::new();
        let turn = engine.advance(GameState::at(14), "15");

        assert_eq!(turn.state.count(), 15);
        assert_eq!(turn.outcome, TurnOutcome::GameOver(Utterance::FizzBuzz));
        assert!(turn.outcome.is_game_over());
        assert_eq!(turn.player_count(), 15);
    }

    // u64::MAX is divisible by both 3 and 5
    #[test]
    fn test_try_advance_at_top_of_range() {
        let engine = TurnEngine::new();
        let state = GameState::at(u64::MAX - 1);

        assert_eq!(engine.try_advance(state, "fizz buzz"), None);

        let turn = engine.try_advance(state, "7").unwrap();
        assert_eq!(turn.state.count(), u64::MAX);
        assert_eq!(turn.outcome, TurnOutcome::GameOver(Utterance::FizzBuzz));

        assert_eq!(engine.try_advance(GameState::at(u64::MAX), "1"), None);
    }

    #[test]
    #[should_panic(expected = "Count overflowed")]
    fn test_advance_panics_on_overflow() {
        let _ = TurnEngine::new().advance(GameState::at(u64::MAX - 1), "fizz buzz");
    }

    #[test]
    fn test_current_utterance() {
        let engine = TurnEngine::new();
        assert_eq!(engine.current_utterance(GameState::at(5)), Utterance::Buzz);
        assert_eq!(engine.current_utterance(GameState::at(8)), Utterance::Number(8));
    }

    /// A rule where every count is fizz, to check the engine only goes
    /// through the trait.
    struct AlwaysFizz;

    impl Rules for AlwaysFizz {
        fn expected_utterance(&self, _n: u64) -> Utterance {
            Utterance::Fizz
        }
    }

    #[test]
    fn test_custom_rules() {
        let engine = TurnEngine::with_rules(AlwaysFizz);
        let turn = engine.advance(GameState::new(), "fizz");

        assert_eq!(turn.state.count(), 3);
        assert_eq!(turn.outcome, TurnOutcome::Continue(Utterance::Fizz));
    }
}
