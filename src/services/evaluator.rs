use crate::state::question::{Difficulty, Question};

/// Points awarded per difficulty level for a correct answer.
pub const POINTS_PER_LEVEL: u32 = 10;

/// Outcome of checking a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The answer matched; the caller credits `points` to the session.
    Correct {
        /// Points to add to the score.
        points: u32,
    },
    /// The answer was a number but not the right one.
    Incorrect {
        /// Expected answer, for display.
        correct_answer: i64,
    },
    /// The text could not be read as an integer; the player should retry.
    Invalid,
}

impl Verdict {
    /// Whether the submission was well-formed and consumed the round.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Verdict::Invalid)
    }
}

/// Check `submitted` against `question`.
///
/// Pure: the question is not touched and the same inputs always give the same verdict.
pub fn evaluate(submitted: &str, question: &Question, difficulty: Difficulty) -> Verdict {
    let Ok(answer) = submitted.trim().parse::<i64>() else {
        return Verdict::Invalid;
    };

    if answer == question.expected_answer() {
        Verdict::Correct {
            points: POINTS_PER_LEVEL * u32::from(difficulty.level()),
        }
    } else {
        Verdict::Incorrect {
            correct_answer: question.expected_answer(),
        }
    }
}
