//! Quiz session controller.

use rand::Rng;

use crate::{
    services::evaluator::{self, Verdict},
    state::{
        question::{self, Difficulty, Question},
        state_machine::{InvalidTransition, QuizEvent, QuizPhase, QuizStateMachine},
    },
};

/// Number of rounds in a session.
pub const TOTAL_QUESTIONS: u32 = 10;
/// Difficulty goes up by one tier every this many questions.
const DIFFICULTY_STEP: u32 = 3;
/// Final score at or above which a session is rated excellent.
const EXCELLENT_THRESHOLD: u32 = 80;
/// Final score at or above which a session is rated good.
const GOOD_THRESHOLD: u32 = 60;

/// A freshly generated round handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// One-based index of the round.
    pub index: u32,
    /// Number of rounds in the session.
    pub total: u32,
    /// Question to answer.
    pub question: Question,
}

/// Rating given to a finished session, based on the raw final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    /// Final score of at least 80.
    Excellent,
    /// Final score of at least 60.
    Good,
    /// Anything lower.
    KeepPracticing,
}

impl ScoreTier {
    /// Rate a raw final score.
    pub fn for_score(score: u32) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            ScoreTier::Excellent
        } else if score >= GOOD_THRESHOLD {
            ScoreTier::Good
        } else {
            ScoreTier::KeepPracticing
        }
    }

    /// Label shown in the summary.
    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Good => "good",
            ScoreTier::KeepPracticing => "keep practicing",
        }
    }
}

/// Result of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    /// Score at the end of the last round.
    pub final_score: u32,
    /// Number of rounds played.
    pub total_questions: u32,
}

impl QuizSummary {
    /// Score per question.
    pub fn average(&self) -> f64 {
        f64::from(self.final_score) / f64::from(self.total_questions)
    }

    /// Rating derived from the raw final score.
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::for_score(self.final_score)
    }
}

/// What happened when the player asked to move on.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// A new round was generated.
    Round(Round),
    /// The last round was already played; the session is finished.
    Finished(QuizSummary),
}

/// Read-only view of the session counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Current phase of the state machine.
    pub phase: QuizPhase,
    /// Score accumulated so far.
    pub score: u32,
    /// Tier used for the next question and for scoring.
    pub difficulty: Difficulty,
    /// Number of rounds generated so far.
    pub question_index: u32,
    /// Number of rounds in the session.
    pub total_questions: u32,
}

/// Drives one quiz session at a time: round generation, scoring and difficulty ramp.
///
/// The random source is owned by the session so callers can plug a seeded
/// generator in tests.
#[derive(Debug)]
pub struct QuizSession<R> {
    machine: QuizStateMachine,
    rng: R,
    score: u32,
    difficulty: Difficulty,
    question_index: u32,
    current: Option<Question>,
}

impl<R: Rng> QuizSession<R> {
    /// Create an idle session drawing questions from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            machine: QuizStateMachine::new(),
            rng,
            score: 0,
            difficulty: Difficulty::MIN,
            question_index: 0,
            current: None,
        }
    }

    /// Reset the counters and play the first round.
    pub fn start(&mut self) -> Result<Round, InvalidTransition> {
        self.machine.apply(QuizEvent::Start)?;
        self.score = 0;
        self.difficulty = Difficulty::MIN;
        self.question_index = 0;
        Ok(self.next_round())
    }

    /// Move past an answered round: either generate the next one or finish the session.
    pub fn advance(&mut self) -> Result<Advance, InvalidTransition> {
        if self.question_index >= TOTAL_QUESTIONS {
            self.machine.apply(QuizEvent::Finish)?;
            self.current = None;
            return Ok(Advance::Finished(QuizSummary {
                final_score: self.score,
                total_questions: TOTAL_QUESTIONS,
            }));
        }

        self.machine.apply(QuizEvent::NextQuestion)?;
        Ok(Advance::Round(self.next_round()))
    }

    /// Evaluate an answer for the current round and credit the score when it is right.
    ///
    /// An [`Verdict::Invalid`] submission leaves the session untouched so the
    /// player can try again.
    pub fn submit(&mut self, text: &str) -> Result<Verdict, InvalidTransition> {
        let rejected = InvalidTransition {
            from: self.machine.phase(),
            event: QuizEvent::AnswerAccepted,
        };
        self.machine.check(QuizEvent::AnswerAccepted)?;
        let question = self.current.as_ref().ok_or(rejected)?;

        let verdict = evaluator::evaluate(text, question, self.difficulty);
        if verdict.is_accepted() {
            self.machine.apply(QuizEvent::AnswerAccepted)?;
        }
        if let Verdict::Correct { points } = verdict {
            self.score += points;
        }

        Ok(verdict)
    }

    fn next_round(&mut self) -> Round {
        self.question_index += 1;
        let question = question::generate(self.difficulty, &mut self.rng);
        self.current = Some(question.clone());

        if self.question_index % DIFFICULTY_STEP == 0 {
            self.difficulty = self.difficulty.increased();
        }

        Round {
            index: self.question_index,
            total: TOTAL_QUESTIONS,
            question,
        }
    }
}

impl<R> QuizSession<R> {
    /// Current phase of the session.
    pub fn phase(&self) -> QuizPhase {
        self.machine.phase()
    }

    /// Score accumulated so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Tier used for the next question and for scoring answers.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Question of the round in play, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Counters for status display.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.machine.phase(),
            score: self.score,
            difficulty: self.difficulty,
            question_index: self.question_index,
            total_questions: TOTAL_QUESTIONS,
        }
    }
}
