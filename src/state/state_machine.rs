//! Phases and legal transitions of a quiz session.

use thiserror::Error;

/// High-level phases a quiz session can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// No session has been started yet.
    Idle,
    /// A session is running and is in one of the round sub-phases.
    InProgress(RoundPhase),
    /// Every round has been played and the summary was emitted.
    Finished,
}

/// Fine-grained phase of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// A question is on screen and no valid answer was submitted yet.
    AwaitingAnswer,
    /// The answer was evaluated; the player may move on.
    Answered,
}

/// Events that can be applied to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    /// Player starts a new session.
    Start,
    /// A well-formed answer was evaluated for the current round.
    AnswerAccepted,
    /// Player asks for the next question.
    NextQuestion,
    /// Player moves on after the last round.
    Finish,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The phase the state machine was in when the invalid event was received.
    pub from: QuizPhase,
    /// The event that cannot be applied from this phase.
    pub event: QuizEvent,
}

/// State machine implementing the quiz round flow.
#[derive(Debug, Clone)]
pub struct QuizStateMachine {
    phase: QuizPhase,
}

impl Default for QuizStateMachine {
    fn default() -> Self {
        Self {
            phase: QuizPhase::Idle,
        }
    }
}

impl QuizStateMachine {
    /// Create a new state machine initialised in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Check that `event` is valid from the current phase without applying it.
    pub fn check(&self, event: QuizEvent) -> Result<QuizPhase, InvalidTransition> {
        self.compute_transition(event)
    }

    /// Apply `event`, moving to the next phase when the transition is valid.
    pub fn apply(&mut self, event: QuizEvent) -> Result<QuizPhase, InvalidTransition> {
        let next = self.compute_transition(event)?;
        self.phase = next;
        Ok(next)
    }

    fn compute_transition(&self, event: QuizEvent) -> Result<QuizPhase, InvalidTransition> {
        let next = match (self.phase, event) {
            (QuizPhase::Idle | QuizPhase::Finished, QuizEvent::Start) => {
                QuizPhase::InProgress(RoundPhase::AwaitingAnswer)
            }
            (QuizPhase::InProgress(RoundPhase::AwaitingAnswer), QuizEvent::AnswerAccepted) => {
                QuizPhase::InProgress(RoundPhase::Answered)
            }
            (QuizPhase::InProgress(RoundPhase::Answered), QuizEvent::NextQuestion) => {
                QuizPhase::InProgress(RoundPhase::AwaitingAnswer)
            }
            (QuizPhase::InProgress(RoundPhase::Answered), QuizEvent::Finish) => QuizPhase::Finished,
            (from, event) => return Err(InvalidTransition { from, event }),
        };

        Ok(next)
    }
}
