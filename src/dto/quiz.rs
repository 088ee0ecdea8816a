//! Display strings emitted by the quiz engine towards whatever surface renders it.

use std::fmt;

use crate::{
    services::evaluator::Verdict,
    state::{
        session::{QuizSummary, Round, SessionSnapshot},
        stats::UserStatistics,
    },
};

/// Round header followed by the question, e.g. `Question 1/10` then `3 + 4 = ?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// Round counter line.
    pub header: String,
    /// Operation to solve.
    pub question: String,
}

impl From<&Round> for QuestionView {
    fn from(round: &Round) -> Self {
        Self {
            header: format!("Question {}/{}", round.index, round.total),
            question: round.question.to_string(),
        }
    }
}

impl fmt::Display for QuestionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.header, self.question)
    }
}

/// Feedback line shown after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackView(pub Verdict);

impl fmt::Display for FeedbackView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Verdict::Correct { points } => write!(f, "Correct! +{points} points"),
            Verdict::Incorrect { correct_answer } => {
                write!(f, "Wrong. The answer was {correct_answer}")
            }
            Verdict::Invalid => f.write_str("Please enter a number!"),
        }
    }
}

/// End-of-session summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryView(pub QuizSummary);

impl fmt::Display for SummaryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "Quiz complete!")?;
        writeln!(f)?;
        writeln!(f, "Final score: {}", summary.final_score)?;
        writeln!(f, "Average score: {:.1}", summary.average())?;
        writeln!(f)?;
        write!(f, "{}", capitalize(summary.tier().label()))
    }
}

/// Status line, e.g. `Score: 30 | Difficulty: 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusView(pub SessionSnapshot);

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {} | Difficulty: {}",
            self.0.score, self.0.difficulty
        )
    }
}

/// Cross-session statistics block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsView(pub UserStatistics);

impl fmt::Display for StatisticsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        writeln!(f, "Games played: {}", stats.total_games)?;
        writeln!(f, "Best score: {}", stats.best_score)?;
        write!(f, "Total score: {}", stats.total_score)?;
        if let Some(average) = stats.average_score() {
            write!(f, "\nAverage per game: {average:.1}")?;
        }
        Ok(())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        question::{Difficulty, Operator, Question},
        session::TOTAL_QUESTIONS,
        state_machine::QuizPhase,
    };

    #[test]
    fn question_view_has_header_and_operation() {
        let round = Round {
            index: 3,
            total: TOTAL_QUESTIONS,
            question: Question::new(3, Operator::Add, 4).unwrap(),
        };
        assert_eq!(
            QuestionView::from(&round).to_string(),
            "Question 3/10\n\n3 + 4 = ?"
        );
    }

    #[test]
    fn feedback_lines() {
        assert_eq!(
            FeedbackView(Verdict::Correct { points: 20 }).to_string(),
            "Correct! +20 points"
        );
        assert_eq!(
            FeedbackView(Verdict::Incorrect { correct_answer: 7 }).to_string(),
            "Wrong. The answer was 7"
        );
        assert_eq!(
            FeedbackView(Verdict::Invalid).to_string(),
            "Please enter a number!"
        );
    }

    #[test]
    fn summary_lists_score_average_and_tier() {
        let text = SummaryView(QuizSummary {
            final_score: 65,
            total_questions: TOTAL_QUESTIONS,
        })
        .to_string();

        assert!(text.contains("Final score: 65"));
        assert!(text.contains("Average score: 6.5"));
        assert!(text.ends_with("Good"));
    }

    #[test]
    fn summary_tier_for_low_score() {
        let text = SummaryView(QuizSummary {
            final_score: 40,
            total_questions: TOTAL_QUESTIONS,
        })
        .to_string();
        assert!(text.ends_with("Keep practicing"));
    }

    #[test]
    fn status_line() {
        let snapshot = SessionSnapshot {
            phase: QuizPhase::Idle,
            score: 30,
            difficulty: Difficulty::new(2),
            question_index: 4,
            total_questions: TOTAL_QUESTIONS,
        };
        assert_eq!(
            StatusView(snapshot).to_string(),
            "Score: 30 | Difficulty: 2"
        );
    }

    #[test]
    fn statistics_block_skips_average_before_first_game() {
        let text = StatisticsView(UserStatistics::default()).to_string();
        assert!(!text.contains("Average"));

        let text = StatisticsView(UserStatistics::default().updated(50)).to_string();
        assert!(text.contains("Average per game: 50.0"));
    }
}
