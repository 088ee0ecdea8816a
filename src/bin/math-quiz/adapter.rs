//! Line-oriented adapter between a terminal and the quiz engine.
//!
//! Known command words trigger engine events; every other line is submitted
//! as an answer.

use std::io::{BufRead, Write};

use anyhow::Result;
use codekids_back::{
    dao::stats_store::StatsStore,
    dto::quiz::{FeedbackView, QuestionView, StatisticsView, StatusView, SummaryView},
    error::QuizError,
    services::quiz_service::QuizService,
    state::{
        InvalidTransition, QuizEvent, QuizPhase, RoundPhase,
        session::{Advance, QuizSummary},
        stats::UserStatistics,
    },
};
use rand::Rng;
use tracing::error;

const HELP: &str = "Commands: start, next, status, stats, help, quit.\n\
                    Anything else is taken as your answer.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Next,
    Status,
    Stats,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.to_ascii_lowercase().as_str() {
            "start" => Some(Command::Start),
            "next" | "n" => Some(Command::Next),
            "status" => Some(Command::Status),
            "stats" => Some(Command::Stats),
            "help" | "?" => Some(Command::Help),
            "quit" | "exit" | "q" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Drive `service` from `input` until end of input or `quit`.
pub fn run<S, R>(
    service: &mut QuizService<S, R>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()>
where
    S: StatsStore,
    R: Rng,
{
    writeln!(output, "Math Quiz")?;
    writeln!(output, "Type `start` to begin, `help` for commands.")?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let outcome = match Command::parse(line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => Ok(writeln!(output, "{HELP}")),
            Some(Command::Status) => Ok(writeln!(output, "{}", StatusView(service.snapshot()))),
            Some(Command::Stats) => Ok(writeln!(
                output,
                "{}",
                StatisticsView(service.statistics())
            )),
            Some(Command::Start) => service.start().map(|round| {
                writeln!(output, "{}", QuestionView::from(&round))
            }),
            Some(Command::Next) => service.advance().map(|advance| match advance {
                Advance::Round(round) => writeln!(output, "{}", QuestionView::from(&round)),
                Advance::Finished(summary) => {
                    write_summary(&mut output, summary, service.statistics())
                }
            }),
            None => service.submit(line).map(|verdict| {
                writeln!(output, "{}", FeedbackView(verdict))?;
                writeln!(output, "{}", StatusView(service.snapshot()))
            }),
        };

        match outcome {
            Ok(written) => written?,
            Err(QuizError::InvalidState(invalid)) => writeln!(output, "{}", hint(invalid))?,
            Err(QuizError::Unsaved { summary, source }) => {
                error!(error = %source, "failed to persist statistics");
                write_summary(&mut output, summary, service.statistics())?;
                writeln!(output, "Could not save your statistics.")?;
            }
            Err(err @ QuizError::Storage(_)) => {
                error!(error = %err, "failed to persist statistics");
                writeln!(output, "Could not save your statistics.")?;
            }
        }
    }

    Ok(())
}

fn write_summary(
    output: &mut impl Write,
    summary: QuizSummary,
    stats: UserStatistics,
) -> std::io::Result<()> {
    writeln!(output, "{}\n\n{}", SummaryView(summary), StatisticsView(stats))
}

fn hint(invalid: InvalidTransition) -> &'static str {
    match (invalid.from, invalid.event) {
        (QuizPhase::InProgress(_), QuizEvent::Start) => "A quiz is already running.",
        (QuizPhase::InProgress(RoundPhase::Answered), QuizEvent::AnswerAccepted) => {
            "Already answered. Type `next` for the next question."
        }
        (QuizPhase::InProgress(RoundPhase::AwaitingAnswer), _) => {
            "Answer the current question first."
        }
        _ => "Type `start` to begin a quiz.",
    }
}
