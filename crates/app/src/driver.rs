use quiz_core::model::Phase;
use services::{LoadOutcome, QuizSession, SessionError};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Quit,
    /// Bare Enter: presses the start/restart control when one is shown.
    Activate,
    /// Zero-based answer position.
    Choose(usize),
    Unrecognized(String),
}

impl Input {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "" => Input::Activate,
            "q" | "quit" | "exit" => Input::Quit,
            _ => match trimmed.parse::<usize>() {
                Ok(number) if number >= 1 => Input::Choose(number - 1),
                _ => Input::Unrecognized(trimmed.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Feed one input to the session.
///
/// Inputs that have no meaning in the current phase are ignored; in particular a
/// session stuck in `Loading` accepts nothing but quit.
///
/// # Errors
///
/// Propagates `SessionError` from the session; out-of-range choices are caught here
/// and never reach `QuizSession::answer`.
pub async fn handle(session: &mut QuizSession, input: Input) -> Result<Flow, SessionError> {
    match (session.phase(), input) {
        (_, Input::Quit) => return Ok(Flow::Quit),
        (Phase::NotStarted, Input::Activate) => report(session.start().await?),
        (Phase::Completed, Input::Activate) => report(session.restart().await?),
        (Phase::InProgress, Input::Choose(index)) => {
            let available = session
                .current_question()
                .map_or(0, |question| question.answers().len());
            if index < available {
                let outcome = session.answer(index)?;
                log::debug!(
                    "answered {} ({}), score {}",
                    index + 1,
                    if outcome.correct { "correct" } else { "wrong" },
                    outcome.score
                );
            } else {
                eprintln!("choose an answer between 1 and {available}");
                session.present();
            }
        }
        (Phase::InProgress, Input::Unrecognized(raw)) => {
            eprintln!("not an answer number: {raw}");
            session.present();
        }
        (phase, input) => {
            log::debug!("ignoring {input:?} while {}", phase.as_str());
        }
    }
    Ok(Flow::Continue)
}

fn report(outcome: LoadOutcome) {
    match outcome {
        LoadOutcome::Loaded { total } => log::info!("loaded {total} questions"),
        LoadOutcome::Failed(err) => log::warn!("could not load questions: {err}"),
        LoadOutcome::Stale { generation } => {
            log::debug!("dropped stale fetch for generation {generation}");
        }
    }
}
