use std::io::{self, Write};

use quiz_core::model::SessionSnapshot;
use services::{Presenter, QuizView};

/// Prints each session change to stdout.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for TerminalPresenter {
    fn render(&self, snapshot: &SessionSnapshot) {
        let view = QuizView::from_snapshot(snapshot);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(err) = write_view(&view, &mut out).and_then(|()| out.flush()) {
            log::error!("failed to render quiz view: {err}");
        }
    }
}

/// # Errors
///
/// Returns any error raised by `out`.
pub fn write_view(view: &QuizView, out: &mut impl Write) -> io::Result<()> {
    match view {
        QuizView::StartPrompt { label } => {
            writeln!(out, "[ {label} ]  press Enter to begin, q to quit")?;
        }
        QuizView::Loading => {
            writeln!(out, "Loading questions...")?;
        }
        QuizView::Question {
            number,
            total,
            text,
            answers,
        } => {
            writeln!(out)?;
            writeln!(out, "Question {number}/{total}")?;
            writeln!(out, "{text}")?;
            for choice in answers {
                writeln!(out, "  {}. {}", choice.number, choice.text)?;
            }
            write!(out, "Your answer: ")?;
        }
        QuizView::Completed {
            heading,
            score,
            label,
        } => {
            writeln!(out)?;
            writeln!(out, "{heading}")?;
            writeln!(out, "Your score: {score}")?;
            writeln!(out, "[ {label} ]  press Enter to play again, q to quit")?;
        }
    }
    Ok(())
}
