//! Diagnostic side-channel for inspecting and forcing session state.
//!
//! Available only on sessions built with `QuizSession::with_diagnostics`. The
//! controller exposes exactly two fields, the question index and the completion flag,
//! and never touches the score.

use std::sync::Mutex;

use super::service::QuizSession;
use crate::error::DiagnosticsError;

/// State reported to a diagnostics observer after every session change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticState {
    pub current_index: usize,
    pub completed: bool,
    pub generation: u64,
}

/// Injectable observer for diagnostic state.
pub trait SessionDiagnostics: Send + Sync {
    fn observe(&self, state: DiagnosticState);
}

/// Diagnostics observer that remembers every reported state.
#[derive(Debug, Default)]
pub struct DiagnosticsRecorder {
    history: Mutex<Vec<DiagnosticState>>,
}

impl DiagnosticsRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn latest(&self) -> Option<DiagnosticState> {
        self.history
            .lock()
            .ok()
            .and_then(|history| history.last().copied())
    }

    #[must_use]
    pub fn history(&self) -> Vec<DiagnosticState> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

impl SessionDiagnostics for DiagnosticsRecorder {
    fn observe(&self, state: DiagnosticState) {
        if let Ok(mut history) = self.history.lock() {
            history.push(state);
        }
    }
}

/// Narrow controller over a session's index and completion flag.
pub struct DiagnosticControl<'a> {
    session: &'a mut QuizSession,
}

impl<'a> DiagnosticControl<'a> {
    pub(crate) fn new(session: &'a mut QuizSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.session.current_index()
    }

    /// Move the session to `index` without scoring anything.
    ///
    /// # Errors
    ///
    /// Returns `DiagnosticsError::IndexOutOfRange` if `index` exceeds the question count.
    pub fn set_current_index(&mut self, index: usize) -> Result<(), DiagnosticsError> {
        let total = self.session.total();
        if index > total {
            return Err(DiagnosticsError::IndexOutOfRange { index, total });
        }
        self.session.force_current_index(index);
        Ok(())
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.session.is_complete()
    }

    /// Force the completion flag without scoring anything.
    ///
    /// Clearing it is refused once the index sits past the last question, since no
    /// question would be left to answer and nothing could complete the run again.
    ///
    /// # Errors
    ///
    /// Returns `DiagnosticsError::NothingLeftToAnswer` when clearing completion with the
    /// index at the end of a loaded run.
    pub fn set_completed(&mut self, completed: bool) -> Result<(), DiagnosticsError> {
        let (index, total) = (self.session.current_index(), self.session.total());
        if !completed && total > 0 && index >= total {
            return Err(DiagnosticsError::NothingLeftToAnswer { index, total });
        }
        self.session.force_completed(completed);
        Ok(())
    }
}
