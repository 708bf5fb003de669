use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::model::{AnswerKeyPolicy, Phase, Question, QuizSummary, Score, SessionSnapshot};

use super::diagnostics::{DiagnosticControl, DiagnosticState, SessionDiagnostics};
use super::progress::SessionProgress;
use crate::error::{ProviderError, SessionError};
use crate::presenter::Presenter;
use crate::providers::QuestionProvider;

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

/// Knobs applied when questions are loaded and a run is summarized.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub answer_key: AnswerKeyPolicy,
    pub clock: Clock,
}

//
// ─── FETCH TICKET / OUTCOMES ───────────────────────────────────────────────────
//

/// Handle for one outstanding question fetch.
///
/// Only the ticket from the latest `start`/`restart` can populate the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed fetch.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Questions applied; the session is showing question 0.
    Loaded { total: usize },
    /// The fetch failed; the session stays in `Loading`.
    Failed(ProviderError),
    /// The ticket was superseded and its result dropped.
    Stale { generation: u64 },
}

impl LoadOutcome {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Result of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub score: usize,
    pub current_index: usize,
    pub completed: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz run: fetches questions, walks through them in order and keeps the score.
///
/// Every change is pushed to the `Presenter`, and to the diagnostics observer when one
/// was injected.
pub struct QuizSession {
    provider: Arc<dyn QuestionProvider>,
    presenter: Arc<dyn Presenter>,
    diagnostics: Option<Arc<dyn SessionDiagnostics>>,
    options: SessionOptions,
    questions: Vec<Question>,
    current_index: usize,
    /// One slot per question; answering a question again replaces its slot.
    results: Vec<Option<bool>>,
    completed: bool,
    loaded: bool,
    generation: u64,
    started_at: Option<DateTime<Utc>>,
    summary: Option<QuizSummary>,
}

impl QuizSession {
    #[must_use]
    pub fn new(provider: Arc<dyn QuestionProvider>, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            provider,
            presenter,
            diagnostics: None,
            options: SessionOptions::default(),
            questions: Vec::new(),
            current_index: 0,
            results: Vec::new(),
            completed: false,
            loaded: false,
            generation: 0,
            started_at: None,
            summary: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn SessionDiagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Completed
        } else if self.generation == 0 {
            Phase::NotStarted
        } else if !self.loaded {
            Phase::Loading
        } else {
            Phase::InProgress
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Correctly answered questions; never more than `total()`.
    #[must_use]
    pub fn score(&self) -> usize {
        self.results
            .iter()
            .filter(|result| **result == Some(true))
            .count()
    }

    /// Number of questions in the current run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question awaiting an answer, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase() == Phase::InProgress {
            self.questions.get(self.current_index)
        } else {
            None
        }
    }

    /// Summary of the last completed run, cleared on restart.
    #[must_use]
    pub fn summary(&self) -> Option<&QuizSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.current_index.min(self.questions.len());
        SessionProgress {
            total: self.questions.len(),
            answered,
            remaining: self.questions.len() - answered,
            score: self.score(),
            is_complete: self.completed,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            current_index: self.current_index,
            current_question: self.current_question().cloned(),
            score: self.score(),
            total: self.questions.len(),
        }
    }

    /// Push the current state to the presenter without changing anything.
    pub fn present(&self) {
        self.notify();
    }

    /// The provider this session fetches from, for callers that drive the fetch themselves.
    #[must_use]
    pub fn provider(&self) -> Arc<dyn QuestionProvider> {
        Arc::clone(&self.provider)
    }

    /// Diagnostic controller, present only when diagnostics were injected.
    pub fn diagnostics(&mut self) -> Option<DiagnosticControl<'_>> {
        if self.diagnostics.is_some() {
            Some(DiagnosticControl::new(self))
        } else {
            None
        }
    }

    /// Enter `Loading` and hand out the ticket for the fetch that must follow.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` unless the session has never been started.
    pub fn begin_start(&mut self) -> Result<FetchTicket, SessionError> {
        let phase = self.phase();
        if phase != Phase::NotStarted {
            return Err(SessionError::InvalidPhase {
                operation: "start",
                phase,
            });
        }
        Ok(self.enter_loading())
    }

    /// Reset a completed session and hand out the ticket for its fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` unless the session is completed.
    pub fn begin_restart(&mut self) -> Result<FetchTicket, SessionError> {
        let phase = self.phase();
        if phase != Phase::Completed {
            return Err(SessionError::InvalidPhase {
                operation: "restart",
                phase,
            });
        }

        self.questions.clear();
        self.current_index = 0;
        self.results.clear();
        self.completed = false;
        self.started_at = None;
        self.summary = None;
        Ok(self.enter_loading())
    }

    fn enter_loading(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loaded = false;
        log::debug!("quiz session loading (generation {})", self.generation);
        self.notify();
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Apply the result of the fetch identified by `ticket`.
    ///
    /// Failures leave the session in `Loading`; results for superseded tickets are
    /// dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Question>, ProviderError>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation || self.phase() != Phase::Loading {
            log::warn!(
                "discarding stale question fetch (generation {}, current {})",
                ticket.generation,
                self.generation
            );
            return LoadOutcome::Stale {
                generation: ticket.generation,
            };
        }

        let questions = match result.and_then(|questions| self.check_questions(questions)) {
            Ok(questions) => questions,
            Err(err) => {
                log::warn!("question fetch failed, staying in loading: {err}");
                return LoadOutcome::Failed(err);
            }
        };

        let total = questions.len();
        self.questions = questions;
        self.current_index = 0;
        self.results = vec![None; total];
        self.completed = false;
        self.loaded = true;
        self.started_at = Some(self.options.clock.now());
        log::debug!("quiz session loaded {total} questions");
        self.notify();
        LoadOutcome::Loaded { total }
    }

    fn check_questions(&self, questions: Vec<Question>) -> Result<Vec<Question>, ProviderError> {
        if questions.is_empty() {
            return Err(ProviderError::Empty);
        }
        for (index, question) in questions.iter().enumerate() {
            question
                .validate(self.options.answer_key)
                .map_err(|source| ProviderError::InvalidQuestion { index, source })?;
        }
        Ok(questions)
    }

    /// Request questions and load them.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` if the session was already started. Fetch
    /// failures are reported through `LoadOutcome::Failed`, not as errors.
    pub async fn start(&mut self) -> Result<LoadOutcome, SessionError> {
        let ticket = self.begin_start()?;
        let result = self.provider.fetch_questions().await;
        Ok(self.complete_fetch(ticket, result))
    }

    /// Discard the finished run and load a fresh one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` unless the session is completed.
    pub async fn restart(&mut self) -> Result<LoadOutcome, SessionError> {
        let ticket = self.begin_restart()?;
        let result = self.provider.fetch_questions().await;
        Ok(self.complete_fetch(ticket, result))
    }

    /// Answer the current question with the answer at `selected`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` if no question is awaiting an answer,
    /// `SessionError::AnswerOutOfRange` if `selected` is not one of its answers. State is
    /// left untouched on error.
    pub fn answer(&mut self, selected: usize) -> Result<AnswerOutcome, SessionError> {
        let phase = self.phase();
        let Some(question) = self.current_question() else {
            return Err(SessionError::NotInProgress { phase });
        };
        let answer = question
            .answer(selected)
            .ok_or(SessionError::AnswerOutOfRange {
                index: selected,
                available: question.answers().len(),
            })?;

        let correct = answer.is_correct;
        let index = self.current_index;
        let previous = self.results.get(index).copied().flatten();
        let score = self.score() - usize::from(previous == Some(true)) + usize::from(correct);
        let next_index = index + 1;
        let completed = next_index == self.questions.len();

        let summary = if completed {
            let now = self.options.clock.now();
            let started_at = self.started_at.unwrap_or(now);
            let score = Score::new(score, self.questions.len())?;
            Some(QuizSummary::new(score, started_at, now)?)
        } else {
            None
        };

        if let Some(slot) = self.results.get_mut(index) {
            *slot = Some(correct);
        }
        self.current_index = next_index;
        if completed {
            self.completed = true;
            self.summary = summary;
            log::debug!("quiz completed with score {}/{}", score, self.questions.len());
        }
        self.notify();

        Ok(AnswerOutcome {
            correct,
            score,
            current_index: next_index,
            completed,
        })
    }

    pub(crate) fn force_current_index(&mut self, index: usize) {
        self.current_index = index;
        self.notify();
    }

    pub(crate) fn force_completed(&mut self, completed: bool) {
        self.completed = completed;
        self.notify();
    }

    fn notify(&self) {
        self.presenter.render(&self.snapshot());
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.observe(DiagnosticState {
                current_index: self.current_index,
                completed: self.completed,
                generation: self.generation,
            });
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase())
            .field("questions_len", &self.questions.len())
            .field("current_index", &self.current_index)
            .field("score", &self.score())
            .field("completed", &self.completed)
            .field("generation", &self.generation)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
