//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{Phase, QuestionError, QuizSummaryError, ScoreError};

/// Errors emitted by question providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to decode questions: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("provider returned no questions")]
    Empty,
    #[error("question {index} is malformed: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// Errors emitted while building provider configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("base url must use http or https, got {0}")]
    UnsupportedScheme(String),
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {operation} while session is {}", .phase.as_str())]
    InvalidPhase {
        operation: &'static str,
        phase: Phase,
    },
    #[error("no question is awaiting an answer (session is {})", .phase.as_str())]
    NotInProgress { phase: Phase },
    #[error("answer index {index} out of range, question has {available} answers")]
    AnswerOutOfRange { index: usize, available: usize },
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Summary(#[from] QuizSummaryError),
}

/// Errors emitted by the diagnostics controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiagnosticsError {
    #[error("question index {index} exceeds question count {total}")]
    IndexOutOfRange { index: usize, total: usize },
    #[error("cannot clear completion at index {index}, past the last of {total} questions")]
    NothingLeftToAnswer { index: usize, total: usize },
}
