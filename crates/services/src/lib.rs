#![forbid(unsafe_code)]

pub mod error;
pub mod presenter;
pub mod providers;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::{ConfigError, DiagnosticsError, ProviderError, SessionError};
pub use presenter::{Presenter, RecordingPresenter};
pub use providers::{
    FixtureQuestionProvider, HttpQuestionProvider, ProviderConfig, QuestionProvider,
};

pub use sessions::{
    AnswerOutcome, DiagnosticControl, DiagnosticState, DiagnosticsRecorder, FetchTicket,
    LoadOutcome, QuizSession, QuizView, SessionDiagnostics, SessionOptions, SessionProgress,
};
