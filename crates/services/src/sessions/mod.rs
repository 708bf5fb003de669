mod diagnostics;
mod progress;
mod service;
mod view;

// Public API of the quiz session subsystem.
pub use crate::error::{DiagnosticsError, SessionError};
pub use diagnostics::{DiagnosticControl, DiagnosticState, DiagnosticsRecorder, SessionDiagnostics};
pub use progress::SessionProgress;
pub use service::{AnswerOutcome, FetchTicket, LoadOutcome, QuizSession, SessionOptions};
pub use view::{AnswerChoice, COMPLETED_HEADING, QuizView, RESTART_LABEL, START_LABEL};
