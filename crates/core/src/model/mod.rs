mod question;
mod score;
mod session;

pub use question::{Answer, AnswerKeyPolicy, Question, QuestionError};
pub use score::{Score, ScoreError};
pub use session::{Phase, QuizSummary, QuizSummaryError, SessionSnapshot};
