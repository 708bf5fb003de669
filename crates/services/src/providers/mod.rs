mod fixture;
mod http;

use async_trait::async_trait;

use quiz_core::model::Question;

pub use crate::error::{ConfigError, ProviderError};
pub use fixture::FixtureQuestionProvider;
pub use http::{
    BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_QUESTIONS_PATH, HttpQuestionProvider, PATH_ENV,
    ProviderConfig,
};

/// Source of quiz questions.
///
/// One call per `start()`/`restart()`; implementations carry no retry or caching policy.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Fetch the question list for a new run.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the questions cannot be obtained or decoded.
    async fn fetch_questions(&self) -> Result<Vec<Question>, ProviderError>;
}
