use std::path::Path;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use quiz_core::model::Question;

use super::QuestionProvider;
use crate::error::ProviderError;

const BUNDLED_QUESTIONS: &str = include_str!("../../fixtures/questions.json");

/// Serves a static question set in place of a live backend.
///
/// By default every fetch returns the full set in file order. `with_shuffle` and
/// `with_sample` emulate the backend's random endpoint; `with_seed` pins the order.
#[derive(Clone, Debug)]
pub struct FixtureQuestionProvider {
    questions: Vec<Question>,
    shuffle: bool,
    sample: Option<usize>,
    seed: Option<u64>,
}

impl FixtureQuestionProvider {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            shuffle: false,
            sample: None,
            seed: None,
        }
    }

    /// The ten-question set shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Decode` if the bundled JSON is malformed.
    pub fn bundled() -> Result<Self, ProviderError> {
        Self::from_json(BUNDLED_QUESTIONS)
    }

    /// # Errors
    ///
    /// Returns `ProviderError::Decode` if `json` is not a question array.
    pub fn from_json(json: &str) -> Result<Self, ProviderError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Ok(Self::new(questions))
    }

    /// # Errors
    ///
    /// Returns `ProviderError::Io` if the file cannot be read, or
    /// `ProviderError::Decode` if it is not a question array.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn with_sample(mut self, sample: usize) -> Self {
        self.sample = Some(sample);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    fn draw(&self) -> Vec<Question> {
        let mut questions = self.questions.clone();
        if self.shuffle {
            match self.seed {
                Some(seed) => questions.shuffle(&mut StdRng::seed_from_u64(seed)),
                None => questions.shuffle(&mut rand::rng()),
            }
        }
        if let Some(sample) = self.sample {
            questions.truncate(sample);
        }
        questions
    }
}

#[async_trait]
impl QuestionProvider for FixtureQuestionProvider {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ProviderError> {
        Ok(self.draw())
    }
}
