use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question has no answers")]
    NoAnswers,

    #[error("question \"{question}\" has {correct} correct answers, expected exactly one")]
    AnswerKey { question: String, correct: usize },
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// One selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub text: String,
    pub is_correct: bool,
}

impl Answer {
    #[must_use]
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }

    #[must_use]
    pub fn correct(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    #[must_use]
    pub fn wrong(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A trivia question with its ordered answers.
///
/// Serialized as `{ "question": ..., "answers": [{ "text", "isCorrect" }] }`, which is the
/// shape served by `/api/questions/random`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    text: String,
    answers: Vec<Answer>,
}

impl Question {
    #[must_use]
    pub fn new(text: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            text: text.into(),
            answers,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&Answer> {
        self.answers.get(index)
    }

    /// Position of the first answer flagged correct, if any.
    #[must_use]
    pub fn correct_answer_index(&self) -> Option<usize> {
        self.answers.iter().position(|answer| answer.is_correct)
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_correct).count()
    }

    /// Check this question against an answer-key policy.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` or `QuestionError::NoAnswers` for structurally
    /// empty questions under any policy, and `QuestionError::AnswerKey` when
    /// `AnswerKeyPolicy::ExactlyOne` is violated.
    pub fn validate(&self, policy: AnswerKeyPolicy) -> Result<(), QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.answers.is_empty() {
            return Err(QuestionError::NoAnswers);
        }

        match policy {
            AnswerKeyPolicy::Permissive => Ok(()),
            AnswerKeyPolicy::ExactlyOne => {
                let correct = self.correct_count();
                if correct == 1 {
                    Ok(())
                } else {
                    Err(QuestionError::AnswerKey {
                        question: self.text.clone(),
                        correct,
                    })
                }
            }
        }
    }
}

//
// ─── ANSWER KEY POLICY ─────────────────────────────────────────────────────────
//

/// How strictly fetched questions are checked for a well-formed answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerKeyPolicy {
    /// Any number of correct answers is accepted, including none.
    #[default]
    Permissive,
    /// Every question must mark exactly one answer as correct.
    ExactlyOne,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
