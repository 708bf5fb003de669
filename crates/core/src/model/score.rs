use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("score {correct} exceeds question count {total}")]
    ExceedsTotal { correct: usize, total: usize },
}

/// Correct answers out of the questions in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    correct: usize,
    total: usize,
}

impl Score {
    /// # Errors
    ///
    /// Returns `ScoreError::ExceedsTotal` if `correct` is greater than `total`.
    pub fn new(correct: usize, total: usize) -> Result<Self, ScoreError> {
        if correct > total {
            return Err(ScoreError::ExceedsTotal { correct, total });
        }
        Ok(Self { correct, total })
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_fraction() {
        assert_eq!(Score::new(7, 10).unwrap().to_string(), "7/10");
        assert_eq!(Score::default().to_string(), "0/0");
    }

    #[test]
    fn rejects_more_correct_than_asked() {
        let err = Score::new(12, 10).unwrap_err();
        assert_eq!(err, ScoreError::ExceedsTotal {
            correct: 12,
            total: 10
        });
        assert!(Score::new(10, 10).unwrap().is_perfect());
        assert!(!Score::new(0, 0).unwrap().is_perfect());
    }
}
