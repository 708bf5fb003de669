use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Question, Score};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where a quiz session sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Created, nothing requested yet.
    NotStarted,
    /// Waiting on questions. A failed fetch leaves the session here.
    Loading,
    /// Questions loaded and at least one left to answer.
    InProgress,
    /// Every question answered, or completion forced through diagnostics.
    Completed,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::NotStarted => "not_started",
            Phase::Loading => "loading",
            Phase::InProgress => "in_progress",
            Phase::Completed => "completed",
        }
    }
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Point-in-time view of a session handed to presenters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub current_index: usize,
    pub current_question: Option<Question>,
    pub score: usize,
    pub total: usize,
}

impl SessionSnapshot {
    #[must_use]
    pub fn not_started() -> Self {
        Self {
            phase: Phase::NotStarted,
            current_index: 0,
            current_question: None,
            score: 0,
            total: 0,
        }
    }

    /// Score as `score/total`, available once the run is completed.
    ///
    /// `None` before completion, and for a snapshot whose score exceeds its total.
    #[must_use]
    pub fn final_score(&self) -> Option<Score> {
        if self.phase != Phase::Completed {
            return None;
        }
        Score::new(self.score, self.total).ok()
    }
}

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

/// Outcome of a completed quiz run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    score: Score,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizSummary {
    /// # Errors
    ///
    /// Returns `QuizSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn new(
        score: Score,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizSummaryError> {
        if completed_at < started_at {
            return Err(QuizSummaryError::InvalidTimeRange);
        }
        Ok(Self {
            score,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn final_score_only_when_completed() {
        let mut snapshot = SessionSnapshot {
            phase: Phase::InProgress,
            current_index: 3,
            current_question: None,
            score: 2,
            total: 10,
        };
        assert_eq!(snapshot.final_score(), None);

        snapshot.phase = Phase::Completed;
        assert_eq!(snapshot.final_score(), Score::new(2, 10).ok());

        snapshot.score = 11;
        assert_eq!(snapshot.final_score(), None);
    }

    #[test]
    fn summary_rejects_reversed_time_range() {
        let now = fixed_now();
        let earlier = now - chrono::Duration::seconds(30);

        let err = QuizSummary::new(Score::new(1, 2).unwrap(), now, earlier).unwrap_err();
        assert_eq!(err, QuizSummaryError::InvalidTimeRange);

        let summary = QuizSummary::new(Score::new(1, 2).unwrap(), earlier, now).unwrap();
        assert_eq!(summary.duration(), chrono::Duration::seconds(30));
    }
}
