use std::sync::Mutex;

use quiz_core::model::SessionSnapshot;

/// Observer notified by `QuizSession` after every state change.
pub trait Presenter: Send + Sync {
    fn render(&self, snapshot: &SessionSnapshot);
}

/// Keeps every rendered snapshot, in order.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    frames: Mutex<Vec<SessionSnapshot>>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames(&self) -> Vec<SessionSnapshot> {
        self.frames
            .lock()
            .map(|frames| frames.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn last(&self) -> Option<SessionSnapshot> {
        self.frames
            .lock()
            .ok()
            .and_then(|frames| frames.last().cloned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.lock().map(|frames| frames.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Presenter for RecordingPresenter {
    fn render(&self, snapshot: &SessionSnapshot) {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(snapshot.clone());
        }
    }
}
