use chrono::{DateTime, Utc};

/// Where a quiz run reads its start and completion timestamps from.
///
/// The binary uses the wall clock; sessions under test pin both timestamps to one
/// instant so a summary's duration is zero and its timestamps can be asserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Unix seconds of the instant that pinned quiz runs start and finish at.
pub const PINNED_RUN_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the pinned timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(PINNED_RUN_TIMESTAMP, 0)
        .expect("pinned run timestamp should be valid")
}

/// Clock for sessions whose summaries must be reproducible.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_clock_repeats_its_instant() {
        let clock = fixed_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().timestamp(), PINNED_RUN_TIMESTAMP);
        assert_eq!(Clock::default(), Clock::System);
    }
}
