use std::time::Duration;

use crate::utils::format_interval_secs;

pub const MIN_POLL_SECS: u64 = 2;
pub const DEFAULT_POLL_SECS: u64 = 5;

/// Delay between the end of one fetch and the start of the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollInterval {
    secs: u64,
}

impl PollInterval {
    pub fn from_secs(secs: u64) -> Self {
        Self {
            secs: secs.max(MIN_POLL_SECS),
        }
    }

    pub fn secs(self) -> u64 {
        self.secs
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.secs)
    }

    pub fn increment(&mut self) {
        self.secs = self.secs.saturating_add(1);
    }

    /// No-op once the floor is reached.
    pub fn decrement(&mut self) {
        if self.secs > MIN_POLL_SECS {
            self.secs -= 1;
        }
    }

    pub fn label(self) -> String {
        format_interval_secs(self.secs)
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self::from_secs(DEFAULT_POLL_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_five_seconds() {
        assert_eq!(PollInterval::default().as_duration(), Duration::from_secs(5));
        assert_eq!(PollInterval::default().label(), "5s");
    }

    #[test]
    fn decrement_never_crosses_floor() {
        let mut interval = PollInterval::default();
        for _ in 0..50 {
            interval.decrement();
            assert!(interval.secs() >= MIN_POLL_SECS);
        }
        assert_eq!(interval.secs(), MIN_POLL_SECS);
    }

    #[test]
    fn increment_is_unbounded_by_one() {
        let mut interval = PollInterval::from_secs(MIN_POLL_SECS);
        for expected in 3..=500 {
            interval.increment();
            assert_eq!(interval.secs(), expected);
        }
    }

    #[test]
    fn construction_clamps_to_floor() {
        assert_eq!(PollInterval::from_secs(0).secs(), MIN_POLL_SECS);
        assert_eq!(PollInterval::from_secs(9).secs(), 9);
    }
}
