use std::{
    ops::Add,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// A cell timestamp: microseconds since the Unix epoch
///
/// Microseconds are the native granularity of cell versions; callers that
/// think in milliseconds use [`Timestamp::from_millis`]. Rule evaluation
/// never reads the wall clock itself — [`Timestamp::now`] exists for the
/// write and read paths, which stamp time at the API boundary and pass it
/// down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0);

    pub fn from_micros(micros: u64) -> Self {
        Timestamp(micros)
    }

    pub fn from_millis(millis: u64) -> Self {
        Timestamp(millis * 1_000)
    }

    /// Current wall-clock time. A clock before the epoch collapses to
    /// [`Timestamp::EPOCH`].
    pub fn now() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        Timestamp(since_epoch.as_micros() as u64)
    }

    pub fn as_micros(&self) -> u64 {
        self.0
    }

    /// Elapsed time from `earlier` to `self`, saturating to zero when
    /// `earlier` is in the future.
    pub fn saturating_duration_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0 + rhs.as_micros() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_micros_conversion() {
        assert_eq!(Timestamp::from_millis(5).as_micros(), 5_000);
        assert_eq!(Timestamp::from_micros(42).as_micros(), 42);
    }

    #[test]
    fn test_duration_since_saturates() {
        let early = Timestamp::from_millis(10);
        let late = Timestamp::from_millis(25);
        assert_eq!(
            late.saturating_duration_since(early),
            Duration::from_millis(15)
        );
        assert_eq!(early.saturating_duration_since(late), Duration::ZERO);
    }

    #[test]
    fn test_add_duration() {
        let ts = Timestamp::from_millis(10) + Duration::from_millis(5);
        assert_eq!(ts, Timestamp::from_millis(15));
    }
}
