use std::fmt::Debug;

/// Wall-clock source consulted by windowed statistics to decide when buckets
/// expire. Supplied by the monitoring subsystem that owns the aggregator.
pub trait Clock: Debug + Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
