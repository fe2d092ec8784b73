use crate::error::StatsError;
use crate::stats::{BucketStatistics, RunningAverage};
use crate::time::{Clock, SystemClock, TimeGranularity};
use crate::window::{WindowParams, WindowSnapshot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Count, mean, min and max over a trailing time window.
///
/// The window of one `granularity` unit is split into N buckets of the next
/// finer unit (60 seconds for a minute, 60 minutes for an hour, 24 hours for
/// a day). Observations go into the newest bucket; as the clock passes the
/// newest bucket's deadline, the oldest bucket is evicted and its aggregate
/// is subtracted from the window totals, so updates stay O(1) amortized.
///
/// Every operation, reads included, ages the window against the clock first
/// and runs under one lock, so the four statistics always describe the same
/// set of buckets.
#[derive(Debug)]
pub struct WindowedStatistics {
    granularity: TimeGranularity,
    bucket_millis: u64,
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    average: RunningAverage,
    min: f64,
    max: f64,
    /// Ring of exactly N buckets; `front` is the current one and the slot
    /// after it holds the oldest.
    buckets: Vec<BucketStatistics>,
    front: usize,
    front_valid_until: i64,
}

impl WindowedStatistics {
    /// Window over one `granularity` unit, timed by the system clock.
    pub fn new(granularity: TimeGranularity) -> Result<Self, StatsError> {
        Self::with_clock(granularity, Arc::new(SystemClock))
    }

    pub fn with_clock(
        granularity: TimeGranularity,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StatsError> {
        let bucket_unit = granularity.bucket_unit()?;
        let bucket_count = bucket_unit.units_per(granularity) as usize;
        let bucket_millis = bucket_unit.millis();
        let now = clock.now_millis();

        debug!(
            %granularity,
            %bucket_unit,
            bucket_count,
            bucket_millis,
            "windowed statistics created"
        );

        Ok(Self {
            granularity,
            bucket_millis,
            clock,
            inner: Mutex::new(Inner {
                average: RunningAverage::new(),
                min: f64::NAN,
                max: f64::NAN,
                buckets: vec![BucketStatistics::new(); bucket_count],
                front: 0,
                front_valid_until: now.saturating_add(bucket_millis as i64),
            }),
        })
    }

    pub fn from_params(params: &WindowParams) -> Result<Self, StatsError> {
        Self::new(params.granularity)
    }

    pub fn from_params_with_clock(
        params: &WindowParams,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StatsError> {
        Self::with_clock(params.granularity, clock)
    }

    /// Evicts every bucket that has aged out of the window.
    pub fn refresh(&self) {
        self.lock_refreshed();
    }

    pub fn add_datum(&self, value: f64) {
        let mut inner = self.lock_refreshed();
        inner.add_datum(value);
    }

    pub fn count(&self) -> u64 {
        self.lock_refreshed().average.count()
    }

    /// Mean over the window, `NaN` if it holds no data.
    pub fn average(&self) -> f64 {
        self.lock_refreshed().average.average()
    }

    pub fn min(&self) -> f64 {
        self.lock_refreshed().min
    }

    pub fn max(&self) -> f64 {
        self.lock_refreshed().max
    }

    pub fn snapshot(&self) -> WindowSnapshot {
        let inner = self.lock_refreshed();
        WindowSnapshot {
            count: inner.average.count(),
            average: inner.average.average(),
            min: inner.min,
            max: inner.max,
        }
    }

    #[inline]
    pub fn granularity(&self) -> TimeGranularity {
        self.granularity
    }

    pub fn bucket_count(&self) -> usize {
        self.lock().buckets.len()
    }

    #[inline]
    pub fn bucket_duration(&self) -> Duration {
        Duration::from_millis(self.bucket_millis)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // No code path panics while holding the lock, so a poisoned guard
        // still holds consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_refreshed(&self) -> MutexGuard<'_, Inner> {
        let mut inner = self.lock();
        inner.refresh(self.clock.now_millis(), self.bucket_millis);
        inner
    }
}

impl Inner {
    fn add_datum(&mut self, value: f64) {
        self.average.add_datum(value);
        self.buckets[self.front].add_datum(value);
        if self.min.is_nan() || value < self.min {
            self.min = value;
        }
        if self.max.is_nan() || value > self.max {
            self.max = value;
        }
    }

    fn refresh(&mut self, now: i64, bucket_millis: u64) {
        if now <= self.front_valid_until {
            return;
        }
        let behind = now.abs_diff(self.front_valid_until);
        let rotations = behind.div_ceil(bucket_millis);
        let advance = rotations.saturating_mul(bucket_millis);
        self.front_valid_until = self
            .front_valid_until
            .saturating_add(i64::try_from(advance).unwrap_or(i64::MAX));

        if rotations >= self.buckets.len() as u64 {
            debug!(rotations, "idle past the whole window, clearing all buckets");
            self.clear();
            return;
        }
        for _ in 0..rotations {
            self.rotate();
        }
    }

    fn rotate(&mut self) {
        let oldest = (self.front + 1) % self.buckets.len();
        let expired = self.buckets[oldest];
        self.buckets[oldest].reset();
        self.front = oldest;

        trace!(
            slot = oldest,
            expired_count = expired.count(),
            "rotated bucket"
        );

        if let Err(e) = self
            .average
            .remove_datum(expired.average(), expired.count())
        {
            warn!(error = %e, "window average out of step with buckets, rebuilding");
            self.rebuild_average();
        }

        // Only a bucket that held the current extremum forces a rescan.
        if expired.min() <= self.min {
            self.min = self.scan(BucketStatistics::min, |candidate, best| candidate < best);
        }
        if expired.max() >= self.max {
            self.max = self.scan(BucketStatistics::max, |candidate, best| candidate > best);
        }
    }

    fn scan(
        &self,
        field: fn(&BucketStatistics) -> f64,
        better: fn(f64, f64) -> bool,
    ) -> f64 {
        self.buckets
            .iter()
            .filter(|b| !b.is_empty())
            .map(field)
            .fold(f64::NAN, |best, v| {
                if best.is_nan() || better(v, best) {
                    v
                } else {
                    best
                }
            })
    }

    fn rebuild_average(&mut self) {
        self.average.reset();
        for b in self.buckets.iter().filter(|b| !b.is_empty()) {
            self.average.add_aggregate(b.average(), b.count());
        }
    }

    fn clear(&mut self) {
        self.buckets.iter_mut().for_each(BucketStatistics::reset);
        self.average.reset();
        self.min = f64::NAN;
        self.max = f64::NAN;
    }
}
