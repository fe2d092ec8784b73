use crate::stats::RunningAverage;

/// Count, mean, min and max of the observations that fell into one time slice.
///
/// `min`/`max` are `NaN` until the first non-NaN datum arrives. There is no removal:
/// a bucket is only ever discarded (or [`reset`](Self::reset)) as a whole.
#[derive(Debug, Clone, Copy)]
pub struct BucketStatistics {
    average: RunningAverage,
    min: f64,
    max: f64,
}

impl Default for BucketStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketStatistics {
    pub fn new() -> Self {
        Self {
            average: RunningAverage::new(),
            min: f64::NAN,
            max: f64::NAN,
        }
    }

    pub fn add_datum(&mut self, value: f64) {
        // NaN counts as "no extremum yet", matching the window-wide rule.
        if self.min.is_nan() || value < self.min {
            self.min = value;
        }
        if self.max.is_nan() || value > self.max {
            self.max = value;
        }
        self.average.add_datum(value);
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.average.count()
    }

    #[inline]
    pub fn average(&self) -> f64 {
        self.average.average()
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.average.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
