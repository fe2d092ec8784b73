use crate::error::StatsError;

/// Incremental mean that supports forgetting a previously added aggregate.
///
/// Adding uses `avg += (x - avg) / n`. Removing takes the count and mean of a
/// group of data added earlier (for instance a whole expired bucket) and
/// backs it out without revisiting the raw samples.
#[derive(Debug, Clone, Copy)]
pub struct RunningAverage {
    count: u64,
    average: f64,
}

impl Default for RunningAverage {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningAverage {
    pub fn new() -> Self {
        Self {
            count: 0,
            average: f64::NAN,
        }
    }

    #[inline]
    pub fn add_datum(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            self.average = value;
        } else {
            self.average += (value - self.average) / self.count as f64;
        }
    }

    /// Folds in `added_count` data whose mean was `added_average`.
    pub fn add_aggregate(&mut self, added_average: f64, added_count: u64) {
        if added_count == 0 {
            return;
        }
        let total = self.count + added_count;
        self.average = if self.count == 0 {
            added_average
        } else {
            self.average + (added_average - self.average) * (added_count as f64 / total as f64)
        };
        self.count = total;
    }

    /// Backs out `removed_count` data whose mean was `removed_average`.
    ///
    /// Fails without touching the state if more data would be removed than
    /// were ever added.
    pub fn remove_datum(
        &mut self,
        removed_average: f64,
        removed_count: u64,
    ) -> Result<(), StatsError> {
        if removed_count > self.count {
            return Err(StatsError::RemovalExceedsCount {
                removed: removed_count,
                count: self.count,
            });
        }
        if removed_count == 0 {
            return Ok(());
        }
        let remaining = self.count - removed_count;
        self.average = if remaining > 0 {
            (self.average * self.count as f64 - removed_average * removed_count as f64)
                / remaining as f64
        } else {
            f64::NAN
        };
        self.count = remaining;
        Ok(())
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of the data currently held, `NaN` when empty.
    #[inline]
    pub fn average(&self) -> f64 {
        self.average
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPS: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn starts_empty_with_nan_average() {
        let avg = RunningAverage::new();
        assert_eq!(avg.count(), 0);
        assert!(avg.is_empty());
        assert!(avg.average().is_nan());
    }

    #[test]
    fn first_datum_is_taken_exactly() {
        let mut avg = RunningAverage::new();
        avg.add_datum(42.5);
        assert_eq!(avg.count(), 1);
        assert_eq!(avg.average(), 42.5);
    }

    #[test]
    fn incremental_mean_matches_arithmetic_mean() {
        let values = [3.0, -1.5, 8.25, 0.0, 12.0, 7.75];
        let mut avg = RunningAverage::new();
        for v in values {
            avg.add_datum(v);
        }
        let expected = values.iter().sum::<f64>() / values.len() as f64;
        assert_eq!(avg.count(), values.len() as u64);
        assert!(approx_eq(avg.average(), expected, EPS));
    }

    #[test]
    fn removing_a_group_restores_mean_of_the_rest() {
        let mut avg = RunningAverage::new();
        for v in [10.0, 20.0, 30.0] {
            avg.add_datum(v);
        }
        for v in [100.0, 200.0] {
            avg.add_datum(v);
        }

        avg.remove_datum(150.0, 2).unwrap();
        assert_eq!(avg.count(), 3);
        assert!(approx_eq(avg.average(), 20.0, EPS));
    }

    #[test]
    fn aggregate_add_is_weighted_by_count() {
        let mut avg = RunningAverage::new();
        avg.add_aggregate(2.0, 3);
        assert_eq!(avg.count(), 3);
        assert_eq!(avg.average(), 2.0);

        avg.add_aggregate(10.0, 1);
        assert_eq!(avg.count(), 4);
        assert!(approx_eq(avg.average(), 4.0, EPS));

        avg.add_aggregate(f64::NAN, 0);
        assert_eq!(avg.count(), 4);
    }

    #[test]
    fn removing_everything_yields_nan() {
        let mut avg = RunningAverage::new();
        avg.add_datum(1.0);
        avg.add_datum(3.0);
        avg.remove_datum(2.0, 2).unwrap();
        assert_eq!(avg.count(), 0);
        assert!(avg.average().is_nan());

        avg.add_datum(5.0);
        assert_eq!(avg.average(), 5.0);
    }

    #[test]
    fn removing_zero_is_a_no_op() {
        let mut avg = RunningAverage::new();
        avg.add_datum(4.0);
        avg.remove_datum(f64::NAN, 0).unwrap();
        assert_eq!(avg.count(), 1);
        assert_eq!(avg.average(), 4.0);
    }

    #[test]
    fn over_removal_is_rejected_and_state_kept() {
        let mut avg = RunningAverage::new();
        avg.add_datum(2.0);
        let err = avg.remove_datum(2.0, 3).unwrap_err();
        assert!(matches!(
            err,
            StatsError::RemovalExceedsCount {
                removed: 3,
                count: 1
            }
        ));
        assert_eq!(avg.count(), 1);
        assert_eq!(avg.average(), 2.0);
    }

    #[test]
    fn reset_clears_state() {
        let mut avg = RunningAverage::new();
        avg.add_datum(9.0);
        avg.reset();
        assert!(avg.is_empty());
        assert!(avg.average().is_nan());
    }
}
