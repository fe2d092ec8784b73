pub mod error;
pub mod stats;
pub mod time;
pub mod window;

pub use error::StatsError;
pub use stats::{BucketStatistics, RunningAverage};
pub use time::{Clock, SystemClock, TimeGranularity};
pub use window::{Measurement, WindowParams, WindowSnapshot, WindowedStatistics};

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
