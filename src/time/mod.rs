mod clock;
mod granularity;

pub use clock::{Clock, SystemClock};
pub use granularity::TimeGranularity;
