use crate::window::Measurement;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};

/// Count, mean, min and max of a window, all read after the same refresh.
#[derive(Debug, Copy, Clone, Serialize)]
pub struct WindowSnapshot {
    pub count: u64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl WindowSnapshot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Flattens the snapshot into `<prefix>.count`, `<prefix>.average`,
    /// `<prefix>.min` and `<prefix>.max`.
    pub fn measurements(&self, prefix: &str) -> Vec<Measurement> {
        vec![
            Measurement::new(format!("{prefix}.count"), self.count as f64),
            Measurement::new(format!("{prefix}.average"), self.average),
            Measurement::new(format!("{prefix}.min"), self.min),
            Measurement::new(format!("{prefix}.max"), self.max),
        ]
    }
}

impl Display for WindowSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "count={}, avg={:.6}, min={:.6}, max={:.6}",
            self.count, self.average, self.min, self.max
        )
    }
}
