use crate::error::StatsError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Time units, ordered finest to coarsest.
///
/// A window of one unit is partitioned into buckets of the next finer unit,
/// so only units that are at least [`Minutes`](Self::Minutes) can be used as
/// a window: minutes are bucketed by seconds, hours by minutes, days by hours.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TimeGranularity {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeGranularity {
    /// Length of one unit in nanoseconds.
    pub const fn nanos(self) -> u64 {
        match self {
            Self::Nanoseconds => 1,
            Self::Microseconds => 1_000,
            Self::Milliseconds => 1_000_000,
            Self::Seconds => 1_000_000_000,
            Self::Minutes => 60 * 1_000_000_000,
            Self::Hours => 3_600 * 1_000_000_000,
            Self::Days => 86_400 * 1_000_000_000,
        }
    }

    /// Length of one unit in whole milliseconds (0 below a millisecond).
    pub const fn millis(self) -> u64 {
        self.nanos() / 1_000_000
    }

    /// The next finer unit, if any.
    pub const fn finer(self) -> Option<Self> {
        match self {
            Self::Nanoseconds => None,
            Self::Microseconds => Some(Self::Nanoseconds),
            Self::Milliseconds => Some(Self::Microseconds),
            Self::Seconds => Some(Self::Milliseconds),
            Self::Minutes => Some(Self::Seconds),
            Self::Hours => Some(Self::Minutes),
            Self::Days => Some(Self::Hours),
        }
    }

    /// How many of `self` fit into one `coarser`.
    pub const fn units_per(self, coarser: Self) -> u64 {
        coarser.nanos() / self.nanos()
    }

    /// Unit used for the buckets of a window spanning one `self`.
    pub fn bucket_unit(self) -> Result<Self, StatsError> {
        if self < Self::Minutes {
            return Err(StatsError::UnsupportedGranularity(self));
        }
        self.finer()
            .ok_or(StatsError::UnsupportedGranularity(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn ordered_finest_to_coarsest() {
        let all: Vec<_> = TimeGranularity::iter().collect();
        assert_eq!(all.first(), Some(&TimeGranularity::Nanoseconds));
        assert_eq!(all.last(), Some(&TimeGranularity::Days));
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert!(all.windows(2).all(|w| w[0].nanos() < w[1].nanos()));
    }

    #[test]
    fn finer_steps_down_one_level() {
        for unit in TimeGranularity::iter().skip(1) {
            let finer = unit.finer().unwrap();
            assert!(finer < unit);
        }
        assert!(TimeGranularity::Nanoseconds.finer().is_none());
    }

    #[test]
    fn bucket_layouts_for_supported_windows() {
        let cases = [
            (TimeGranularity::Minutes, TimeGranularity::Seconds, 60, 1_000),
            (TimeGranularity::Hours, TimeGranularity::Minutes, 60, 60_000),
            (TimeGranularity::Days, TimeGranularity::Hours, 24, 3_600_000),
        ];
        for (window, sub, buckets, millis) in cases {
            let unit = window.bucket_unit().unwrap();
            assert_eq!(unit, sub);
            assert_eq!(unit.units_per(window), buckets);
            assert_eq!(unit.millis(), millis);
        }
    }

    #[test]
    fn fine_units_are_rejected() {
        for unit in [
            TimeGranularity::Nanoseconds,
            TimeGranularity::Microseconds,
            TimeGranularity::Milliseconds,
            TimeGranularity::Seconds,
        ] {
            let err = unit.bucket_unit().unwrap_err();
            assert!(matches!(err, StatsError::UnsupportedGranularity(u) if u == unit));
        }
    }

    #[test]
    fn error_message_names_the_unit() {
        let err = TimeGranularity::Seconds.bucket_unit().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported time unit: seconds");
    }

    #[test]
    fn parses_and_serializes_kebab_case() {
        assert_eq!(
            TimeGranularity::from_str("hours").unwrap(),
            TimeGranularity::Hours
        );
        assert!(TimeGranularity::from_str("fortnights").is_err());
        let s: &'static str = TimeGranularity::Days.into();
        assert_eq!(s, "days");
        assert_eq!(
            serde_json::to_string(&TimeGranularity::Minutes).unwrap(),
            "\"minutes\""
        );
        let back: TimeGranularity = serde_json::from_str("\"milliseconds\"").unwrap();
        assert_eq!(back, TimeGranularity::Milliseconds);
    }
}
