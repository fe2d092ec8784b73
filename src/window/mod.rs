mod measurement;
mod params;
mod snapshot;
mod windowed_statistics;

pub use measurement::Measurement;
pub use params::WindowParams;
pub use snapshot::WindowSnapshot;
pub use windowed_statistics::WindowedStatistics;
