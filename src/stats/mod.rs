mod bucket_statistics;
mod running_average;

pub use bucket_statistics::BucketStatistics;
pub use running_average::RunningAverage;
