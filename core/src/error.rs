use thiserror::Error;

/// Failures produced while deriving statistics from a series.
///
/// Missing individual readings are not errors; they are `None` in the store
/// and skipped by the aggregation loops. These variants cover the cases where
/// a whole computation has no defined result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("period {0} has no usable daily energy readings")]
    EmptySeries(String),

    #[error("{metric} for period {period} is zero, cannot derive a ratio")]
    ZeroBaseline { period: String, metric: &'static str },
}

pub type StatsResult<T> = Result<T, StatsError>;
