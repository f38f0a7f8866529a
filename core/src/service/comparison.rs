use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::model::report::{round2, ProductionReport};

/// Relative difference of one metric between two periods.
///
/// `percent` is `(1 - other / baseline) * 100` rounded to two decimals.
/// Positive means the other period is lower than the baseline, negative means
/// it is higher.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RelativeChange {
    pub percent: f64,
}

impl RelativeChange {
    /// Sign-aware wording, e.g. "20.00% lower" or "20.00% higher".
    pub fn describe(&self) -> String {
        if self.percent < 0.0 {
            format!("{:.2}% higher", -self.percent)
        } else {
            format!("{:.2}% lower", self.percent)
        }
    }
}

/// Relative differences between two analyzed periods, each expressed from the
/// baseline's point of view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PeriodComparison {
    pub baseline_name: String,
    pub other_name: String,
    pub total_production: RelativeChange,
    pub max_power: RelativeChange,
    pub max_daily_production: RelativeChange,
}

/// Compare two analyzed periods.
///
/// The daily-production difference is derived from the daily energy maximum
/// and the power difference from the interval power maximum; the two never
/// feed each other's comparison. Fails with [`StatsError::ZeroBaseline`] when
/// the baseline's side of any metric is zero.
pub fn compare(
    baseline: &ProductionReport,
    other: &ProductionReport,
) -> StatsResult<PeriodComparison> {
    Ok(PeriodComparison {
        baseline_name: baseline.name.clone(),
        other_name: other.name.clone(),
        total_production: relative_change(
            baseline,
            "total production",
            baseline.total_production,
            other.total_production,
        )?,
        max_power: relative_change(baseline, "max power", baseline.max_power, other.max_power)?,
        max_daily_production: relative_change(
            baseline,
            "max daily production",
            baseline.max_daily_production,
            other.max_daily_production,
        )?,
    })
}

fn relative_change(
    baseline: &ProductionReport,
    metric: &'static str,
    baseline_value: f64,
    other_value: f64,
) -> StatsResult<RelativeChange> {
    if baseline_value == 0.0 {
        return Err(StatsError::ZeroBaseline {
            period: baseline.name.clone(),
            metric,
        });
    }
    let ratio = other_value / baseline_value;
    Ok(RelativeChange {
        percent: round2((1.0 - ratio) * 100.0),
    })
}
