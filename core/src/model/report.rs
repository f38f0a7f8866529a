use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived metrics for one observation period. Produced by
/// [`analyze`](crate::service::analysis::analyze) and read-only afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductionReport {
    /// Period label, e.g. "2023_6" or a CSV file name.
    pub name: String,
    /// Sum of all daily energy readings, kWh.
    pub total_production: f64,
    /// Largest daily energy reading, kWh. 0 when no day exceeded zero.
    pub max_daily_production: f64,
    /// Day the maximum was produced on. None when no day exceeded zero.
    pub max_daily_production_date: Option<NaiveDate>,
    /// Mean daily energy over the days with a reading, kWh.
    pub average_production: f64,
    /// Largest interval power reading, kW. 0 when no power data was ingested.
    pub max_power: f64,
    /// Day the power maximum occurred on. None when no power data exists.
    pub max_power_date: Option<NaiveDate>,
    /// Per-day energy relative to the best day of the period, in [0, 1]
    /// for non-negative readings.
    pub sunny_ratio: BTreeMap<NaiveDate, f64>,
    /// Mean of the sunny ratios.
    pub average_sunny_ratio: f64,
}

impl ProductionReport {
    /// Inverse of the average sunny ratio as a percentage, rounded to two
    /// decimals. Computed on read, not stored.
    pub fn cloudiness_percent(&self) -> f64 {
        round2((1.0 - self.average_sunny_ratio) * 100.0)
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_sunny_ratio(average_sunny_ratio: f64) -> ProductionReport {
        ProductionReport {
            name: "2023_6".to_string(),
            total_production: 0.0,
            max_daily_production: 0.0,
            max_daily_production_date: None,
            average_production: 0.0,
            max_power: 0.0,
            max_power_date: None,
            sunny_ratio: BTreeMap::new(),
            average_sunny_ratio,
        }
    }

    #[test]
    fn test_cloudiness_is_inverse_of_sunny_ratio() {
        let report = report_with_sunny_ratio(0.75);
        assert_eq!(report.cloudiness_percent(), 25.0);
    }

    #[test]
    fn test_cloudiness_rounds_to_two_decimals() {
        let report = report_with_sunny_ratio(2.0 / 3.0);
        assert_eq!(report.cloudiness_percent(), 33.33);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(100.0 / 3.0), 33.33);
        assert_eq!(round2(-19.996), -20.0);
        assert_eq!(round2(20.0), 20.0);
    }
}
