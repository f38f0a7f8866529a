use std::collections::BTreeMap;

use crate::error::{StatsError, StatsResult};
use crate::model::report::ProductionReport;
use crate::model::series::ProductionSeries;

/// Derive the aggregate metrics for one observation period.
///
/// Readings stored as `None` are skipped everywhere and never reach the sums
/// or the averaging denominator. The daily maximum is a running max starting
/// at 0, so a series of only negative readings reports a maximum of 0 and no
/// date.
///
/// Fails with [`StatsError::EmptySeries`] when not a single daily energy
/// reading is usable, and with [`StatsError::ZeroBaseline`] when the daily
/// maximum is 0 and the sunny ratios would divide by it. Absent power data is
/// not a failure; the power maximum is then 0 with no date.
pub fn analyze(series: &ProductionSeries) -> StatsResult<ProductionReport> {
    let mut total_production = 0.0;
    let mut max_daily_production = 0.0;
    let mut max_daily_production_date = None;
    let mut observed_days = 0usize;

    for (date, energy) in series.daily_energy() {
        let Some(energy) = energy else { continue };
        observed_days += 1;
        total_production += energy;
        // Scan order is calendar order, so the earliest day wins ties.
        if *energy > max_daily_production {
            max_daily_production = *energy;
            max_daily_production_date = Some(*date);
        }
    }

    if observed_days == 0 {
        return Err(StatsError::EmptySeries(series.name().to_string()));
    }
    let average_production = total_production / observed_days as f64;

    if max_daily_production == 0.0 {
        return Err(StatsError::ZeroBaseline {
            period: series.name().to_string(),
            metric: "max daily production",
        });
    }

    let mut sunny_ratio = BTreeMap::new();
    let mut ratio_total = 0.0;
    for (date, energy) in series.daily_energy() {
        let Some(energy) = energy else { continue };
        let ratio = energy / max_daily_production;
        sunny_ratio.insert(*date, ratio);
        ratio_total += ratio;
    }
    let average_sunny_ratio = ratio_total / sunny_ratio.len() as f64;

    let (max_power, max_power_date) = max_interval_power(series);

    Ok(ProductionReport {
        name: series.name().to_string(),
        total_production,
        max_daily_production,
        max_daily_production_date,
        average_production,
        max_power,
        max_power_date,
        sunny_ratio,
        average_sunny_ratio,
    })
}

/// Largest power reading across every interval, with the day it occurred on.
/// An entirely empty power map yields (0.0, None).
fn max_interval_power(series: &ProductionSeries) -> (f64, Option<chrono::NaiveDate>) {
    let mut max_power = 0.0;
    let mut max_power_date = None;
    for (date, by_time) in series.interval_power() {
        for power in by_time.values() {
            let Some(power) = power else { continue };
            if *power > max_power {
                max_power = *power;
                max_power_date = Some(*date);
            }
        }
    }
    (max_power, max_power_date)
}
