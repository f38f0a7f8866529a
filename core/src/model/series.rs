use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::time::period_label;

/// Raw readings for one observation period.
///
/// A value of `None` is a reading the source delivered without a number
/// (the monitoring API reports null for days it has no data for). Aggregation
/// skips those entries; they never contribute to sums or maxima.
///
/// A series is built once by an ingestion source and then only read. A new
/// period gets a new series.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProductionSeries {
    name: String,
    daily_energy: BTreeMap<NaiveDate, Option<f64>>,
    interval_power: BTreeMap<NaiveDate, BTreeMap<NaiveTime, Option<f64>>>,
}

impl ProductionSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            daily_energy: BTreeMap::new(),
            interval_power: BTreeMap::new(),
        }
    }

    /// Series labelled after a calendar month, e.g. "2023_6".
    pub fn for_month(year: i32, month: u32) -> Self {
        Self::new(period_label(year, month))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert or overwrite the energy reading for a day. Last write wins.
    pub fn set_daily_energy(&mut self, date: NaiveDate, energy_kwh: Option<f64>) {
        self.daily_energy.insert(date, energy_kwh);
    }

    /// Insert or overwrite the power reading at a time of day. The per-date
    /// map is created on first use for that date.
    pub fn set_interval_power(&mut self, date: NaiveDate, time: NaiveTime, power_kw: Option<f64>) {
        self.interval_power
            .entry(date)
            .or_default()
            .insert(time, power_kw);
    }

    pub fn daily_energy(&self) -> &BTreeMap<NaiveDate, Option<f64>> {
        &self.daily_energy
    }

    pub fn interval_power(&self) -> &BTreeMap<NaiveDate, BTreeMap<NaiveTime, Option<f64>>> {
        &self.interval_power
    }
}
