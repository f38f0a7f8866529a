use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::series::ProductionSeries;
use crate::time::{month_bounds, month_power_window};

/// One daily energy reading as delivered by a source. A reading can exist
/// for a date without carrying a value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyReading {
    pub date: NaiveDate,
    pub energy_kwh: Option<f64>,
}

/// One interval power reading as delivered by a source.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerReading {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub power_kw: Option<f64>,
}

/// A source of raw production readings.
///
/// A transport or decoding failure is an `Err`; a period the source knows
/// nothing about is an `Ok` with no readings. Callers must not analyze a
/// series whose ingestion returned an error.
pub trait ReadingSource {
    fn daily_energy(&self, start_date: NaiveDate, end_date: NaiveDate)
        -> Result<Vec<EnergyReading>>;

    fn interval_power(
        &self,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<Vec<PowerReading>>;
}

/// Fetch one calendar month of readings and return the populated series,
/// labelled `{year}_{month}`.
pub fn ingest_month<S: ReadingSource>(
    source: &S,
    year: i32,
    month: u32,
) -> Result<ProductionSeries> {
    let (start_date, end_date) = month_bounds(year, month)?;
    let (start_time, end_time) = month_power_window(year, month)?;

    let mut series = ProductionSeries::for_month(year, month);

    let energy = source
        .daily_energy(start_date, end_date)
        .with_context(|| format!("Fetching daily energy for {}", series.name()))?;
    for reading in energy {
        series.set_daily_energy(reading.date, reading.energy_kwh);
    }

    let power = source
        .interval_power(start_time, end_time)
        .with_context(|| format!("Fetching interval power for {}", series.name()))?;
    for reading in power {
        series.set_interval_power(reading.date, reading.time, reading.power_kw);
    }

    Ok(series)
}
