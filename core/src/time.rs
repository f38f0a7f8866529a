use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Label identifying an observation period, e.g. "2023_6".
pub fn period_label(year: i32, month: u32) -> String {
    format!("{}_{}", year, month)
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow!("Invalid year/month: {}-{}", year, month))
}

fn first_of_next_month(year: i32, month: u32) -> Result<NaiveDate> {
    if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    }
}

/// First and last calendar day of a month, for the daily energy query.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let start = first_of_month(year, month)?;
    let end = first_of_next_month(year, month)? - Duration::days(1);
    Ok((start, end))
}

/// Time window covering a month for the interval power query: midnight at the
/// first day up to midnight at the first day of the following month.
pub fn month_power_window(year: i32, month: u32) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let start = first_of_month(year, month)?;
    let end = first_of_next_month(year, month)?;
    let midnight = |d: NaiveDate| d.and_hms_opt(0, 0, 0).expect("midnight is always valid");
    Ok((midnight(start), midnight(end)))
}
