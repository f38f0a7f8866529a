use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::model::series::ProductionSeries;

/// Read a monthly production export: one header row, then `date,value`
/// records with the energy in kWh. Values may be quoted. An empty value field
/// becomes a missing reading. These exports never contain interval power, so
/// the series carries none.
pub fn read_energy_csv(path: &Path) -> Result<ProductionSeries> {
    info!(path = %path.display(), "reading monthly production csv");
    let file =
        File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let mut series = ProductionSeries::new(path.display().to_string());
    for (index, record) in reader.records().enumerate() {
        // Header is row 1, the first record row 2.
        let row = index + 2;
        let record =
            record.with_context(|| format!("Malformed record at {}:{}", path.display(), row))?;

        let date_field = record
            .get(0)
            .ok_or_else(|| anyhow!("Missing date field at {}:{}", path.display(), row))?;
        let date = NaiveDate::parse_from_str(date_field.trim(), "%Y-%m-%d")
            .with_context(|| format!("Bad date {:?} at {}:{}", date_field, path.display(), row))?;

        let value_field = record.get(1).unwrap_or("").trim();
        let energy_kwh = if value_field.is_empty() {
            None
        } else {
            Some(value_field.parse::<f64>().with_context(|| {
                format!("Bad energy value {:?} at {}:{}", value_field, path.display(), row)
            })?)
        };

        series.set_daily_energy(date, energy_kwh);
    }

    Ok(series)
}
