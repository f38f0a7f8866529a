use chrono::NaiveDate;
use solstat_core::{PeriodComparison, ProductionReport};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(metric: &str, value: String) -> MetricRow {
    MetricRow {
        metric: metric.to_string(),
        value,
    }
}

fn on_date(value: f64, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!("{:.2} on {}", value, date),
        None => format!("{:.2}", value),
    }
}

pub fn print_report(report: &ProductionReport) {
    println!("production report for {}", report.name);
    let rows = vec![
        row(
            "Total production (kWh)",
            format!("{:.2}", report.total_production),
        ),
        row(
            "Max daily production (kWh)",
            on_date(report.max_daily_production, report.max_daily_production_date),
        ),
        row("Max power (kW)", on_date(report.max_power, report.max_power_date)),
        row(
            "Average production (kWh)",
            format!("{:.2}", report.average_production),
        ),
        row(
            "Average cloudiness",
            format!("{:.2}%", report.cloudiness_percent()),
        ),
    ];
    println!("{}", Table::new(rows).with(Style::rounded()));
}

pub fn print_comparison(comparison: &PeriodComparison) {
    println!(
        "comparing {} with {}",
        comparison.baseline_name, comparison.other_name
    );
    println!(
        "total production for {} is {}",
        comparison.other_name,
        comparison.total_production.describe()
    );
    println!(
        "max power for {} is {}",
        comparison.other_name,
        comparison.max_power.describe()
    );
    println!(
        "max daily production for {} is {}",
        comparison.other_name,
        comparison.max_daily_production.describe()
    );
}
