mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use solstat_core::{analyze, compare, ingest_month, read_energy_csv, ApiConfig, MonitoringApi};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "solstat")]
#[command(about = "Monthly solar production statistics and comparisons", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report a month from the monitoring API and compare it against the same
    /// month of other years
    Compare {
        /// Target month (1-12)
        month: u32,
        /// Target year
        year: i32,
        /// Colon separated comparison years, e.g. 2022:2021
        others: String,
        /// Site id on the monitoring API
        #[arg(long, env = "SOLSTAT_SITE_ID")]
        site: String,
        /// API key for the monitoring API
        #[arg(long, env = "SOLSTAT_API_KEY", hide_env_values = true)]
        api_key: String,
    },
    /// Report a single monthly production csv export
    Csv {
        /// Path to the csv export
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            month,
            year,
            others,
            site,
            api_key,
        } => {
            let other_years = parse_years(&others)?;
            println!("comparing {} {} with {:?}", month, year, other_years);

            let api = MonitoringApi::new(ApiConfig::new(site, api_key));
            let target_series = ingest_month(&api, year, month)?;
            let target = analyze(&target_series)?;
            report::print_report(&target);

            for other_year in other_years {
                println!();
                let series = ingest_month(&api, other_year, month)?;
                let baseline = analyze(&series)?;
                report::print_report(&baseline);
                let comparison = compare(&baseline, &target)?;
                report::print_comparison(&comparison);
            }
        }
        Commands::Csv { file } => {
            let series = read_energy_csv(&file)?;
            let analyzed = analyze(&series)?;
            report::print_report(&analyzed);
        }
    }

    Ok(())
}

fn parse_years(raw: &str) -> Result<Vec<i32>> {
    raw.split(':')
        .map(|part| {
            part.trim()
                .parse::<i32>()
                .with_context(|| format!("Invalid year {:?} in comparison list", part))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_years_accepts_colon_separated_list() {
        assert_eq!(parse_years("2022:2021").unwrap(), vec![2022, 2021]);
        assert_eq!(parse_years("2020").unwrap(), vec![2020]);
    }

    #[test]
    fn test_parse_years_rejects_garbage() {
        assert!(parse_years("2020:oops").is_err());
        assert!(parse_years("").is_err());
    }
}
