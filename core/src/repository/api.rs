use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::debug;

use crate::repository::traits::{EnergyReading, PowerReading, ReadingSource};

pub const DEFAULT_BASE_URL: &str = "https://monitoringapi.solaredge.com";

/// Everything needed to talk to the monitoring API for one site. Passed in
/// explicitly by the caller; the library holds no ambient credentials.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub site_id: String,
    pub api_key: String,
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(site_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Synchronous client for the monitoring API's energy and power endpoints.
///
/// Daily energy comes from `/site/{id}/energy` with `timeUnit=DAY`, interval
/// power from `/site/{id}/power`. Both answer with a list of
/// `{date, value}` pairs where `value` may be null.
pub struct MonitoringApi {
    config: ApiConfig,
    agent: ureq::Agent,
}

#[derive(Deserialize)]
struct EnergyEnvelope {
    energy: ReadingList,
}

#[derive(Deserialize)]
struct PowerEnvelope {
    power: ReadingList,
}

#[derive(Deserialize)]
struct ReadingList {
    values: Vec<WireReading>,
}

#[derive(Deserialize)]
struct WireReading {
    date: String,
    value: Option<f64>,
}

impl MonitoringApi {
    pub fn new(config: ApiConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self { config, agent }
    }

    fn site_url(&self, resource: &str) -> String {
        format!(
            "{}/site/{}/{}",
            self.config.base_url, self.config.site_id, resource
        )
    }
}

impl ReadingSource for MonitoringApi {
    fn daily_energy(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<EnergyReading>> {
        debug!(site = %self.config.site_id, %start_date, %end_date, "requesting daily energy");
        let envelope: EnergyEnvelope = self
            .agent
            .get(&self.site_url("energy"))
            .query("timeUnit", "DAY")
            .query("startDate", &start_date.to_string())
            .query("endDate", &end_date.to_string())
            .query("api_key", &self.config.api_key)
            .call()
            .context("Energy request to monitoring API failed")?
            .into_json()
            .context("Energy response was not the expected JSON shape")?;

        envelope
            .energy
            .values
            .into_iter()
            .map(|reading| {
                Ok(EnergyReading {
                    date: parse_wire_timestamp(&reading.date)?.date(),
                    energy_kwh: reading.value,
                })
            })
            .collect()
    }

    fn interval_power(
        &self,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<Vec<PowerReading>> {
        debug!(site = %self.config.site_id, %start_time, %end_time, "requesting interval power");
        let envelope: PowerEnvelope = self
            .agent
            .get(&self.site_url("power"))
            .query("startTime", &format_wire_timestamp(start_time))
            .query("endTime", &format_wire_timestamp(end_time))
            .query("api_key", &self.config.api_key)
            .call()
            .context("Power request to monitoring API failed")?
            .into_json()
            .context("Power response was not the expected JSON shape")?;

        envelope
            .power
            .values
            .into_iter()
            .map(|reading| {
                let stamp = parse_wire_timestamp(&reading.date)?;
                Ok(PowerReading {
                    date: stamp.date(),
                    time: stamp.time(),
                    power_kw: reading.value,
                })
            })
            .collect()
    }
}

fn format_wire_timestamp(stamp: NaiveDateTime) -> String {
    stamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

// The API reports "2023-06-01 11:15:00" on power rows and sometimes a bare
// date on energy rows.
fn parse_wire_timestamp(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(stamp);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_hms_opt(0, 0, 0).expect("midnight is always valid"))
        .with_context(|| format!("Unrecognized timestamp in API response: {:?}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> MonitoringApi {
        MonitoringApi::new(ApiConfig::new("7157", "secret").with_base_url(server.url()))
    }

    #[test]
    fn test_daily_energy_parses_values_and_nulls() {
        let mut server = mockito::Server::new();
        let body = json!({
            "energy": {
                "values": [
                    {"date": "2023-06-01 00:00:00", "value": 41.25},
                    {"date": "2023-06-02 00:00:00", "value": null},
                    {"date": "2023-06-03", "value": 38.5}
                ]
            }
        });
        let mock = server
            .mock("GET", "/site/7157/energy")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("timeUnit".into(), "DAY".into()),
                Matcher::UrlEncoded("startDate".into(), "2023-06-01".into()),
                Matcher::UrlEncoded("endDate".into(), "2023-06-30".into()),
                Matcher::UrlEncoded("api_key".into(), "secret".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create();

        let client = client_for(&server);
        let readings = client
            .daily_energy(
                NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
            )
            .unwrap();

        mock.assert();
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(readings[0].energy_kwh, Some(41.25));
        assert_eq!(readings[1].energy_kwh, None);
        assert_eq!(readings[2].date, NaiveDate::from_ymd_opt(2023, 6, 3).unwrap());
    }

    #[test]
    fn test_interval_power_splits_date_and_time() {
        let mut server = mockito::Server::new();
        let body = json!({
            "power": {
                "values": [
                    {"date": "2023-06-01 11:15:00", "value": 5.4},
                    {"date": "2023-06-01 11:30:00", "value": null}
                ]
            }
        });
        let mock = server
            .mock("GET", "/site/7157/power")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create();

        let client = client_for(&server);
        let start = NaiveDate::from_ymd_opt(2023, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let readings = client.interval_power(start, end).unwrap();

        mock.assert();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].time, NaiveTime::from_hms_opt(11, 15, 0).unwrap());
        assert_eq!(readings[0].power_kw, Some(5.4));
        assert_eq!(readings[1].power_kw, None);
    }

    #[test]
    fn test_http_error_status_is_a_failure() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/site/7157/energy")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body("{\"String\": \"Invalid token\"}")
            .create();

        let client = client_for(&server);
        let result = client.daily_energy(
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unexpected_body_is_a_failure() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/site/7157/energy")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{\"unexpected\": {}}")
            .create();

        let client = client_for(&server);
        let result = client.daily_energy(
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_timestamp_is_a_failure() {
        let mut server = mockito::Server::new();
        let body = json!({
            "energy": {"values": [{"date": "June 1st", "value": 1.0}]}
        });
        let _mock = server
            .mock("GET", "/site/7157/energy")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body.to_string())
            .create();

        let client = client_for(&server);
        let result = client.daily_energy(
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
        );
        assert!(result.is_err());
    }
}
