//! Ergast API client
//!
//! Fetches motorsport data from an Ergast-compatible JSON API and extracts
//! the payloads the dashboard consumes. Every fetch returns
//! `Result<Option<Value>, UpstreamError>` so it can be handed to the cache
//! as a producer unchanged.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

/// User agent sent with every upstream request
const USER_AGENT: &str = "f1-dashboard/1.0";

/// Page size for career queries (Ergast caps unqualified queries at 30 rows)
const RESULT_LIMIT: u32 = 1000;

/// Errors that can occur when fetching upstream data
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport failure, timeout or non-success status
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Field present but not of the expected shape
    #[error("Invalid value in response: {0}")]
    InvalidValue(String),
}

/// Client for the upstream statistics API
#[derive(Debug, Clone)]
pub struct ErgastClient {
    client: Client,
    base_url: String,
}

impl ErgastClient {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `{base}/{path}.json` and decodes the body.
    async fn get_json(&self, path: &str, paged: bool) -> Result<Value, UpstreamError> {
        let mut url = format!("{}/{}.json", self.base_url, path);
        if paged {
            url.push_str(&format!("?limit={}", RESULT_LIMIT));
        }

        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<Value>().await?)
    }

    /// Current season driver list.
    pub async fn current_drivers(&self) -> Result<Option<Value>, UpstreamError> {
        let body = self.get_json("current/drivers", false).await?;
        Ok(Some(pluck(&body, &["MRData", "DriverTable", "Drivers"])?.clone()))
    }

    /// Current season constructor list.
    pub async fn current_constructors(&self) -> Result<Option<Value>, UpstreamError> {
        let body = self.get_json("current/constructors", false).await?;
        Ok(Some(
            pluck(&body, &["MRData", "ConstructorTable", "Constructors"])?.clone(),
        ))
    }

    /// Current driver championship standings.
    pub async fn driver_standings(&self) -> Result<Option<Value>, UpstreamError> {
        let body = self.get_json("current/driverStandings", false).await?;
        Ok(Some(extract_standings(&body, "DriverStandings")?))
    }

    /// Current constructor championship standings.
    pub async fn constructor_standings(&self) -> Result<Option<Value>, UpstreamError> {
        let body = self.get_json("current/constructorStandings", false).await?;
        Ok(Some(extract_standings(&body, "ConstructorStandings")?))
    }

    /// Current season calendar.
    pub async fn current_schedule(&self) -> Result<Option<Value>, UpstreamError> {
        let body = self.get_json("current", false).await?;
        Ok(Some(pluck(&body, &["MRData", "RaceTable", "Races"])?.clone()))
    }

    /// Results of the most recent race, absent before the season opener.
    pub async fn last_race(&self) -> Result<Option<Value>, UpstreamError> {
        let body = self.get_json("current/last/results", false).await?;
        extract_first_race(&body)
    }

    /// Results of one race, absent if the round has not been run.
    pub async fn race_result(&self, season: &str, round: &str) -> Result<Option<Value>, UpstreamError> {
        let body = self
            .get_json(&format!("{}/{}/results", season, round), false)
            .await?;
        extract_first_race(&body)
    }

    /// Career wins, podiums and starts for one driver.
    pub async fn driver_stats(&self, driver_id: &str) -> Result<Option<Value>, UpstreamError> {
        let career = self.career(driver_id).await?;
        Ok(Some(json!({
            "driver_id": driver_id,
            "total_wins": career.wins,
            "total_podiums": career.podiums,
            "total_races": career.races,
        })))
    }

    /// Career statistics, poles included, for every current driver.
    pub async fn all_driver_stats(&self) -> Result<Option<Value>, UpstreamError> {
        let body = self.get_json("current/drivers", false).await?;
        let drivers = pluck(&body, &["MRData", "DriverTable", "Drivers"])?
            .as_array()
            .ok_or_else(|| UpstreamError::InvalidValue("Drivers".into()))?;

        let mut all_stats = Vec::with_capacity(drivers.len());
        for driver in drivers {
            let driver_id = driver
                .get("driverId")
                .and_then(Value::as_str)
                .ok_or_else(|| UpstreamError::MissingField("driverId".into()))?;
            let given = driver.get("givenName").and_then(Value::as_str).unwrap_or("");
            let family = driver.get("familyName").and_then(Value::as_str).unwrap_or("");

            let career = self.career(driver_id).await?;
            let poles = self
                .get_json(&format!("drivers/{}/qualifying/1", driver_id), true)
                .await?;

            all_stats.push(json!({
                "driver_id": driver_id,
                "name": format!("{} {}", given, family).trim(),
                "total_wins": career.wins,
                "total_podiums": career.podiums,
                "total_races": career.races,
                "total_poles": total(&poles)?,
            }));
        }

        Ok(Some(Value::Array(all_stats)))
    }

    async fn career(&self, driver_id: &str) -> Result<Career, UpstreamError> {
        let wins = self
            .get_json(&format!("drivers/{}/results/1", driver_id), true)
            .await?;
        let all = self
            .get_json(&format!("drivers/{}/results", driver_id), true)
            .await?;
        let races = pluck(&all, &["MRData", "RaceTable", "Races"])?;

        Ok(Career {
            wins: total(&wins)?,
            podiums: count_podiums(races),
            races: races.as_array().map_or(0, Vec::len) as u64,
        })
    }
}

/// Career aggregates for one driver
struct Career {
    wins: u64,
    podiums: u64,
    races: u64,
}

// == Extraction Helpers ==

/// Walks `path` through nested objects.
fn pluck<'a>(body: &'a Value, path: &[&str]) -> Result<&'a Value, UpstreamError> {
    path.iter().try_fold(body, |node, field| {
        node.get(field)
            .ok_or_else(|| UpstreamError::MissingField(path.join(".")))
    })
}

/// Reads `MRData.total`, which Ergast encodes as a decimal string.
fn total(body: &Value) -> Result<u64, UpstreamError> {
    let raw = pluck(body, &["MRData", "total"])?;
    match raw {
        Value::String(s) => s
            .parse()
            .map_err(|_| UpstreamError::InvalidValue(format!("MRData.total = {:?}", s))),
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| UpstreamError::InvalidValue(format!("MRData.total = {}", n))),
        other => Err(UpstreamError::InvalidValue(format!("MRData.total = {}", other))),
    }
}

/// First standings list's `field` array, or `[]` when no list exists yet.
pub fn extract_standings(body: &Value, field: &str) -> Result<Value, UpstreamError> {
    let lists = pluck(body, &["MRData", "StandingsTable", "StandingsLists"])?;
    match lists.as_array().and_then(|lists| lists.first()) {
        Some(first) => first
            .get(field)
            .cloned()
            .ok_or_else(|| UpstreamError::MissingField(format!("StandingsLists[0].{}", field))),
        None => Ok(Value::Array(Vec::new())),
    }
}

/// First race of `MRData.RaceTable.Races`, if any.
pub fn extract_first_race(body: &Value) -> Result<Option<Value>, UpstreamError> {
    let races = pluck(body, &["MRData", "RaceTable", "Races"])?;
    Ok(races.as_array().and_then(|races| races.first()).cloned())
}

/// Counts results finishing in the top three across a `Races` array.
pub fn count_podiums(races: &Value) -> u64 {
    races
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|race| race.get("Results").and_then(Value::as_array))
        .flatten()
        .filter(|result| {
            let position = match result.get("position") {
                Some(Value::String(s)) => s.parse::<u64>().ok(),
                Some(Value::Number(n)) => n.as_u64(),
                _ => None,
            };
            matches!(position, Some(1..=3))
        })
        .count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn race_table(races: Value) -> Value {
        json!({ "MRData": { "total": "2", "RaceTable": { "Races": races } } })
    }

    #[test]
    fn test_pluck_missing_field_names_path() {
        let body = json!({ "MRData": {} });
        let err = pluck(&body, &["MRData", "DriverTable", "Drivers"]).unwrap_err();
        assert!(matches!(err, UpstreamError::MissingField(ref p) if p == "MRData.DriverTable.Drivers"));
    }

    #[test]
    fn test_extract_standings_first_list() {
        let body = json!({ "MRData": { "StandingsTable": { "StandingsLists": [
            { "DriverStandings": [{ "position": "1" }] },
            { "DriverStandings": [{ "position": "99" }] }
        ]}}});
        assert_eq!(
            extract_standings(&body, "DriverStandings").unwrap(),
            json!([{ "position": "1" }])
        );
    }

    #[test]
    fn test_extract_standings_empty_season() {
        let body = json!({ "MRData": { "StandingsTable": { "StandingsLists": [] } } });
        assert_eq!(extract_standings(&body, "ConstructorStandings").unwrap(), json!([]));
    }

    #[test]
    fn test_extract_first_race() {
        let body = race_table(json!([{ "round": "24" }, { "round": "23" }]));
        assert_eq!(extract_first_race(&body).unwrap(), Some(json!({ "round": "24" })));

        let empty = race_table(json!([]));
        assert_eq!(extract_first_race(&empty).unwrap(), None);

        assert!(extract_first_race(&json!({})).is_err());
    }

    #[test]
    fn test_count_podiums() {
        let races = json!([
            { "Results": [{ "position": "1" }] },
            { "Results": [{ "position": "3" }] },
            { "Results": [{ "position": "4" }] },
            { "Results": [{ "position": 2 }] },
            { "Results": [{ "position": "R" }] },
            { "round": "no results" }
        ]);
        assert_eq!(count_podiums(&races), 3);
        assert_eq!(count_podiums(&json!(null)), 0);
    }

    #[test]
    fn test_total_parses_string_and_number() {
        assert_eq!(total(&json!({ "MRData": { "total": "67" } })).unwrap(), 67);
        assert_eq!(total(&json!({ "MRData": { "total": 5 } })).unwrap(), 5);
        assert!(total(&json!({ "MRData": { "total": "lots" } })).is_err());
        assert!(total(&json!({ "MRData": {} })).is_err());
    }

    #[test]
    fn test_client_trims_base_url() {
        let client = ErgastClient::new("http://localhost:1/api/f1/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1/api/f1");
    }
}
