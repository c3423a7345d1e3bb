use chrono::{DateTime, FixedOffset};
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::FixtureError;
use crate::models::{Competition, CompetitionRef, FixtureRecord, FullTimeScore, MatchStatus, TeamSide};

const API_KEY_HEADER: &str = "x-apisports-key";

/// Client for the API-Football v3 REST API
pub struct FootballClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Fixtures returned for one league request
#[derive(Debug, Clone)]
pub struct LeagueFixtures {
    /// Fixtures that passed validation, in response order
    pub fixtures: Vec<FixtureRecord>,

    /// Number of elements dropped by validation
    pub rejected: usize,

    pub rate_limit: RateLimit,
}

/// Rate limit headers sent with every response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: Option<u32>,
    pub limit: Option<u32>,
    pub reset: Option<String>,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let text = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.trim().to_string())
        };

        Self {
            remaining: text("x-ratelimit-remaining").and_then(|v| v.parse().ok()),
            limit: text("x-ratelimit-limit").and_then(|v| v.parse().ok()),
            reset: text("x-ratelimit-reset"),
        }
    }
}

/// Envelope shared by every API-Football endpoint
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: Option<T>,
    #[serde(default)]
    errors: Value,
}

#[derive(Debug, Deserialize)]
struct RawFixture {
    league: Option<RawLeague>,
    fixture: Option<RawFixtureInfo>,
    teams: Option<RawTeams>,
    score: Option<RawScore>,
}

#[derive(Debug, Deserialize)]
struct RawLeague {
    id: Option<i64>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFixtureInfo {
    id: Option<i64>,
    date: DateTime<FixedOffset>,
    status: RawStatus,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    long: String,
    short: Option<String>,
    elapsed: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawTeams {
    home: RawTeam,
    away: RawTeam,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    id: Option<i64>,
    name: String,
    logo: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawScore {
    fulltime: Option<RawGoals>,
}

#[derive(Debug, Deserialize)]
struct RawGoals {
    home: Option<u32>,
    away: Option<u32>,
}

impl FootballClient {
    /// Create a new API-Football client
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Probe the status endpoint; false when the API or the key is unusable
    pub async fn check_status(&self) -> bool {
        let url = format!("{}/status", self.base_url);
        debug!("Checking API status: {}", url);

        let response = match self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Error checking API status: {}", e);
                return false;
            }
        };

        if !response.status().is_success() {
            error!("API status check failed: {}", response.status());
            return false;
        }

        let status: Envelope<Value> = match response.json().await {
            Ok(status) => status,
            Err(e) => {
                error!("Invalid API status response: {}", e);
                return false;
            }
        };

        if has_errors(&status.errors) {
            error!("API status reported errors: {}", status.errors);
            return false;
        }

        match status.response {
            Some(account) if !account.is_null() => {
                info!("API is active and responding");
                debug!("API status response: {}", account);
                true
            }
            _ => {
                error!("API status response has no account information");
                false
            }
        }
    }

    /// Fetch one league's fixtures for a season
    pub async fn fetch_league_fixtures(
        &self,
        league: i64,
        season: i32,
    ) -> Result<LeagueFixtures, FixtureError> {
        let url = format!(
            "{}/fixtures?league={}&season={}",
            self.base_url, league, season
        );

        debug!("Fetching fixtures: {}", url);

        let transport = |source| FixtureError::Transport { league, source };

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FixtureError::Fetch { league, status });
        }

        let rate_limit = RateLimit::from_headers(response.headers());
        debug!(
            "Rate limit for league {}: {:?}/{:?} remaining",
            league, rate_limit.remaining, rate_limit.limit
        );

        let body = response.text().await.map_err(transport)?;

        let envelope: Envelope<Vec<Value>> = serde_json::from_str(&body).map_err(|e| {
            error!("Invalid response data for league {}: {}", league, e);
            FixtureError::MalformedResponse { league }
        })?;

        if has_errors(&envelope.errors) {
            warn!("API reported errors for league {}: {}", league, envelope.errors);
        }

        let elements = envelope.response.ok_or_else(|| {
            error!("Response for league {} has no response field", league);
            FixtureError::MalformedResponse { league }
        })?;

        let total = elements.len();
        let fixtures: Vec<FixtureRecord> = elements.into_iter().filter_map(parse_fixture).collect();

        Ok(LeagueFixtures {
            rejected: total - fixtures.len(),
            fixtures,
            rate_limit,
        })
    }
}

/// `errors` is `[]` when clean and an object of messages otherwise
fn has_errors(errors: &Value) -> bool {
    match errors {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Null => false,
        _ => true,
    }
}

fn parse_fixture(element: Value) -> Option<FixtureRecord> {
    let raw: RawFixture = match serde_json::from_value(element) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("Dropping unparseable fixture: {}", e);
            return None;
        }
    };

    match raw.validate() {
        Ok(record) => Some(record),
        Err(missing) => {
            debug!("Dropping fixture without {}", missing);
            None
        }
    }
}

impl RawFixture {
    /// Convert to a record, naming the first missing block on failure
    fn validate(self) -> Result<FixtureRecord, &'static str> {
        let league = self.league.ok_or("league")?;
        let league_id = league.id.filter(|id| *id != 0).ok_or("league id")?;
        let info = self.fixture.ok_or("fixture")?;
        let teams = self.teams.ok_or("teams")?;
        let score = self.score.ok_or("score")?;

        let league_name = league
            .name
            .or_else(|| Competition::find(league_id).map(|c| c.name.to_string()))
            .unwrap_or_default();

        let full_time = score
            .fulltime
            .map(|goals| FullTimeScore {
                home: goals.home,
                away: goals.away,
            })
            .unwrap_or_default();

        Ok(FixtureRecord {
            id: info.id,
            competition: CompetitionRef {
                id: league_id,
                name: league_name,
            },
            kickoff: info.date,
            status: MatchStatus {
                long: info.status.long,
                short: info.status.short,
                elapsed: info.status.elapsed,
            },
            home: teams.home.into(),
            away: teams.away.into(),
            full_time,
        })
    }
}

impl From<RawTeam> for TeamSide {
    fn from(team: RawTeam) -> Self {
        Self {
            id: team.id,
            name: team.name,
            logo: team.logo,
        }
    }
}
