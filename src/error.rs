use reqwest::StatusCode;
use thiserror::Error;

/// Fatal errors raised while fetching fixtures
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A competition request came back with a non-success status
    #[error("HTTP error for league {league}: status {status}")]
    Fetch { league: i64, status: StatusCode },

    /// The body had no `response` array
    #[error("Invalid API response format for league {league}")]
    MalformedResponse { league: i64 },

    /// Every competition was fetched but none produced a valid fixture
    #[error("No fixtures found for the {season} season")]
    NoFixturesFound { season: i32 },

    /// The request never produced a response
    #[error("Request for league {league} failed: {source}")]
    Transport {
        league: i64,
        #[source]
        source: reqwest::Error,
    },
}

impl FixtureError {
    /// League the error relates to, if any
    pub fn league(&self) -> Option<i64> {
        match self {
            FixtureError::Fetch { league, .. }
            | FixtureError::MalformedResponse { league }
            | FixtureError::Transport { league, .. } => Some(*league),
            FixtureError::NoFixturesFound { .. } => None,
        }
    }
}
