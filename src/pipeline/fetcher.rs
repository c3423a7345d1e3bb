use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::api::FootballClient;
use crate::config::Config;
use crate::error::FixtureError;
use crate::models::{Competition, FixtureRecord};

/// Courtesy pause between league requests
pub const REQUEST_DELAY: Duration = Duration::from_millis(1200);

/// Fetches a season of fixtures, one league at a time
pub struct FixtureFetcher {
    client: FootballClient,
    request_delay: Duration,
    trailing_delay: bool,
}

impl FixtureFetcher {
    pub fn new(client: FootballClient) -> Self {
        Self {
            client,
            request_delay: REQUEST_DELAY,
            trailing_delay: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(FootballClient::new(&config.api_url, &config.api_key))
            .with_request_delay(config.request_delay)
            .with_trailing_delay(config.trailing_delay)
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Also pause after the last league
    pub fn with_trailing_delay(mut self, enabled: bool) -> Self {
        self.trailing_delay = enabled;
        self
    }

    pub fn client(&self) -> &FootballClient {
        &self.client
    }

    /// Fetch every league in order and return the valid fixtures in arrival order.
    ///
    /// The first failing league aborts the whole run; later leagues are not
    /// requested. Fails with [`FixtureError::NoFixturesFound`] when no league
    /// produced a valid fixture.
    pub async fn fetch_fixtures(
        &self,
        competitions: &[i64],
        season: i32,
    ) -> Result<Vec<FixtureRecord>, FixtureError> {
        let mut all_fixtures = Vec::new();

        for (index, &league) in competitions.iter().enumerate() {
            info!("Fetching fixtures for league {} ({})", league, season);

            let batch = self.client.fetch_league_fixtures(league, season).await?;

            if batch.rejected > 0 {
                warn!("Found {} invalid fixtures for league {}", batch.rejected, league);
            }

            let name = Competition::find(league)
                .map(|c| c.name)
                .unwrap_or("unknown league");

            if batch.fixtures.is_empty() {
                info!("No valid fixtures found for league {}", league);
            } else {
                info!("Valid fixtures found for {}: {}", name, batch.fixtures.len());
            }

            all_fixtures.extend(batch.fixtures);
            debug!("Current total fixtures: {}", all_fixtures.len());

            if pauses_after(index, competitions.len(), self.trailing_delay) {
                sleep(self.request_delay).await;
            }
        }

        if all_fixtures.is_empty() {
            return Err(FixtureError::NoFixturesFound { season });
        }

        info!("Total fixtures loaded: {}", all_fixtures.len());
        Ok(all_fixtures)
    }
}

fn pauses_after(index: usize, total: usize, trailing_delay: bool) -> bool {
    index + 1 < total || trailing_delay
}
