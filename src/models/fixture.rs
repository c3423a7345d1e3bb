use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A scheduled or played match that passed validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRecord {
    /// API-Football fixture id
    pub id: Option<i64>,

    /// League the match belongs to
    pub competition: CompetitionRef,

    /// Kickoff time with the offset the API reported
    pub kickoff: DateTime<FixedOffset>,

    /// Match status (e.g. "Match Finished")
    pub status: MatchStatus,

    pub home: TeamSide,

    pub away: TeamSide,

    /// Full-time score
    pub full_time: FullTimeScore,
}

/// League reference carried by every fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatus {
    /// Long form, e.g. "Not Started", "Match Finished"
    pub long: String,

    /// Short code, e.g. "NS", "FT"
    pub short: Option<String>,

    /// Minutes played, when in progress
    pub elapsed: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSide {
    pub id: Option<i64>,
    pub name: String,
    pub logo: Option<String>,
}

/// Full-time goals; both `None` until the match has been played
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTimeScore {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

impl FullTimeScore {
    pub fn new(home: u32, away: u32) -> Self {
        Self {
            home: Some(home),
            away: Some(away),
        }
    }

    pub fn is_not_started(&self) -> bool {
        self.home.is_none() && self.away.is_none()
    }
}

impl FixtureRecord {
    /// "Home vs Away"
    pub fn title(&self) -> String {
        format!("{} vs {}", self.home.name, self.away.name)
    }
}
