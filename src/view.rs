//! View models handed to whatever renders the board.

use std::fmt::Write as _;

use serde::Serialize;

use crate::models::{Competition, FixtureRecord, COMPETITIONS};
use crate::pipeline::{CompetitionGroup, GroupedFixtures, MonthBucket};
use crate::theme::Theme;

/// Badge colour family for a match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Live,
    Upcoming,
    Finished,
    Other,
}

impl StatusTone {
    pub fn from_status(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "live" => StatusTone::Live,
            "upcoming" => StatusTone::Upcoming,
            "finished" => StatusTone::Finished,
            _ => StatusTone::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureView {
    pub home: String,
    pub away: String,
    /// "Saturday, March 5, 2022, 03:00 PM"
    pub kickoff: String,
    pub status: String,
    /// "2 - 1", or "Not started" before kickoff
    pub score: String,
    pub tone: StatusTone,
}

impl From<&FixtureRecord> for FixtureView {
    fn from(fixture: &FixtureRecord) -> Self {
        let score = match fixture.full_time.home {
            Some(home) => format!(
                "{} - {}",
                home,
                fixture
                    .full_time
                    .away
                    .map(|a| a.to_string())
                    .unwrap_or_default()
            ),
            None => "Not started".to_string(),
        };

        Self {
            home: fixture.home.name.clone(),
            away: fixture.away.name.clone(),
            kickoff: fixture.kickoff.format("%A, %B %-d, %Y, %I:%M %p").to_string(),
            status: fixture.status.long.clone(),
            score,
            tone: StatusTone::from_status(&fixture.status.long),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub key: String,
    pub label: String,
    pub fixtures: Vec<FixtureView>,
}

impl From<&MonthBucket> for MonthView {
    fn from(bucket: &MonthBucket) -> Self {
        Self {
            key: bucket.key.to_string(),
            label: bucket.label.clone(),
            fixtures: bucket.fixtures.iter().map(FixtureView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeagueView {
    pub id: i64,
    pub name: String,
    /// "Premier League Fixtures"
    pub title: String,
    pub logo: Option<&'static str>,
    pub months: Vec<MonthView>,
}

impl From<&CompetitionGroup> for LeagueView {
    fn from(group: &CompetitionGroup) -> Self {
        Self {
            id: group.id,
            name: group.name.clone(),
            title: format!("{} Fixtures", group.name),
            logo: Competition::find(group.id).map(|c| c.logo),
            months: group.months.iter().map(MonthView::from).collect(),
        }
    }
}

/// Entry in the league picker
#[derive(Debug, Clone, Serialize)]
pub struct LeagueButton {
    pub id: i64,
    pub name: &'static str,
    pub logo: &'static str,
}

pub fn league_buttons() -> Vec<LeagueButton> {
    COMPETITIONS
        .iter()
        .map(|c| LeagueButton {
            id: c.id,
            name: c.name,
            logo: c.logo,
        })
        .collect()
}

/// Everything a renderer needs for one page
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub theme: Theme,
    pub season: i32,
    pub leagues: Vec<LeagueView>,
}

impl BoardView {
    pub fn new(grouped: &GroupedFixtures, season: i32, theme: Theme) -> Self {
        Self {
            theme,
            season,
            leagues: grouped.iter().map(LeagueView::from).collect(),
        }
    }

    /// Keep only one month in every league, dropping leagues without it
    pub fn only_month(mut self, key: &str) -> Self {
        for league in &mut self.leagues {
            league.months.retain(|month| month.key == key);
        }
        self.leagues.retain(|league| !league.months.is_empty());
        self
    }

    /// Plain-text rendering for the terminal
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let rule = if self.theme.is_dark() { '━' } else { '─' };

        for league in &self.leagues {
            let _ = writeln!(out, "{}", league.title);
            let _ = writeln!(out, "{}", rule.to_string().repeat(league.title.chars().count()));

            for month in &league.months {
                let _ = writeln!(out, "  {} ({} fixtures)", month.label, month.fixtures.len());
                for fixture in &month.fixtures {
                    let _ = writeln!(out, "    {} vs {}", fixture.home, fixture.away);
                    let _ = writeln!(out, "      Match date: {}", fixture.kickoff);
                    let _ = writeln!(out, "      Status: {}", fixture.status);
                    let _ = writeln!(out, "      Score: {}", fixture.score);
                }
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FullTimeScore;
    use crate::pipeline::grouper::tests::record;
    use crate::pipeline::group_by_competition;

    #[test]
    fn test_fixture_view_formats() {
        let mut fixture = record(39, "2022-03-05T15:00:00+00:00", "Leeds", "Leicester");
        let view = FixtureView::from(&fixture);

        assert_eq!(view.kickoff, "Saturday, March 5, 2022, 03:00 PM");
        assert_eq!(view.score, "Not started");
        assert_eq!(view.status, "Not Started");

        fixture.full_time = FullTimeScore::new(2, 1);
        fixture.status.long = "Match Finished".to_string();
        let view = FixtureView::from(&fixture);
        assert_eq!(view.score, "2 - 1");
    }

    #[test]
    fn test_status_tone() {
        assert_eq!(StatusTone::from_status("LIVE"), StatusTone::Live);
        assert_eq!(StatusTone::from_status("Upcoming"), StatusTone::Upcoming);
        assert_eq!(StatusTone::from_status("finished"), StatusTone::Finished);
        assert_eq!(StatusTone::from_status("Match Finished"), StatusTone::Other);
    }

    #[test]
    fn test_board_view() {
        let grouped = group_by_competition(vec![
            record(39, "2022-03-01T19:45:00+00:00", "Burnley", "Leicester"),
            record(39, "2022-04-15T19:00:00+00:00", "Southampton", "Arsenal"),
            record(61, "2022-04-16T19:00:00+00:00", "Lyon", "Nice"),
        ]);

        let board = BoardView::new(&grouped, 2022, Theme::Light);
        assert_eq!(board.leagues.len(), 2);
        assert_eq!(board.leagues[0].title, "League 39 Fixtures");
        assert_eq!(
            board.leagues[0].logo,
            Some("https://media.api-sports.io/football/leagues/39.png")
        );

        let text = board.render_text();
        assert!(text.contains("March 2022 (1 fixtures)"));
        assert!(text.contains("Southampton vs Arsenal"));

        let april = board.only_month("2022-4");
        assert_eq!(april.leagues.len(), 2);
        assert!(april.leagues.iter().all(|l| l.months.len() == 1));

        let march = BoardView::new(&grouped, 2022, Theme::Dark).only_month("2022-3");
        assert_eq!(march.leagues.len(), 1);
        assert_eq!(march.leagues[0].id, 39);
    }

    #[test]
    fn test_league_buttons_follow_table() {
        let names: Vec<&str> = league_buttons().iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            vec!["Premier League", "La Liga", "Bundesliga", "Serie A", "Ligue 1"]
        );
    }
}
