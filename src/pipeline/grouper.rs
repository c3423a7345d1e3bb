use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context};
use chrono::Datelike;
use serde::Serialize;

use crate::models::FixtureRecord;

/// Calendar month used as a grouping key, independent of display locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl MonthKey {
    pub fn of(fixture: &FixtureRecord) -> Self {
        Self {
            year: fixture.kickoff.year(),
            month: fixture.kickoff.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    /// Accepts "2022-3" as well as "2022-03"
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (year, month) = s
            .split_once('-')
            .with_context(|| format!("month key {s:?} must look like YYYY-M"))?;

        let year = year.trim().parse().context("invalid year in month key")?;
        let month: u32 = month.trim().parse().context("invalid month in month key")?;
        if !(1..=12).contains(&month) {
            bail!("month {} is out of range", month);
        }

        Ok(Self { year, month })
    }
}

/// Fixtures sharing one month key, in the order they were appended
#[derive(Debug, Clone, Serialize)]
pub struct MonthBucket {
    pub key: MonthKey,

    /// "March 2022"
    pub label: String,

    pub fixtures: Vec<FixtureRecord>,
}

/// One competition's fixtures split into month buckets
#[derive(Debug, Clone, Serialize)]
pub struct CompetitionGroup {
    pub id: i64,
    pub name: String,
    pub months: Vec<MonthBucket>,
}

impl CompetitionGroup {
    pub fn month(&self, key: MonthKey) -> Option<&MonthBucket> {
        self.months.iter().find(|bucket| bucket.key == key)
    }

    pub fn fixture_count(&self) -> usize {
        self.months.iter().map(|bucket| bucket.fixtures.len()).sum()
    }
}

/// Competitions in first-appearance order
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct GroupedFixtures {
    competitions: Vec<CompetitionGroup>,
}

impl GroupedFixtures {
    pub fn get(&self, id: i64) -> Option<&CompetitionGroup> {
        self.competitions.iter().find(|group| group.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompetitionGroup> {
        self.competitions.iter()
    }

    pub fn len(&self) -> usize {
        self.competitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitions.is_empty()
    }
}

impl IntoIterator for GroupedFixtures {
    type Item = CompetitionGroup;
    type IntoIter = std::vec::IntoIter<CompetitionGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.competitions.into_iter()
    }
}

fn month_label(fixture: &FixtureRecord) -> String {
    fixture.kickoff.format("%B %Y").to_string()
}

/// Bucket fixtures by calendar month. Months appear in first-seen order and
/// nothing is sorted.
pub fn group_by_month<I>(fixtures: I) -> Vec<MonthBucket>
where
    I: IntoIterator<Item = FixtureRecord>,
{
    let mut buckets: Vec<MonthBucket> = Vec::new();

    for fixture in fixtures {
        let key = MonthKey::of(&fixture);

        match buckets.iter_mut().find(|bucket| bucket.key == key) {
            Some(bucket) => bucket.fixtures.push(fixture),
            None => buckets.push(MonthBucket {
                key,
                label: month_label(&fixture),
                fixtures: vec![fixture],
            }),
        }
    }

    buckets
}

/// Partition by competition id, then by month within each competition
pub fn group_by_competition<I>(fixtures: I) -> GroupedFixtures
where
    I: IntoIterator<Item = FixtureRecord>,
{
    let mut partitions: Vec<(i64, String, Vec<FixtureRecord>)> = Vec::new();

    for fixture in fixtures {
        let id = fixture.competition.id;
        match partitions.iter_mut().find(|(pid, _, _)| *pid == id) {
            Some((_, _, members)) => members.push(fixture),
            None => partitions.push((id, fixture.competition.name.clone(), vec![fixture])),
        }
    }

    GroupedFixtures {
        competitions: partitions
            .into_iter()
            .map(|(id, name, members)| CompetitionGroup {
                id,
                name,
                months: group_by_month(members),
            })
            .collect(),
    }
}

/// Fixtures of a single competition, order preserved
pub fn fixtures_for_competition(fixtures: &[FixtureRecord], id: i64) -> Vec<FixtureRecord> {
    fixtures
        .iter()
        .filter(|fixture| fixture.competition.id == id)
        .cloned()
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{CompetitionRef, FullTimeScore, MatchStatus, TeamSide};
    use chrono::DateTime;

    pub(crate) fn record(league: i64, kickoff: &str, home: &str, away: &str) -> FixtureRecord {
        let side = |name: &str| TeamSide {
            id: None,
            name: name.to_string(),
            logo: None,
        };

        FixtureRecord {
            id: None,
            competition: CompetitionRef {
                id: league,
                name: format!("League {}", league),
            },
            kickoff: DateTime::parse_from_rfc3339(kickoff).unwrap(),
            status: MatchStatus {
                long: "Not Started".to_string(),
                short: Some("NS".to_string()),
                elapsed: None,
            },
            home: side(home),
            away: side(away),
            full_time: FullTimeScore::default(),
        }
    }

    #[test]
    fn test_month_key_display_and_parse() {
        let fixture = record(39, "2022-03-01T20:00:00+00:00", "A", "B");
        let key = MonthKey::of(&fixture);

        assert_eq!(key.to_string(), "2022-3");
        assert_eq!("2022-03".parse::<MonthKey>().unwrap(), key);
        assert_eq!("2022-3".parse::<MonthKey>().unwrap(), key);
        assert!("2022-13".parse::<MonthKey>().is_err());
        assert!("March".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_month_key_uses_reported_offset() {
        let fixture = record(39, "2022-04-01T00:30:00+02:00", "A", "B");
        assert_eq!(MonthKey::of(&fixture), MonthKey { year: 2022, month: 4 });
    }

    #[test]
    fn test_bucket_keeps_input_order() {
        let fixtures = vec![
            record(39, "2022-03-20T15:00:00+00:00", "f1", "x"),
            record(39, "2022-03-02T15:00:00+00:00", "f2", "x"),
            record(39, "2022-03-11T15:00:00+00:00", "f3", "x"),
        ];

        let buckets = group_by_month(fixtures);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "March 2022");
        let homes: Vec<&str> = buckets[0].fixtures.iter().map(|f| f.home.name.as_str()).collect();
        assert_eq!(homes, vec!["f1", "f2", "f3"]);
    }

    #[test]
    fn test_months_in_first_seen_order() {
        let fixtures = vec![
            record(39, "2022-05-01T15:00:00+00:00", "a", "b"),
            record(39, "2022-03-01T15:00:00+00:00", "c", "d"),
            record(39, "2022-05-08T15:00:00+00:00", "e", "f"),
        ];

        let keys: Vec<String> = group_by_month(fixtures)
            .iter()
            .map(|bucket| bucket.key.to_string())
            .collect();
        assert_eq!(keys, vec!["2022-5", "2022-3"]);
    }

    #[test]
    fn test_two_months_one_competition() {
        let fixtures = vec![
            record(39, "2022-03-01T19:45:00+00:00", "Burnley", "Leicester"),
            record(39, "2022-04-15T19:00:00+00:00", "Southampton", "Arsenal"),
        ];

        let grouped = group_by_competition(fixtures);

        assert_eq!(grouped.len(), 1);
        let league = grouped.get(39).unwrap();
        assert_eq!(league.months.len(), 2);
        assert!(league.months.iter().all(|bucket| bucket.fixtures.len() == 1));
        assert_eq!(league.month(MonthKey { year: 2022, month: 4 }).unwrap().label, "April 2022");
    }

    #[test]
    fn test_competitions_hold_only_their_fixtures() {
        let fixtures = vec![
            record(140, "2022-08-12T19:00:00+00:00", "Osasuna", "Sevilla"),
            record(39, "2022-08-05T19:00:00+00:00", "Crystal Palace", "Arsenal"),
            record(140, "2022-09-03T14:00:00+00:00", "Elche", "Real Sociedad"),
            record(78, "2022-08-05T18:30:00+00:00", "Frankfurt", "Bayern"),
        ];

        let grouped = group_by_competition(fixtures.clone());

        let ids: Vec<i64> = grouped.iter().map(|group| group.id).collect();
        assert_eq!(ids, vec![140, 39, 78]);
        for group in grouped.iter() {
            assert!(group
                .months
                .iter()
                .flat_map(|bucket| bucket.fixtures.iter())
                .all(|f| f.competition.id == group.id));
        }
        assert_eq!(grouped.get(140).unwrap().fixture_count(), 2);
        assert_eq!(grouped.get(140).unwrap().name, "League 140");
        assert!(grouped.get(61).is_none());

        let laliga = fixtures_for_competition(&fixtures, 140);
        assert_eq!(laliga.len(), 2);
        assert_eq!(laliga[1].home.name, "Elche");
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_month(Vec::new()).is_empty());
        assert!(group_by_competition(Vec::new()).is_empty());
    }
}
