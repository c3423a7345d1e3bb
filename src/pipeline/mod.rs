pub mod fetcher;
pub mod grouper;

pub use fetcher::FixtureFetcher;
pub use grouper::{
    fixtures_for_competition, group_by_competition, group_by_month, CompetitionGroup,
    GroupedFixtures, MonthBucket, MonthKey,
};
