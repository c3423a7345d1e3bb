pub mod football;

pub use football::{FootballClient, LeagueFixtures, RateLimit};
