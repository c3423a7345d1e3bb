pub mod competition;
pub mod fixture;

pub use competition::{Competition, COMPETITIONS};
pub use fixture::{CompetitionRef, FixtureRecord, FullTimeScore, MatchStatus, TeamSide};
