use serde::Serialize;

/// A league tracked by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Competition {
    /// API-Football league id
    pub id: i64,

    /// Display name
    pub name: &'static str,

    /// Logo image URL
    pub logo: &'static str,
}

/// The five leagues the board covers, in display order
pub const COMPETITIONS: [Competition; 5] = [
    Competition {
        id: 39,
        name: "Premier League",
        logo: "https://media.api-sports.io/football/leagues/39.png",
    },
    Competition {
        id: 140,
        name: "La Liga",
        logo: "https://media.api-sports.io/football/leagues/140.png",
    },
    Competition {
        id: 78,
        name: "Bundesliga",
        logo: "https://media.api-sports.io/football/leagues/78.png",
    },
    Competition {
        id: 135,
        name: "Serie A",
        logo: "https://media.api-sports.io/football/leagues/135.png",
    },
    Competition {
        id: 61,
        name: "Ligue 1",
        logo: "https://media.api-sports.io/football/leagues/61.png",
    },
];

impl Competition {
    pub fn find(id: i64) -> Option<&'static Competition> {
        COMPETITIONS.iter().find(|c| c.id == id)
    }

    pub fn ids() -> Vec<i64> {
        COMPETITIONS.iter().map(|c| c.id).collect()
    }
}
