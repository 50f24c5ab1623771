use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Duration given to matches whose record has no positive duration.
pub const DEFAULT_DURATION_HOURS: f64 = 1.5;

/// The sports carried by the match feeds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum Sport {
    Cricket,
    Football,
}

impl Sport {
    /// League text used when a record carries none.
    pub fn default_league(self) -> &'static str {
        match self {
            Sport::Cricket => "Cricket Tournament",
            Sport::Football => "Football League",
        }
    }
}

/// One scheduled fixture, rebuilt wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub team1: String,
    pub team2: String,
    pub team1_logo: String,
    pub team2_logo: String,
    pub league: String,
    pub category: String,
    pub sport: Sport,
    pub start: DateTime<Utc>,
    /// Always positive; see [`DEFAULT_DURATION_HOURS`].
    pub duration_hours: f64,
    pub details_url: String,
    pub venue: String,
    pub match_id: Option<u64>,
    pub stadium: Option<String>,
    pub referee: Option<String>,
    pub home_lineup: Option<Vec<String>>,
    pub away_lineup: Option<Vec<String>>,
}

impl Match {
    /// Feeds carry no stable id, so list views key a match by teams and position.
    pub fn list_key(&self, position: usize) -> String {
        format!("{}-{}-{position}", self.team1, self.team2)
    }

    pub fn title(&self) -> String {
        format!("{} vs {}", self.team1, self.team2)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixture(team1: &str, team2: &str) -> Match {
        Match {
            team1: team1.to_string(),
            team2: team2.to_string(),
            team1_logo: String::new(),
            team2_logo: String::new(),
            league: "Premier League".to_string(),
            category: "Football".to_string(),
            sport: Sport::Football,
            start: Utc.with_ymd_and_hms(2026, 4, 10, 19, 45, 0).unwrap(),
            duration_hours: DEFAULT_DURATION_HOURS,
            details_url: "#".to_string(),
            venue: "Anfield".to_string(),
            match_id: None,
            stadium: None,
            referee: None,
            home_lineup: None,
            away_lineup: None,
        }
    }

    #[test]
    fn list_key_separates_repeated_fixtures_by_position() {
        let m = fixture("Liverpool", "Everton");
        assert_eq!(m.list_key(0), "Liverpool-Everton-0");
        assert_ne!(m.list_key(0), m.list_key(3));
        assert_eq!(m.title(), "Liverpool vs Everton");
    }

    #[test]
    fn sport_round_trips_through_text() {
        assert_eq!(Sport::Cricket.to_string(), "Cricket");
        assert_eq!("Football".parse::<Sport>().unwrap(), Sport::Football);
    }
}
