use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::{FeedConfig, StartZone};
use crate::error::Result;
use crate::feed::{self, number_field, parse_timestamp, string_list_field, text_field};
use crate::model::{Match, Sport, DEFAULT_DURATION_HOURS};

const UNKNOWN_TEAM: &str = "TBC";
const DEFAULT_VENUE: &str = "International Stadium";

/// Fetch both sports concurrently. A failing sport contributes no matches;
/// only a failure of the join itself is an error.
#[instrument(skip_all)]
pub(crate) async fn get_matches(client: &reqwest::Client, config: &FeedConfig) -> Result<Vec<Match>> {
    let fetched_at = Utc::now();

    let cricket = tokio::spawn(fetch_sport(
        client.clone(),
        config.cricket_url.clone(),
        config.clone(),
        Sport::Cricket,
        fetched_at,
    ));
    let football = tokio::spawn(fetch_sport(
        client.clone(),
        config.football_url.clone(),
        config.clone(),
        Sport::Football,
        fetched_at,
    ));

    let (mut matches, football) = tokio::try_join!(cricket, football)?;
    matches.extend(football);

    debug!(count = matches.len(), "aggregated matches");
    Ok(matches)
}

async fn fetch_sport(
    client: reqwest::Client,
    url: String,
    config: FeedConfig,
    sport: Sport,
    fetched_at: DateTime<Utc>,
) -> Vec<Match> {
    match feed::get_json::<Value>(&client, &url, config.timeout).await {
        Ok(payload) => feed::list_items(payload, "matches")
            .iter()
            .map(|raw| map_match_in(raw, sport, fetched_at, config.start_zone))
            .collect(),
        Err(e) => {
            warn!(%sport, error = %e, "match feed failed, continuing without it");
            vec![]
        }
    }
}

/// Build a [`Match`] from one raw feed record, reading offset-less start
/// times in the local zone.
pub fn map_match(raw: &Value, sport: Sport, fetched_at: DateTime<Utc>) -> Match {
    map_match_in(raw, sport, fetched_at, StartZone::Local)
}

/// Build a [`Match`] from one raw feed record.
///
/// Never fails: every missing or malformed field gets its fallback. A start
/// time that is absent or unparseable becomes `fetched_at`; one without an
/// offset is read in `zone`.
pub fn map_match_in(
    raw: &Value,
    sport: Sport,
    fetched_at: DateTime<Utc>,
    zone: StartZone,
) -> Match {
    let team1 = text_field(raw, &["team1"]);
    let team2 = text_field(raw, &["team2"]);

    let team1_logo = text_field(raw, &["team1_logo"])
        .unwrap_or_else(|| avatar_url(team1.as_deref().unwrap_or("T1")));
    let team2_logo = text_field(raw, &["team2_logo"])
        .unwrap_or_else(|| avatar_url(team2.as_deref().unwrap_or("T2")));

    let start = ["start", "start_time"]
        .iter()
        .find_map(|key| raw.get(key).filter(|v| !v.is_null()))
        .map(|value| {
            parse_timestamp(value, zone).unwrap_or_else(|| {
                warn!(%value, "unparseable match start, using fetch time");
                fetched_at
            })
        })
        .unwrap_or(fetched_at);

    let duration_hours = number_field(raw, "duration")
        .filter(|hours| hours.is_finite() && *hours > 0.0)
        .unwrap_or(DEFAULT_DURATION_HOURS);

    let stadium = text_field(raw, &["stadium"]);

    Match {
        team1: team1.unwrap_or_else(|| UNKNOWN_TEAM.to_string()),
        team2: team2.unwrap_or_else(|| UNKNOWN_TEAM.to_string()),
        team1_logo,
        team2_logo,
        league: text_field(raw, &["league"]).unwrap_or_else(|| sport.default_league().to_string()),
        category: text_field(raw, &["category"]).unwrap_or_else(|| sport.to_string()),
        sport,
        start,
        duration_hours,
        details_url: text_field(raw, &["details_url"]).unwrap_or_else(|| "#".to_string()),
        venue: text_field(raw, &["venue"])
            .or_else(|| stadium.clone())
            .unwrap_or_else(|| DEFAULT_VENUE.to_string()),
        match_id: text_field(raw, &["matchId"]).and_then(|id| id.parse().ok()),
        stadium,
        referee: text_field(raw, &["referee"]),
        home_lineup: string_list_field(raw, "home_lineup"),
        away_lineup: string_list_field(raw, "away_lineup"),
    }
}

/// Generated avatar for teams without a logo.
pub(crate) fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        urlencoding::encode(name)
    )
}
