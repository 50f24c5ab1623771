//! Filtering and ordering of match lists: live first, then upcoming, then ended.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::lifecycle::MatchStatus;
use crate::model::{Match, Sport};

/// Order two matches at `now`.
///
/// Live matches come first (latest start first), then upcoming ones (soonest
/// first), then ended ones (latest start first).
pub fn compare(a: &Match, b: &Match, now: DateTime<Utc>) -> Ordering {
    let (status_a, status_b) = (a.status(now), b.status(now));
    status_a.cmp(&status_b).then_with(|| match status_a {
        MatchStatus::Upcoming => a.start.cmp(&b.start),
        MatchStatus::Live | MatchStatus::Ended => b.start.cmp(&a.start),
    })
}

/// Stable sort by [`compare`].
pub fn sort_matches(matches: &mut [Match], now: DateTime<Utc>) {
    matches.sort_by(|a, b| compare(a, b, now));
}

/// Sport selection on the match list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SportFilter {
    #[default]
    All,
    Only(Sport),
}

impl SportFilter {
    pub fn accepts(self, m: &Match) -> bool {
        match self {
            SportFilter::All => true,
            SportFilter::Only(sport) => m.sport == sport,
        }
    }
}

/// The two-tier filter of the match list: sport, then league within it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilter {
    sport: SportFilter,
    /// `None` means every league.
    league: Option<String>,
}

impl MatchFilter {
    pub fn sport(&self) -> SportFilter {
        self.sport
    }

    pub fn league(&self) -> Option<&str> {
        self.league.as_deref()
    }

    /// Switch sport. The league selection no longer applies and is cleared.
    pub fn set_sport(&mut self, sport: SportFilter) {
        self.sport = sport;
        self.league = None;
    }

    pub fn set_league(&mut self, league: Option<String>) {
        self.league = league;
    }

    pub fn accepts(&self, m: &Match) -> bool {
        self.sport.accepts(m) && self.league.as_ref().is_none_or(|league| &m.league == league)
    }

    /// Matching entries in input order.
    pub fn apply(&self, matches: &[Match]) -> Vec<Match> {
        matches.iter().filter(|m| self.accepts(m)).cloned().collect()
    }
}

/// Sorted, de-duplicated leagues among the matches of `sport`.
pub fn league_options(matches: &[Match], sport: SportFilter) -> Vec<String> {
    matches
        .iter()
        .filter(|m| sport.accepts(m))
        .map(|m| m.league.clone())
        .unique()
        .sorted()
        .collect()
}

/// What a match list shows at `now`: filtered, then ordered.
pub fn visible_matches(matches: &[Match], filter: &MatchFilter, now: DateTime<Utc>) -> Vec<Match> {
    let mut list = filter.apply(matches);
    sort_matches(&mut list, now);
    list
}
