//! Cricket and football match feeds for a sports viewer.
//!
//! [`FeedClient`] fetches and normalizes the remote feeds; [`lifecycle`] and
//! [`ordering`] classify and order matches at a given instant.

pub use client::FeedClient;
pub use config::{FeedConfig, NewsConfig, StartZone, FETCH_TIMEOUT};
pub use error::{FeedError, Result};
pub use feed::{map_highlight, map_match, map_match_in, slug_from_details_url};
pub use lifecycle::{classify, countdown, match_end, CountdownStyle, MatchStatus};
pub use model::*;
pub use ordering::{
    compare, league_options, sort_matches, visible_matches, MatchFilter, SportFilter,
};
pub use popup::{CooldownStore, MemoryCooldownStore};
pub use ticker::{Ticker, STATUS_TICK};

mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod lifecycle;
pub mod model;
pub mod ordering;
pub mod popup;
pub mod ticker;
