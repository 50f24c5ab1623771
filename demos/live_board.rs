use chrono::Utc;
use tokio::time::sleep;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use matchfeed::{
    league_options, visible_matches, CountdownStyle, FeedClient, FeedConfig, MatchFilter,
    MatchStatus, MemoryCooldownStore, SportFilter, Ticker,
};

#[tokio::main]
async fn main() -> matchfeed::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "matchfeed=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = FeedClient::with_config(FeedConfig::from_env()?);
    let store = MemoryCooldownStore::global();

    if let Some(alert) = client.next_alert(store, Utc::now()).await {
        println!("ALERT: {}", alert.daily_message);
    }
    if let Some(update) = client.check_for_update(store, Utc::now()).await {
        println!(
            "Update {} available: {} (closes in {:?})",
            update.version,
            update.url,
            update.auto_dismiss()
        );
    }

    let matches = client.get_matches().await?;
    println!("Leagues: {:?}", league_options(&matches, SportFilter::All));

    let now = Utc::now();
    let board = visible_matches(&matches, &MatchFilter::default(), now);
    for (position, m) in board.iter().enumerate() {
        let status = m.status(now);
        let countdown = m.countdown(now, CountdownStyle::List).unwrap_or_default();
        println!(
            "{:>3} [{status:>8}] {:<40} {:<24} {countdown}",
            position + 1,
            m.title(),
            m.league
        );
    }

    if let Some(live) = board.iter().find(|m| m.status(now) == MatchStatus::Live) {
        let streams = client.get_streams_for(live).await;
        println!("Streams for {}:", live.title());
        for event in &streams.events {
            println!("  {}: {:?}", event.name, event.servers().collect::<Vec<_>>());
        }
    }

    if let Some(next) = board.iter().find(|m| m.status(now) == MatchStatus::Upcoming) {
        println!("Counting down to {}", next.title());
        let _ticker = Ticker::watch_match(next.clone(), CountdownStyle::Detail, |status, countdown| {
            println!("  {status}: {}", countdown.unwrap_or_default());
        });
        sleep(std::time::Duration::from_secs(5)).await;
    }

    match client.get_highlights().await {
        Ok(highlights) => {
            for h in highlights.iter().take(5) {
                println!("{} vs {} ({}) {}", h.team1, h.team2, h.date, h.thumbnail_url());
            }
        }
        Err(e) => println!("{e}"),
    }

    for article in client.get_news().await {
        println!("[{}] {}", article.source, article.title);
    }

    Ok(())
}
