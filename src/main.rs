// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bird Buddy command-line client
//!
//! Logs in with the account from the environment and prints a summary of
//! the account's feeders and bird collections.

use anyhow::Context;
use birdbuddy::{config::Config, time_utils::format_utc_rfc3339, BirdBuddy};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    let email = config
        .email
        .clone()
        .context("BIRDBUDDY_EMAIL and BIRDBUDDY_PASSWORD must be set")?;
    tracing::info!(api_url = %config.api_url, language = %config.language, "Starting Bird Buddy client");

    let client = BirdBuddy::from_config(&config)?;

    let feeders = client.refresh_feeders().await.context("Failed to fetch feeders")?;
    if let Some(user) = client.user().await {
        tracing::info!(email = %email, name = %user.name, "Logged in");
    }
    for feeder in feeders.iter() {
        tracing::info!(
            id = %feeder.id,
            name = %feeder.name,
            role = ?feeder.role(),
            state = ?feeder.state,
            battery = feeder.battery.percentage,
            food = ?feeder.food.state,
            signal = feeder.signal.value,
            firmware_update = feeder.firmware_update_available(),
            "Feeder"
        );
    }

    let collections = client
        .refresh_collections()
        .await
        .context("Failed to fetch collections")?;
    let mut collections: Vec<_> = collections.values().collect();
    collections.sort_by(|a, b| b.visit_last_time.cmp(&a.visit_last_time));
    for collection in collections {
        tracing::info!(
            id = %collection.id,
            species = %collection.bird_name(),
            visits = collection.visits_all_time,
            last_visit = collection.visit_last_time.map(format_utc_rfc3339).as_deref().unwrap_or("-"),
            "Collection"
        );
    }

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("birdbuddy=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
