// SPDX-FileCopyrightText: 2026 Geopin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `geopin serve` command implementation.
//!
//! Wires the SQLite record store, Nominatim geocoder, and Telegram channel
//! into the agent loop, and runs it until SIGINT/SIGTERM.

use std::sync::Arc;

use tracing::info;

use geopin_agent::flow::SubmissionFlow;
use geopin_agent::retrieval::RetrievalService;
use geopin_agent::session::SessionMap;
use geopin_agent::{AgentLoop, shutdown};
use geopin_config::GeopinConfig;
use geopin_core::error::GeopinError;
use geopin_core::{ChannelAdapter, Geocoder, MessageSink, RecordStore};
use geopin_geocode::NominatimGeocoder;
use geopin_storage::SqliteRecordStore;
use geopin_telegram::TelegramChannel;

/// Runs the `geopin serve` command.
///
/// Initializes all adapters, enters the main agent loop, and supports
/// graceful shutdown via signal handlers.
pub async fn run_serve(config: GeopinConfig) -> Result<(), GeopinError> {
    // Initialize tracing subscriber.
    init_tracing(&config.agent.log_level);

    info!(agent_name = config.agent.name.as_str(), "starting geopin serve");

    // Storage: open the database and run migrations up front so a broken
    // data dir fails fast, before the bot goes online.
    let store: Arc<dyn RecordStore> = Arc::new(SqliteRecordStore::new(config.storage.clone()));
    store.initialize().await?;

    let geocoder: Arc<dyn Geocoder> = Arc::new(NominatimGeocoder::new(config.geocoder.clone())?);

    let mut channel = TelegramChannel::new(config.telegram.clone(), config.archive.clone())?;
    channel.connect().await?;
    let channel = Arc::new(channel);
    let sink: Arc<dyn MessageSink> = channel.clone();

    let sessions = Arc::new(SessionMap::new());
    let flow = Arc::new(SubmissionFlow::new(
        store.clone(),
        geocoder,
        sink.clone(),
        sessions,
    ));
    let retrieval = Arc::new(RetrievalService::new(
        store.clone(),
        sink,
        config.agent.recent_limit,
    ));

    let cancel = shutdown::install_signal_handler();

    let mut agent = AgentLoop::new(channel as Arc<dyn ChannelAdapter>, flow, retrieval);
    agent.run(cancel).await?;

    store.close().await?;
    info!("geopin stopped");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("geopin={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
