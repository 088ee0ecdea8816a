//! Interactive terminal front-end for the math quiz.

mod adapter;

use std::io;

use anyhow::Context;
use codekids_back::{
    config::AppConfig, dao::stats_store::JsonFileStatsStore, services::quiz_service::QuizService,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = JsonFileStatsStore::new(config.stats_path());
    info!(path = %store.path().display(), "using statistics record");

    let mut service = QuizService::new(store, rand::rng()).context("loading statistics")?;
    adapter::run(&mut service, io::stdin().lock(), io::stdout().lock())
}

/// Log to stderr, quiet by default, so stdout only carries the quiz itself.
fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
