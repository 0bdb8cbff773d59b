//! LevelUp Engine - headless bootstrap.
//!
//! Loads (or seeds) the player record, persists the normalized record and
//! logs a summary. Hosts embed the library; this binary checks the storage
//! path end to end.

use levelup_engine::{infrastructure::config::EngineConfig, App, SaveOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "levelup_engine=debug,levelup_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LevelUp Engine");

    let config = EngineConfig::from_env();
    let app = App::from_config(&config);
    let mut session = app.open_session().await;

    if let SaveOutcome::Deferred(e) = session.flush().await {
        anyhow::bail!("could not persist player record: {e}");
    }

    let record = session.record();
    let open_quests = record.quests().iter().filter(|q| !q.is_done).count();
    let stats = record
        .stats()
        .iter()
        .map(|(stat, value)| format!("{}={}", stat.display_name(), value))
        .collect::<Vec<_>>()
        .join(" ");
    tracing::info!(
        level = %record.level(),
        experience = record.experience(),
        to_next = record.experience_to_next(),
        allocatable_points = record.allocatable_points(),
        %stats,
        skills = record.skills().len(),
        open_quests,
        "Player record ready"
    );

    Ok(())
}
