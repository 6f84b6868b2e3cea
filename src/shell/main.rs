// Bootstrap binary. It applies the schema to the configured database, wires the services once
// against it to surface configuration errors early, then exits. The crate has no network
// surface; embedders build their own `AppState` the same way.

use anyhow::Context;
use std::sync::Arc;
use time_approvals::modules::members::adapters::outbound::members_sqlite::SqliteMemberDirectory;
use time_approvals::shared::infrastructure::database::Database;
use time_approvals::shared::infrastructure::intent_outbox::tracing_outbox::TracingDomainOutbox;
use time_approvals::shell::config::AppConfig;
use time_approvals::shell::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let db = Database::connect(&config.database_url, config.database_max_connections)
        .await
        .with_context(|| format!("connecting to {}", config.database_url))?;
    db.migrate().await.context("applying schema")?;

    let directory = Arc::new(SqliteMemberDirectory::new(db.pool().clone()));
    let state = AppState::new(
        db.clone(),
        directory,
        Arc::new(TracingDomainOutbox),
        &config.notification_topic,
    );
    tracing::info!(
        database_url = %config.database_url,
        topic = %config.notification_topic,
        "schema applied and services wired; exiting"
    );

    drop(state);
    db.close().await;
    Ok(())
}
