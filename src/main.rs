use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use spectrum_intake::api;
use spectrum_intake::config::{Settings, APP_VERSION};
use spectrum_intake::db;
use spectrum_intake::state::AppState;

#[tokio::main]
async fn main() {
    let settings = Settings::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.default_log_filter())),
        )
        .init();

    tracing::info!(
        version = APP_VERSION,
        environment = %settings.environment,
        "spectrum-intake starting"
    );

    if let Err(err) = run(settings).await {
        tracing::error!(%err, "fatal error");
        std::process::exit(1);
    }
}

async fn run(settings: Settings) -> Result<(), String> {
    // Open once at startup to apply migrations and seed reference data;
    // request handlers open their own scoped connections.
    let conn = db::open_database(&settings.database_path)
        .map_err(|e| format!("Failed to open database: {e}"))?;
    db::seed::seed_initial_data(&conn).map_err(|e| format!("Failed to seed database: {e}"))?;
    drop(conn);

    let addr = settings.bind_addr;
    let state = Arc::new(AppState::new(settings));
    api::server::serve(addr, state).await
}
