use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use expense_tracker::expense_tracker_config::{
    CorsConfig, DatabaseConfig, JwtConfig, ServerConfig,
};
use expense_tracker::expense_tracker_db::{init_db_pool, migrator};
use expense_tracker::logging::init_tracing;
use expense_tracker::router::init_router;
use expense_tracker::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing()?;

    let jwt_config = JwtConfig::from_env()?;
    let database_config = DatabaseConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;
    let cors_config = CorsConfig::from_env();

    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;

    if database_config.auto_migrate {
        migrator::run_migrations(&pool)
            .await
            .context("Failed to run migrations")?;
        info!("Migrations applied");
    }

    let state = AppState::from_pool(pool, jwt_config, cors_config);
    let app = init_router(state)?;

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server running");
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
