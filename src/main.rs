use corner_store::{
    api::{self, AppState},
    config::{database, seed, server},
    errors::Result,
};
use dotenvy::dotenv;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 4. Seed sample data into an empty store
    let seed_path = server::get_seed_config_path();
    if let Some(seed_config) = seed::load_seed_if_present(&seed_path)? {
        seed::apply_seed(&db, &seed_config)
            .await
            .inspect_err(|e| error!("Failed to apply seed data: {}", e))?;
    } else {
        info!("No seed file at {}, starting empty", seed_path);
    }

    // 5. Serve the API
    let app = api::router(AppState::new(db)).layer(TraceLayer::new_for_http());
    let address = server::get_bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
