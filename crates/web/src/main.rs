use std::sync::Arc;

use anyhow::Context;
use storage::{Database, PictureStore, ProfileStore};

use web::config::Config;
use web::error::ErrorMode;
use web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting profile API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let pictures = PictureStore::new(config.data_dir.join("pictures"));

    let store = match &config.database_url {
        Some(url) => {
            tracing::info!(
                "Using relational backend at: {}",
                url.split('@').next_back().unwrap_or("unknown")
            );
            let db = Database::new(url)
                .await
                .context("Failed to initialize database")?;

            tracing::info!("Running database migrations");
            db.run_migrations()
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Database migrations completed successfully");

            ProfileStore::postgres(db, pictures)
        }
        None => {
            tracing::info!(
                "Using flat-file backend at: {}",
                config.data_dir.display()
            );
            ProfileStore::flat_file(config.data_dir.join("profiles.json"), pictures)
        }
    };

    let state = AppState {
        store: Arc::new(store),
        errors: ErrorMode::new(!config.production),
    };

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind listener")?;
    axum::serve(listener, web::app(state)).await?;

    Ok(())
}
