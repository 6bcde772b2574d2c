use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::EnvFilter;

use brokerage_server::config::Settings;
use brokerage_server::infrastructure::{driving, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")))
        .init();

    let settings = Settings::load().context("loading configuration")?;

    let options = SqliteConnectOptions::from_str(&settings.database.url)
        .context("parsing database url")?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect_with(options)
        .await
        .context("connecting to database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("running migrations")?;

    tokio::fs::create_dir_all(&settings.storage.upload_dir)
        .await
        .with_context(|| format!("creating upload directory {}", settings.storage.upload_dir))?;

    let address = settings.bind_address();
    let app = driving::router(AppState::new(pool, settings));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {}", address))?;
    tracing::info!("brokerage server listening on {}", address);

    axum::serve(listener, app.into_make_service())
        .await
        .context("error starting server")
}
