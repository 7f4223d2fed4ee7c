use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wall_db::client::{DbClient, DbError};
use wall_db::listener::ChangeFeed;
use wall_storage::client::{StorageClient, StorageError};
use wall_storage::config::StorageConfig;

mod backend;
mod draft;
mod feed;
mod tui;
mod ui;

use backend::LiveBackend;
use feed::FeedView;

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error opening log file: {0}")]
    LogFile(std::io::Error),
    #[error("Error connecting to database: {0}")]
    DatabaseConnect(sqlx::Error),
    #[error(transparent)]
    Database(#[from] DbError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Tui(#[from] tui::TuiError),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    database_url: String,
    /// Display name put on every message this instance posts.
    author_name: String,
    s3_bucket: String,
    s3_public_base_url: String,
}

fn install_tracing() -> Result<(), InitError> {
    // The TUI owns the terminal, so logs go to a file.
    let log_file = std::fs::File::create("wall.log").map_err(InitError::LogFile)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wall_app=debug,wall_db=debug,wall_storage=debug,sqlx=warn".into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing()?;
    let env = get_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&env.database_url)
        .await
        .map_err(InitError::DatabaseConnect)?;

    let db_client = DbClient::new(pool.clone());
    db_client.run_migrations().await?;

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let storage_client = StorageClient::new(
        &sdk_config,
        StorageConfig {
            bucket: env.s3_bucket,
            public_base_url: env.s3_public_base_url,
        },
    );
    storage_client.health_check().await?;

    let changes = ChangeFeed::connect(&pool).await?;
    let backend = Arc::new(LiveBackend::new(db_client, storage_client));
    let view = FeedView::new(env.author_name);

    tui::run(view, backend, changes).await?;

    Ok(())
}
