use std::sync::Arc;

use crate::config::StorageBackend;
use crate::model::{CourseStore, ModelManager};
use crate::uploader::{DiskStorage, ResourceStorage, SimulatedStorage};
use crate::utils::{signal::shutdown_signal, uploads::get_uploads_dir};
use crate::{error::AppResult, web::AppState};
use axum::Router;
use tokio::net::TcpListener;

pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod auth;
pub mod editor;
pub mod error;
pub mod model;
pub mod notify;
pub mod uploader;
pub mod utils;
pub mod web;

static APPLICATION_NAME: &str = "courseware";

pub async fn build_state(config: &Config) -> AppResult<AppState> {
    let store = match config.app().course_file() {
        Some(path) => CourseStore::load(path).await?,
        None => {
            tracing::warn!("no course file configured, starting with an empty course");
            CourseStore::default()
        }
    };

    let uploads_dir = get_uploads_dir(config.uploads().dir())?;
    let storage: Arc<dyn ResourceStorage> = match config.uploads().backend() {
        StorageBackend::Disk => Arc::new(DiskStorage::new(
            uploads_dir.clone(),
            web::routes::STATIC_PREFIX,
        )),
        StorageBackend::Simulated => {
            Arc::new(SimulatedStorage::new(config.uploads().simulated_delay()))
        }
    };
    tracing::debug!("uploads backend: {:?}", config.uploads().backend());

    let state = AppState::new(ModelManager::new(store), storage, config.app().jwt(), uploads_dir)
        .with_docs(config.app().docs())
        .with_max_upload_bytes(config.uploads().max_bytes());
    Ok(state)
}

pub async fn build_server() -> AppResult<(AppState, Router)> {
    let use_local = cfg!(debug_assertions);
    let config = config::Config::get_or_init(use_local).await;

    let state = build_state(config).await?;
    build_server_with_state(state).await
}

pub async fn build_server_with_state(state: AppState) -> AppResult<(AppState, Router)> {
    let app = web::routes::build_app(state.clone());
    Ok((state, app))
}

#[tracing::instrument]
pub async fn setup_workers() -> AppResult<()> {
    let (_, app) = build_server().await?;
    let config = Config::get_or_init(cfg!(debug_assertions)).await;
    let listener = TcpListener::bind(config.host().bindto()).await?;

    tracing::info!("axum is starting at: {}", config.host().bindto());
    let axum_handle = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal());

    axum_handle.await?;
    Ok(())
}

fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}

#[tracing::instrument]
pub async fn run() -> AppResult<()> {
    setup_trace();
    setup_workers().await?;
    Ok(())
}
