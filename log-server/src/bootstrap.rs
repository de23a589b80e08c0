use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::inbound::http::{create_router, AppState};
use crate::adapters::infrastructure::log_buffer::{create_log_buffer, LogBuffer};
use crate::adapters::outbound::memory::MemoryLogStore;
use crate::adapters::outbound::persistence::Database;
use crate::application::storage_gateway::StorageGateway;
use crate::config::{Config, StorageBackend};
use crate::logging;
use crate::ports::LogStorage;

pub struct Application {
    pub router: Router,
    pub bind_address: String,
    /// Keeps the file log writer alive
    pub log_guard: Option<WorkerGuard>,
}

pub async fn setup() -> Result<Application> {
    // Determine config directory
    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_string_lossy().into_owned()))
            .unwrap_or_else(|| ".".to_string())
    });
    let config_base = format!("{}/config", config_dir);

    // Logging is not up yet, report config loading on stderr
    let config = match Config::from_file(&config_base) {
        Ok(cfg) => {
            eprintln!("Configuration loaded successfully from {}", config_base);
            cfg
        }
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}, using defaults", e);
            Config::default()
        }
    };

    let log_buffer = create_log_buffer();
    let log_guard = logging::init(&config.logging, log_buffer.clone());

    tracing::info!("Starting Logvault Server...");
    tracing::info!("Server Version: {}", env!("CARGO_PKG_VERSION"));

    if config.logging.enabled {
        tracing::info!(
            "File logging enabled: directory={}, prefix={}, rotation={}",
            config.logging.directory,
            config.logging.file_prefix,
            config.logging.rotation
        );
    }

    let storage = build_storage(&config, log_buffer).await?;
    let router = create_router(build_app_state(&config, StorageGateway::new(storage)));

    let bind_address = config.server_address();
    tracing::info!("Server will listen on: {}", bind_address);

    Ok(Application {
        router,
        bind_address,
        log_guard,
    })
}

/// Create the storage backend selected in config
pub async fn build_storage(config: &Config, log_buffer: LogBuffer) -> Result<Arc<dyn LogStorage>> {
    match config.storage.backend {
        StorageBackend::Sqlite => {
            let database_url =
                std::env::var("DATABASE_URL").unwrap_or_else(|_| config.storage.url.clone());
            let db = Database::new(&database_url)
                .await
                .with_context(|| format!("Failed to open database {}", database_url))?;
            tracing::info!("Database initialized: {}", database_url);
            Ok(Arc::new(db))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory log buffer as storage backend");
            Ok(Arc::new(MemoryLogStore::new(log_buffer)))
        }
    }
}

pub fn build_app_state(config: &Config, storage: StorageGateway) -> AppState {
    let cors_disabled = config.cors.disable;
    if cors_disabled {
        tracing::warn!("CORS is DISABLED in config - all origins will be allowed!");
    } else {
        tracing::info!(
            "API state created with CORS origins: {:?}",
            config.cors.allowed_origins
        );
    }

    AppState {
        storage,
        allowed_origins: config.cors.allowed_origins.clone(),
        cors_disabled,
    }
}
