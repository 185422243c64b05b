use hm_server::{AppState, Result as ServerErrorResult, ServerError, build_router, logger};

use hm_auth::{HttpIdentityProvider, IdentityProvider, InMemoryIdentityProvider, JwtValidator};
use hm_config::{Config, ConfigError};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

#[tokio::main]
async fn main() -> ServerErrorResult<()> {
    let config = Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        log_file_path(&config)?,
        config.logging.colored,
    )?;
    config.log_summary();

    let db_path = config.database_path()?;
    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("../crates/hm-db/migrations").run(&pool).await?;
    info!("Database ready at {}", db_path.display());

    let identity: Arc<dyn IdentityProvider> = match (
        &config.identity.provider_url,
        &config.identity.secret_key,
    ) {
        (Some(url), Some(key)) => {
            info!("Identity provider: {}", url);
            Arc::new(HttpIdentityProvider::new(
                url,
                key,
                config.identity.provider_timeout_secs,
            )?)
        }
        _ => {
            warn!("Identity provider: in-memory (development only)");
            Arc::new(InMemoryIdentityProvider::new())
        }
    };

    let jwt_validator = if config.auth.enabled {
        let validator = if let Some(secret) = &config.auth.jwt_secret {
            JwtValidator::with_hs256(secret.as_bytes())
        } else if let Some(path) = &config.auth.jwt_public_key_path {
            // Relative to the config directory, as validated at load
            let key_path = Config::config_dir()?.join(path);
            let pem = std::fs::read_to_string(&key_path).map_err(|e| ServerError::JwtKeyFile {
                path: key_path.display().to_string(),
                source: e,
            })?;
            JwtValidator::with_rs256(&pem)?
        } else {
            return Err(ConfigError::auth("auth.enabled requires a JWT key source").into());
        };
        info!("Session validation enabled ({})", validator.algorithm());
        Some(Arc::new(validator))
    } else {
        warn!("Auth disabled: trusting the X-Identity-Id header (development only)");
        None
    };

    let webhook_secret = config
        .identity
        .webhook_secret
        .clone()
        .ok_or_else(|| ConfigError::identity("identity.webhook_secret is required"))?;

    let state = AppState {
        pool,
        identity,
        jwt_validator,
        webhook_secret: webhook_secret.into(),
        admin_email: config.identity.admin_email.clone(),
    };

    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve the log file path under the config directory, creating the
/// log directory when file logging is enabled.
fn log_file_path(config: &Config) -> ServerErrorResult<Option<PathBuf>> {
    let Some(file) = &config.logging.file else {
        return Ok(None);
    };

    let dir = Config::config_dir()?.join(&config.logging.dir);
    std::fs::create_dir_all(&dir)?;
    Ok(Some(dir.join(file)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install shutdown handler: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
