//! Database primitives: connection settings, pool construction and
//! classification of constraint violations reported by the database.

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Shared connection pool alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing ({0} is not set)")]
    MissingUrl(String),
    #[error("invalid value for {key}: {value:?}")]
    InvalidSetting { key: &'static str, value: String },
    #[error("failed to connect to database")]
    Connect(#[source] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

const MAX_CONNECTIONS_KEY: &str = "DATABASE_MAX_CONNECTIONS";

/// Environment-driven connection settings.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_url_key")]
    env_key: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub sql_logging: bool,
}

fn default_url_key() -> String {
    "DATABASE_URL".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    8
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            env_key: default_url_key(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
            sql_logging: false,
        }
    }
}

impl DatabaseSettings {
    pub fn new(env_key: impl Into<String>) -> Self {
        Self {
            env_key: env_key.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `DATABASE_MAX_CONNECTIONS` when present.
    pub fn from_env() -> DbResult<Self> {
        let mut settings = Self::default();
        if let Ok(raw) = std::env::var(MAX_CONNECTIONS_KEY) {
            settings.max_connections = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(DbError::InvalidSetting {
                    key: MAX_CONNECTIONS_KEY,
                    value: raw,
                })?;
        }
        Ok(settings)
    }

    pub fn database_url(&self) -> DbResult<String> {
        std::env::var(&self.env_key).map_err(|_| DbError::MissingUrl(self.env_key.clone()))
    }

    pub fn connect_options(&self, url: impl Into<String>) -> ConnectOptions {
        let mut options = ConnectOptions::new(url.into());
        options
            .max_connections(self.max_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .sqlx_logging(self.sql_logging);
        options
    }
}

/// Open a pool using the URL named by `settings`.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    let pool = Database::connect(settings.connect_options(url))
        .await
        .map_err(DbError::Connect)?;
    info!(
        backend = ?pool.get_database_backend(),
        max_connections = settings.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// Round-trip a trivial query; used by health checks.
pub async fn ping(pool: &DbPool) -> bool {
    let backend = pool.get_database_backend();
    match pool
        .execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
    {
        Ok(_) => true,
        Err(err) => {
            warn!(error = %err, "database ping failed");
            false
        }
    }
}

/// Integrity constraint the database refused to violate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    Unique(String),
    ForeignKey(String),
}

/// Classify `err` as a constraint violation, if it is one.
///
/// The database is the only arbiter of uniqueness and referential integrity,
/// so callers map these to conflicts instead of checking beforehand.
pub fn constraint_violation(err: &DbErr) -> Option<Constraint> {
    match err.sql_err()? {
        SqlErr::UniqueConstraintViolation(detail) => Some(Constraint::Unique(detail)),
        SqlErr::ForeignKeyConstraintViolation(detail) => Some(Constraint::ForeignKey(detail)),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}
