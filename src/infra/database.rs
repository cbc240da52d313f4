//! For interacting with the database.

use super::config::DatabaseConfig;
use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Sqlite, SqlitePool, Transaction,
};
use std::str::FromStr;

/// A common transaction type.
/// Use this for the business and persistence layer.
pub type Tx = Transaction<'static, Sqlite>;

/// A common database pool type.
pub type DbPool = SqlitePool;

/// Connects to the database based on some configuration.
///
/// The pool is lazy, so this only fails on a malformed url.
pub fn init_db(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
    let db = SqlitePoolOptions::new()
        .acquire_timeout(config.acquire_timeout)
        .max_connections(config.max_connections)
        .connect_lazy_with(options);
    Ok(db)
}

/// Creates a private in-memory database with the schema applied.
///
/// The pool holds a single connection that is never recycled,
/// since the data lives only as long as that connection.
pub async fn init_memory_db() -> Result<DbPool, MigrateError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let db = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    migrate(&db).await?;
    Ok(db)
}

/// Applies the embedded migrations.
#[tracing::instrument(skip(db))]
pub async fn migrate(db: &DbPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(db).await?;
    tracing::info!("Database is up to date");
    Ok(())
}
