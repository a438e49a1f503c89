use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use thiserror::Error;

/// Type alias for the SQLite connection pool
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Type alias for pooled connection
pub type SqlitePooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Embedded migrations creating `stocks`, `stocks_daily` and `stocks_hourly`
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

/// Pool wrapper handed to the repositories
#[derive(Clone)]
pub struct DatabasePool {
    pool: Arc<SqlitePool>,
}

impl DatabasePool {
    /// Get a connection from the pool
    pub fn get_conn(&self) -> Result<SqlitePooledConnection, DatabaseError> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::ConnectionPoolError(e.to_string()))
    }

    /// Run all pending embedded migrations
    ///
    /// The migrations are `CREATE TABLE IF NOT EXISTS`, so this is safe to
    /// call at the start of every run.
    pub fn run_migrations(&self) -> Result<(), DatabaseError> {
        let mut conn = self.get_conn()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
        Ok(())
    }
}

/// Applies the durability pragmas of the candle store to every connection
///
/// WAL journaling plus `synchronous = EXTRA` favors write-safety over raw
/// throughput; `busy_timeout` lets a second process wait instead of failing
/// immediately on a locked database.
#[derive(Debug)]
struct DurabilityCustomizer;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for DurabilityCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(
            "PRAGMA journal_mode = WAL; \
             PRAGMA synchronous = EXTRA; \
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(r2d2::Error::QueryError)
    }
}

/// Establish the SQLite connection pool
///
/// # Arguments
/// * `database_url` - Path of the SQLite database file
/// * `pool_size` - Maximum number of connections (1 keeps the original
///   single-shared-connection behavior)
pub fn establish_connection_pool(
    database_url: &str,
    pool_size: u32,
) -> Result<DatabasePool, DatabaseError> {
    tracing::info!("Opening SQLite database at {}", database_url);

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(pool_size)
        .connection_customizer(Box::new(DurabilityCustomizer))
        .build(manager)
        .map_err(|e| DatabaseError::ConnectionPoolError(e.to_string()))?;

    // Test the connection before handing the pool out
    let _ = pool
        .get()
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    tracing::info!("SQLite pool created with max size: {}", pool_size);

    Ok(DatabasePool {
        pool: Arc::new(pool),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::prelude::*;
    use diesel::sql_types::Text;

    #[derive(QueryableByName)]
    struct PragmaRow {
        #[diesel(sql_type = Text)]
        journal_mode: String,
    }

    #[test]
    fn test_pool_applies_wal_journal_mode() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("pragmas.db");
        let pool = establish_connection_pool(db_path.to_str().unwrap(), 1).unwrap();

        let mut conn = pool.get_conn().unwrap();
        let row: PragmaRow = diesel::sql_query("PRAGMA journal_mode")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(row.journal_mode, "wal");
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("migrate.db");
        let pool = establish_connection_pool(db_path.to_str().unwrap(), 1).unwrap();

        pool.run_migrations().unwrap();
        pool.run_migrations().unwrap();
    }
}
