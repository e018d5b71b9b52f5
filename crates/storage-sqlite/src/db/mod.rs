//! Database connection management: pooling, migrations, and the single
//! writer actor.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;
use verdant_core::errors::{DatabaseError, Result};

use crate::errors::StorageError;

mod write_actor;

pub use write_actor::{spawn_writer, WriteHandle};

pub type DbPool = Arc<Pool<ConnectionManager<SqliteConnection>>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applied to every pooled connection. WAL keeps readers unblocked while
/// the writer actor holds its transaction.
#[derive(Debug)]
struct ConnectionCustomizer;

impl diesel::r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error>
    for ConnectionCustomizer
{
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA busy_timeout = 5000; \
             PRAGMA journal_mode = WAL; \
             PRAGMA synchronous = NORMAL; \
             PRAGMA foreign_keys = ON;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Creates the database file if needed and applies pending migrations.
pub fn init(db_path: &str) -> Result<()> {
    if !Path::new(db_path).exists() {
        if let Some(dir) = Path::new(db_path).parent() {
            fs::create_dir_all(dir).map_err(|e| {
                DatabaseError::ConnectionFailed(format!(
                    "failed to create database directory: {e}"
                ))
            })?;
        }
    }

    let mut conn = establish_connection(db_path)?;
    run_migrations(&mut conn)?;
    info!("database initialized at {db_path}");
    Ok(())
}

/// Builds the shared r2d2 pool.
pub fn create_pool(db_path: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .max_size(8)
        .connection_customizer(Box::new(ConnectionCustomizer))
        .build(manager)
        .map_err(|e| DatabaseError::PoolCreationFailed(e.to_string()))?;
    Ok(Arc::new(pool))
}

/// Checks out a connection, mapping pool exhaustion to a core error.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    pool.get()
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()).into())
}

/// Applies any pending embedded migrations.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
    Ok(())
}

fn establish_connection(db_path: &str) -> Result<SqliteConnection> {
    use diesel::Connection;
    let mut conn = SqliteConnection::establish(db_path)
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
    conn.batch_execute("PRAGMA foreign_keys = ON;")
        .map_err(StorageError::from)?;
    Ok(conn)
}
