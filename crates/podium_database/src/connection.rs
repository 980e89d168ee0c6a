//! Database connection utilities.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use podium_error::{DatabaseError, DatabaseErrorKind, PodiumResult};

/// Connection pool used by [`crate::PostgresSpeakerRepository`].
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Build a connection pool from the `DATABASE_URL` environment variable.
///
/// A `.env` file in the working directory is loaded first if present.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is not set or the pool cannot connect.
#[tracing::instrument]
pub fn establish_pool() -> PodiumResult<PgPool> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })?;

    let pool = Pool::builder()
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;

    tracing::info!("Established database pool");
    Ok(pool)
}

/// Apply any pending embedded migrations.
///
/// # Errors
///
/// Returns an error if a connection cannot be checked out or a migration fails.
#[tracing::instrument(skip(pool))]
pub fn run_migrations(pool: &PgPool) -> PodiumResult<()> {
    let mut conn = pool
        .get()
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;

    tracing::info!(count = applied.len(), "Applied migrations");
    Ok(())
}
