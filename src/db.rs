//! Process-wide database pool, set once at startup.

use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

static DB_POOL: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connect the global pool. Call once from `main` before serving traffic.
pub async fn init_db(url: &str) -> anyhow::Result<()> {
    let mut options = ConnectOptions::new(url.to_owned());
    options.sqlx_logging(false);

    let pool = Database::connect(options).await?;
    DB_POOL
        .set(pool)
        .map_err(|_| anyhow::anyhow!("Database pool was already initialized."))?;
    Ok(())
}

pub fn get_db_pool() -> &'static DatabaseConnection {
    DB_POOL.get().expect("Database pool is not initialized.")
}
