use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

#[derive(Clone)]
pub struct PropertyStore {
    pool: SqlitePool,
}

impl PropertyStore {
    /// Open (and create if missing) the database behind `database_url`.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // A private in-memory database exists per connection, so a second
        // pooled connection would see no schema.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;

        Ok(store)
    }

    /// Run the embedded schema. Statements are executed one at a time
    /// since sqlx does not take multi-statement queries.
    async fn init_schema(&self) -> Result<()> {
        let schema = include_str!("../../../schema.sql");

        for statement in schema.split(';') {
            let stmt = statement.trim();
            if !stmt.is_empty() {
                sqlx::query(stmt).execute(&self.pool).await?;
            }
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_and_applies_schema() {
        let store = PropertyStore::new("sqlite::memory:").await.unwrap();
        assert!(store.pool().acquire().await.is_ok());

        // Schema ran: the calculations table answers a count.
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM calculations")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
