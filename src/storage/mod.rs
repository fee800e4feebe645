//! SeaORM storage backend
//!
//! Read-mostly access to the competition store (teams, users, challenges,
//! solves), supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod query;

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::{AchievementsError, Result};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use query::{
    CategorySolveRow, FirstBloodCountRow, LoneWolfRow, TeamAverageRow, TeamSolveTotalRow,
};

/// Infer the database backend from the connection URL.
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(AchievementsError::database_config(format!(
            "cannot infer database backend from URL: {}. Supported schemes: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(db_config: &DatabaseConfig) -> Result<Self> {
        let database_url = &db_config.database_url;
        if database_url.is_empty() {
            return Err(AchievementsError::database_config(
                "database_url is not set".to_string(),
            ));
        }

        let backend_name = infer_backend_from_url(database_url)?;
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, &backend_name, db_config).await?
        };

        let storage = SeaOrmStorage { db, backend_name };

        run_migrations(&storage.db).await?;

        warn!(
            "{} storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// Wrap an already-established connection (used by tests).
    pub fn from_connection(db: DatabaseConnection, backend_name: &str) -> Self {
        SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        }
    }

    pub fn get_backend_name(&self) -> &str {
        &self.backend_name
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_sqlite_from_url_and_suffix() {
        assert_eq!(
            infer_backend_from_url("sqlite://data/a.db").unwrap(),
            "sqlite"
        );
        assert_eq!(infer_backend_from_url("solves.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url(":memory:").unwrap(), "sqlite");
    }

    #[test]
    fn infers_server_backends() {
        assert_eq!(
            infer_backend_from_url("mysql://root@localhost/ctf").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("mariadb://root@localhost/ctf").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgres://ctf@localhost/ctf").unwrap(),
            "postgres"
        );
    }

    #[test]
    fn rejects_unknown_scheme() {
        assert!(infer_backend_from_url("redis://localhost").is_err());
    }
}
