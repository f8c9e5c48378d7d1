//! Repository factory for dependency injection.
//!
//! The process entry point picks a backend here and hands the resulting
//! handle to the issuance orchestrator; nothing below this layer opens
//! its own connection.

use std::sync::Arc;

use super::repositories::LocalRepository;
#[cfg(feature = "sqlite-store")]
use super::repositories::{SqliteRepository, SqliteSettings};
use super::repository::{StoreError, StoreResult, TicketingRepository};

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// SQLite database file (the terminal's store)
    Sqlite,
    /// In-memory repository for tests and local development
    Local,
}

impl RepositoryType {
    /// Parse repository type from string ("sqlite", "local").
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {s}")),
        }
    }

    /// Read `TICKETING_REPOSITORY` from the environment, defaulting to SQLite.
    pub fn from_env() -> Self {
        std::env::var("TICKETING_REPOSITORY")
            .ok()
            .and_then(|s| Self::parse(&s).ok())
            .unwrap_or(Self::Sqlite)
    }
}

/// Factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Backend to create
    /// * `database_path` - Database file path (required for SQLite)
    pub fn create(
        repo_type: RepositoryType,
        database_path: Option<&str>,
    ) -> StoreResult<Arc<dyn TicketingRepository>> {
        match repo_type {
            RepositoryType::Sqlite => {
                #[cfg(feature = "sqlite-store")]
                {
                    let path = database_path.ok_or_else(|| {
                        StoreError::Configuration(
                            "sqlite repository requires a database path".to_string(),
                        )
                    })?;
                    let repo = SqliteRepository::new(SqliteSettings::new(path))?;
                    Ok(Arc::new(repo) as Arc<dyn TicketingRepository>)
                }
                #[cfg(not(feature = "sqlite-store"))]
                {
                    let _ = database_path;
                    Err(StoreError::Configuration(
                        "built without the sqlite-store feature".to_string(),
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create an in-memory repository.
    pub fn create_local() -> Arc<dyn TicketingRepository> {
        Arc::new(LocalRepository::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::TicketRepository;

    #[test]
    fn parses_known_types() {
        assert_eq!(RepositoryType::parse("sqlite"), Ok(RepositoryType::Sqlite));
        assert_eq!(RepositoryType::parse("LOCAL"), Ok(RepositoryType::Local));
        assert!(RepositoryType::parse("azure").is_err());
    }

    #[test]
    fn sqlite_without_path_is_a_configuration_error() {
        let result = RepositoryFactory::create(RepositoryType::Sqlite, None);
        assert!(matches!(result, Err(StoreError::Configuration(_))));
    }

    #[test]
    fn local_factory_yields_a_usable_store() {
        let repo = RepositoryFactory::create(RepositoryType::Local, None).unwrap();
        assert!(repo.list_tickets().unwrap().is_empty());
    }
}
