//! Repository store access
//!
//! Operations against the declarative object store for repository records.
//! Repository records are immutable once created; there is no patch surface.

use async_trait::async_trait;
use berth_core::domain::repository::Repository;

use crate::error::Result;

/// Store trait for repository-record operations
#[async_trait]
pub trait RepositoryStore: Send + Sync {
    /// Creates a repository record
    ///
    /// Fails with `StoreError::AlreadyExists` when a repository with the
    /// same name already exists; since names derive from the (driver,
    /// parameters) identity, this is how concurrent creates of the same
    /// identity surface.
    async fn create_repository(&self, repository: Repository) -> Result<Repository>;

    /// Fetches a repository by name
    async fn get_repository(&self, name: &str) -> Result<Repository>;

    /// Lists all repository records
    async fn list_repositories(&self) -> Result<Vec<Repository>>;
}
