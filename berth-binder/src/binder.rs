//! Repository binder
//!
//! The reconciliation step invoked once per observed unbound claim:
//! find-or-create the repository matching the claim's identity, validate
//! it, and record the binding on the claim. Safe under concurrent binders:
//! every store race resolves by adopting whatever the winner wrote.

use berth_core::domain::claim::Claim;
use berth_core::domain::repository::Repository;
use berth_store::{ClaimStore, RepositoryStore};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::BindError;
use crate::factory;

/// Binds claims to repository records
pub struct RepositoryBinder {
    claims: Arc<dyn ClaimStore>,
    repositories: Arc<dyn RepositoryStore>,
}

impl RepositoryBinder {
    /// Creates a binder over injected store handles
    pub fn new(claims: Arc<dyn ClaimStore>, repositories: Arc<dyn RepositoryStore>) -> Self {
        Self {
            claims,
            repositories,
        }
    }

    /// Resolves a claim to a repository and records the binding
    ///
    /// Idempotent: replayed notifications for an already-bound claim return
    /// the recorded name without touching the store. Validation failures
    /// leave the claim unbound for inspection; they are not retried here.
    pub async fn bind(&self, claim: &Claim) -> Result<String, BindError> {
        if let Some(bound) = &claim.repository {
            debug!("Claim {} already bound to {}", claim.name, bound);
            return Ok(bound.clone());
        }

        let repository = self.find_or_create_repository(claim).await?;

        // A repository that cannot resolve to a storage configuration must
        // never be recorded on the claim.
        factory::resolve(&repository)?;

        match self
            .claims
            .bind_claim(&claim.namespace, &claim.name, &repository.name)
            .await
        {
            Ok(_) => {
                info!("Claim {} bound to repository {}", claim.name, repository.name);
                Ok(repository.name)
            }
            Err(err) if err.is_conflict() => {
                // A concurrent binder recorded a binding first; its choice
                // wins and ours is discarded.
                let current = self.claims.get_claim(&claim.namespace, &claim.name).await?;
                match current.repository {
                    Some(winner) => {
                        debug!("Claim {} was bound concurrently to {}", claim.name, winner);
                        Ok(winner)
                    }
                    None => Err(BindError::Store(err)),
                }
            }
            Err(err) => Err(BindError::Store(err)),
        }
    }

    /// Locates a repository matching the claim's identity, creating one if
    /// no existing record matches
    async fn find_or_create_repository(&self, claim: &Claim) -> Result<Repository, BindError> {
        let existing = self.repositories.list_repositories().await?;
        if let Some(found) = existing
            .into_iter()
            .find(|repository| repository.matches(&claim.driver, &claim.parameters))
        {
            debug!("Reusing repository {} for claim {}", found.name, claim.name);
            return Ok(found);
        }

        let candidate = Repository::for_claim(claim);
        let name = candidate.name.clone();

        match self.repositories.create_repository(candidate).await {
            Ok(created) => {
                info!("Created repository {} for claim {}", created.name, claim.name);
                Ok(created)
            }
            Err(err) if err.is_already_exists() => {
                // A concurrent binder created the same identity; names are
                // content-derived, so the existing record is our match.
                Ok(self.repositories.get_repository(&name).await?)
            }
            Err(err) => Err(BindError::Store(err)),
        }
    }
}
