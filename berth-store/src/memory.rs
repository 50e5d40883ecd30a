//! In-memory object store
//!
//! Reference implementation of the store traits backed by process-local
//! maps with watch fan-out. Used by the single-process daemon and by tests;
//! a networked declarative store implements the same traits at this seam.

use async_trait::async_trait;
use berth_core::domain::claim::Claim;
use berth_core::domain::repository::Repository;
use std::collections::HashMap;
use tokio::sync::{RwLock, mpsc};
use tracing::debug;

use crate::claims::{ClaimEvent, ClaimStore, ClaimWatch, EventKind};
use crate::error::{Result, StoreError};
use crate::repositories::RepositoryStore;

/// Process-local store with per-namespace watch subscriptions
pub struct InMemoryStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    /// Claims keyed by (namespace, name)
    claims: HashMap<(String, String), Claim>,
    repositories: HashMap<String, Repository>,
    watchers: Vec<Subscription>,
}

struct Subscription {
    namespace: String,
    tx: mpsc::UnboundedSender<ClaimEvent>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// Delivers an event to live subscriptions for the claim's namespace
    ///
    /// Subscriptions whose receiver side was dropped are pruned here.
    fn notify(&mut self, kind: EventKind, claim: &Claim) {
        let event = ClaimEvent {
            kind,
            claim: claim.clone(),
        };

        self.watchers.retain(|subscription| {
            if subscription.namespace != claim.namespace {
                return true;
            }
            subscription.tx.send(event.clone()).is_ok()
        });
    }
}

#[async_trait]
impl ClaimStore for InMemoryStore {
    async fn create_claim(&self, claim: Claim) -> Result<Claim> {
        let mut state = self.state.write().await;

        let key = (claim.namespace.clone(), claim.name.clone());
        if state.claims.contains_key(&key) {
            return Err(StoreError::AlreadyExists(claim.name));
        }

        debug!("Claim created: {}/{}", claim.namespace, claim.name);

        state.claims.insert(key, claim.clone());
        state.notify(EventKind::Added, &claim);

        Ok(claim)
    }

    async fn get_claim(&self, namespace: &str, name: &str) -> Result<Claim> {
        let state = self.state.read().await;

        state
            .claims
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn list_claims(&self, namespace: &str) -> Result<Vec<Claim>> {
        let state = self.state.read().await;

        Ok(state
            .claims
            .values()
            .filter(|claim| claim.namespace == namespace)
            .cloned()
            .collect())
    }

    async fn bind_claim(&self, namespace: &str, name: &str, repository: &str) -> Result<Claim> {
        let mut state = self.state.write().await;

        let key = (namespace.to_string(), name.to_string());
        let claim = state
            .claims
            .get_mut(&key)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        match claim.repository.clone() {
            None => {
                claim.repository = Some(repository.to_string());
                let bound = claim.clone();

                debug!("Claim {}/{} bound to {}", namespace, name, repository);

                state.notify(EventKind::Modified, &bound);
                Ok(bound)
            }
            // Replayed bind of the same repository is a no-op.
            Some(current) if current == repository => Ok(claim.clone()),
            Some(current) => Err(StoreError::Conflict(format!(
                "claim {} already bound to {}",
                name, current
            ))),
        }
    }

    async fn watch_claims(&self, namespace: &str) -> Result<ClaimWatch> {
        let mut state = self.state.write().await;

        let (tx, rx) = mpsc::unbounded_channel();
        state.watchers.push(Subscription {
            namespace: namespace.to_string(),
            tx,
        });

        debug!("Watch subscription opened for namespace {}", namespace);

        Ok(ClaimWatch::new(rx))
    }
}

#[async_trait]
impl RepositoryStore for InMemoryStore {
    async fn create_repository(&self, repository: Repository) -> Result<Repository> {
        let mut state = self.state.write().await;

        if state.repositories.contains_key(&repository.name) {
            return Err(StoreError::AlreadyExists(repository.name));
        }

        debug!("Repository created: {}", repository.name);

        state
            .repositories
            .insert(repository.name.clone(), repository.clone());

        Ok(repository)
    }

    async fn get_repository(&self, name: &str) -> Result<Repository> {
        let state = self.state.read().await;

        state
            .repositories
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn list_repositories(&self) -> Result<Vec<Repository>> {
        let state = self.state.read().await;

        Ok(state.repositories.values().cloned().collect())
    }
}
