//! Claim requester
//!
//! The synchronous entry point used by backup callers. Ensures a claim
//! exists for the requested driver and parameters, then blocks until a
//! reconciler records the binding, returning the bound repository's name.
//! There is no timeout beyond the caller's cancellation token.

use berth_core::domain::claim::Claim;
use berth_core::dto::claim::CreateClaim;
use berth_store::{ClaimStore, StoreError};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::RequestError;

/// Blocking claim entry point
pub struct ClaimRequester {
    claims: Arc<dyn ClaimStore>,
}

impl ClaimRequester {
    /// Creates a requester over an injected claim store handle
    pub fn new(claims: Arc<dyn ClaimStore>) -> Self {
        Self { claims }
    }

    /// Requests a repository for the given driver and parameters
    ///
    /// Ensure-claim semantics: if a claim for this storage already exists it
    /// is adopted rather than duplicated. Cancellation fails the wait with
    /// `RequestError::Cancelled` but leaves the submitted claim in place
    /// for a later retry.
    pub async fn request(
        &self,
        cancel: &CancellationToken,
        req: CreateClaim,
    ) -> Result<String, RequestError> {
        // Subscribe before creating the claim so the bind notification
        // cannot slip past between create and watch.
        let mut watch = self.claims.watch_claims(&req.namespace).await?;

        let pending = Claim::from_request(req);
        let claim = match self.claims.create_claim(pending.clone()).await {
            Ok(created) => {
                info!(
                    "Claim {} submitted in namespace {}",
                    created.name, created.namespace
                );
                created
            }
            Err(err) if err.is_already_exists() => {
                debug!("Claim {} already exists, adopting it", pending.name);
                self.claims
                    .get_claim(&pending.namespace, &pending.name)
                    .await?
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(repository) = claim.repository {
            return Ok(repository);
        }

        if cancel.is_cancelled() {
            return Err(RequestError::Cancelled);
        }

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(RequestError::Cancelled);
                }
                event = watch.next() => {
                    let Some(event) = event else {
                        return Err(RequestError::Store(StoreError::WatchClosed));
                    };

                    if event.claim.name != claim.name {
                        continue;
                    }

                    if let Some(repository) = event.claim.repository {
                        debug!("Claim {} bound to repository {}", claim.name, repository);
                        return Ok(repository);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::RepositoryBinder;
    use crate::watcher::ClaimWatcher;
    use berth_core::domain::storage::S3_REPOSITORY_DRIVER;
    use berth_store::{InMemoryStore, RepositoryStore};
    use std::collections::HashMap;
    use std::time::Duration;

    fn s3_request(bucket: &str) -> CreateClaim {
        CreateClaim {
            driver: S3_REPOSITORY_DRIVER.to_string(),
            parameters: HashMap::from([
                ("region".to_string(), "us-west-1".to_string()),
                ("bucket".to_string(), bucket.to_string()),
            ]),
            accepted_drivers: vec![S3_REPOSITORY_DRIVER.to_string()],
            namespace: "backup".to_string(),
        }
    }

    fn spawn_watcher(
        store: &Arc<InMemoryStore>,
        cancel: &CancellationToken,
    ) -> tokio::task::JoinHandle<anyhow::Result<()>> {
        let binder = RepositoryBinder::new(store.clone(), store.clone());
        let watcher = ClaimWatcher::new(store.clone(), binder, "backup".to_string());
        let loop_cancel = cancel.clone();
        tokio::spawn(async move { watcher.run(loop_cancel).await })
    }

    #[tokio::test]
    async fn test_request_returns_bound_repository() {
        let store = Arc::new(InMemoryStore::new());
        let cancel = CancellationToken::new();
        let watcher = spawn_watcher(&store, &cancel);

        let requester = ClaimRequester::new(store.clone());
        let repository = requester.request(&cancel, s3_request("b1")).await.unwrap();

        assert!(store.get_repository(&repository).await.is_ok());

        cancel.cancel();
        watcher.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_identical_requests_share_a_repository() {
        let store = Arc::new(InMemoryStore::new());
        let cancel = CancellationToken::new();
        let watcher = spawn_watcher(&store, &cancel);

        let requester = ClaimRequester::new(store.clone());
        let first = requester.request(&cancel, s3_request("b1")).await.unwrap();
        let second = requester.request(&cancel, s3_request("b1")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.list_repositories().await.unwrap().len(), 1);

        cancel.cancel();
        watcher.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_a_repository() {
        let store = Arc::new(InMemoryStore::new());
        let cancel = CancellationToken::new();
        let watcher = spawn_watcher(&store, &cancel);

        let left = ClaimRequester::new(store.clone());
        let right = ClaimRequester::new(store.clone());

        let (a, b) = tokio::join!(
            left.request(&cancel, s3_request("b1")),
            right.request(&cancel, s3_request("b1"))
        );

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(store.list_repositories().await.unwrap().len(), 1);

        cancel.cancel();
        watcher.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_request_leaves_pending_claim() {
        let store = Arc::new(InMemoryStore::new());

        // A claim for this storage is already pending; no watcher runs, so
        // it stays unbound.
        let existing = store
            .create_claim(Claim::from_request(s3_request("b1")))
            .await
            .unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();

        let requester = ClaimRequester::new(store.clone());
        let err = requester.request(&cancel, s3_request("b1")).await.unwrap_err();
        assert!(matches!(err, RequestError::Cancelled));

        // The pending claim was adopted, not duplicated, and is untouched.
        let claim = store.get_claim("backup", &existing.name).await.unwrap();
        assert!(claim.repository.is_none());
    }

    #[tokio::test]
    async fn test_cancellation_mid_wait() {
        let store = Arc::new(InMemoryStore::new());
        let cancel = CancellationToken::new();

        let requester = ClaimRequester::new(store.clone());
        let waiting_cancel = cancel.clone();
        let request = tokio::spawn(async move {
            requester.request(&waiting_cancel, s3_request("b1")).await
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();

        let err = request.await.unwrap().unwrap_err();
        assert!(matches!(err, RequestError::Cancelled));
    }

    #[tokio::test]
    async fn test_request_for_already_bound_claim_returns_immediately() {
        let store = Arc::new(InMemoryStore::new());

        let existing = store
            .create_claim(Claim::from_request(s3_request("b1")))
            .await
            .unwrap();
        store
            .bind_claim("backup", &existing.name, "repo-bound")
            .await
            .unwrap();

        // No watcher is running; the bound fast path must answer alone.
        let cancel = CancellationToken::new();
        let requester = ClaimRequester::new(store.clone());
        let repository = requester.request(&cancel, s3_request("b1")).await.unwrap();

        assert_eq!(repository, "repo-bound");
    }
}
