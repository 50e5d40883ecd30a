//! Claim watcher
//!
//! Long-lived subscription to claim events in a namespace. Each new,
//! unbound claim is handed to the repository binder synchronously; a failed
//! bind is logged and the loop moves on to the next notification. The loop
//! runs until the cancellation token fires or the subscription ends.

use anyhow::{Context, Result};
use berth_core::domain::claim::Claim;
use berth_store::{ClaimEvent, ClaimStore, EventKind};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::binder::RepositoryBinder;

/// Dispatch loop binding the claims of one namespace
pub struct ClaimWatcher {
    claims: Arc<dyn ClaimStore>,
    binder: RepositoryBinder,
    namespace: String,
}

impl ClaimWatcher {
    /// Creates a watcher for a namespace
    pub fn new(claims: Arc<dyn ClaimStore>, binder: RepositoryBinder, namespace: String) -> Self {
        Self {
            claims,
            binder,
            namespace,
        }
    }

    /// Runs the subscription loop until cancellation
    ///
    /// Dropping out of this function releases the watch; a restarted
    /// watcher must issue a fresh subscription.
    pub async fn run(&self, cancel: CancellationToken) -> Result<()> {
        let mut watch = self
            .claims
            .watch_claims(&self.namespace)
            .await
            .context("Failed to subscribe to claim events")?;

        info!("Watching claims in namespace {}", self.namespace);

        // Claims filed before this subscription existed never produce an
        // event; sweep the current state once, then rely on the watch.
        // A claim landing between subscribe and list shows up in both and
        // the second pass is a no-op.
        let pending = self
            .claims
            .list_claims(&self.namespace)
            .await
            .context("Failed to list existing claims")?;
        for claim in pending {
            if !claim.is_bound() {
                self.reconcile(claim).await;
            }
        }

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Claim watcher stopping");
                    return Ok(());
                }
                event = watch.next() => {
                    match event {
                        Some(event) => self.handle_event(event).await,
                        None => {
                            warn!("Claim watch ended; a fresh subscription is required");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Processes a single claim notification
    async fn handle_event(&self, event: ClaimEvent) {
        if event.kind != EventKind::Added {
            return;
        }

        let claim = event.claim;
        if claim.is_bound() {
            debug!("Skipping already-bound claim {}", claim.name);
            return;
        }

        debug!("Claim added: {}/{}", claim.namespace, claim.name);
        self.reconcile(claim).await;
    }

    /// Dispatches one claim to the binder
    ///
    /// Bind failures are reported and swallowed here so one bad claim
    /// cannot take the subscription down with it.
    async fn reconcile(&self, claim: Claim) {
        match self.binder.bind(&claim).await {
            Ok(repository) => {
                debug!("Claim {} resolved to repository {}", claim.name, repository);
            }
            Err(e) => {
                error!("Failed to bind claim {}: {}", claim.name, e);
            }
        }
    }
}
