//! Claim store access
//!
//! Operations against the declarative object store for claim records:
//! - Creating claims
//! - Reading claims
//! - Recording the claim-to-repository binding
//! - Watching claim changes in a namespace

use async_trait::async_trait;
use berth_core::domain::claim::Claim;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::Result;

/// Store trait for claim-record operations
///
/// All mutation is conditional: the store is the single source of truth,
/// and losing a race surfaces as `AlreadyExists` or `Conflict` rather than
/// silently overwriting.
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Creates a claim record
    ///
    /// Fails with `StoreError::AlreadyExists` when a claim with the same
    /// name already exists in the namespace.
    async fn create_claim(&self, claim: Claim) -> Result<Claim>;

    /// Fetches a claim by namespace and name
    async fn get_claim(&self, namespace: &str, name: &str) -> Result<Claim>;

    /// Lists the claims in a namespace
    async fn list_claims(&self, namespace: &str) -> Result<Vec<Claim>>;

    /// Records the claim-to-repository binding
    ///
    /// Conditional patch of the bound-repository field:
    /// - unbound claim: binding is recorded, watchers see a `Modified` event
    /// - already bound to `repository`: no-op, returns the current record
    /// - already bound to a different repository: `StoreError::Conflict`
    ///
    /// Binding is monotonic; no operation clears or rewrites it.
    async fn bind_claim(&self, namespace: &str, name: &str, repository: &str) -> Result<Claim>;

    /// Subscribes to claim events in a namespace
    ///
    /// The returned watch yields an unbounded sequence of events and is not
    /// restartable: once it ends, a fresh subscription must be issued.
    async fn watch_claims(&self, namespace: &str) -> Result<ClaimWatch>;
}

/// Kind of change a claim event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Added,
    Modified,
}

/// A single claim change notification
///
/// Delivery is at-least-once and may reorder across distinct claims;
/// consumers must tolerate replayed events for already-bound claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimEvent {
    pub kind: EventKind,
    pub claim: Claim,
}

/// A live claim watch subscription
///
/// Dropping the watch releases the underlying subscription.
pub struct ClaimWatch {
    rx: mpsc::UnboundedReceiver<ClaimEvent>,
}

impl ClaimWatch {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<ClaimEvent>) -> Self {
        Self { rx }
    }

    /// Receives the next claim event
    ///
    /// Returns `None` once the subscription ends; the watch cannot be
    /// restarted after that.
    pub async fn next(&mut self) -> Option<ClaimEvent> {
        self.rx.recv().await
    }
}
