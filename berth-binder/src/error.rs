//! Error types for the binding subsystem

use berth_store::StoreError;
use thiserror::Error;

/// Errors from driver-parameter validation
///
/// Terminal for the binding attempt that hit them: the claim stays unbound
/// and the caller must resubmit with corrected input. Never retried
/// automatically.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Driver identifier outside the registry
    #[error("Unsupported repository driver type: {driver}. Only support {supported}.")]
    UnsupportedDriver { driver: String, supported: String },

    /// A required parameter is absent or empty for the resolved driver
    #[error("Missing {param} param for repository driver {driver}")]
    MissingParameter { driver: String, param: &'static str },
}

/// Errors from a single binding attempt
#[derive(Debug, Error)]
pub enum BindError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Store failure that is not a benign race
    ///
    /// `AlreadyExists` and `Conflict` are absorbed inside the binder by
    /// re-reading; only genuine store failures surface here.
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),
}

/// Errors surfaced to a blocking claim requester
#[derive(Debug, Error)]
pub enum RequestError {
    /// The caller's cancellation fired while waiting for a binding
    ///
    /// The already-submitted claim is left in place for a later retry.
    #[error("Claim request cancelled before a repository was bound")]
    Cancelled,

    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),
}
