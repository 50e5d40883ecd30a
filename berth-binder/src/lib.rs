//! Berth Binder
//!
//! The claim-to-repository binding protocol for backup storage.
//!
//! Callers file a claim naming a storage driver and its parameters; the
//! reconciler resolves each claim to a reusable repository record, creating
//! one when no matching record exists, and records the binding exactly once.
//! Coordination happens only through the store's conditional create/patch
//! semantics: there is no in-process lock spanning a binding decision, and
//! losing a race always means adopting the winner's result.
//!
//! Components:
//! - Registry: static driver-to-required-parameters table
//! - Factory: validation of a repository record into a [`StorageConfig`]
//! - Binder: find-or-create repository resolution per claim
//! - Watcher: claim event loop that dispatches the binder
//! - Requester: blocking entry point used by backup callers
//!
//! [`StorageConfig`]: berth_core::domain::storage::StorageConfig

pub mod binder;
pub mod config;
pub mod error;
pub mod factory;
pub mod registry;
pub mod requester;
pub mod watcher;
