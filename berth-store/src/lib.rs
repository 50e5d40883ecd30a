//! Berth Store
//!
//! Access layer for the declarative object store that persists claim and
//! repository records and delivers claim-change notifications.
//!
//! This crate provides the store traits every Berth component is injected
//! with, the store error taxonomy, the claim watch surface, and an
//! in-memory reference implementation. There is no process-wide store
//! handle: components receive the trait objects they need explicitly.
//!
//! # Example
//!
//! ```
//! use berth_core::domain::claim::Claim;
//! use berth_core::domain::storage::S3_REPOSITORY_DRIVER;
//! use berth_core::dto::claim::CreateClaim;
//! use berth_store::{ClaimStore, InMemoryStore};
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> berth_store::Result<()> {
//!     let store = InMemoryStore::new();
//!
//!     let claim = Claim::from_request(CreateClaim {
//!         driver: S3_REPOSITORY_DRIVER.to_string(),
//!         parameters: HashMap::from([
//!             ("region".to_string(), "us-west-1".to_string()),
//!             ("bucket".to_string(), "b1".to_string()),
//!         ]),
//!         accepted_drivers: vec![],
//!         namespace: "backup".to_string(),
//!     });
//!
//!     let created = store.create_claim(claim).await?;
//!     println!("Created claim: {}", created.name);
//!     Ok(())
//! }
//! ```

pub mod error;
mod claims;
mod memory;
mod repositories;

// Re-export traits and the watch surface
pub use claims::{ClaimEvent, ClaimStore, ClaimWatch, EventKind};
pub use repositories::RepositoryStore;

// Re-export implementations
pub use memory::InMemoryStore;

pub use error::{Result, StoreError};
