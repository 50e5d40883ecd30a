//! Repository domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::claim::Claim;

/// A resolved, reusable storage target
///
/// Structure shared between the store (persists) and the binder
/// (creates, matches). Immutable once created: a configuration change
/// requires a new repository record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub driver: String,
    pub parameters: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl Repository {
    /// Builds the repository record backing a claim
    ///
    /// The name is derived from (driver, parameters), so two binders racing
    /// to create the repository for the same identity collide on name in
    /// the store instead of creating twins.
    pub fn for_claim(claim: &Claim) -> Self {
        Self {
            name: repository_name(&claim.driver, &claim.parameters),
            driver: claim.driver.clone(),
            parameters: claim.parameters.clone(),
            created_at: Utc::now(),
        }
    }

    /// Structural identity check over (driver, parameter mapping)
    ///
    /// Two repositories with identical driver and parameters are
    /// functionally interchangeable.
    pub fn matches(&self, driver: &str, parameters: &HashMap<String, String>) -> bool {
        self.driver == driver && self.parameters == *parameters
    }
}

/// Derives the deterministic name for the repository backing an identity
pub fn repository_name(driver: &str, parameters: &HashMap<String, String>) -> String {
    let seed = format!("berth:repository:{}", identity_string(driver, parameters));
    format!("repo-{}", name_uuid(&seed))
}

/// Canonical identity string for a (driver, parameters) pair
///
/// Parameter order is irrelevant; keys are folded in sorted order.
pub(crate) fn identity_string(driver: &str, parameters: &HashMap<String, String>) -> String {
    let mut entries: Vec<_> = parameters.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut identity = String::from(driver);
    for (key, value) in entries {
        identity.push('\n');
        identity.push_str(key);
        identity.push('=');
        identity.push_str(value);
    }
    identity
}

/// Maps a seed string to a stable name-safe UUID
pub(crate) fn name_uuid(seed: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, seed.as_bytes())
}
