//! Claim domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::repository::{identity_string, name_uuid};
use crate::dto::claim::CreateClaim;

/// A caller's declarative request for a storage repository
///
/// Structure shared between the store (persists) and the binder (resolves).
/// The bound repository name is written exactly once and never cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub name: String,
    pub namespace: String,
    pub driver: String,
    pub parameters: HashMap<String, String>,

    /// Backing drivers the caller is willing to accept
    pub accepted_drivers: Vec<String>,

    /// Name of the bound repository; `None` until resolved
    pub repository: Option<String>,

    pub requested_at: DateTime<Utc>,
}

/// Claim resolution phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimPhase {
    /// Created, no repository bound yet
    Pending,

    /// Repository bound; terminal
    Bound,
}

impl Claim {
    /// Builds the claim record for a request
    ///
    /// The name is derived from (namespace, driver, parameters), so repeated
    /// requests for the same storage converge on a single claim record
    /// instead of piling up duplicates.
    pub fn from_request(req: CreateClaim) -> Self {
        Self {
            name: claim_name(&req.namespace, &req.driver, &req.parameters),
            namespace: req.namespace,
            driver: req.driver,
            parameters: req.parameters,
            accepted_drivers: req.accepted_drivers,
            repository: None,
            requested_at: Utc::now(),
        }
    }

    pub fn phase(&self) -> ClaimPhase {
        if self.repository.is_some() {
            ClaimPhase::Bound
        } else {
            ClaimPhase::Pending
        }
    }

    pub fn is_bound(&self) -> bool {
        self.repository.is_some()
    }
}

impl std::fmt::Display for ClaimPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimPhase::Pending => write!(f, "Pending"),
            ClaimPhase::Bound => write!(f, "Bound"),
        }
    }
}

/// Derives the deterministic name for the claim covering a request
pub fn claim_name(namespace: &str, driver: &str, parameters: &HashMap<String, String>) -> String {
    let seed = format!(
        "berth:claim:{}:{}",
        namespace,
        identity_string(driver, parameters)
    );
    format!("claim-{}", name_uuid(&seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::S3_REPOSITORY_DRIVER;

    fn request(namespace: &str) -> CreateClaim {
        CreateClaim {
            driver: S3_REPOSITORY_DRIVER.to_string(),
            parameters: HashMap::from([
                ("region".to_string(), "us-west-1".to_string()),
                ("bucket".to_string(), "b1".to_string()),
            ]),
            accepted_drivers: vec![S3_REPOSITORY_DRIVER.to_string()],
            namespace: namespace.to_string(),
        }
    }

    #[test]
    fn test_claim_starts_pending() {
        let claim = Claim::from_request(request("backup"));

        assert_eq!(claim.phase(), ClaimPhase::Pending);
        assert!(!claim.is_bound());
        assert!(claim.repository.is_none());
    }

    #[test]
    fn test_claim_name_is_deterministic_per_namespace() {
        let first = Claim::from_request(request("backup"));
        let second = Claim::from_request(request("backup"));
        let other_ns = Claim::from_request(request("staging"));

        assert_eq!(first.name, second.name);
        assert_ne!(first.name, other_ns.name);
    }

    #[test]
    fn test_bound_claim_reports_bound_phase() {
        let mut claim = Claim::from_request(request("backup"));
        claim.repository = Some("repo-1234".to_string());

        assert_eq!(claim.phase(), ClaimPhase::Bound);
        assert!(claim.is_bound());
    }

    #[test]
    fn test_claim_serialization_round_trip() {
        let claim = Claim::from_request(request("backup"));

        let encoded = serde_json::to_string(&claim).unwrap();
        let decoded: Claim = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded.name, claim.name);
        assert_eq!(decoded.driver, claim.driver);
        assert_eq!(decoded.parameters, claim.parameters);
        assert_eq!(decoded.repository, None);
    }
}
