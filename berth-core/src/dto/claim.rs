//! Claim DTOs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request to ensure a storage claim exists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClaim {
    pub driver: String,
    pub parameters: HashMap<String, String>,
    pub accepted_drivers: Vec<String>,
    pub namespace: String,
}
