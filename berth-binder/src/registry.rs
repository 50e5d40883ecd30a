//! Driver registry
//!
//! Static table mapping a driver identifier to the parameter names its
//! configuration must carry. Immutable and read-only; safe for
//! unsynchronized concurrent reads.

use berth_core::domain::storage::{BUCKET_PARAM, REGION_PARAM, S3_REPOSITORY_DRIVER};

use crate::error::ResolveError;

/// Required parameters for the S3-compatible driver, in validation order
const S3_REQUIRED_PARAMETERS: &[&str] = &[REGION_PARAM, BUCKET_PARAM];

/// Every driver identifier the registry knows
pub const SUPPORTED_DRIVERS: &[&str] = &[S3_REPOSITORY_DRIVER];

/// Looks up the required parameter names for a driver
///
/// Fails with `ResolveError::UnsupportedDriver` for identifiers outside
/// the registry.
pub fn required_parameters(driver: &str) -> Result<&'static [&'static str], ResolveError> {
    match driver {
        S3_REPOSITORY_DRIVER => Ok(S3_REQUIRED_PARAMETERS),
        _ => Err(ResolveError::UnsupportedDriver {
            driver: driver.to_string(),
            supported: SUPPORTED_DRIVERS.join(", "),
        }),
    }
}

/// Check if a driver identifier is supported
pub fn is_supported(driver: &str) -> bool {
    SUPPORTED_DRIVERS.contains(&driver)
}
