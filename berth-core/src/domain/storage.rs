//! Storage driver constants and the resolved storage configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Driver identifier for S3-compatible object storage
pub const S3_REPOSITORY_DRIVER: &str = "s3.repository.berth.dev";

/// Parameter key for the storage region
pub const REGION_PARAM: &str = "region";

/// Parameter key for the bucket name
pub const BUCKET_PARAM: &str = "bucket";

/// Parameter key for the access key id
///
/// Credentials are carried on repository records but never validated as
/// required: deployments relying on ambient credentials omit them.
pub const ACCESS_KEY_ID_PARAM: &str = "accessKeyId";

/// Parameter key for the secret access key
pub const SECRET_ACCESS_KEY_PARAM: &str = "secretAccessKey";

/// Resolved storage configuration
///
/// Produced by the repository factory once a repository record has passed
/// driver-parameter validation. Opaque to the binder; consumed by the
/// storage client constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Driver identifier the configuration was validated against
    pub driver: String,

    /// Full parameter mapping, required and pass-through keys alike
    pub parameters: HashMap<String, String>,
}
