//! Repository factory
//!
//! Pure validation turning a declarative repository record into a concrete
//! storage configuration. Checks the driver against the registry first,
//! then each required parameter in the driver's declared order, failing on
//! the first gap. No side effects.

use berth_core::domain::repository::Repository;
use berth_core::domain::storage::StorageConfig;

use crate::error::ResolveError;
use crate::registry;

/// Resolves a repository record into a usable storage configuration
///
/// The returned configuration carries the driver identifier and the full
/// parameter mapping, pass-through credential keys included; it is opaque
/// to the binder and consumed by the storage client constructor.
pub fn resolve(repository: &Repository) -> Result<StorageConfig, ResolveError> {
    let required = registry::required_parameters(&repository.driver)?;

    for &param in required {
        let present = repository
            .parameters
            .get(param)
            .is_some_and(|value| !value.is_empty());

        if !present {
            return Err(ResolveError::MissingParameter {
                driver: repository.driver.clone(),
                param,
            });
        }
    }

    Ok(StorageConfig {
        driver: repository.driver.clone(),
        parameters: repository.parameters.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use berth_core::domain::claim::Claim;
    use berth_core::domain::storage::{
        ACCESS_KEY_ID_PARAM, S3_REPOSITORY_DRIVER, SECRET_ACCESS_KEY_PARAM,
    };
    use berth_core::dto::claim::CreateClaim;

    fn repository(driver: &str, entries: &[(&str, &str)]) -> Repository {
        Repository::for_claim(&Claim::from_request(CreateClaim {
            driver: driver.to_string(),
            parameters: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            accepted_drivers: vec![],
            namespace: "backup".to_string(),
        }))
    }

    #[test]
    fn test_resolve_returns_driver_and_parameters() {
        let repository = repository(
            S3_REPOSITORY_DRIVER,
            &[
                ("region", "us-west-1"),
                ("bucket", "b1"),
                (ACCESS_KEY_ID_PARAM, "AKIA"),
                (SECRET_ACCESS_KEY_PARAM, "secret"),
            ],
        );

        let config = resolve(&repository).unwrap();
        assert_eq!(config.driver, S3_REPOSITORY_DRIVER);
        assert_eq!(config.parameters, repository.parameters);
    }

    #[test]
    fn test_resolve_rejects_unsupported_driver() {
        let repository = repository("unsupported-driver", &[]);

        let err = resolve(&repository).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Unsupported repository driver type: unsupported-driver. Only support {}.",
                S3_REPOSITORY_DRIVER
            )
        );
    }

    #[test]
    fn test_resolve_reports_region_first_when_both_missing() {
        let repository = repository(S3_REPOSITORY_DRIVER, &[]);

        let err = resolve(&repository).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Missing region param for repository driver {}",
                S3_REPOSITORY_DRIVER
            )
        );
    }

    #[test]
    fn test_resolve_reports_missing_bucket() {
        let repository = repository(S3_REPOSITORY_DRIVER, &[("region", "us-west-1")]);

        let err = resolve(&repository).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Missing bucket param for repository driver {}",
                S3_REPOSITORY_DRIVER
            )
        );
    }

    #[test]
    fn test_resolve_treats_empty_value_as_missing() {
        let repository = repository(
            S3_REPOSITORY_DRIVER,
            &[("region", ""), ("bucket", "b1")],
        );

        let err = resolve(&repository).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MissingParameter { param: "region", .. }
        ));
    }

    #[test]
    fn test_resolve_does_not_require_credentials() {
        let repository = repository(
            S3_REPOSITORY_DRIVER,
            &[("region", "us-west-1"), ("bucket", "b1")],
        );

        // Credentials are pass-through; their absence is not a validation gap.
        assert!(resolve(&repository).is_ok());
    }
}
