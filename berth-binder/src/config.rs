//! Binder configuration
//!
//! Defines the configurable parameters for the binding daemon. The
//! reconciliation protocol itself has no tunables; configuration selects
//! which namespace's claims this process serves.

/// Binder configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace whose claims this binder reconciles
    pub namespace: String,
}

impl Config {
    /// Creates a new configuration
    pub fn new(namespace: String) -> Self {
        Self { namespace }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - BERTH_NAMESPACE (required)
    pub fn from_env() -> anyhow::Result<Self> {
        let namespace = std::env::var("BERTH_NAMESPACE")
            .map_err(|_| anyhow::anyhow!("BERTH_NAMESPACE environment variable not set"))?;

        Ok(Self { namespace })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.namespace.is_empty() {
            anyhow::bail!("namespace cannot be empty");
        }

        if self.namespace.contains(char::is_whitespace) {
            anyhow::bail!("namespace cannot contain whitespace");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("backup".to_string())
    }
}
