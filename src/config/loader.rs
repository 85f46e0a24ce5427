//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading apportionment
//! policy from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::PolicyConfig;

/// The policy file looked up inside a configuration directory.
pub const POLICY_FILE_NAME: &str = "policy.yaml";

/// Loads and provides access to apportionment policy.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── policy.yaml   # Rounding, leave and per-expense defaults
/// ```
///
/// # Example
///
/// ```no_run
/// use split_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Default rounding: {}", loader.policy().rounding.default_rule);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    policy: PolicyConfig,
}

impl ConfigLoader {
    /// Loads the policy from `policy.yaml` in the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `policy.yaml` is missing
    /// - the file contains invalid YAML or mistyped fields
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let policy_path = path.as_ref().join(POLICY_FILE_NAME);
        let path_str = policy_path.display().to_string();

        let content = fs::read_to_string(&policy_path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::parse(&content, &path_str)?;
        debug!(path = %path_str, "Loaded apportionment policy");
        Ok(loader)
    }

    /// Parses a policy from an inline YAML document.
    ///
    /// # Example
    ///
    /// ```
    /// use split_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::from_yaml_str("air_conditioner:\n  min_usage_days: 10\n")?;
    /// assert_eq!(loader.policy().air_conditioner.min_usage_days.to_string(), "10");
    /// # Ok::<(), split_engine::error::EngineError>(())
    /// ```
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, path: &str) -> EngineResult<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let policy = serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { policy })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Consumes the loader, returning the policy.
    pub fn into_policy(self) -> PolicyConfig {
        self.policy
    }
}
