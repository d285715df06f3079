//! Deployment configuration for CaseGuard

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Access configuration, loaded once per process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessConfig {
    /// Upper bound on a single role resolution, in milliseconds
    #[serde(default = "default_resolver_timeout_ms")]
    pub resolver_timeout_ms: u64,

    /// Maximum number of audit entries kept in memory
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,

    /// Permission table override (role -> operation tags).
    /// `None` uses the standard table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<BTreeMap<String, Vec<String>>>,
}

fn default_resolver_timeout_ms() -> u64 {
    3000
}

fn default_audit_capacity() -> usize {
    10000
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            resolver_timeout_ms: default_resolver_timeout_ms(),
            audit_capacity: default_audit_capacity(),
            permissions: None,
        }
    }
}

impl AccessConfig {
    /// Load configuration from a YAML or JSON file, chosen by extension
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()
    }

    /// Render as YAML (used by `caseguard init`)
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Resolution timeout as a `Duration`
    pub fn resolver_timeout(&self) -> Duration {
        Duration::from_millis(self.resolver_timeout_ms)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.resolver_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "resolverTimeoutMs must be greater than zero".to_string(),
            ));
        }
        if self.audit_capacity == 0 {
            return Err(ConfigError::Invalid(
                "auditCapacity must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AccessConfig::default();
        assert_eq!(config.resolver_timeout(), Duration::from_secs(3));
        assert_eq!(config.audit_capacity, 10000);
        assert!(config.permissions.is_none());
    }

    #[test]
    fn test_yaml_parse() {
        let yaml = r#"
resolverTimeoutMs: 1500
permissions:
  chief_of_cyber:
    - approve-final-reports
  admin: []
"#;
        let config = AccessConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.resolver_timeout_ms, 1500);
        assert_eq!(config.audit_capacity, 10000);

        let perms = config.permissions.unwrap();
        assert_eq!(perms["chief_of_cyber"], vec!["approve-final-reports".to_string()]);
        assert!(perms["admin"].is_empty());
    }

    #[test]
    fn test_json_parse() {
        let json = r#"{"resolverTimeoutMs": 250, "auditCapacity": 5}"#;
        let config = AccessConfig::from_json_str(json).unwrap();
        assert_eq!(config.resolver_timeout(), Duration::from_millis(250));
        assert_eq!(config.audit_capacity, 5);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = AccessConfig::from_yaml_str("resolverTimeoutMs: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("caseguard.json");
        let mut f = std::fs::File::create(&json_path).unwrap();
        write!(f, r#"{{"auditCapacity": 42}}"#).unwrap();
        assert_eq!(AccessConfig::from_file(&json_path).unwrap().audit_capacity, 42);

        let yaml_path = dir.path().join("caseguard.yaml");
        std::fs::write(&yaml_path, "auditCapacity: 7\n").unwrap();
        assert_eq!(AccessConfig::from_file(&yaml_path).unwrap().audit_capacity, 7);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AccessConfig::from_file(Path::new("/nonexistent/caseguard.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = AccessConfig::default().to_yaml_string().unwrap();
        assert_eq!(AccessConfig::from_yaml_str(&yaml).unwrap(), AccessConfig::default());
    }
}
