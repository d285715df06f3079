//! CLI Commands

pub mod dashboard;
pub mod init;
pub mod policy;
pub mod resolve;

pub use dashboard::DashboardCommand;
pub use init::InitCommand;
pub use policy::PolicyCommand;
pub use resolve::ResolveCommand;

use anyhow::{anyhow, Context};
use rbac::PermissionTable;
use serde::Serialize;
use shared::{AccessConfig, Operation, Role};
use std::path::{Path, PathBuf};

/// Configuration file picked up from the working directory when `--config` is absent
pub const CONFIG_FILE: &str = "caseguard.yaml";

/// Flags shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub json: bool,
}

impl GlobalOptions {
    pub fn load_config(&self) -> anyhow::Result<AccessConfig> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None if Path::new(CONFIG_FILE).exists() => PathBuf::from(CONFIG_FILE),
            None => {
                tracing::debug!("no configuration file, using defaults");
                return Ok(AccessConfig::default());
            }
        };

        let config = AccessConfig::from_file(&path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Permission table named by the configuration
    pub fn table(&self) -> anyhow::Result<PermissionTable> {
        let config = self.load_config()?;
        Ok(PermissionTable::from_config(&config)?)
    }
}

/// Parse a role argument; unknown names become zero-permission roles
pub(crate) fn parse_role(raw: &str) -> anyhow::Result<Role> {
    let role = Role::parse(raw).ok_or_else(|| anyhow!("role must not be blank"))?;
    if !role.is_known() {
        tracing::warn!(role = %role, "unrecognized role, it has no permissions");
    }
    Ok(role)
}

pub(crate) fn parse_operation(raw: &str) -> anyhow::Result<Operation> {
    Operation::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = Operation::all().iter().map(|op| op.as_str()).collect();
        anyhow!("unknown operation '{}'. Known operations: {}", raw, known.join(", "))
    })
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
