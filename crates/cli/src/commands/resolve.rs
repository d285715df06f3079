//! caseguard resolve command

use super::dashboard::print_view;
use super::{print_json, GlobalOptions};
use anyhow::Context;
use clap::Args;
use console::style;
use directory::InMemoryDirectory;
use rbac::DashboardView;
use resolver::RoleResolution;
use serde::Serialize;
use session::AccessCore;
use shared::{AccessConfig, Operation, UserId};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Directory fixture (JSON) to resolve against
    #[arg(short, long)]
    pub directory: PathBuf,

    /// User id to resolve
    #[arg(short, long)]
    pub user: String,
}

/// Resolution plus what it unlocks
#[derive(Debug, Clone, Serialize)]
pub struct ResolveReport {
    pub resolution: RoleResolution,
    pub dashboard: DashboardView,
    pub permissions: Vec<Operation>,
}

pub async fn resolve_report(
    config: &AccessConfig,
    directory: InMemoryDirectory,
    user_id: UserId,
) -> anyhow::Result<ResolveReport> {
    let core = AccessCore::from_config(config, Arc::new(directory))?;
    let resolution = core.resolve(&user_id).await;
    let context = core.context_for(Some(user_id), resolution.role.clone());

    Ok(ResolveReport {
        dashboard: context.dashboard().clone(),
        permissions: context.permissions().into_iter().collect(),
        resolution,
    })
}

impl ResolveCommand {
    pub async fn run(&self, opts: &GlobalOptions) -> anyhow::Result<()> {
        let config = opts.load_config()?;
        let directory = InMemoryDirectory::load(&self.directory)
            .with_context(|| format!("failed to load directory fixture {}", self.directory.display()))?;

        let report = resolve_report(&config, directory, UserId::new(self.user.as_str())).await?;
        if opts.json {
            return print_json(&report);
        }

        let resolution = &report.resolution;
        println!("User: {}", style(&resolution.user_id).bold());
        match &resolution.role {
            Some(role) => println!(
                "Role: {} (from {})",
                style(role.as_str()).cyan(),
                resolution.source.as_deref().unwrap_or("-")
            ),
            None if resolution.is_timed_out() => {
                println!("Role: {}", style("none (lookup timed out)").red())
            }
            None => println!("Role: {}", style("none").red()),
        }
        if !resolution.failed_sources.is_empty() {
            println!(
                "{} failed sources: {}",
                style("degraded:").yellow(),
                resolution.failed_sources.join(", ")
            );
        }

        print_view(&report.dashboard);
        if !report.permissions.is_empty() {
            println!("Permissions:");
            for op in &report.permissions {
                println!("  - {}", op);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory::DirectoryFixture;
    use rbac::DashboardVariant;
    use resolver::ResolutionStatus;
    use shared::Role;

    const FIXTURE: &str = r#"{
        "profiles": [
            {"userId": "u-1", "fullName": "Ada Park", "role": "exhibit_officer"},
            {"userId": "u-2", "fullName": "Ben Osei", "role": "analyst"}
        ],
        "roleAssignments": [
            {"userId": "u-2", "role": "chief_of_cyber", "createdAt": "2024-01-01T00:00:00Z"},
            {"userId": "u-2", "role": "analyst", "createdAt": "2024-06-01T00:00:00Z"}
        ]
    }"#;

    fn directory() -> InMemoryDirectory {
        let fixture: DirectoryFixture = serde_json::from_str(FIXTURE).unwrap();
        InMemoryDirectory::from_fixture(fixture).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_from_assignments() {
        let report = resolve_report(&AccessConfig::default(), directory(), UserId::new("u-2"))
            .await
            .unwrap();

        assert_eq!(report.resolution.role, Some(Role::ChiefOfCyber));
        assert_eq!(report.resolution.source.as_deref(), Some("role_assignments"));
        assert_eq!(report.dashboard.variant, DashboardVariant::ChiefOfCyber);
        assert_eq!(report.permissions.len(), Operation::all().len());
    }

    #[tokio::test]
    async fn test_resolve_from_profile() {
        let report = resolve_report(&AccessConfig::default(), directory(), UserId::new("u-1"))
            .await
            .unwrap();

        assert_eq!(report.resolution.role, Some(Role::ExhibitOfficer));
        assert_eq!(report.dashboard.variant, DashboardVariant::ExhibitOfficer);
        assert!(report.permissions.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_unknown_user() {
        let report = resolve_report(&AccessConfig::default(), directory(), UserId::new("nobody"))
            .await
            .unwrap();

        assert_eq!(report.resolution.status, ResolutionStatus::NoRole);
        assert_eq!(report.dashboard.variant, DashboardVariant::Default);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["resolution"]["role"].is_null());
        assert_eq!(json["resolution"]["status"], "no_role");
    }

    #[tokio::test]
    async fn test_run_with_fixture_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("directory.json");
        std::fs::write(&path, FIXTURE).unwrap();

        let cmd = ResolveCommand {
            directory: path,
            user: "u-1".to_string(),
        };
        let opts = GlobalOptions {
            config: None,
            json: true,
        };
        assert!(cmd.run(&opts).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_with_missing_fixture() {
        let cmd = ResolveCommand {
            directory: PathBuf::from("/nonexistent/directory.json"),
            user: "u-1".to_string(),
        };
        assert!(cmd.run(&GlobalOptions::default()).await.is_err());
    }
}
