//! caseguard init command

use super::CONFIG_FILE;
use clap::Args;
use console::style;
use shared::AccessConfig;
use std::path::PathBuf;

/// Sample fixture file name
pub const FIXTURE_FILE: &str = "directory.json";

const SAMPLE_FIXTURE: &str = r#"{
  "profiles": [
    {
      "userId": "u-analyst",
      "fullName": "Dana Reyes",
      "badgeNumber": "FX-1042",
      "department": "Digital Forensics",
      "role": "analyst"
    },
    {
      "userId": "u-exhibits",
      "fullName": "Sam Okafor",
      "badgeNumber": "EX-0311",
      "department": "Exhibit Management",
      "role": "exhibit_officer"
    },
    {
      "userId": "u-oc",
      "fullName": "Priya Nair",
      "department": "Digital Forensics",
      "role": "analyst"
    }
  ],
  "roleAssignments": [
    {
      "userId": "u-oc",
      "role": "officer_commanding_unit",
      "createdAt": "2024-01-15T09:00:00Z"
    },
    {
      "userId": "u-chief",
      "role": "chief_of_cyber",
      "createdAt": "2023-11-02T08:30:00Z"
    },
    {
      "userId": "u-chief",
      "role": "administrator",
      "createdAt": "2024-03-01T10:00:00Z"
    }
  ]
}
"#;

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to initialize
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        println!("Initializing CaseGuard in {:?}", self.directory);
        std::fs::create_dir_all(&self.directory)?;

        let config = AccessConfig::default().to_yaml_string()?;
        let header = "# CaseGuard access configuration\n\
                      # Add a `permissions` map (role -> [operation]) to replace the standard table.\n";
        let files = [
            (CONFIG_FILE, format!("{header}{config}")),
            (FIXTURE_FILE, SAMPLE_FIXTURE.to_string()),
        ];

        // Nothing is written unless every target is free
        if !self.force {
            for (name, _) in &files {
                let path = self.directory.join(name);
                if path.exists() {
                    anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
                }
            }
        }

        for (name, content) in &files {
            let path = self.directory.join(name);
            std::fs::write(&path, content)?;
            println!("  wrote {}", path.display());
        }

        println!("{} CaseGuard initialized", style("✓").green());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory::InMemoryDirectory;

    #[test]
    fn test_init_writes_loadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = InitCommand {
            directory: dir.path().to_path_buf(),
            force: false,
        };
        cmd.run().unwrap();

        let config = AccessConfig::from_file(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, AccessConfig::default());

        let directory = InMemoryDirectory::load(&dir.path().join(FIXTURE_FILE)).unwrap();
        assert_eq!(directory.profile_count().unwrap(), 3);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "auditCapacity: 5\n").unwrap();

        let cmd = InitCommand {
            directory: dir.path().to_path_buf(),
            force: false,
        };
        assert!(cmd.run().is_err());
        let kept = std::fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(kept, "auditCapacity: 5\n");

        let forced = InitCommand {
            directory: dir.path().to_path_buf(),
            force: true,
        };
        assert!(forced.run().is_ok());
    }

    #[test]
    fn test_existing_fixture_blocks_config_write() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FIXTURE_FILE), "{}").unwrap();

        let cmd = InitCommand {
            directory: dir.path().to_path_buf(),
            force: false,
        };
        assert!(cmd.run().is_err());
        assert!(!dir.path().join(CONFIG_FILE).exists());
        assert_eq!(std::fs::read_to_string(dir.path().join(FIXTURE_FILE)).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_sample_fixture_resolves() {
        use directory::DirectoryStore;
        use shared::{Role, UserId};

        let fixture = serde_json::from_str(SAMPLE_FIXTURE).unwrap();
        let directory = InMemoryDirectory::from_fixture(fixture).unwrap();
        let rows = directory.role_assignments(&UserId::new("u-chief")).await.unwrap();
        assert_eq!(Role::parse(&rows[0].role), Some(Role::ChiefOfCyber));
    }
}
