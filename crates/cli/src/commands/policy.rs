//! caseguard policy command

use super::{parse_operation, parse_role, print_json, GlobalOptions};
use clap::{Args, Subcommand};
use console::style;
use rbac::{select_dashboard, AuthorizationGate, DashboardVariant, PermissionTable};
use serde::Serialize;
use shared::{AccessDenied, CaseGuardError, Operation, Role};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct PolicyCommand {
    #[command(subcommand)]
    pub command: PolicySubcommand,
}

#[derive(Debug, Subcommand)]
pub enum PolicySubcommand {
    /// List all roles with their permissions
    Roles,
    /// List sensitive operations and the roles granted each
    Operations,
    /// Check permissions for a role
    Check {
        /// Role to check
        #[arg(short, long)]
        role: String,
        /// Operation to decide (repeatable); omit to print the full permission set
        #[arg(short, long = "operation")]
        operations: Vec<String>,
        /// Exit with an error if any requested operation is denied
        #[arg(long)]
        strict: bool,
    },
}

/// One role and what it is granted
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummary {
    pub role: Role,
    pub display_name: String,
    pub dashboard: DashboardVariant,
    pub permissions: Vec<Operation>,
}

/// One operation and who holds it
#[derive(Debug, Clone, Serialize)]
pub struct OperationSummary {
    pub operation: Operation,
    pub description: &'static str,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub operation: Operation,
    pub allowed: bool,
}

/// Result of `policy check`
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub role: Role,
    pub recognized: bool,
    pub permissions: Vec<Operation>,
    pub decisions: Vec<Decision>,
}

impl CheckReport {
    pub fn any_denied(&self) -> bool {
        self.decisions.iter().any(|d| !d.allowed)
    }
}

/// Every known role, including ones the table grants nothing
pub fn role_summaries(table: &PermissionTable) -> Vec<RoleSummary> {
    Role::known()
        .iter()
        .map(|role| RoleSummary {
            role: role.clone(),
            display_name: role.display_name().to_string(),
            dashboard: select_dashboard(Some(role)),
            permissions: table.permissions_for(Some(role)).into_iter().collect(),
        })
        .collect()
}

pub fn operation_summaries(table: &PermissionTable) -> Vec<OperationSummary> {
    Operation::all()
        .iter()
        .map(|op| OperationSummary {
            operation: *op,
            description: op.description(),
            roles: table.roles_with(*op).into_iter().cloned().collect(),
        })
        .collect()
}

pub fn check(gate: &AuthorizationGate, role: Role, operations: &[Operation]) -> CheckReport {
    let decisions = operations
        .iter()
        .map(|op| Decision {
            operation: *op,
            allowed: gate.is_authorized(Some(&role), *op),
        })
        .collect();

    CheckReport {
        recognized: role.is_known(),
        permissions: gate.permissions_for(Some(&role)).into_iter().collect(),
        role,
        decisions,
    }
}

fn verdict(allowed: bool) -> console::StyledObject<&'static str> {
    if allowed {
        style("allow").green()
    } else {
        style("deny").red()
    }
}

impl PolicyCommand {
    pub fn run(&self, opts: &GlobalOptions) -> anyhow::Result<()> {
        let table = Arc::new(opts.table()?);

        match &self.command {
            PolicySubcommand::Roles => {
                let summaries = role_summaries(&table);
                if opts.json {
                    return print_json(&summaries);
                }
                println!("{}", style("Roles:").bold());
                for summary in &summaries {
                    println!(
                        "  {} ({}) -> {} dashboard",
                        style(summary.role.as_str()).cyan(),
                        summary.display_name,
                        summary.dashboard
                    );
                    if summary.permissions.is_empty() {
                        println!("      {}", style("no sensitive operations").dim());
                    }
                    for op in &summary.permissions {
                        println!("      - {}", op);
                    }
                }
            }
            PolicySubcommand::Operations => {
                let summaries = operation_summaries(&table);
                if opts.json {
                    return print_json(&summaries);
                }
                println!("{}", style("Sensitive operations:").bold());
                for summary in &summaries {
                    let roles: Vec<&str> = summary.roles.iter().map(|r| r.as_str()).collect();
                    println!("  {}", style(summary.operation).cyan());
                    println!("      {}", style(summary.description).dim());
                    println!(
                        "      granted to: {}",
                        if roles.is_empty() { "nobody".to_string() } else { roles.join(", ") }
                    );
                }
            }
            PolicySubcommand::Check {
                role,
                operations,
                strict,
            } => {
                let role = parse_role(role)?;
                let operations = operations
                    .iter()
                    .map(|raw| parse_operation(raw))
                    .collect::<anyhow::Result<Vec<_>>>()?;

                let gate = AuthorizationGate::new(table.clone());
                let report = check(&gate, role, &operations);

                if opts.json {
                    print_json(&report)?;
                } else {
                    println!("Checking permissions for role: {}", style(report.role.as_str()).cyan());
                    if !report.recognized {
                        println!("  {}", style("unrecognized role").yellow());
                    }
                    if report.decisions.is_empty() {
                        if report.permissions.is_empty() {
                            println!("  {}", style("no sensitive operations").dim());
                        }
                        for op in &report.permissions {
                            println!("  - {}", op);
                        }
                    }
                    for decision in &report.decisions {
                        println!("  {:<30} {}", decision.operation.as_str(), verdict(decision.allowed));
                    }
                }

                if *strict {
                    if let Some(denied) = report.decisions.iter().find(|d| !d.allowed) {
                        let err = CaseGuardError::from(AccessDenied {
                            role: Some(report.role.clone()),
                            operation: denied.operation,
                        });
                        return Err(err.into());
                    }
                }
            }
        }
        Ok(())
    }
}
