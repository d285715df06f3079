//! caseguard dashboard command

use super::{parse_role, print_json, GlobalOptions};
use clap::Args;
use console::style;
use rbac::{AuthorizationGate, DashboardSelector, DashboardView};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Role to preview
    #[arg(short, long)]
    pub role: String,
}

pub(crate) fn print_view(view: &DashboardView) {
    println!("Dashboard: {}", style(view.variant).cyan());
    if view.actions.is_empty() {
        println!("  {}", style("no privileged actions").dim());
    }
    for action in &view.actions {
        println!("  - {}", action);
    }
}

impl DashboardCommand {
    pub fn view(&self, opts: &GlobalOptions) -> anyhow::Result<DashboardView> {
        let role = parse_role(&self.role)?;
        let gate = AuthorizationGate::new(Arc::new(opts.table()?));
        Ok(DashboardSelector::new(gate).compose(Some(&role)))
    }

    pub fn run(&self, opts: &GlobalOptions) -> anyhow::Result<()> {
        let view = self.view(opts)?;
        if opts.json {
            return print_json(&view);
        }
        print_view(&view);
        Ok(())
    }
}
