//! Remove command - delete component templates from a repo namespace

use console::style;
use imprint_core::require_project;

use crate::error::{CliError, Result};

pub fn run(components: &[String], namespace: &str, repo: &str) -> Result<()> {
    let cwd = std::env::current_dir()?;
    require_project(&cwd)?;

    let template_dir = cwd.join(repo).join("templates").join(namespace);
    if !template_dir.is_dir() {
        return Err(CliError::usage(format!(
            "no templates for namespace '{namespace}' in repo '{repo}'"
        )));
    }

    for component in components {
        let path = template_dir.join(format!("{component}.yaml"));
        if path.is_file() {
            std::fs::remove_file(&path)?;
            println!(
                "{} removed {} from namespace {}",
                style("✓").green().bold(),
                style(format!("{component}.yaml")).cyan(),
                style(namespace).cyan()
            );
        } else {
            println!(
                "{} component '{}' not present in namespace '{}', skipping",
                style("⚠").yellow(),
                component,
                namespace
            );
        }
    }

    Ok(())
}
