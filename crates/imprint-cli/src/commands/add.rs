//! Add command - drop starter component templates into a repo namespace

use console::style;
use imprint_core::require_project;

use crate::error::{CliError, Result};
use crate::scaffold;

pub fn run(components: &[String], namespace: &str, repo: &str) -> Result<()> {
    let cwd = std::env::current_dir()?;
    require_project(&cwd)?;

    let repo_root = cwd.join(repo);
    if !repo_root.is_dir() {
        return Err(CliError::usage(format!(
            "repo '{repo}' does not exist (create it with 'imprint new {repo}')"
        )));
    }

    let template_dir = repo_root.join("templates").join(namespace);
    std::fs::create_dir_all(&template_dir)?;

    for component in components {
        match scaffold::starter(component) {
            Some(content) => {
                let path = template_dir.join(format!("{component}.yaml"));
                std::fs::write(&path, content)?;
                println!(
                    "{} {} in namespace {}",
                    style("wrote").green(),
                    style(path.display()).dim(),
                    style(namespace).cyan()
                );
            }
            None => {
                println!(
                    "{} no component named '{}', skipping (known: {})",
                    style("⚠").yellow(),
                    component,
                    scaffold::COMPONENTS.join(", ")
                );
            }
        }
    }

    Ok(())
}
