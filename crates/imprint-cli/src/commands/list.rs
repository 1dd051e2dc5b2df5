//! List command - show generated manifest versions for a namespace

use console::style;
use imprint_core::{require_project, store};

use crate::error::{CliError, Result};

pub fn run(namespace: &str, repo: &str) -> Result<()> {
    let cwd = std::env::current_dir()?;
    require_project(&cwd)?;

    let repo_root = cwd.join(repo);
    if !repo_root.is_dir() {
        return Err(CliError::usage(format!("repo '{repo}' does not exist")));
    }

    let keys = store::versions(&repo_root, namespace)?;
    if keys.is_empty() {
        println!(
            "no manifest versions in namespace {} yet",
            style(namespace).cyan()
        );
        return Ok(());
    }

    println!("manifest versions in namespace {}:", style(namespace).cyan());
    let last = keys.len() - 1;
    for (index, key) in keys.iter().enumerate() {
        if index == last {
            println!("  {} {}", key, style("(latest)").green());
        } else {
            println!("  {key}");
        }
    }

    Ok(())
}
