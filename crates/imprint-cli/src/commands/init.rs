//! Init command - bootstrap a project scaffold

use console::style;
use imprint_core::{ProjectMarker, is_project};

use crate::error::{CliError, Result};
use crate::prompt;
use crate::scaffold;

pub fn run(name: Option<&str>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    if is_project(&cwd) {
        return Err(CliError::usage(
            "current directory is already an imprint project",
        ));
    }

    let root = match name {
        Some(name) => cwd.join(name),
        None => {
            if !prompt::confirm("no project name given, initialize the current directory?") {
                println!("nothing initialized");
                return Ok(());
            }
            cwd
        }
    };

    std::fs::create_dir_all(&root)?;
    ProjectMarker::default().write(&root)?;

    println!(
        "{} initialized project at {}",
        style("✓").green().bold(),
        style(root.display()).cyan()
    );

    if prompt::confirm("create a first repo inside the project?") {
        let repo = prompt::read_line("repo name")?.to_lowercase();
        if repo.is_empty() {
            return Err(CliError::usage("repo name cannot be empty"));
        }
        scaffold::create_repo(&root, &repo)?;
        println!(
            "{} created repo {}",
            style("✓").green().bold(),
            style(&repo).cyan()
        );
    }

    println!();
    println!("Next steps:");
    println!(
        "  1. Put your values in {}",
        style("<repo>/config.json").cyan()
    );
    println!(
        "  2. Add component templates with: {} add deployment service -r <repo>",
        style("imprint").green()
    );
    println!(
        "  3. Render them with: {} generate -r <repo>",
        style("imprint").green()
    );

    Ok(())
}
