//! New command - create a repo inside an existing project

use console::style;
use imprint_core::require_project;

use crate::error::Result;
use crate::scaffold;

pub fn run(name: &str) -> Result<()> {
    let cwd = std::env::current_dir()?;
    require_project(&cwd)?;

    let repo = scaffold::create_repo(&cwd, name)?;
    println!(
        "{} created repo {} at {}",
        style("✓").green().bold(),
        style(name).cyan(),
        style(repo.display()).dim()
    );
    Ok(())
}
