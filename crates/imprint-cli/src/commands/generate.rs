//! Generate command - render templates into a fresh manifest version

use std::path::{Path, PathBuf};

use console::style;
use imprint_core::{ConfigFormat, Values, candidates, load_config, require_project, store};
use imprint_engine::Engine;

use crate::error::{CliError, Result};
use crate::prompt;

pub fn run(
    namespace: &str,
    repo: &str,
    format: Option<&str>,
    config: Option<&Path>,
    debug: bool,
) -> Result<()> {
    let cwd = std::env::current_dir()?;
    require_project(&cwd)?;
    let repo_root = cwd.join(repo);

    let template_dir = repo_root.join("templates").join(namespace);
    if !template_dir.is_dir() {
        return Err(CliError::usage(format!(
            "template directory '{}' not found",
            template_dir.display()
        )));
    }
    let templates = template_files(&template_dir)?;
    if templates.is_empty() {
        return Err(CliError::usage(format!(
            "template namespace '{namespace}' is empty"
        )));
    }

    let format = format
        .map(|f| f.parse::<ConfigFormat>())
        .transpose()
        .map_err(CliError::from)?;

    let config_path = match config {
        Some(path) => resolve_custom_config(&repo_root, path)?,
        None => select_config(&repo_root, format)?,
    };
    let values = load_config(&config_path, format)?;
    println!(
        "using config {} ({} top-level keys)",
        style(config_path.display()).cyan(),
        values.top_level_keys()
    );

    let version_dir = store::new_version(&repo_root, namespace)?;
    println!("output directory: {}", style(version_dir.display()).dim());

    let (rendered, failed) = render_all(&templates, &values, &version_dir, debug)?;

    println!();
    println!("generation complete: {rendered} rendered, {failed} failed");
    if failed > 0 {
        return Err(CliError::template(format!(
            "{failed} template(s) failed to render"
        )));
    }
    Ok(())
}

fn template_files(template_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(template_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn resolve_custom_config(repo_root: &Path, path: &Path) -> Result<PathBuf> {
    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    };
    if !resolved.is_file() {
        return Err(CliError::Config {
            message: format!("custom config file not found: {}", resolved.display()),
            help: None,
        });
    }
    Ok(resolved)
}

/// Pick the repo's config file. One candidate is used as-is; several hand
/// the choice to the operator rather than guessing.
fn select_config(repo_root: &Path, format: Option<ConfigFormat>) -> Result<PathBuf> {
    let mut found = candidates(repo_root);

    if let Some(preferred) = format {
        if let Some(candidate) = found.iter().find(|c| c.format == preferred) {
            return Ok(candidate.path.clone());
        }
        eprintln!(
            "{} no {} config found, falling back to discovery",
            style("⚠").yellow(),
            preferred
        );
    }

    match found.len() {
        0 => Err(imprint_core::CoreError::ConfigNotFound {
            dir: repo_root.display().to_string(),
        }
        .into()),
        1 => Ok(found.remove(0).path),
        _ => {
            println!("multiple configuration files found:");
            for (index, candidate) in found.iter().enumerate() {
                println!("  {}) {}", index + 1, candidate.file_name);
            }
            let index = prompt::choose("choose which config file to use", found.len())?;
            println!("selected: {}", found[index].file_name);
            Ok(found.remove(index).path)
        }
    }
}

/// Render every template; a failing template does not block its siblings
fn render_all(
    templates: &[PathBuf],
    values: &Values,
    version_dir: &Path,
    debug: bool,
) -> Result<(usize, usize)> {
    let engine = Engine::builder().build();
    let mut rendered = 0;
    let mut failed = 0;

    for template in templates {
        let file_name = template
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| template.display().to_string());
        let output = version_dir.join(&file_name);

        match engine.render_to_file(template, values, &output) {
            Ok(()) => {
                rendered += 1;
                println!("{} {}", style("wrote").green(), output.display());
            }
            Err(e) if e.is_template_failure() => {
                failed += 1;
                eprintln!("{} {}: {}", style("✗").red().bold(), file_name, e);
                if debug {
                    eprintln!("{} template path: {}", style("DEBUG").dim(), template.display());
                }
            }
            // Without a writable output location nothing downstream can
            // proceed; IO failures abort the run
            Err(e) => return Err(e.into()),
        }
    }

    Ok((rendered, failed))
}
