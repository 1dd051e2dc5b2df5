//! Apply command - push a generated manifest version to the cluster

use console::style;
use imprint_core::{require_project, store};
use imprint_kube::{Applier, ApplyOutcome, connect};

use crate::error::{CliError, Result};
use crate::prompt::StdinPrompt;

pub async fn run(repo: &str, namespace: &str, pick: Option<&str>, debug: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    require_project(&cwd)?;
    let repo_root = cwd.join(repo);

    let version_dir = match pick {
        Some(key) => store::pick_version(&repo_root, namespace, key)?,
        None => store::latest_version(&repo_root, namespace)?,
    };
    println!(
        "{} applying {} to namespace {}",
        style("→").blue().bold(),
        style(version_dir.display()).cyan(),
        style(namespace).yellow()
    );

    let client = connect().await?;
    if debug {
        eprintln!("{} connected, running API discovery", style("DEBUG").dim());
    }
    let applier = Applier::new(client, namespace).await?;
    let report = applier.apply_dir(&version_dir, &StdinPrompt).await?;

    for result in &report.results {
        match &result.outcome {
            ApplyOutcome::Applied { created: true } => {
                println!("{} {} created", style("✓").green().bold(), result.subject);
            }
            ApplyOutcome::Applied { created: false } => {
                println!("{} {} configured", style("✓").green().bold(), result.subject);
            }
            ApplyOutcome::SkippedEmpty => {
                println!(
                    "{} {} {}",
                    style("-").dim(),
                    result.subject,
                    style("empty document, skipped").dim()
                );
            }
            ApplyOutcome::SkippedDeclined => {
                println!(
                    "{} {} skipped (namespace creation declined)",
                    style("-").yellow(),
                    result.subject
                );
            }
            ApplyOutcome::Failed { reason } => {
                println!(
                    "{} {} failed: {}",
                    style("✗").red().bold(),
                    result.subject,
                    reason
                );
            }
        }
    }

    println!();
    println!("{}", report.summary());
    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::cluster(format!(
            "{} document(s) failed to apply",
            report.failed()
        )))
    }
}
