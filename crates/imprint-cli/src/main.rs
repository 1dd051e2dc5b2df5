//! Imprint CLI - scaffold, render and apply Kubernetes manifests

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod error;
mod exit_codes;
mod prompt;
mod scaffold;

#[derive(Parser)]
#[command(name = "imprint")]
#[command(author = "Imprint Contributors")]
#[command(version)]
#[command(
    about = "Scaffold, render and apply Kubernetes manifests from templates and a config file",
    long_about = None
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a project scaffold
    Init {
        /// Project name; initializes the current directory when omitted
        name: Option<String>,
    },

    /// Create a new repo inside the project
    New {
        /// Repo name
        name: String,
    },

    /// Add starter component templates to a repo namespace
    Add {
        /// Components to add (deployment, service, configmap, secret, httproute, hpa)
        #[arg(required = true)]
        components: Vec<String>,

        /// Template namespace
        #[arg(short, long, default_value = "default")]
        namespace: String,

        /// Repo name
        #[arg(short, long)]
        repo: String,
    },

    /// Remove component templates from a repo namespace
    Remove {
        /// Components to remove
        #[arg(required = true)]
        components: Vec<String>,

        /// Template namespace
        #[arg(short, long, default_value = "default")]
        namespace: String,

        /// Repo name
        #[arg(short, long)]
        repo: String,
    },

    /// List generated manifest versions for a namespace
    List {
        /// Namespace to list
        #[arg(short, long, default_value = "default")]
        namespace: String,

        /// Repo name
        #[arg(short, long)]
        repo: String,
    },

    /// Render templates into a new timestamped manifest version
    Generate {
        /// Template namespace to render
        #[arg(short, long, default_value = "default")]
        namespace: String,

        /// Repo name
        #[arg(short, long)]
        repo: String,

        /// Config file format (json, yaml, yml); auto-detected when omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Custom config file path (overrides config discovery)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Apply a generated manifest version against the cluster
    Apply {
        /// Repo name
        repo: String,

        /// Namespace to apply resources into
        #[arg(short, long, default_value = "default")]
        namespace: String,

        /// Version key to apply (defaults to the latest)
        #[arg(short, long)]
        pick: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    miette::set_panic_hook();

    let cli = Cli::parse();

    if cli.debug {
        // SAFETY: We're the only thread interacting with the environment at
        // this point (start of main)
        unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
    }

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(name.as_deref()),

        Commands::New { name } => commands::new::run(&name),

        Commands::Add {
            components,
            namespace,
            repo,
        } => commands::add::run(&components, &namespace, &repo),

        Commands::Remove {
            components,
            namespace,
            repo,
        } => commands::remove::run(&components, &namespace, &repo),

        Commands::List { namespace, repo } => commands::list::run(&namespace, &repo),

        Commands::Generate {
            namespace,
            repo,
            format,
            config,
        } => commands::generate::run(
            &namespace,
            &repo,
            format.as_deref(),
            config.as_deref(),
            cli.debug,
        ),

        Commands::Apply {
            repo,
            namespace,
            pick,
        } => commands::apply::run(&repo, &namespace, pick.as_deref(), cli.debug).await,
    };

    if let Err(e) = result {
        let code = e.exit_code();
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(code);
    }
}
