use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod apps;
mod config;
mod error;
mod logging;
mod manifest;
mod messages;
mod pipeline;
mod plan;
mod render;
mod submit;

use apps::InstallCommand;
use submit::{ProcessRunner, ScratchDir, Submitter};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "coolknative")]
#[command(about = "Install a knative platform and its CI/CD pipelines", long_about = None)]
struct Cli {
    /// Local path for your kubeconfig file, passed to kubectl and helm
    #[arg(long, global = true)]
    kubeconfig: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install Kubernetes apps from YAML files or helm charts
    Install {
        #[command(subcommand)]
        component: Option<InstallCommand>,
    },
    /// Print the version
    Version,
    /// Find info about how to use an installed app
    Info { app: Option<String> },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    match cli.cmd {
        Commands::Install { component: None } => println!("{}", apps::usage()),
        Commands::Install {
            component: Some(component),
        } => install(&component, cli.kubeconfig)?,
        Commands::Version => {
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!("Git Commit: {}", option_env!("GIT_COMMIT").unwrap_or(""));
        }
        Commands::Info { app: None } => {
            let names: Vec<&str> = apps::COMPONENTS.iter().map(|c| c.name).collect();
            println!("You can get info about: {}", names.join(", "));
        }
        Commands::Info { app: Some(app) } => match apps::component(&app) {
            Some(component) => println!("{}", component.info),
            None => bail!("no info available for app: {}", app),
        },
    }

    Ok(())
}

fn install(component: &InstallCommand, kubeconfig: Option<PathBuf>) -> Result<()> {
    let name = component.name();

    // 1) Validate, read inputs and render everything before touching the cluster.
    let plan = component
        .plan()
        .with_context(|| format!("prepare {} install", name))?;
    tracing::info!(component = name, steps = plan.steps().len(), "installing");
    tracing::debug!(component = name, steps = ?plan.step_names(), "plan");

    // 2) Run the steps in order.
    let submitter = Submitter::new(ProcessRunner, ScratchDir::system()).with_kubeconfig(kubeconfig);
    let report = plan::execute(plan, &submitter);

    // anyhow prints the error itself.
    if let Some((step, _)) = report.failure() {
        tracing::warn!(
            component = report.component,
            step,
            applied = ?report.applied(),
            skipped = ?report.not_attempted(),
            "install stopped"
        );
    } else {
        tracing::info!(component = report.component, applied = report.applied().len(), "done");
    }

    // 3) First failure wins; nothing applied so far is undone.
    report
        .into_result()
        .with_context(|| format!("install {}", name))?;

    println!("{}", component.installed_message());
    Ok(())
}
