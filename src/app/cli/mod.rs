//! Command-line surface of serpent.
//!
//! `serpent` (or `serpent play`) starts a game against the cluster picked by
//! the kubeconfig, `serpent targets` lists what the snake could eat and
//! `serpent version` prints the version. Flags are global so they can follow
//! any subcommand.

use std::io::ErrorKind;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dialoguer::{Confirm, Error as DialoguerError};

use crate::app::commands::version::version_line;
use crate::app::commands::{play, targets};
use crate::app::session::SessionOptions;
use crate::app::{AppContext, logging};
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "serpent")]
#[command(version)]
#[command(
    about = "Play snake in your terminal and wreck havoc to your Kubernetes cluster",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
struct GlobalArgs {
    /// Path to configuration file (JSON, or TOML with a .toml extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to the kubeconfig file (defaults to $KUBECONFIG, then ~/.kube/config)
    #[arg(long, global = true)]
    kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to use instead of the current one
    #[arg(long, global = true)]
    context: Option<String>,
    /// File that receives the game log
    #[arg(long, global = true, default_value = "chaos.log")]
    log_file: PathBuf,
    /// Play without deleting anything
    #[arg(long, global = true)]
    dry_run: bool,
    /// Skip the confirmation prompt
    #[arg(short = 'y', long, global = true)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game (default)
    #[clap(visible_alias = "p")]
    Play,
    /// List the resources food can currently be linked to
    #[clap(visible_alias = "t")]
    Targets,
    /// Print version information
    Version,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => run_play(&cli.global),
        Commands::Targets => run_targets(&cli.global),
        Commands::Version => {
            println!("{}", version_line());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn connect(args: &GlobalArgs) -> Result<AppContext, AppError> {
    AppContext::connect(args.config.as_deref(), args.kubeconfig.as_deref(), args.context.as_deref())
}

fn run_play(args: &GlobalArgs) -> Result<(), AppError> {
    logging::init_file_logging(&args.log_file)?;
    let ctx = connect(args)?;

    if !args.dry_run && !args.yes {
        confirm_chaos(ctx.target())?;
    }

    let options = SessionOptions { dry_run: args.dry_run, ..SessionOptions::default() };
    let summary = play::execute(&ctx, &options)?;

    println!("Final Score: {}", summary.score);
    let verb = if args.dry_run { "would have deleted" } else { "deleted" };
    for resource in &summary.eaten {
        println!("  {verb} {resource}");
    }
    Ok(())
}

fn run_targets(args: &GlobalArgs) -> Result<(), AppError> {
    logging::init_stderr_logging()?;
    let ctx = connect(args)?;

    for resource in targets::execute(&ctx)? {
        println!("{}", resource.qualified_name());
    }
    Ok(())
}

fn confirm_chaos(target: &str) -> Result<(), AppError> {
    let confirmed = Confirm::new()
        .with_prompt(format!("Everything the snake eats in {target} is deleted for real. Play?"))
        .default(false)
        .interact();

    match confirmed {
        Ok(true) => Ok(()),
        Ok(false) => Err(AppError::Aborted),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => {
            Err(AppError::Aborted)
        }
        Err(DialoguerError::IO(err)) => Err(AppError::config_error(format!(
            "Cannot ask for confirmation ({err}); pass --yes or --dry-run"
        ))),
    }
}
