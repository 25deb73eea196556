//! KitchenPlan - command-line kitchen planner
//!
//! Creates and edits kitchen projects stored as JSON files, lists the module
//! catalog and runs financing calculations.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kitchenplan::cli::{
    AddArgs, CatalogArgs, CliResult, ConfigArgs, Context, ExitCode, FinanceArgs, MoveArgs,
    NewArgs, RemoveArgs, RoomArgs, RotateArgs, ShowArgs,
};

/// KitchenPlan - plan kitchen layouts and price their financing
#[derive(Parser, Debug)]
#[command(name = "kitchenplan", author, version, about, long_about = None)]
struct Cli {
    /// Directory project files are resolved against
    #[arg(short, long, global = true, value_name = "DIR")]
    workspace: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new project
    New(NewArgs),
    /// Show a project
    Show(ShowArgs),
    /// Change a project's room size
    Room(RoomArgs),
    /// Add a module from the catalog
    Add(AddArgs),
    /// Move a module
    Move(MoveArgs),
    /// Rotate a module by 90 degrees
    Rotate(RotateArgs),
    /// Remove a module
    Remove(RemoveArgs),
    /// List the module catalog
    Catalog(CatalogArgs),
    /// Financing calculations
    Finance(FinanceArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self, workspace: Option<PathBuf>) -> CliResult<()> {
        let ctx = || Context::load(workspace.clone());
        match self {
            Self::New(args) => args.execute(&ctx()?),
            Self::Show(args) => args.execute(&ctx()?),
            Self::Room(args) => args.execute(&ctx()?),
            Self::Add(args) => args.execute(&ctx()?),
            Self::Move(args) => args.execute(&ctx()?),
            Self::Rotate(args) => args.execute(&ctx()?),
            Self::Remove(args) => args.execute(&ctx()?),
            Self::Finance(args) => args.execute(&ctx()?),
            Self::Catalog(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = match cli.command.execute(cli.workspace) {
        Ok(()) => ExitCode::Success.code(),
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code()
        }
    };

    std::process::exit(code);
}
