//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Write a configuration file with default values
    Init(ConfigInitArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Write a configuration file with default values
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Replace an existing configuration file
    #[arg(long)]
    force: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Init(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            return print_json(&config);
        }

        let path = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to resolve config path: {e:#}")))?;
        let workspace = config
            .workspace_dir()
            .map_err(|e| CliError::io(format!("Failed to resolve workspace: {e:#}")))?;

        let title = format!("{APP_NAME} Configuration");
        println!("{title}");
        println!("{}", "=".repeat(title.len()));
        println!();
        println!(
            "File:      {}{}",
            path.display(),
            if Config::exists() { "" } else { " (not created, showing defaults)" }
        );
        println!("Workspace: {}", workspace.display());
        println!();
        println!("Planner:");
        println!(
            "  Room:   {} x {}",
            config.planner.room_width, config.planner.room_height
        );
        let jitter = config.planner.jitter;
        println!(
            "  Jitter: x {}..{}, y {}..{}",
            jitter.x_min,
            jitter.x_min + jitter.x_span,
            jitter.y_min,
            jitter.y_min + jitter.y_span
        );
        println!();
        println!("Finance:");
        println!("  Total amount:  {}", config.finance.total_amount);
        println!("  Down payment:  {}", config.finance.down_payment);
        println!("  Interest rate: {}%", config.finance.interest_rate);
        println!("  Term:          {} months", config.finance.term_months);
        println!("  Max DTI:       {}", config.finance.max_dti);
        Ok(())
    }
}

impl ConfigInitArgs {
    /// Execute init command
    pub fn execute(&self) -> CliResult<()> {
        let path = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to resolve config path: {e:#}")))?;

        if Config::exists() && !self.force {
            return Err(CliError::validation(format!(
                "Configuration already exists at {} (use --force to overwrite)",
                path.display()
            )));
        }

        Config::new()
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Wrote default configuration to {}", path.display());
        Ok(())
    }
}
