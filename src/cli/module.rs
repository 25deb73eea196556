//! Module commands: add, move, rotate and remove placed modules.

use crate::cli::common::{CliError, CliResult, Context};
use crate::constants::APP_BINARY_NAME;
use crate::models::catalog::find_template;
use crate::models::Placement;
use crate::planner::PlannerSession;
use clap::Args;
use std::path::PathBuf;

/// Add a module from the catalog
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Project file (defaults to the current-project slot)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Catalog template name, e.g. "Base Cabinet"
    #[arg(short, long)]
    pub template: String,

    /// X position (random inside the configured window when omitted)
    #[arg(long, requires = "y", allow_hyphen_values = true)]
    pub x: Option<f64>,

    /// Y position (random inside the configured window when omitted)
    #[arg(long, requires = "x", allow_hyphen_values = true)]
    pub y: Option<f64>,
}

impl AddArgs {
    /// Execute the add command
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        if self.x.is_some_and(|x| !x.is_finite()) || self.y.is_some_and(|y| !y.is_finite()) {
            return Err(CliError::validation("Position must be finite"));
        }

        let template = find_template(&self.template).ok_or_else(|| {
            CliError::validation(format!(
                "Unknown template '{}'. Run '{APP_BINARY_NAME} catalog' to list templates.",
                self.template
            ))
        })?;

        let path = ctx.project_path(self.file.as_deref());
        let mut session = PlannerSession::new(ctx.load_project(&path)?)
            .with_placement(ctx.config.planner.default_placement());

        let id = match (self.x, self.y) {
            (Some(x), Some(y)) => session.add_module_with(&template, Placement::At { x, y }),
            _ => session.add_module(&template),
        }
        .map_err(|e| CliError::validation(e.to_string()))?;

        ctx.save_project(session.project(), &path)?;

        if let Some(module) = session.selected() {
            println!(
                "Added {} {} at ({:.1}, {:.1})",
                module.name, module.id, module.x, module.y
            );
        }
        Ok(())
    }
}

/// Move a module to a new position
#[derive(Debug, Clone, Args)]
pub struct MoveArgs {
    /// Project file (defaults to the current-project slot)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Module id
    #[arg(long)]
    pub id: String,

    /// New x position
    #[arg(long, allow_hyphen_values = true)]
    pub x: f64,

    /// New y position
    #[arg(long, allow_hyphen_values = true)]
    pub y: f64,
}

impl MoveArgs {
    /// Execute the move command
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(CliError::validation("Position must be finite"));
        }

        let path = ctx.project_path(self.file.as_deref());
        let mut session = PlannerSession::new(ctx.load_project(&path)?);

        let moved = session
            .move_module(&self.id, self.x, self.y)
            .map_err(|e| CliError::validation(e.to_string()))?;
        if !moved {
            return Err(unknown_module(&self.id));
        }
        ctx.save_project(session.project(), &path)?;

        println!("Moved {} to ({:.1}, {:.1})", self.id, self.x, self.y);
        Ok(())
    }
}

/// Rotate a module by 90 degrees
#[derive(Debug, Clone, Args)]
pub struct RotateArgs {
    /// Project file (defaults to the current-project slot)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Module id
    #[arg(long)]
    pub id: String,
}

impl RotateArgs {
    /// Execute the rotate command
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let path = ctx.project_path(self.file.as_deref());
        let mut session = PlannerSession::new(ctx.load_project(&path)?);

        if !session.rotate_module(&self.id) {
            return Err(unknown_module(&self.id));
        }
        ctx.save_project(session.project(), &path)?;

        if let Some(module) = session.project().module(&self.id) {
            println!("Rotated {} to {}", module.id, module.rotation);
        }
        Ok(())
    }
}

/// Remove a module
#[derive(Debug, Clone, Args)]
pub struct RemoveArgs {
    /// Project file (defaults to the current-project slot)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Module id
    #[arg(long)]
    pub id: String,
}

impl RemoveArgs {
    /// Execute the remove command
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let path = ctx.project_path(self.file.as_deref());
        let mut session = PlannerSession::new(ctx.load_project(&path)?);

        let removed = session
            .remove_module(&self.id)
            .ok_or_else(|| unknown_module(&self.id))?;
        ctx.save_project(session.project(), &path)?;

        println!("Removed {} ({})", removed.name, removed.id);
        Ok(())
    }
}

fn unknown_module(id: &str) -> CliError {
    CliError::validation(format!("No module with id '{id}'; project left unchanged"))
}
