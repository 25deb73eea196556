//! Project commands: create, inspect and resize kitchen projects.

use crate::cli::common::{print_json, CliError, CliResult, Context};
use crate::models::{PlannerProject, RoomSize};
use crate::planner::PlannerSession;
use clap::Args;
use std::path::PathBuf;

/// Create a new, empty kitchen project
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Project name
    #[arg(short, long)]
    pub name: String,

    /// Room width (defaults to the configured width)
    #[arg(long, requires = "height")]
    pub width: Option<f64>,

    /// Room height (defaults to the configured height)
    #[arg(long, requires = "width")]
    pub height: Option<f64>,

    /// Project file (defaults to the current-project slot)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let room = match (self.width, self.height) {
            (Some(width), Some(height)) => {
                RoomSize::new(width, height).map_err(|e| CliError::validation(e.to_string()))?
            }
            _ => ctx.config.planner.room_size(),
        };

        let path = ctx.project_path(self.file.as_deref());
        if path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "Project file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }

        let project = PlannerProject::new(&self.name).with_room_size(room);
        ctx.save_project(&project, &path)?;

        println!("Created project '{}' ({})", project.name, project.id);
        println!("  Room: {} x {}", room.width, room.height);
        println!("  File: {}", path.display());
        Ok(())
    }
}

/// Show a project's room and modules
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Project file (defaults to the current-project slot)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output the project document as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let path = ctx.project_path(self.file.as_deref());
        let project = ctx.load_project(&path)?;

        if self.json {
            return print_json(&project);
        }

        println!("{} ({})", project.name, project.id);
        println!(
            "Room: {} x {}",
            project.room_size.width, project.room_size.height
        );
        println!("Updated: {}", project.updated_at.to_rfc3339());
        println!();

        if project.modules.is_empty() {
            println!("No modules placed.");
            return Ok(());
        }

        println!("Modules ({}):", project.modules.len());
        for module in &project.modules {
            println!(
                "  {:<44} {:<10} {:<20} at ({:.1}, {:.1}) size {}x{} rotation {}",
                module.id,
                module.kind,
                module.name,
                module.x,
                module.y,
                module.width,
                module.height,
                module.rotation
            );
        }

        let outside = project.modules_outside_room();
        if !outside.is_empty() {
            println!();
            for module in outside {
                println!("  ⚠ {} ({}) extends outside the room", module.name, module.id);
            }
        }

        Ok(())
    }
}

/// Change a project's room size
#[derive(Debug, Clone, Args)]
pub struct RoomArgs {
    /// Project file (defaults to the current-project slot)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// New room width
    #[arg(long)]
    pub width: f64,

    /// New room height
    #[arg(long)]
    pub height: f64,
}

impl RoomArgs {
    /// Execute the room command
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let path = ctx.project_path(self.file.as_deref());
        let mut session = PlannerSession::new(ctx.load_project(&path)?);

        session
            .set_room_size(self.width, self.height)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let outside = session.project().modules_outside_room().len();
        ctx.save_project(session.project(), &path)?;

        println!("Room resized to {} x {}", self.width, self.height);
        if outside > 0 {
            println!("⚠ {outside} module(s) now extend outside the room");
        }
        Ok(())
    }
}
