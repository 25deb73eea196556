//! Shared CLI plumbing: error type, exit codes and project helpers.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::models::{PlannerProject, ProjectParseError};
use crate::services::ProjectService;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Invalid input, malformed project or rejected arguments
    ValidationError = 1,
    /// File system failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric code handed to the OS.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code this error maps to
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation, parse or argument failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// File system failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Global options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration
    pub config: Config,
    /// Directory relative project paths resolve against
    pub workspace: PathBuf,
}

impl Context {
    /// Loads the configuration and picks the workspace.
    ///
    /// `workspace` overrides the configured directory.
    pub fn load(workspace: Option<PathBuf>) -> CliResult<Self> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let workspace = match workspace {
            Some(dir) => dir,
            None => config
                .workspace_dir()
                .map_err(|e| CliError::io(format!("Failed to resolve workspace: {e:#}")))?,
        };

        Ok(Self { config, workspace })
    }

    /// Resolves `--file` against the workspace.
    #[must_use]
    pub fn project_path(&self, file: Option<&Path>) -> PathBuf {
        ProjectService::resolve(&self.workspace, file)
    }

    /// Loads a project, mapping parse failures to validation errors.
    pub fn load_project(&self, path: &Path) -> CliResult<PlannerProject> {
        ProjectService::load(path).map_err(|e| {
            if e.downcast_ref::<ProjectParseError>().is_some() {
                CliError::validation(format!("Error loading project: {e:#}"))
            } else {
                CliError::io(format!("Error loading project: {e:#}"))
            }
        })
    }

    /// Saves a project.
    pub fn save_project(&self, project: &PlannerProject, path: &Path) -> CliResult<()> {
        ProjectService::save(project, path)
            .map_err(|e| CliError::io(format!("Failed to save project: {e:#}")))
    }
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
