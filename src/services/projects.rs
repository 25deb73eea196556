//! Project file I/O service.
//!
//! Centralizes loading, saving and listing project files so the CLI and the
//! web server resolve paths and report errors the same way.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CURRENT_PROJECT_KEY, PROJECT_FILE_EXTENSION};
use crate::models::PlannerProject;

/// Short description of a project file, used for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    /// File name inside the workspace
    pub filename: String,
    /// Project id
    pub id: String,
    /// Project name
    pub name: String,
    /// Number of placed modules
    pub module_count: usize,
    /// Last modification time recorded in the file
    pub updated_at: DateTime<Utc>,
}

impl ProjectSummary {
    fn of(filename: String, project: &PlannerProject) -> Self {
        Self {
            filename,
            id: project.id.clone(),
            name: project.name.clone(),
            module_count: project.modules.len(),
            updated_at: project.updated_at,
        }
    }
}

/// Service for managing project file I/O operations.
pub struct ProjectService;

impl ProjectService {
    /// Loads a project from a JSON file.
    ///
    /// Parse failures keep their [`ProjectParseError`](crate::models::ProjectParseError)
    /// so callers can tell them apart from I/O failures with `downcast_ref`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use kitchenplan::services::ProjectService;
    ///
    /// let project = ProjectService::load(Path::new("kitchen.json"))?;
    /// println!("{} modules", project.modules.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<PlannerProject> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file {}", path.display()))?;

        let project = PlannerProject::from_json(&content)
            .with_context(|| format!("Failed to load project from {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            modules = project.modules.len(),
            "loaded project"
        );
        Ok(project)
    }

    /// Saves a project to a JSON file.
    ///
    /// Writes to a temp file next to the target and renames it into place,
    /// creating the parent directory when needed.
    pub fn save(project: &PlannerProject, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content = project
            .to_json()
            .context("Failed to serialize project")?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file {}", temp_path.display()))?;

        fs::rename(&temp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })?;

        tracing::debug!(path = %path.display(), id = %project.id, "saved project");
        Ok(())
    }

    /// Path of the current-project slot inside `workspace`.
    #[must_use]
    pub fn current_project_path(workspace: &Path) -> PathBuf {
        workspace.join(format!("{CURRENT_PROJECT_KEY}.{PROJECT_FILE_EXTENSION}"))
    }

    /// Resolves a user-supplied project path.
    ///
    /// Absolute paths are used as is, relative ones are joined onto the
    /// workspace, and `None` selects the current-project slot.
    #[must_use]
    pub fn resolve(workspace: &Path, file: Option<&Path>) -> PathBuf {
        match file {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => workspace.join(path),
            None => Self::current_project_path(workspace),
        }
    }

    /// Lists the project files in `workspace`, sorted by file name.
    ///
    /// Files that fail to parse are skipped with a warning. A missing
    /// workspace yields an empty list.
    pub fn list(workspace: &Path) -> Result<Vec<ProjectSummary>> {
        if !workspace.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(workspace)
            .with_context(|| format!("Failed to read workspace {}", workspace.display()))?;

        let mut summaries = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to read entry in {}", workspace.display()))?
                .path();

            if path.extension().and_then(|e| e.to_str()) != Some(PROJECT_FILE_EXTENSION) {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            match Self::load(&path) {
                Ok(project) => summaries.push(ProjectSummary::of(filename.to_string(), &project)),
                Err(err) => tracing::warn!(path = %path.display(), "skipping project: {err:#}"),
            }
        }

        summaries.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(summaries)
    }
}
