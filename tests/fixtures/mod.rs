//! Shared test fixtures for E2E CLI and web tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use chrono::{TimeZone, Utc};
use kitchenplan::models::{
    KitchenModule, ModuleKind, ModuleProperties, PlannerProject, ProjectMetadata, RoomSize,
    Rotation,
};
use kitchenplan::services::ProjectService;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Module ids used by [`test_project_basic`].
pub const CABINET_ID: &str = "module-cabinet-1";
pub const SINK_ID: &str = "module-sink-1";
pub const ISLAND_ID: &str = "module-island-1";

/// Creates a small project with deterministic ids and timestamps.
///
/// Contains a base cabinet at (0, 0), a rotated sink at (100, 0) with
/// properties, and an island at (150, 150).
pub fn test_project_basic() -> PlannerProject {
    let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let updated = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();

    let mut cabinet = KitchenModule::new(ModuleKind::Cabinet, "Base Cabinet", (0.0, 0.0), (80.0, 60.0));
    cabinet.id = CABINET_ID.to_string();

    let mut sink = KitchenModule::new(ModuleKind::Sink, "Double Sink", (100.0, 0.0), (100.0, 50.0))
        .with_properties(ModuleProperties {
            material: Some("Stainless Steel".to_string()),
            color: Some("#c0c0c0".to_string()),
            appliance_type: None,
            features: Some(vec!["Double basin".to_string()]),
        });
    sink.id = SINK_ID.to_string();
    sink.rotation = Rotation::Deg90;

    let mut island = KitchenModule::new(ModuleKind::Island, "Kitchen Island", (150.0, 150.0), (120.0, 80.0));
    island.id = ISLAND_ID.to_string();

    PlannerProject {
        id: "project-test".to_string(),
        name: "Test Kitchen".to_string(),
        modules: vec![cabinet, sink, island],
        room_size: RoomSize {
            width: 400.0,
            height: 300.0,
        },
        created_at: created,
        updated_at: updated,
        metadata: Some(ProjectMetadata {
            description: Some("E2E test project".to_string()),
            tags: Some(vec!["test".to_string()]),
            thumbnail: None,
        }),
        version: "1.0".to_string(),
    }
}

/// Writes `project` into `dir` and returns its path.
pub fn write_project_file(dir: &Path, filename: &str, project: &PlannerProject) -> PathBuf {
    let path = dir.join(filename);
    ProjectService::save(project, &path).expect("Failed to write project file");
    path
}

/// Isolated workspace and config directory for driving the CLI binary.
pub struct TestEnv {
    pub workspace: TempDir,
    pub config_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            workspace: TempDir::new().expect("Failed to create workspace"),
            config_dir: TempDir::new().expect("Failed to create config dir"),
        }
    }

    /// Path of a file inside the workspace.
    pub fn path(&self, filename: &str) -> PathBuf {
        self.workspace.path().join(filename)
    }

    /// Runs the CLI with this environment's config dir and workspace.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_kitchenplan"))
            .env("KITCHENPLAN_CONFIG_DIR", self.config_dir.path())
            .env_remove("RUST_LOG")
            .arg("--workspace")
            .arg(self.workspace.path())
            .args(args)
            .output()
            .expect("Failed to execute command")
    }

    /// Loads a project file from the workspace.
    pub fn load(&self, filename: &str) -> PlannerProject {
        ProjectService::load(&self.path(filename)).expect("Failed to load project")
    }
}

/// Stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
