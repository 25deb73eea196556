//! Planner project data structures and layout editing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use crate::constants::{
    DEFAULT_PROJECT_NAME, DEFAULT_ROOM_HEIGHT, DEFAULT_ROOM_WIDTH, FALLBACK_PROJECT_ID,
    FALLBACK_PROJECT_NAME, PROJECT_FORMAT_VERSION,
};
use crate::models::{KitchenModule, ModuleTemplate, Placement, Rotation};

/// Failure to turn a JSON document into a [`PlannerProject`].
///
/// Callers recover from this at their boundary and keep whatever project
/// they held before the load attempt.
#[derive(Debug, Error)]
pub enum ProjectParseError {
    /// Not JSON, or JSON of the wrong shape.
    #[error("malformed project JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Well-formed JSON that breaks a project invariant.
    #[error("invalid project: {0}")]
    Invalid(String),
}

/// Rejected layout edit.
#[derive(Debug, Error, PartialEq)]
pub enum PlannerError {
    /// Template footprint is not positive and finite.
    #[error("invalid module template '{name}': width and height must be positive, got {width}x{height}")]
    InvalidTemplate {
        /// Template name
        name: String,
        /// Offending width
        width: f64,
        /// Offending height
        height: f64,
    },
    /// Module position is NaN or infinite.
    #[error("invalid position ({x}, {y}): coordinates must be finite")]
    InvalidPosition {
        /// Offending x
        x: f64,
        /// Offending y
        y: f64,
    },
    /// Room dimensions are not positive and finite.
    #[error("invalid room size {width}x{height}: both dimensions must be positive")]
    InvalidRoomSize {
        /// Offending width
        width: f64,
        /// Offending height
        height: f64,
    },
}

/// Room boundary modules are drawn against. Not enforced on positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomSize {
    /// Room width
    pub width: f64,
    /// Room depth
    pub height: f64,
}

impl Default for RoomSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_ROOM_WIDTH,
            height: DEFAULT_ROOM_HEIGHT,
        }
    }
}

impl RoomSize {
    /// Creates a validated room size.
    pub fn new(width: f64, height: f64) -> Result<Self, PlannerError> {
        let room = Self { width, height };
        if room.is_valid() {
            Ok(room)
        } else {
            Err(PlannerError::InvalidRoomSize { width, height })
        }
    }

    fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Optional descriptive data stored with a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Searchable keywords
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Preview image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// A kitchen layout: room size plus placed modules.
///
/// Module order is insertion order and doubles as drawing order.
/// `updated_at` is refreshed by every edit that changes something.
///
/// # Serialized form
///
/// ```json
/// {
///   "id": "project-…",
///   "name": "New Kitchen Project",
///   "modules": [],
///   "roomSize": { "width": 400.0, "height": 300.0 },
///   "createdAt": "2025-01-01T00:00:00Z",
///   "updatedAt": "2025-01-01T00:00:00Z",
///   "version": "1.0"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerProject {
    /// Project identifier
    #[serde(default = "fallback_project_id")]
    pub id: String,
    /// Project display name
    #[serde(default = "fallback_project_name")]
    pub name: String,
    /// Placed modules in drawing order
    #[serde(default)]
    pub modules: Vec<KitchenModule>,
    /// Room boundary
    #[serde(default)]
    pub room_size: RoomSize,
    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// Optional descriptive data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProjectMetadata>,
    /// File format version, informational only
    #[serde(default = "format_version")]
    pub version: String,
}

fn fallback_project_id() -> String {
    FALLBACK_PROJECT_ID.to_string()
}

fn fallback_project_name() -> String {
    FALLBACK_PROJECT_NAME.to_string()
}

fn format_version() -> String {
    PROJECT_FORMAT_VERSION.to_string()
}

impl Default for PlannerProject {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_NAME)
    }
}

impl PlannerProject {
    /// Creates an empty project with the default room.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("project-{}", Uuid::new_v4()),
            name: name.into(),
            modules: Vec::new(),
            room_size: RoomSize::default(),
            created_at: now,
            updated_at: now,
            metadata: None,
            version: format_version(),
        }
    }

    /// Sets the room size used for new projects.
    #[must_use]
    pub fn with_room_size(mut self, room_size: RoomSize) -> Self {
        self.room_size = room_size;
        self
    }

    /// Updates the modification timestamp to now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Gets a module by id.
    #[must_use]
    pub fn module(&self, id: &str) -> Option<&KitchenModule> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Adds a module built from `template` and returns it.
    ///
    /// The module gets a fresh id, the template's footprint, no rotation,
    /// and a position from `placement`. The position must be finite but is
    /// not checked against the room or other modules.
    pub fn add_module(
        &mut self,
        template: &ModuleTemplate,
        placement: Placement,
    ) -> Result<&KitchenModule, PlannerError> {
        let footprint_ok = template.width.is_finite()
            && template.height.is_finite()
            && template.width > 0.0
            && template.height > 0.0;
        if !footprint_ok {
            return Err(PlannerError::InvalidTemplate {
                name: template.name.clone(),
                width: template.width,
                height: template.height,
            });
        }

        let seed = Uuid::new_v4();
        let (x, y) = placement.resolve(&seed);
        ensure_finite_position(x, y)?;
        self.modules.push(KitchenModule {
            id: format!("module-{seed}"),
            kind: template.kind,
            name: template.name.clone(),
            x,
            y,
            width: template.width,
            height: template.height,
            rotation: Rotation::Deg0,
            properties: None,
        });
        self.touch();

        Ok(&self.modules[self.modules.len() - 1])
    }

    /// Moves a module to a new top-left position.
    ///
    /// No clamping is applied. Returns `Ok(false)` and changes nothing when
    /// the id is unknown.
    pub fn move_module(&mut self, id: &str, x: f64, y: f64) -> Result<bool, PlannerError> {
        ensure_finite_position(x, y)?;
        let Some(module) = self.modules.iter_mut().find(|m| m.id == id) else {
            return Ok(false);
        };
        module.x = x;
        module.y = y;
        self.touch();
        Ok(true)
    }

    /// Rotates a module by a quarter turn. Unknown ids are ignored.
    pub fn rotate_module(&mut self, id: &str) -> bool {
        let Some(module) = self.modules.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        module.rotation = module.rotation.next();
        self.touch();
        true
    }

    /// Removes a module, returning it. Unknown ids are ignored.
    pub fn remove_module(&mut self, id: &str) -> Option<KitchenModule> {
        let index = self.modules.iter().position(|m| m.id == id)?;
        self.touch();
        Some(self.modules.remove(index))
    }

    /// Changes the room boundary. Existing modules are left where they are.
    pub fn set_room_size(&mut self, width: f64, height: f64) -> Result<(), PlannerError> {
        self.room_size = RoomSize::new(width, height)?;
        self.touch();
        Ok(())
    }

    /// Modules whose footprint reaches outside the room boundary.
    ///
    /// Informational only; nothing prevents such placements.
    pub fn modules_outside_room(&self) -> Vec<&KitchenModule> {
        self.modules
            .iter()
            .filter(|m| {
                m.x < 0.0
                    || m.y < 0.0
                    || m.x + m.width > self.room_size.width
                    || m.y + m.height > self.room_size.height
            })
            .collect()
    }

    /// Serializes the project to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses and validates a project from JSON.
    ///
    /// Absent optional fields are filled with defaults (empty module list,
    /// 400×300 room, fallback id and name, current time, rotation 0, kind
    /// label as module name).
    pub fn from_json(json: &str) -> Result<Self, ProjectParseError> {
        let mut project: Self = serde_json::from_str(json)?;

        for module in &mut project.modules {
            if module.name.trim().is_empty() {
                module.name = module.kind.display_name().to_string();
            }
        }

        project.validate()?;
        Ok(project)
    }

    /// Validates project invariants.
    ///
    /// Checks:
    /// - room dimensions are positive
    /// - every module has a positive footprint and finite position
    /// - module ids are unique and non-empty
    pub fn validate(&self) -> Result<(), ProjectParseError> {
        if !self.room_size.is_valid() {
            return Err(ProjectParseError::Invalid(format!(
                "room size {}x{} must be positive",
                self.room_size.width, self.room_size.height
            )));
        }

        let mut seen = HashSet::new();
        for module in &self.modules {
            if module.id.is_empty() {
                return Err(ProjectParseError::Invalid(
                    "module id cannot be empty".to_string(),
                ));
            }
            module.validate().map_err(ProjectParseError::Invalid)?;
            if !seen.insert(module.id.as_str()) {
                return Err(ProjectParseError::Invalid(format!(
                    "duplicate module id '{}'",
                    module.id
                )));
            }
        }

        Ok(())
    }
}

fn ensure_finite_position(x: f64, y: f64) -> Result<(), PlannerError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(PlannerError::InvalidPosition { x, y })
    }
}
