//! Data models for kitchen projects and placed modules.
//!
//! This module contains the layout model: rooms, modules, the module library
//! and the placement policy. Models are independent of I/O and presentation.

pub mod catalog;
pub mod module;
pub mod placement;
pub mod project;

// Re-export all model types
pub use catalog::{CatalogCategory, ModuleTemplate};
pub use module::{KitchenModule, ModuleKind, ModuleProperties, Rotation};
pub use placement::{JitterWindow, Placement};
pub use project::{PlannerError, PlannerProject, ProjectMetadata, ProjectParseError, RoomSize};
