//! CLI command handlers for KitchenPlan.
//!
//! Headless, scriptable access to projects, the module catalog and the
//! financing calculator.

pub mod catalog;
pub mod common;
pub mod config;
pub mod finance;
pub mod module;
pub mod project;

// Re-export types used by main.rs and tests
pub use catalog::CatalogArgs;
pub use common::{CliError, CliResult, Context, ExitCode};
pub use config::ConfigArgs;
pub use finance::FinanceArgs;
pub use module::{AddArgs, MoveArgs, RemoveArgs, RotateArgs};
pub use project::{NewArgs, RoomArgs, ShowArgs};
