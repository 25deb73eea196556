//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and planner/finance defaults.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "KitchenPlan";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "kitchenplan";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "KitchenPlanner";

/// Schema version written into project files.
pub const PROJECT_FORMAT_VERSION: &str = "1.0";

/// Storage key of the autosaved "current" project.
pub const CURRENT_PROJECT_KEY: &str = "kitchen-project";

/// Extension used for project files.
pub const PROJECT_FILE_EXTENSION: &str = "json";

/// Default room width in centimeters.
pub const DEFAULT_ROOM_WIDTH: f64 = 400.0;

/// Default room height (depth) in centimeters.
pub const DEFAULT_ROOM_HEIGHT: f64 = 300.0;

/// Name given to freshly created projects.
pub const DEFAULT_PROJECT_NAME: &str = "New Kitchen Project";

/// Id used when a loaded project carries none.
pub const FALLBACK_PROJECT_ID: &str = "new-project";

/// Name used when a loaded project carries none.
pub const FALLBACK_PROJECT_NAME: &str = "Untitled Project";

/// Longest financing term offered by the comparison table, in months.
pub const MAX_COMPARISON_TERM_MONTHS: u32 = 60;

/// Lowest rate offered by the premium financing package, in percent.
pub const PREMIUM_RATE_FLOOR: f64 = 4.9;

/// Default maximum debt-to-income ratio used for affordability.
pub const DEFAULT_MAX_DTI: f64 = 0.28;
