//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{CONFIG_DIR_NAME, DEFAULT_MAX_DTI, DEFAULT_ROOM_HEIGHT, DEFAULT_ROOM_WIDTH};
use crate::finance::{FinanceQuote, QuoteRequest};
use crate::models::{JitterWindow, Placement, RoomSize};

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "KITCHENPLAN_CONFIG_DIR";

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathConfig {
    /// Directory holding project files (defaults to `<config dir>/projects`)
    pub workspace: Option<PathBuf>,
}

/// Defaults for new projects and module placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Room width for new projects
    pub room_width: f64,
    /// Room height (depth) for new projects
    pub room_height: f64,
    /// Window used when a module is added without an explicit position
    pub jitter: JitterWindow,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            room_width: DEFAULT_ROOM_WIDTH,
            room_height: DEFAULT_ROOM_HEIGHT,
            jitter: JitterWindow::default(),
        }
    }
}

impl PlannerConfig {
    /// Room size for new projects.
    pub fn room_size(&self) -> RoomSize {
        RoomSize {
            width: self.room_width,
            height: self.room_height,
        }
    }

    /// Placement policy for modules added without a position.
    pub fn default_placement(&self) -> Placement {
        Placement::Jittered(self.jitter)
    }
}

/// Defaults pre-filled into the financing calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceConfig {
    /// Total project price
    pub total_amount: f64,
    /// Paid up front
    pub down_payment: f64,
    /// Nominal annual rate in percent
    pub interest_rate: f64,
    /// Term in months
    pub term_months: u32,
    /// Maximum debt-to-income ratio for affordability
    pub max_dti: f64,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        let request = QuoteRequest::default();
        Self {
            total_amount: request.total_amount,
            down_payment: request.down_payment,
            interest_rate: request.interest_rate,
            term_months: request.loan_term_months,
            max_dti: DEFAULT_MAX_DTI,
        }
    }
}

impl FinanceConfig {
    /// Quote request pre-filled with these defaults.
    pub fn quote_request(&self) -> QuoteRequest {
        QuoteRequest {
            total_amount: self.total_amount,
            down_payment: self.down_payment,
            interest_rate: self.interest_rate,
            loan_term_months: self.term_months,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/KitchenPlanner/config.toml`
/// - macOS: `~/Library/Application Support/KitchenPlanner/config.toml`
/// - Windows: `%APPDATA%\KitchenPlanner\config.toml`
///
/// `KITCHENPLAN_CONFIG_DIR` overrides the directory.
///
/// # Validation
///
/// - room dimensions must be positive
/// - jitter spans must be non-negative
/// - finance defaults must produce a quote
/// - `max_dti` must be in (0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// File system paths
    pub paths: PathConfig,
    /// Planner defaults
    pub planner: PlannerConfig,
    /// Financing defaults
    pub finance: FinanceConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory project files are read from and written to.
    pub fn workspace_dir(&self) -> Result<PathBuf> {
        match &self.paths.workspace {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("projects")),
        }
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let room = self.planner.room_size();
        RoomSize::new(room.width, room.height)
            .context("Invalid [planner] room size")?;

        self.planner
            .jitter
            .validate()
            .context("Invalid [planner.jitter] window")?;

        FinanceQuote::compute(self.finance.quote_request())
            .context("Invalid [finance] defaults")?;

        if !(self.finance.max_dti > 0.0 && self.finance.max_dti <= 1.0) {
            anyhow::bail!(
                "Invalid [finance] max_dti {}: must be greater than 0 and at most 1",
                self.finance.max_dti
            );
        }

        Ok(())
    }
}
