//! KitchenPlan Library
//!
//! Core of the kitchen planner: the project layout model, the module
//! catalog, an editing session with undo/redo, and the financing engine,
//! plus the file store, CLI handlers and (with the `web` feature) the REST
//! server built on top of them.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod finance;
pub mod models;
pub mod planner;
pub mod services;
#[cfg(feature = "web")]
pub mod web;
