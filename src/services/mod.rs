//! Service layer for file-backed project storage.

pub mod projects;

pub use projects::{ProjectService, ProjectSummary};
