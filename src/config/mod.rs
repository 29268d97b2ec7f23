// src/config/mod.rs

//! Project-file loading and validation for dagsel.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a project file from disk (`loader.rs`).
//! - Validate reference integrity and DAG correctness (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{NodeConfig, ProjectFile, RawProjectFile};
pub use validate::validate_raw_project;
