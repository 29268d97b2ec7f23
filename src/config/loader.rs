// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ProjectFile, RawProjectFile};
use crate::errors::Result;

/// Load a project file from a given path and return the raw `RawProjectFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (reference integrity, acyclicity). Use [`load_and_validate`]
/// for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawProjectFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let project: RawProjectFile = toml::from_str(&contents)?;

    Ok(project)
}

/// Load a project file from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - unknown `depends_on` references,
///   - self-dependencies,
///   - cycles in the node graph.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ProjectFile> {
    let raw = load_from_path(&path)?;
    let project = ProjectFile::try_from(raw)?;
    Ok(project)
}

/// Helper to resolve a default project path.
///
/// Currently this just returns `Dagsel.toml` in the current working
/// directory; it exists so discovery can later grow (env var, parent-dir
/// search) without touching call sites.
pub fn default_project_path() -> PathBuf {
    PathBuf::from("Dagsel.toml")
}
