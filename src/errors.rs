// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Most selection-time conditions are *not* errors: unknown selection
//! methods and empty matches are logged and evaluation continues. The only
//! fatal variants here are configuration problems and internal-invariant
//! violations (a node id surfacing during traversal that the manifest
//! cannot resolve).

use thiserror::Error;

use crate::types::NodeId;

#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("Project error: {0}")]
    ProjectError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cycle detected in node graph: {0}")]
    GraphCycle(String),

    #[error("Invalid selection spec '{spec}': {reason}")]
    SpecParse { spec: String, reason: String },

    /// Internal consistency error: the graph is derived from the manifest,
    /// so a traversal result that the manifest cannot resolve indicates an
    /// upstream construction bug, never bad user input.
    #[error("Internal error: node '{0}' not found in the manifest")]
    NodeNotInManifest(NodeId),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SelectorError>;
