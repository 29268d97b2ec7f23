// src/config/model.rs

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::graph::Graph;
use crate::manifest::{GraphMember, Manifest};
use crate::types::ResourceKind;

/// Top-level project file as read from a TOML file.
///
/// This is a direct mapping of the on-disk format:
///
/// ```toml
/// [node.model_a]
/// kind = "model"
/// path = "models/model_a.sql"
/// tags = ["nightly"]
///
/// [node.model_b]
/// kind = "model"
/// depends_on = ["model_a"]
///
/// [node.not_null_model_b]
/// kind = "test"
/// depends_on = ["model_b"]
/// ```
///
/// The TOML key under `[node.<name>]` doubles as the node's id.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProjectFile {
    /// All members from `[node.<name>]`.
    #[serde(default)]
    pub node: BTreeMap<String, NodeConfig>,
}

/// A project file that has passed validation (see `config::validate`):
/// every `depends_on` reference resolves and the graph is acyclic.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    pub node: BTreeMap<String, NodeConfig>,
}

impl ProjectFile {
    /// Construct without re-validating. Only `TryFrom<RawProjectFile>`
    /// should call this.
    pub fn new_unchecked(node: BTreeMap<String, NodeConfig>) -> Self {
        Self { node }
    }

    /// Build the manifest: one [`GraphMember`] per `[node.<name>]` entry.
    pub fn manifest(&self) -> Manifest {
        let mut members = HashMap::new();
        for (name, nc) in self.node.iter() {
            members.insert(
                name.clone(),
                GraphMember {
                    name: name.clone(),
                    resource_kind: nc.kind,
                    enabled: nc.enabled,
                    empty: nc.empty,
                    depends_on: nc.depends_on.clone(),
                    tags: nc.tags.clone(),
                    path: nc.path.clone(),
                },
            );
        }
        Manifest::new(members)
    }

    /// Build the full dependency graph (all members, including disabled or
    /// empty ones; the selector narrows this to the member subgraph).
    pub fn graph(&self) -> Graph {
        Graph::from_members(
            self.node
                .iter()
                .map(|(name, nc)| (name.clone(), nc.depends_on.clone())),
        )
    }
}

/// `[node.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    /// Resource kind: `"model"`, `"test"`, `"source"`, `"exposure"`, ...
    pub kind: ResourceKind,

    /// Disabled members never participate in selection.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// True if the member has no materializable content.
    #[serde(default)]
    pub empty: bool,

    /// Direct parents, by node name.
    ///
    /// This is the TOML `depends_on = ["model_a"]` field.
    #[serde(default)]
    pub depends_on: Vec<String>,

    /// Tags for the `tag:` selection method.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Source path for the `path:` selection method.
    #[serde(default)]
    pub path: Option<String>,
}

fn default_enabled() -> bool {
    true
}
