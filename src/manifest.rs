// src/manifest.rs

//! The manifest: metadata for every node, source and exposure that can
//! participate in selection.
//!
//! The selector only ever *reads* through [`Manifest::member`]. All member
//! kinds live in one map and resolve to a single tagged [`GraphMember`],
//! so callers never have to probe separate collections per kind.

use std::collections::HashMap;

use crate::types::{NodeId, ResourceKind};

/// A node, source or exposure participating in the dependency graph.
#[derive(Debug, Clone)]
pub struct GraphMember {
    /// Display name, used in diagnostics and by the `name` selection method.
    pub name: String,
    pub resource_kind: ResourceKind,
    /// Disabled members are dropped from the member subgraph at selector
    /// construction and can never be selected.
    pub enabled: bool,
    /// True if the member has no materializable content. Empty nodes are
    /// dropped from the member subgraph alongside disabled ones.
    pub empty: bool,
    /// Direct parents, in declaration order.
    pub depends_on: Vec<NodeId>,
    /// Tags, matched by the `tag` selection method.
    pub tags: Vec<String>,
    /// Source path relative to the project root, matched by the `path`
    /// selection method. Sources and exposures may not have one.
    pub path: Option<String>,
}

impl GraphMember {
    /// Whether this member belongs in the working (member) subgraph.
    ///
    /// Sources and exposures only need to be enabled; nodes must also be
    /// non-empty.
    pub fn is_graph_member(&self) -> bool {
        match self.resource_kind {
            ResourceKind::Source | ResourceKind::Exposure => self.enabled,
            _ => self.enabled && !self.empty,
        }
    }
}

/// Lookup-by-id over all graph members, owned by the caller and shared with
/// the selector for the duration of one invocation.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    members: HashMap<NodeId, GraphMember>,
}

impl Manifest {
    pub fn new(members: HashMap<NodeId, GraphMember>) -> Self {
        Self { members }
    }

    /// Resolve a member by id. `None` during graph traversal signals an
    /// internal consistency bug; callers map it to
    /// [`SelectorError::NodeNotInManifest`](crate::errors::SelectorError).
    pub fn member(&self, id: &str) -> Option<&GraphMember> {
        self.members.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.members.keys()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
