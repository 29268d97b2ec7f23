#![allow(dead_code)]

use std::collections::BTreeMap;

use dagsel::config::{NodeConfig, ProjectFile, RawProjectFile};
use dagsel::graph::Graph;
use dagsel::manifest::Manifest;
use dagsel::types::ResourceKind;

/// Builder for `ProjectFile` to simplify test setup.
pub struct ProjectFileBuilder {
    project: RawProjectFile,
}

impl ProjectFileBuilder {
    pub fn new() -> Self {
        Self {
            project: RawProjectFile {
                node: BTreeMap::new(),
            },
        }
    }

    pub fn with_node(mut self, name: &str, node: NodeConfig) -> Self {
        self.project.node.insert(name.to_string(), node);
        self
    }

    pub fn build(self) -> ProjectFile {
        ProjectFile::try_from(self.project).expect("Failed to build valid project from builder")
    }

    /// Convenience: build the project and derive `(Manifest, Graph)` in one
    /// step, as the selector wants them.
    pub fn build_manifest_and_graph(self) -> (Manifest, Graph) {
        let project = self.build();
        (project.manifest(), project.graph())
    }
}

impl Default for ProjectFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `NodeConfig`.
pub struct NodeConfigBuilder {
    node: NodeConfig,
}

impl NodeConfigBuilder {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            node: NodeConfig {
                kind,
                enabled: true,
                empty: false,
                depends_on: vec![],
                tags: vec![],
                path: None,
            },
        }
    }

    pub fn model() -> Self {
        Self::new(ResourceKind::Model)
    }

    pub fn test() -> Self {
        Self::new(ResourceKind::Test)
    }

    pub fn source() -> Self {
        Self::new(ResourceKind::Source)
    }

    pub fn depends_on(mut self, dep: &str) -> Self {
        self.node.depends_on.push(dep.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.node.tags.push(tag.to_string());
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.node.path = Some(path.to_string());
        self
    }

    pub fn enabled(mut self, val: bool) -> Self {
        self.node.enabled = val;
        self
    }

    pub fn empty(mut self, val: bool) -> Self {
        self.node.empty = val;
        self
    }

    pub fn build(self) -> NodeConfig {
        self.node
    }
}
