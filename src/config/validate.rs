// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ProjectFile, RawProjectFile};
use crate::errors::{Result, SelectorError};

impl TryFrom<RawProjectFile> for ProjectFile {
    type Error = crate::errors::SelectorError;

    fn try_from(raw: RawProjectFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_project(&raw)?;
        Ok(ProjectFile::new_unchecked(raw.node))
    }
}

pub fn validate_raw_project(project: &RawProjectFile) -> Result<()> {
    ensure_has_nodes(project)?;
    validate_dependencies(project)?;
    validate_dag(project)?;
    Ok(())
}

fn ensure_has_nodes(project: &RawProjectFile) -> Result<()> {
    if project.node.is_empty() {
        return Err(SelectorError::ProjectError(
            "project must contain at least one [node.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_dependencies(project: &RawProjectFile) -> Result<()> {
    for (name, node) in project.node.iter() {
        for dep in node.depends_on.iter() {
            if !project.node.contains_key(dep) {
                return Err(SelectorError::ProjectError(format!(
                    "node '{}' has unknown dependency '{}' in `depends_on`",
                    name, dep
                )));
            }
            if dep == name {
                return Err(SelectorError::ProjectError(format!(
                    "node '{}' cannot depend on itself in `depends_on`",
                    name
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(project: &RawProjectFile) -> Result<()> {
    // Build a petgraph graph from the nodes and their dependencies.
    //
    // Edge direction: dep -> node
    // For:
    //   [node.model_b]
    //   depends_on = ["model_a"]
    // we add edge model_a -> model_b.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in project.node.keys() {
        graph.add_node(name.as_str());
    }

    for (name, node) in project.node.iter() {
        for dep in node.depends_on.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(SelectorError::GraphCycle(format!(
                "cycle detected in node graph involving '{}'",
                node
            )))
        }
    }
}
