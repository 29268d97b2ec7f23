// src/graph/graph.rs

use std::collections::{HashMap, HashSet};

use crate::errors::{Result, SelectorError};
use crate::types::NodeId;

/// Internal node structure: stores immediate parents and children.
#[derive(Debug, Clone, Default)]
struct GraphNode {
    /// Direct parents: members this one depends on.
    parents: Vec<NodeId>,
    /// Direct children: members that depend on this one.
    children: Vec<NodeId>,
}

/// Traversal direction for the depth-bounded walks.
#[derive(Debug, Clone, Copy)]
enum Direction {
    Upstream,
    Downstream,
}

/// In-memory DAG keyed by node id.
///
/// The graph is immutable once built; every query below is a pure read.
/// Acyclicity is validated where the graph is constructed (see
/// `config::validate`), so traversals here do not re-check it — the
/// visited sets exist only to avoid re-walking shared ancestry.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: HashMap<NodeId, GraphNode>,
}

impl Graph {
    /// Build a graph from `(id, depends_on)` pairs.
    ///
    /// Edge direction: parent -> child. An id mentioned only in a
    /// `depends_on` list still gets a node entry, so lookups never miss.
    pub fn from_members<I>(members: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, Vec<NodeId>)>,
    {
        let mut nodes: HashMap<NodeId, GraphNode> = HashMap::new();

        for (id, depends_on) in members {
            for parent in &depends_on {
                nodes.entry(parent.clone()).or_default();
            }
            nodes.entry(id.clone()).or_default().parents = depends_on.clone();
            for parent in depends_on {
                if let Some(node) = nodes.get_mut(&parent) {
                    node.children.push(id.clone());
                }
            }
        }

        Self { nodes }
    }

    /// All member ids in the graph.
    pub fn nodes(&self) -> HashSet<NodeId> {
        self.nodes.keys().cloned().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Immediate parents of a node.
    pub fn parents_of(&self, id: &str) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.parents.as_slice()).unwrap_or(&[])
    }

    /// Immediate children of a node.
    pub fn children_of(&self, id: &str) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// All ancestors reachable from `ids` within `depth` hops (unbounded if
    /// `None`). The seed ids themselves are excluded unless also reachable
    /// through an edge.
    pub fn select_parents(&self, ids: &HashSet<NodeId>, depth: Option<u32>) -> HashSet<NodeId> {
        self.walk(ids, depth, Direction::Upstream)
    }

    /// All descendants reachable from `ids` within `depth` hops; symmetric
    /// to [`Graph::select_parents`].
    pub fn select_children(&self, ids: &HashSet<NodeId>, depth: Option<u32>) -> HashSet<NodeId> {
        self.walk(ids, depth, Direction::Downstream)
    }

    /// The "siblings via shared child" neighborhood: the children of `ids`,
    /// the ids themselves, and every ancestor of that combined set.
    pub fn select_childrens_parents(&self, ids: &HashSet<NodeId>) -> HashSet<NodeId> {
        let mut family: HashSet<NodeId> = self.select_children(ids, None);
        family.extend(ids.iter().cloned());

        let mut result = self.select_parents(&family, None);
        result.extend(family);
        result
    }

    /// One-hop-forward frontier: the union of direct children of `ids`.
    ///
    /// This is deliberately a single hop, not a transitive closure; the
    /// expansion step in the selector only ever looks one edge past the
    /// selected set.
    pub fn select_successors(&self, ids: &HashSet<NodeId>) -> HashSet<NodeId> {
        let mut successors = HashSet::new();
        for id in ids {
            successors.extend(self.children_of(id).iter().cloned());
        }
        successors
    }

    /// Induced subgraph containing the intersection of `ids` with this
    /// graph, and every edge between the survivors.
    pub fn subgraph(&self, ids: &HashSet<NodeId>) -> Graph {
        let mut nodes = HashMap::new();
        for id in ids {
            if let Some(node) = self.nodes.get(id) {
                let kept = GraphNode {
                    parents: node
                        .parents
                        .iter()
                        .filter(|p| ids.contains(*p))
                        .cloned()
                        .collect(),
                    children: node
                        .children
                        .iter()
                        .filter(|c| ids.contains(*c))
                        .cloned()
                        .collect(),
                };
                nodes.insert(id.clone(), kept);
            }
        }
        Graph { nodes }
    }

    /// Induced subgraph over `ids`, for handing to a scheduler.
    ///
    /// Unlike [`Graph::subgraph`], every id must exist in this graph: the
    /// caller only passes ids the selector itself produced, so a miss is an
    /// internal consistency error.
    pub fn get_subset_graph(&self, ids: &HashSet<NodeId>) -> Result<Graph> {
        for id in ids {
            if !self.nodes.contains_key(id) {
                return Err(SelectorError::NodeNotInManifest(id.clone()));
            }
        }
        Ok(self.subgraph(ids))
    }

    /// Depth-bounded breadth-first walk from the seed set.
    fn walk(&self, ids: &HashSet<NodeId>, depth: Option<u32>, dir: Direction) -> HashSet<NodeId> {
        let mut found: HashSet<NodeId> = HashSet::new();
        let mut frontier: Vec<NodeId> = ids.iter().cloned().collect();
        let mut remaining = depth;

        while !frontier.is_empty() {
            if let Some(d) = remaining {
                if d == 0 {
                    break;
                }
                remaining = Some(d - 1);
            }

            let mut next = Vec::new();
            for id in frontier {
                let neighbors = match dir {
                    Direction::Upstream => self.parents_of(&id),
                    Direction::Downstream => self.children_of(&id),
                };
                for neighbor in neighbors {
                    if found.insert(neighbor.clone()) {
                        next.push(neighbor.clone());
                    }
                }
            }
            frontier = next;
        }

        found
    }
}
