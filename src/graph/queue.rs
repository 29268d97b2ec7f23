// src/graph/queue.rs

//! Execution-ordered queue over a selected subgraph.
//!
//! The selector hands ownership of one of these to the downstream
//! scheduler (`get_graph_queue`). The queue tracks which selected nodes
//! are ready (all in-graph parents completed), which are in flight, and
//! which are done, and unblocks dependents as parents finish.
//!
//! The queue itself is single-threaded; coordinating concurrent completion
//! notifications is the consuming scheduler's job.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, warn};

use crate::graph::Graph;
use crate::types::NodeId;

#[derive(Debug)]
pub struct GraphQueue {
    graph: Graph,
    /// The full selected set, unchanged for the queue's lifetime.
    selected: HashSet<NodeId>,
    /// Ready to run, not yet handed out. Ordered for deterministic draining.
    queued: BTreeSet<NodeId>,
    in_progress: HashSet<NodeId>,
    completed: HashSet<NodeId>,
}

impl GraphQueue {
    /// Build a queue over an induced subgraph and its selected id set.
    ///
    /// Nodes with no parents inside the subgraph are ready immediately.
    pub fn new(graph: Graph, selected: HashSet<NodeId>) -> Self {
        let mut queue = Self {
            graph,
            selected,
            queued: BTreeSet::new(),
            in_progress: HashSet::new(),
            completed: HashSet::new(),
        };

        let initial: Vec<NodeId> = queue
            .graph
            .nodes()
            .into_iter()
            .filter(|id| queue.graph.parents_of(id).is_empty())
            .collect();
        queue.queued.extend(initial);

        debug!(
            selected = queue.selected.len(),
            ready = queue.queued.len(),
            "graph queue constructed"
        );

        queue
    }

    /// The selected ids this queue was built over.
    pub fn selected_nodes(&self) -> &HashSet<NodeId> {
        &self.selected
    }

    /// Number of nodes that have not completed yet.
    pub fn remaining(&self) -> usize {
        self.graph.len() - self.completed.len()
    }

    /// True once every node has completed.
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    /// True if no node is currently ready to hand out.
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Hand out the next ready node, marking it in progress.
    ///
    /// Returns `None` when nothing is ready; that can mean the queue is
    /// complete, or that all remaining nodes are blocked on in-flight work.
    pub fn take_next(&mut self) -> Option<NodeId> {
        let id = self.queued.pop_first()?;
        self.in_progress.insert(id.clone());
        debug!(node = %id, "handing out ready node");
        Some(id)
    }

    /// Record completion of a node and queue any dependents whose parents
    /// are now all completed.
    pub fn mark_done(&mut self, id: &str) {
        if !self.in_progress.remove(id) {
            warn!(node = %id, "completion for node that was not in progress; ignoring");
            return;
        }
        self.completed.insert(id.to_string());

        let unblocked: Vec<NodeId> = self
            .graph
            .children_of(id)
            .iter()
            .filter(|child| self.deps_satisfied(child))
            .filter(|child| {
                !self.queued.contains(*child)
                    && !self.in_progress.contains(*child)
                    && !self.completed.contains(*child)
            })
            .cloned()
            .collect();

        for child in unblocked {
            debug!(node = %child, "dependencies satisfied; queueing");
            self.queued.insert(child);
        }
    }

    /// Whether all in-graph parents of `id` have completed.
    fn deps_satisfied(&self, id: &str) -> bool {
        self.graph
            .parents_of(id)
            .iter()
            .all(|parent| self.completed.contains(parent))
    }
}
