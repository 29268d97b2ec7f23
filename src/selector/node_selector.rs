// src/selector/node_selector.rs

//! The node selector: evaluates a selection-spec tree against one graph +
//! manifest snapshot.
//!
//! The selector is constructed once per invocation. At construction it
//! narrows the full graph to the *member subgraph* (enabled, non-empty
//! nodes plus enabled sources and exposures); every query during
//! evaluation runs against that subgraph, and the final output never
//! contains an id outside it.
//!
//! Evaluation is purely computational: no IO, no caching across
//! invocations, no mutation of the graph or manifest.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::errors::{Result, SelectorError};
use crate::graph::{Graph, GraphQueue};
use crate::manifest::{GraphMember, Manifest};
use crate::selector::methods::MethodRegistry;
use crate::selector::spec::{SelectionCriteria, SelectionSpec};
use crate::types::{NodeId, ResourceKind};

/// Filtering strategy applied to the evaluated selection.
///
/// This is the selector's single extension point: inject a predicate at
/// construction instead of subclassing.
pub trait NodeFilter: std::fmt::Debug {
    fn node_is_match(&self, member: &GraphMember) -> bool;
}

/// Default filter: every member matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAll;

impl NodeFilter for MatchAll {
    fn node_is_match(&self, _member: &GraphMember) -> bool {
        true
    }
}

/// Restrict the selection to a configured set of resource kinds.
#[derive(Debug, Clone)]
pub struct ResourceKindFilter {
    kinds: HashSet<ResourceKind>,
}

impl ResourceKindFilter {
    pub fn new(kinds: impl IntoIterator<Item = ResourceKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }
}

impl NodeFilter for ResourceKindFilter {
    fn node_is_match(&self, member: &GraphMember) -> bool {
        self.kinds.contains(&member.resource_kind)
    }
}

/// Final answer of [`NodeSelector::select_nodes`].
#[derive(Debug, Clone)]
pub struct SelectedNodes {
    /// Nodes the spec resolves to unconditionally.
    pub direct: HashSet<NodeId>,
    /// Check nodes that were eligible but never proved fully satisfied.
    /// Disjoint from `direct` by construction.
    pub indirect_only: HashSet<NodeId>,
}

/// The evaluator. Bound to one immutable graph + manifest snapshot for the
/// duration of a single invocation.
#[derive(Debug)]
pub struct NodeSelector<'a> {
    full_graph: &'a Graph,
    manifest: &'a Manifest,
    /// Member subgraph: enabled, non-empty nodes and enabled
    /// sources/exposures only.
    graph: Graph,
    methods: MethodRegistry,
    filter: Box<dyn NodeFilter>,
}

impl<'a> NodeSelector<'a> {
    /// Selector with the default (match-everything) filter.
    pub fn new(graph: &'a Graph, manifest: &'a Manifest) -> Result<Self> {
        Self::with_filter(graph, manifest, Box::new(MatchAll))
    }

    /// Selector restricted to the given resource kinds.
    pub fn for_resource_kinds(
        graph: &'a Graph,
        manifest: &'a Manifest,
        kinds: impl IntoIterator<Item = ResourceKind>,
    ) -> Result<Self> {
        Self::with_filter(graph, manifest, Box::new(ResourceKindFilter::new(kinds)))
    }

    /// Selector with an injected filtering strategy.
    ///
    /// Builds the member subgraph here, once. Errors if the graph contains
    /// an id the manifest cannot resolve — the graph is derived from the
    /// manifest, so that is an upstream construction bug.
    pub fn with_filter(
        graph: &'a Graph,
        manifest: &'a Manifest,
        filter: Box<dyn NodeFilter>,
    ) -> Result<Self> {
        let mut members: HashSet<NodeId> = HashSet::new();
        for id in graph.nodes() {
            let member = manifest
                .member(&id)
                .ok_or_else(|| SelectorError::NodeNotInManifest(id.clone()))?;
            if member.is_graph_member() {
                members.insert(id);
            }
        }
        let member_graph = graph.subgraph(&members);

        debug!(
            full = graph.len(),
            members = member_graph.len(),
            "built member subgraph for selection"
        );

        Ok(Self {
            full_graph: graph,
            manifest,
            graph: member_graph,
            methods: MethodRegistry::with_builtins(),
            filter,
        })
    }

    /// Replace the method registry (e.g. to add embedder-defined methods).
    pub fn with_methods(mut self, methods: MethodRegistry) -> Self {
        self.methods = methods;
        self
    }

    /// Ids in the member subgraph.
    pub fn member_nodes(&self) -> HashSet<NodeId> {
        self.graph.nodes()
    }

    fn member(&self, id: &str) -> Result<&GraphMember> {
        self.manifest
            .member(id)
            .ok_or_else(|| SelectorError::NodeNotInManifest(id.to_string()))
    }

    /// Resolve a single criterion: run its matcher over the member nodes,
    /// collect the modifier neighborhood, then expand over the successor
    /// frontier. Returns `(direct, indirect)`.
    pub fn get_nodes_from_criteria(
        &self,
        spec: &SelectionCriteria,
    ) -> Result<(HashSet<NodeId>, HashSet<NodeId>)> {
        let nodes = self.graph.nodes();

        let collected = match self.methods.get(&spec.method) {
            Some(matcher) => matcher.search(self.manifest, &nodes, &spec.method_arguments, &spec.value),
            None => {
                let valid = self.methods.method_names().join(", ");
                warn!(
                    method = %spec.method,
                    spec = %spec.raw,
                    "unknown selection method; must be one of [{valid}]"
                );
                return Ok((HashSet::new(), HashSet::new()));
            }
        };

        let neighbors = self.collect_specified_neighbors(spec, &collected);
        let selected: HashSet<NodeId> = collected.union(&neighbors).cloned().collect();
        self.expand_selection(&selected, spec.greedy)
    }

    /// Apply the criterion's traversal modifiers (`@`, leading `+`,
    /// trailing `+`) to the matched set. The result may overlap it.
    fn collect_specified_neighbors(
        &self,
        spec: &SelectionCriteria,
        selected: &HashSet<NodeId>,
    ) -> HashSet<NodeId> {
        let mut additional: HashSet<NodeId> = HashSet::new();

        if spec.childrens_parents {
            additional.extend(self.graph.select_childrens_parents(selected));
        }
        if spec.parents {
            additional.extend(self.graph.select_parents(selected, spec.parents_depth));
        }
        if spec.children {
            additional.extend(self.graph.select_children(selected, spec.children_depth));
        }
        additional
    }

    /// Expand the selection over its one-hop successor frontier.
    ///
    /// A check node found on the frontier joins `direct` when `greedy` is
    /// set or when all of its parents are already selected; otherwise it is
    /// deferred to `indirect` in case its other parents show up in a
    /// sibling part of the spec. Greedy mode over-includes on purpose: it
    /// backs exclusion specs, where touching any parent should drop the
    /// check node.
    pub fn expand_selection(
        &self,
        selected: &HashSet<NodeId>,
        greedy: bool,
    ) -> Result<(HashSet<NodeId>, HashSet<NodeId>)> {
        let mut direct: HashSet<NodeId> = selected.clone();
        let mut indirect: HashSet<NodeId> = HashSet::new();

        for id in self.graph.select_successors(selected) {
            let member = self.member(&id)?;
            if !member.resource_kind.can_select_indirectly() {
                continue;
            }
            if greedy || member.depends_on.iter().all(|p| selected.contains(p)) {
                direct.insert(id);
            } else {
                debug!(node = %id, "check node deferred; not all parents selected yet");
                indirect.insert(id);
            }
        }

        Ok((direct, indirect))
    }

    /// Promote deferred check nodes whose full parent set is now covered.
    ///
    /// Single monotone pass: `selected` only grows, so one pass reaches the
    /// fixed point for parent sets already inside the candidate pool.
    pub fn incorporate_indirect_nodes(
        &self,
        direct: &HashSet<NodeId>,
        indirect: &HashSet<NodeId>,
    ) -> Result<HashSet<NodeId>> {
        let mut selected: HashSet<NodeId> = direct.clone();

        for id in indirect {
            let member = self.member(id)?;
            if member.depends_on.iter().all(|p| selected.contains(p)) {
                selected.insert(id.clone());
            }
        }

        Ok(selected)
    }

    /// Recursive spec evaluation returning `(direct, indirect)`.
    ///
    /// For composites, each child's indirect nodes only become "available"
    /// once its direct nodes are counted in, so the indirect input lists
    /// are `direct_i ∪ indirect_i`. Combining bottom-up this way lets a
    /// union of two partial check-node inclusions promote correctly, while
    /// a difference drops a check node promoted on one side but excluded
    /// on the other.
    pub fn select_nodes_recursively(
        &self,
        spec: &SelectionSpec,
    ) -> Result<(HashSet<NodeId>, HashSet<NodeId>)> {
        let (direct, indirect) = match spec {
            SelectionSpec::Criteria(criteria) => self.get_nodes_from_criteria(criteria)?,
            SelectionSpec::Composite(composite) => {
                let mut direct_sets: Vec<HashSet<NodeId>> = Vec::new();
                let mut indirect_sets: Vec<HashSet<NodeId>> = Vec::new();

                for component in &composite.components {
                    let (d, i) = self.select_nodes_recursively(component)?;
                    indirect_sets.push(d.union(&i).cloned().collect());
                    direct_sets.push(d);
                }

                let initial_direct = composite.operator.combine(&direct_sets);
                let indirect = composite.operator.combine(&indirect_sets);
                let direct = self.incorporate_indirect_nodes(&initial_direct, &indirect)?;

                (direct, indirect)
            }
        };

        if spec.expect_exists() && direct.is_empty() {
            warn!(
                spec = %spec.raw(),
                "the selection criterion does not match any nodes"
            );
        }

        Ok((direct, indirect))
    }

    /// Main entry point for turning a spec into node sets: recurse through
    /// the spec, resolve criteria, combine by set operation, and report
    /// leftover indirect nodes disjointly from the direct set.
    pub fn select_nodes(&self, spec: &SelectionSpec) -> Result<SelectedNodes> {
        let (direct, indirect) = self.select_nodes_recursively(spec)?;
        let indirect_only = indirect.difference(&direct).cloned().collect();
        Ok(SelectedNodes {
            direct,
            indirect_only,
        })
    }

    fn is_match(&self, id: &str) -> Result<bool> {
        let member = self.member(id)?;
        Ok(self.filter.node_is_match(member))
    }

    /// Subset of `selected` matching the injected filter. Pure; applying
    /// it twice equals applying it once.
    pub fn filter_selection(&self, selected: &HashSet<NodeId>) -> Result<HashSet<NodeId>> {
        let mut filtered = HashSet::new();
        for id in selected {
            if self.is_match(id)? {
                filtered.insert(id.clone());
            }
        }
        Ok(filtered)
    }

    /// The full selection pipeline: evaluate, filter, and surface any
    /// check nodes that stayed indirect-only as a diagnostic.
    pub fn get_selected(&self, spec: &SelectionSpec) -> Result<HashSet<NodeId>> {
        let SelectedNodes {
            direct,
            indirect_only,
        } = self.select_nodes(spec)?;

        let filtered = self.filter_selection(&direct)?;

        if !indirect_only.is_empty() {
            let unused = self.filter_selection(&indirect_only)?;
            if !unused.is_empty() {
                self.alert_unused_nodes(&unused)?;
            }
        }

        Ok(filtered)
    }

    /// Compute the selection and wrap it, with its induced subgraph, into
    /// an execution queue. Ownership of the queue transfers to the caller.
    pub fn get_graph_queue(&self, spec: &SelectionSpec) -> Result<GraphQueue> {
        let selected = self.get_selected(spec)?;
        let subset = self.full_graph.get_subset_graph(&selected)?;
        Ok(GraphQueue::new(subset, selected))
    }

    /// Informational diagnostic for check nodes excluded because a parent
    /// was missing: up to three names at info, the full list at debug.
    fn alert_unused_nodes(&self, unused: &HashSet<NodeId>) -> Result<()> {
        let mut names: Vec<String> = Vec::with_capacity(unused.len());
        for id in unused {
            names.push(self.member(id)?.name.clone());
        }
        names.sort();

        let summary = if names.len() <= 3 {
            names.join("\n  - ")
        } else {
            format!(
                "{}\n  - and {} more",
                names[..3].join("\n  - "),
                names.len() - 3
            )
        };

        info!(
            "Some check nodes were excluded because at least one parent is missing:\n  - {summary}\nUse the --greedy flag to include them"
        );
        debug!(
            "Full list of excluded check nodes:\n  - {}",
            names.join("\n  - ")
        );
        Ok(())
    }
}
