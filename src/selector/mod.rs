// src/selector/mod.rs

//! The targeting layer: resolving a selection spec into node sets.
//!
//! - [`spec`] defines the immutable selection-spec tree (criteria leaves
//!   combined by set operators).
//! - [`methods`] holds the matcher registry consulted by criteria leaves.
//! - [`node_selector`] is the evaluator: spec tree in, node-id sets out,
//!   including the indirect-inclusion rule for check nodes.
//! - [`parse`] turns the textual `--select`/`--exclude` grammar into a
//!   spec tree.

pub mod methods;
pub mod node_selector;
pub mod parse;
pub mod spec;

pub use methods::{MethodMatcher, MethodRegistry};
pub use node_selector::{
    MatchAll, NodeFilter, NodeSelector, ResourceKindFilter, SelectedNodes,
};
pub use parse::{parse_criteria, parse_selection};
pub use spec::{CompositeSpec, SelectionCriteria, SelectionSpec, SetOperator};
