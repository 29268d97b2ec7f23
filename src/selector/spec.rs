// src/selector/spec.rs

//! The selection-spec tree: criteria leaves and set-algebra composites.
//!
//! A spec is built once per invocation (by `selector::parse` or directly
//! by an embedding application) and is read-only afterwards.

use std::collections::{BTreeMap, HashSet};

use crate::types::NodeId;

/// Set operator combining the per-component results of a composite spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    Intersection,
    /// Left-associative: the first component minus all the rest.
    Difference,
}

impl SetOperator {
    /// Combine the given sets with this operator. An empty input yields an
    /// empty set.
    pub fn combine(self, sets: &[HashSet<NodeId>]) -> HashSet<NodeId> {
        let mut iter = sets.iter();
        let Some(first) = iter.next() else {
            return HashSet::new();
        };

        let mut result = first.clone();
        for set in iter {
            match self {
                SetOperator::Union => result.extend(set.iter().cloned()),
                SetOperator::Intersection => result.retain(|id| set.contains(id)),
                SetOperator::Difference => result.retain(|id| !set.contains(id)),
            }
        }
        result
    }

    fn join_separator(self) -> &'static str {
        match self {
            SetOperator::Union => " ",
            SetOperator::Intersection => ",",
            SetOperator::Difference => " !",
        }
    }
}

/// A leaf criterion: one matcher invocation plus traversal modifiers.
#[derive(Debug, Clone)]
pub struct SelectionCriteria {
    /// Original textual form, kept for diagnostics.
    pub raw: String,
    /// Matcher name looked up in the [`MethodRegistry`](crate::selector::MethodRegistry).
    pub method: String,
    /// Extra arguments for the matcher; built-in methods take none.
    pub method_arguments: BTreeMap<String, String>,
    /// Pattern value handed to the matcher.
    pub value: String,
    /// `@` modifier: also select children and all their ancestors.
    pub childrens_parents: bool,
    /// Leading `+`: also select ancestors.
    pub parents: bool,
    /// Ancestor hop bound; unbounded if `None`.
    pub parents_depth: Option<u32>,
    /// Trailing `+`: also select descendants.
    pub children: bool,
    /// Descendant hop bound; unbounded if `None`.
    pub children_depth: Option<u32>,
    /// Check-node inclusion policy: any selected parent suffices (used for
    /// exclusions) instead of requiring full parent coverage.
    pub greedy: bool,
    /// Warn when this criterion matches nothing.
    pub expect_exists: bool,
}

impl SelectionCriteria {
    /// A bare criterion with no modifiers; `raw` is derived from the
    /// method and value.
    pub fn new(method: impl Into<String>, value: impl Into<String>) -> Self {
        let method = method.into();
        let value = value.into();
        Self {
            raw: format!("{method}:{value}"),
            method,
            method_arguments: BTreeMap::new(),
            value,
            childrens_parents: false,
            parents: false,
            parents_depth: None,
            children: false,
            children_depth: None,
            greedy: false,
            expect_exists: false,
        }
    }
}

/// A set-algebra combination of sub-specs.
#[derive(Debug, Clone)]
pub struct CompositeSpec {
    pub operator: SetOperator,
    pub components: Vec<SelectionSpec>,
    pub expect_exists: bool,
    pub raw: String,
}

/// A selection spec: either a concrete criterion or a composite combining
/// child results via set union/intersection/difference.
#[derive(Debug, Clone)]
pub enum SelectionSpec {
    Criteria(SelectionCriteria),
    Composite(CompositeSpec),
}

impl SelectionSpec {
    pub fn union(components: Vec<SelectionSpec>) -> Self {
        Self::composite(SetOperator::Union, components)
    }

    pub fn intersection(components: Vec<SelectionSpec>) -> Self {
        Self::composite(SetOperator::Intersection, components)
    }

    pub fn difference(components: Vec<SelectionSpec>) -> Self {
        Self::composite(SetOperator::Difference, components)
    }

    fn composite(operator: SetOperator, components: Vec<SelectionSpec>) -> Self {
        let raw = components
            .iter()
            .map(|c| c.raw())
            .collect::<Vec<_>>()
            .join(operator.join_separator());
        SelectionSpec::Composite(CompositeSpec {
            operator,
            components,
            expect_exists: false,
            raw,
        })
    }

    /// Original textual form for diagnostics.
    pub fn raw(&self) -> &str {
        match self {
            SelectionSpec::Criteria(c) => &c.raw,
            SelectionSpec::Composite(c) => &c.raw,
        }
    }

    pub fn expect_exists(&self) -> bool {
        match self {
            SelectionSpec::Criteria(c) => c.expect_exists,
            SelectionSpec::Composite(c) => c.expect_exists,
        }
    }
}
