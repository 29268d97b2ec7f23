// src/selector/methods.rs

//! Selection-method matchers and their registry.
//!
//! A criterion like `tag:nightly` names a *method* (`tag`) and a *value*
//! (`nightly`). The registry maps method names to [`MethodMatcher`]
//! implementations; the selector treats an unknown method name as a
//! recoverable, user-facing condition (empty match plus a diagnostic),
//! never a crash.

use std::collections::{BTreeMap, HashSet};

use globset::Glob;
use tracing::warn;

use crate::manifest::Manifest;
use crate::types::NodeId;

/// A matcher: given the candidate pool and a pattern value, return the
/// matching subset. Matchers are pure; they read the manifest and nothing
/// else.
pub trait MethodMatcher: std::fmt::Debug {
    fn search(
        &self,
        manifest: &Manifest,
        candidates: &HashSet<NodeId>,
        arguments: &BTreeMap<String, String>,
        value: &str,
    ) -> HashSet<NodeId>;
}

/// Lookup-by-name over the registered selection methods.
#[derive(Debug)]
pub struct MethodRegistry {
    methods: BTreeMap<String, Box<dyn MethodMatcher>>,
}

impl MethodRegistry {
    /// An empty registry, for embedders that supply their own methods.
    pub fn new() -> Self {
        Self {
            methods: BTreeMap::new(),
        }
    }

    /// The built-in methods: `name`, `tag`, `path`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("name", Box::new(NameMethod));
        registry.register("tag", Box::new(TagMethod));
        registry.register("path", Box::new(PathMethod));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, matcher: Box<dyn MethodMatcher>) {
        self.methods.insert(name.into(), matcher);
    }

    pub fn get(&self, name: &str) -> Option<&dyn MethodMatcher> {
        self.methods.get(name).map(|m| m.as_ref())
    }

    /// Registered method names, sorted (for the unknown-method diagnostic).
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Match a value that may be a literal or a glob against some text.
///
/// Values without wildcard characters compare as plain equality, so node
/// names containing glob metacharacters never need escaping in the common
/// case. A malformed glob logs and matches nothing.
fn value_matches(value: &str, text: &str) -> bool {
    if !value.contains(['*', '?', '[']) {
        return value == text;
    }
    match Glob::new(value) {
        Ok(glob) => glob.compile_matcher().is_match(text),
        Err(e) => {
            warn!(pattern = %value, error = %e, "invalid glob pattern in selection value");
            false
        }
    }
}

/// `name:` — matches the member's display name, literal or glob.
#[derive(Debug)]
struct NameMethod;

impl MethodMatcher for NameMethod {
    fn search(
        &self,
        manifest: &Manifest,
        candidates: &HashSet<NodeId>,
        _arguments: &BTreeMap<String, String>,
        value: &str,
    ) -> HashSet<NodeId> {
        candidates
            .iter()
            .filter(|id| {
                manifest
                    .member(id)
                    .is_some_and(|m| value_matches(value, &m.name))
            })
            .cloned()
            .collect()
    }
}

/// `tag:` — exact membership in the member's tag list.
#[derive(Debug)]
struct TagMethod;

impl MethodMatcher for TagMethod {
    fn search(
        &self,
        manifest: &Manifest,
        candidates: &HashSet<NodeId>,
        _arguments: &BTreeMap<String, String>,
        value: &str,
    ) -> HashSet<NodeId> {
        candidates
            .iter()
            .filter(|id| {
                manifest
                    .member(id)
                    .is_some_and(|m| m.tags.iter().any(|t| t == value))
            })
            .cloned()
            .collect()
    }
}

/// `path:` — glob match against the member's source path. Members without
/// a path (sources, exposures) never match.
#[derive(Debug)]
struct PathMethod;

impl MethodMatcher for PathMethod {
    fn search(
        &self,
        manifest: &Manifest,
        candidates: &HashSet<NodeId>,
        _arguments: &BTreeMap<String, String>,
        value: &str,
    ) -> HashSet<NodeId> {
        candidates
            .iter()
            .filter(|id| {
                manifest.member(id).is_some_and(|m| {
                    m.path
                        .as_deref()
                        .is_some_and(|path| value_matches(value, path))
                })
            })
            .cloned()
            .collect()
    }
}
