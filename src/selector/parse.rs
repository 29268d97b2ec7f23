// src/selector/parse.rs

//! Textual selection-spec grammar.
//!
//! One atom is `[@][N+][method:]value[+N]`:
//!
//! - `@`          also select children and all of their ancestors
//! - leading `+`  also select ancestors, optionally depth-bounded (`2+`)
//! - trailing `+` also select descendants, optionally depth-bounded (`+2`)
//! - `method:`    matcher name, defaulting to `name`
//!
//! Commas inside one argument intersect its atoms; multiple `--select`
//! arguments union; `--exclude` arguments subtract from the included set.
//! Exclusion criteria are always greedy: if an excluded node touches a
//! check node at all, the check node is dropped too.

use regex::Regex;

use crate::errors::{Result, SelectorError};
use crate::selector::spec::{SelectionCriteria, SelectionSpec};

const RAW_SELECTOR_PATTERN: &str = concat!(
    r"^(?P<childrens_parents>@)?",
    r"(?P<parents>(?P<parents_depth>\d*)\+)?",
    r"((?P<method>[\w.]+):)?",
    r"(?P<value>.*?)",
    r"(?P<children>\+(?P<children_depth>\d*))?$",
);

/// Parse one atom into a [`SelectionCriteria`].
pub fn parse_criteria(raw: &str, greedy: bool, expect_exists: bool) -> Result<SelectionCriteria> {
    let spec_err = |reason: &str| SelectorError::SpecParse {
        spec: raw.to_string(),
        reason: reason.to_string(),
    };

    let re = Regex::new(RAW_SELECTOR_PATTERN).map_err(|e| spec_err(&e.to_string()))?;
    let caps = re
        .captures(raw.trim())
        .ok_or_else(|| spec_err("does not match the selector grammar"))?;

    let value = caps
        .name("value")
        .map(|m| m.as_str())
        .unwrap_or_default()
        .to_string();
    if value.is_empty() {
        return Err(spec_err("selector has an empty value"));
    }

    let method = caps
        .name("method")
        .map(|m| m.as_str())
        .unwrap_or("name")
        .to_string();

    Ok(SelectionCriteria {
        raw: raw.to_string(),
        method,
        method_arguments: Default::default(),
        value,
        childrens_parents: caps.name("childrens_parents").is_some(),
        parents: caps.name("parents").is_some(),
        parents_depth: parse_depth(caps.name("parents_depth"), raw)?,
        children: caps.name("children").is_some(),
        children_depth: parse_depth(caps.name("children_depth"), raw)?,
        greedy,
        expect_exists,
    })
}

fn parse_depth(m: Option<regex::Match<'_>>, raw: &str) -> Result<Option<u32>> {
    let Some(m) = m else {
        return Ok(None);
    };
    if m.as_str().is_empty() {
        return Ok(None);
    }
    m.as_str()
        .parse::<u32>()
        .map(Some)
        .map_err(|e| SelectorError::SpecParse {
            spec: raw.to_string(),
            reason: format!("invalid traversal depth: {e}"),
        })
}

/// Build the spec tree for a whole invocation: included specs unioned,
/// excluded specs (if any) subtracted.
pub fn parse_selection(
    select: &[String],
    exclude: &[String],
    greedy: bool,
) -> Result<SelectionSpec> {
    let included = parse_union(select, greedy, true)?;
    if exclude.is_empty() {
        return Ok(included);
    }

    let excluded = parse_union(exclude, true, false)?;
    Ok(SelectionSpec::difference(vec![included, excluded]))
}

fn parse_union(args: &[String], greedy: bool, expect_exists: bool) -> Result<SelectionSpec> {
    let mut components = Vec::with_capacity(args.len());

    for arg in args {
        let atoms: Vec<SelectionSpec> = arg
            .split(',')
            .map(|atom| {
                parse_criteria(atom, greedy, expect_exists).map(SelectionSpec::Criteria)
            })
            .collect::<Result<_>>()?;

        if atoms.len() == 1 {
            components.extend(atoms);
        } else {
            components.push(SelectionSpec::intersection(atoms));
        }
    }

    Ok(SelectionSpec::union(components))
}
