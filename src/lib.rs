// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod manifest;
pub mod selector;
pub mod types;

use std::str::FromStr;

use anyhow::anyhow;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::errors::Result;
use crate::graph::GraphQueue;
use crate::selector::{parse_selection, NodeSelector};
use crate::types::{NodeId, ResourceKind};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - project loading
/// - graph + manifest construction
/// - spec parsing
/// - the node selector
/// - plain-stdout output (flat list, or execution waves with `--queue`)
pub fn run(args: CliArgs) -> Result<()> {
    let project = load_and_validate(&args.project)?;
    let manifest = project.manifest();
    let graph = project.graph();

    let kinds = parse_resource_kinds(&args.resource_kind)?;
    let selector = if kinds.is_empty() {
        NodeSelector::new(&graph, &manifest)?
    } else {
        NodeSelector::for_resource_kinds(&graph, &manifest, kinds)?
    };

    // No --select means "everything", subject to excludes and the filter.
    let select = if args.select.is_empty() {
        vec!["*".to_string()]
    } else {
        args.select.clone()
    };
    let spec = parse_selection(&select, &args.exclude, args.greedy)?;

    if args.queue {
        let queue = selector.get_graph_queue(&spec)?;
        print_queue(queue);
    } else {
        let mut names: Vec<NodeId> = selector.get_selected(&spec)?.into_iter().collect();
        names.sort();

        info!(count = names.len(), "selection complete");
        for name in names {
            println!("{name}");
        }
    }

    Ok(())
}

fn parse_resource_kinds(raw: &[String]) -> Result<Vec<ResourceKind>> {
    raw.iter()
        .map(|s| ResourceKind::from_str(s).map_err(|e| anyhow!(e).into()))
        .collect()
}

/// Drain the queue in waves: each wave is everything that is ready at the
/// same time, so the printout doubles as a parallelism preview.
fn print_queue(mut queue: GraphQueue) {
    let mut wave = 1usize;

    while !queue.is_complete() {
        let mut batch = Vec::new();
        while let Some(id) = queue.take_next() {
            batch.push(id);
        }
        if batch.is_empty() {
            break;
        }

        println!("wave {wave}:");
        for id in &batch {
            println!("  - {id}");
        }
        for id in batch {
            queue.mark_done(&id);
        }
        wave += 1;
    }
}
