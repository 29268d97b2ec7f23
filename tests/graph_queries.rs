use std::collections::HashSet;

use dagsel::errors::SelectorError;
use dagsel::graph::Graph;

fn ids(names: &[&str]) -> HashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Chain a -> b -> c -> d with an extra parent x -> c.
fn chain_graph() -> Graph {
    Graph::from_members(vec![
        ("a".to_string(), vec![]),
        ("b".to_string(), vec!["a".to_string()]),
        ("x".to_string(), vec![]),
        ("c".to_string(), vec!["b".to_string(), "x".to_string()]),
        ("d".to_string(), vec!["c".to_string()]),
    ])
}

#[test]
fn select_parents_unbounded_and_bounded() {
    let graph = chain_graph();

    assert_eq!(
        graph.select_parents(&ids(&["d"]), None),
        ids(&["a", "b", "c", "x"])
    );
    assert_eq!(graph.select_parents(&ids(&["d"]), Some(1)), ids(&["c"]));
    assert_eq!(
        graph.select_parents(&ids(&["d"]), Some(2)),
        ids(&["b", "c", "x"])
    );
}

#[test]
fn select_children_unbounded_and_bounded() {
    let graph = chain_graph();

    assert_eq!(
        graph.select_children(&ids(&["a"]), None),
        ids(&["b", "c", "d"])
    );
    assert_eq!(graph.select_children(&ids(&["a"]), Some(1)), ids(&["b"]));
}

#[test]
fn select_childrens_parents_covers_siblings_via_shared_child() {
    // a -> c, b -> c: selecting @a must surface b, the co-parent.
    let graph = Graph::from_members(vec![
        ("a".to_string(), vec![]),
        ("b".to_string(), vec![]),
        ("c".to_string(), vec!["a".to_string(), "b".to_string()]),
    ]);

    assert_eq!(
        graph.select_childrens_parents(&ids(&["a"])),
        ids(&["a", "b", "c"])
    );
}

#[test]
fn select_successors_is_a_single_hop() {
    let graph = chain_graph();

    // One edge past the frontier, not a transitive closure.
    assert_eq!(graph.select_successors(&ids(&["a"])), ids(&["b"]));
    assert_eq!(graph.select_successors(&ids(&["a", "b"])), ids(&["b", "c"]));
}

#[test]
fn subgraph_induces_edges_and_tolerates_unknown_ids() {
    let graph = chain_graph();

    let sub = graph.subgraph(&ids(&["a", "c", "d", "ghost"]));
    assert_eq!(sub.nodes(), ids(&["a", "c", "d"]));
    // b was dropped, so the a->b->c path disappears from the subgraph.
    assert!(sub.parents_of("c").is_empty());
    assert_eq!(sub.parents_of("d"), ["c".to_string()]);
    assert_eq!(sub.children_of("a").len(), 0);
}

#[test]
fn get_subset_graph_rejects_unknown_ids() {
    let graph = chain_graph();

    let err = graph.get_subset_graph(&ids(&["a", "ghost"])).unwrap_err();
    assert!(matches!(err, SelectorError::NodeNotInManifest(id) if id == "ghost"));

    let sub = graph.get_subset_graph(&ids(&["a", "b"])).unwrap();
    assert_eq!(sub.nodes(), ids(&["a", "b"]));
}
