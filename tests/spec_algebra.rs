use std::collections::HashSet;

use dagsel::graph::Graph;
use dagsel::manifest::Manifest;
use dagsel::selector::{NodeSelector, SelectionCriteria, SelectionSpec};
use dagsel_test_utils::builders::{NodeConfigBuilder, ProjectFileBuilder};
use dagsel_test_utils::init_tracing;

fn ids(names: &[&str]) -> HashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// model_a -> model_b, t1 depends_on {model_a, model_b}.
fn two_model_project() -> (Manifest, Graph) {
    ProjectFileBuilder::new()
        .with_node("model_a", NodeConfigBuilder::model().build())
        .with_node("model_b", NodeConfigBuilder::model().depends_on("model_a").build())
        .with_node(
            "t1",
            NodeConfigBuilder::test()
                .depends_on("model_a")
                .depends_on("model_b")
                .build(),
        )
        .build_manifest_and_graph()
}

fn leaf(value: &str) -> SelectionSpec {
    SelectionSpec::Criteria(SelectionCriteria::new("name", value))
}

fn greedy_leaf(value: &str) -> SelectionSpec {
    let mut criteria = SelectionCriteria::new("name", value);
    criteria.greedy = true;
    SelectionSpec::Criteria(criteria)
}

#[test]
fn difference_drops_check_node_promoted_on_the_left() {
    init_tracing();
    // (model_a ∪ model_b) promotes t1; excluding model_b greedily must
    // drop t1 again, because one of its subjects is no longer selected.
    let (manifest, graph) = two_model_project();
    let selector = NodeSelector::new(&graph, &manifest).unwrap();

    let spec = SelectionSpec::difference(vec![
        SelectionSpec::union(vec![leaf("model_a"), leaf("model_b")]),
        greedy_leaf("model_b"),
    ]);
    let selected = selector.select_nodes(&spec).unwrap();

    assert_eq!(selected.direct, ids(&["model_a"]));
    // No orphans: every direct check node has all parents in the output.
    for id in &selected.direct {
        let member = manifest.member(id).unwrap();
        if member.resource_kind.can_select_indirectly() {
            assert!(member.depends_on.iter().all(|p| selected.direct.contains(p)));
        }
    }
}

#[test]
fn difference_is_left_associative() {
    init_tracing();
    let (manifest, graph) = ProjectFileBuilder::new()
        .with_node("a", NodeConfigBuilder::model().build())
        .with_node("b", NodeConfigBuilder::model().build())
        .with_node("c", NodeConfigBuilder::model().build())
        .build_manifest_and_graph();
    let selector = NodeSelector::new(&graph, &manifest).unwrap();

    // (a ∪ b ∪ c) \ b \ c = {a}
    let spec = SelectionSpec::difference(vec![leaf("*"), leaf("b"), leaf("c")]);
    let selected = selector.select_nodes(&spec).unwrap();
    assert_eq!(selected.direct, ids(&["a"]));
}

#[test]
fn intersection_keeps_only_common_nodes_and_defers_their_checks() {
    init_tracing();
    let (manifest, graph) = ProjectFileBuilder::new()
        .with_node("model_a", NodeConfigBuilder::model().tag("nightly").build())
        .with_node(
            "model_b",
            NodeConfigBuilder::model()
                .depends_on("model_a")
                .tag("nightly")
                .tag("daily")
                .build(),
        )
        .with_node(
            "t1",
            NodeConfigBuilder::test()
                .depends_on("model_a")
                .depends_on("model_b")
                .build(),
        )
        .build_manifest_and_graph();
    let selector = NodeSelector::new(&graph, &manifest).unwrap();

    let spec = SelectionSpec::intersection(vec![
        SelectionSpec::Criteria(SelectionCriteria::new("tag", "nightly")),
        SelectionSpec::Criteria(SelectionCriteria::new("tag", "daily")),
    ]);
    let selected = selector.select_nodes(&spec).unwrap();

    // Only model_b carries both tags; t1 lost its model_a parent, so it
    // stays indirect-only.
    assert_eq!(selected.direct, ids(&["model_b"]));
    assert_eq!(selected.indirect_only, ids(&["t1"]));
}

#[test]
fn union_merges_indirect_availability_across_branches() {
    init_tracing();
    // t2 depends on models selected by two different branches; neither
    // branch alone can promote it, the union can.
    let (manifest, graph) = ProjectFileBuilder::new()
        .with_node("left", NodeConfigBuilder::model().tag("l").build())
        .with_node("right", NodeConfigBuilder::model().tag("r").build())
        .with_node(
            "t2",
            NodeConfigBuilder::test().depends_on("left").depends_on("right").build(),
        )
        .build_manifest_and_graph();
    let selector = NodeSelector::new(&graph, &manifest).unwrap();

    let spec = SelectionSpec::union(vec![
        SelectionSpec::Criteria(SelectionCriteria::new("tag", "l")),
        SelectionSpec::Criteria(SelectionCriteria::new("tag", "r")),
    ]);
    let selected = selector.select_nodes(&spec).unwrap();

    assert_eq!(selected.direct, ids(&["left", "right", "t2"]));
    assert!(selected.indirect_only.is_empty());
}

#[test]
fn non_greedy_exclusion_leaves_promoted_check_node_behind() {
    init_tracing();
    // Exclusions are greedy for a reason: subtracting model_b with a
    // non-greedy leaf removes model_b but not the already-promoted t1.
    let (manifest, graph) = two_model_project();
    let selector = NodeSelector::new(&graph, &manifest).unwrap();

    let spec = SelectionSpec::difference(vec![
        SelectionSpec::union(vec![leaf("model_a"), leaf("model_b")]),
        leaf("model_b"),
    ]);
    let selected = selector.select_nodes(&spec).unwrap();

    assert!(selected.direct.contains("t1"));
}
