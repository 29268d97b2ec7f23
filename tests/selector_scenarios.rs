use std::collections::HashSet;

use dagsel::graph::Graph;
use dagsel::manifest::Manifest;
use dagsel::selector::{NodeSelector, SelectionCriteria, SelectionSpec};
use dagsel::types::ResourceKind;
use dagsel_test_utils::builders::{NodeConfigBuilder, ProjectFileBuilder};
use dagsel_test_utils::init_tracing;

fn ids(names: &[&str]) -> HashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Graph: model_a -> model_b, check node t1 depends_on {model_a, model_b}.
fn two_model_project() -> (Manifest, Graph) {
    ProjectFileBuilder::new()
        .with_node("model_a", NodeConfigBuilder::model().path("models/model_a.sql").build())
        .with_node(
            "model_b",
            NodeConfigBuilder::model()
                .depends_on("model_a")
                .path("models/model_b.sql")
                .build(),
        )
        .with_node(
            "t1",
            NodeConfigBuilder::test()
                .depends_on("model_a")
                .depends_on("model_b")
                .build(),
        )
        .build_manifest_and_graph()
}

fn name_criterion(value: &str) -> SelectionCriteria {
    SelectionCriteria::new("name", value)
}

#[test]
fn partial_parent_coverage_defers_check_node() {
    init_tracing();
    // Selecting model_a alone must not run t1: its other subject, model_b,
    // was never selected. t1 is reported as indirect-only instead.
    let (manifest, graph) = two_model_project();
    let selector = NodeSelector::new(&graph, &manifest).unwrap();

    let spec = SelectionSpec::Criteria(name_criterion("model_a"));
    let selected = selector.select_nodes(&spec).unwrap();

    assert_eq!(selected.direct, ids(&["model_a"]));
    assert_eq!(selected.indirect_only, ids(&["t1"]));
}

#[test]
fn union_of_all_parents_promotes_check_node() {
    init_tracing();
    // A union covering both of t1's subjects promotes it into the direct
    // set during composite closure.
    let (manifest, graph) = two_model_project();
    let selector = NodeSelector::new(&graph, &manifest).unwrap();

    let spec = SelectionSpec::union(vec![
        SelectionSpec::Criteria(name_criterion("model_a")),
        SelectionSpec::Criteria(name_criterion("model_b")),
    ]);
    let selected = selector.select_nodes(&spec).unwrap();

    assert_eq!(selected.direct, ids(&["model_a", "model_b", "t1"]));
    assert!(selected.indirect_only.is_empty());
}

#[test]
fn greedy_promotes_check_node_despite_missing_parent() {
    init_tracing();
    let (manifest, graph) = two_model_project();
    let selector = NodeSelector::new(&graph, &manifest).unwrap();

    let mut criteria = name_criterion("model_a");
    criteria.greedy = true;
    let spec = SelectionSpec::Criteria(criteria);
    let selected = selector.select_nodes(&spec).unwrap();

    assert_eq!(selected.direct, ids(&["model_a", "t1"]));
    assert!(selected.indirect_only.is_empty());
}

#[test]
fn empty_match_with_expect_exists_is_not_an_error() {
    init_tracing();
    let (manifest, graph) = two_model_project();
    let selector = NodeSelector::new(&graph, &manifest).unwrap();

    let mut criteria = name_criterion("no_such_node");
    criteria.expect_exists = true;
    let spec = SelectionSpec::Criteria(criteria);

    let selected = selector.get_selected(&spec).unwrap();
    assert!(selected.is_empty());
}

#[test]
fn resource_kind_filter_restricts_final_selection() {
    init_tracing();
    let (manifest, graph) = ProjectFileBuilder::new()
        .with_node("raw_events", NodeConfigBuilder::source().build())
        .with_node(
            "model_a",
            NodeConfigBuilder::model().depends_on("raw_events").build(),
        )
        .build_manifest_and_graph();

    let selector =
        NodeSelector::for_resource_kinds(&graph, &manifest, [ResourceKind::Source]).unwrap();

    let spec = SelectionSpec::Criteria(name_criterion("*"));
    let selected = selector.get_selected(&spec).unwrap();

    assert_eq!(selected, ids(&["raw_events"]));
}

#[test]
fn unknown_method_is_recoverable_and_matches_nothing() {
    init_tracing();
    let (manifest, graph) = two_model_project();
    let selector = NodeSelector::new(&graph, &manifest).unwrap();

    let spec = SelectionSpec::Criteria(SelectionCriteria::new("no_such_method", "model_a"));
    let selected = selector.select_nodes(&spec).unwrap();

    assert!(selected.direct.is_empty());
    assert!(selected.indirect_only.is_empty());
}

#[test]
fn disabled_and_empty_members_are_never_selected() {
    init_tracing();
    let (manifest, graph) = ProjectFileBuilder::new()
        .with_node("model_a", NodeConfigBuilder::model().build())
        .with_node("model_off", NodeConfigBuilder::model().enabled(false).build())
        .with_node("model_hollow", NodeConfigBuilder::model().empty(true).build())
        .build_manifest_and_graph();

    let selector = NodeSelector::new(&graph, &manifest).unwrap();
    let spec = SelectionSpec::Criteria(name_criterion("*"));
    let selected = selector.get_selected(&spec).unwrap();

    assert_eq!(selected, ids(&["model_a"]));
}

#[test]
fn modifier_neighborhoods_follow_depth_bounds() {
    init_tracing();
    // Chain: a -> b -> c -> d.
    let (manifest, graph) = ProjectFileBuilder::new()
        .with_node("a", NodeConfigBuilder::model().build())
        .with_node("b", NodeConfigBuilder::model().depends_on("a").build())
        .with_node("c", NodeConfigBuilder::model().depends_on("b").build())
        .with_node("d", NodeConfigBuilder::model().depends_on("c").build())
        .build_manifest_and_graph();
    let selector = NodeSelector::new(&graph, &manifest).unwrap();

    // d with one level of ancestors.
    let mut criteria = name_criterion("d");
    criteria.parents = true;
    criteria.parents_depth = Some(1);
    let selected = selector
        .select_nodes(&SelectionSpec::Criteria(criteria))
        .unwrap();
    assert_eq!(selected.direct, ids(&["c", "d"]));

    // a with unbounded descendants.
    let mut criteria = name_criterion("a");
    criteria.children = true;
    let selected = selector
        .select_nodes(&SelectionSpec::Criteria(criteria))
        .unwrap();
    assert_eq!(selected.direct, ids(&["a", "b", "c", "d"]));
}

#[test]
fn tag_and_path_methods_match_member_metadata() {
    init_tracing();
    let (manifest, graph) = ProjectFileBuilder::new()
        .with_node(
            "model_a",
            NodeConfigBuilder::model()
                .tag("nightly")
                .path("models/staging/model_a.sql")
                .build(),
        )
        .with_node(
            "model_b",
            NodeConfigBuilder::model()
                .tag("daily")
                .path("models/marts/model_b.sql")
                .build(),
        )
        .build_manifest_and_graph();
    let selector = NodeSelector::new(&graph, &manifest).unwrap();

    let spec = SelectionSpec::Criteria(SelectionCriteria::new("tag", "nightly"));
    assert_eq!(selector.get_selected(&spec).unwrap(), ids(&["model_a"]));

    let spec = SelectionSpec::Criteria(SelectionCriteria::new("path", "models/marts/*.sql"));
    assert_eq!(selector.get_selected(&spec).unwrap(), ids(&["model_b"]));
}
