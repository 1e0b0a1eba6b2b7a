//! Tests for subtotal aggregation

use alloctree::domain::{
    aggregate, distribute, subtotal_violations, Baseline, NodeId, RoundingPolicy, RowSpec,
    TreeArena,
};
use alloctree::util::testing::{init_test_setup, tree_of};

fn id(s: &str) -> NodeId {
    NodeId::new(s)
}

// root
// ├── g1
// │   ├── a (10)
// │   └── b (20)
// └── g2
//     └── c (30)
fn two_groups() -> TreeArena {
    tree_of(vec![RowSpec::group(
        "root",
        "Root",
        vec![
            RowSpec::group(
                "g1",
                "Group 1",
                vec![RowSpec::leaf("a", "A", 10.0), RowSpec::leaf("b", "B", 20.0)],
            ),
            RowSpec::group("g2", "Group 2", vec![RowSpec::leaf("c", "C", 30.0)]),
        ],
    )])
}

#[test]
fn given_built_tree_when_reading_subtotals_then_parents_sum_children() {
    init_test_setup();
    let tree = two_groups();

    assert_eq!(tree.value_of(&id("g1")), Some(30.0));
    assert_eq!(tree.value_of(&id("g2")), Some(30.0));
    assert_eq!(tree.value_of(&id("root")), Some(60.0));
    assert!(subtotal_violations(&tree, 0.01).is_empty());
}

#[test]
fn given_stale_subtotals_when_aggregating_then_every_parent_is_rederived() {
    init_test_setup();
    let tree = two_groups();
    let root_idx = tree.index_of(&id("root")).unwrap();

    let stale = distribute(&tree, root_idx, 120.0, &RoundingPolicy::default());
    assert!(!subtotal_violations(&stale, 0.01).is_empty());

    let reconciled = aggregate(&stale);

    assert!(subtotal_violations(&reconciled, 0.01).is_empty());
    assert_eq!(reconciled.value_of(&id("g1")), Some(30.0));
    assert_eq!(reconciled.value_of(&id("root")), Some(60.0));
}

#[test]
fn given_fractional_leaves_when_aggregating_twice_then_result_is_identical() {
    init_test_setup();
    let tree = tree_of(vec![
        RowSpec::group(
            "x",
            "X",
            vec![
                RowSpec::leaf("x1", "X1", 0.1),
                RowSpec::leaf("x2", "X2", 0.2),
                RowSpec::group("x3", "X3", vec![RowSpec::leaf("x31", "X31", 0.7)]),
            ],
        ),
        RowSpec::leaf("y", "Y", 1.05),
    ]);

    let once = aggregate(&tree);
    let twice = aggregate(&once);

    assert_eq!(Baseline::capture(&once), Baseline::capture(&twice));
}

#[test]
fn given_consistent_tree_when_aggregating_then_all_nodes_are_shared() {
    let tree = two_groups();

    let next = aggregate(&tree);

    for name in ["root", "g1", "g2", "a", "b", "c"] {
        assert!(next.shares_node_with(&tree, &id(name)), "{name} was copied");
    }
}

#[test]
fn given_stale_parent_when_checking_violations_then_reports_drift() {
    let tree = two_groups();
    let g2_idx = tree.index_of(&id("g2")).unwrap();

    // g2 -> 90 rewrites c to 90 as well, so only root is off
    let stale = distribute(&tree, g2_idx, 90.0, &RoundingPolicy::default());
    let violations = subtotal_violations(&stale, 0.01);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].id, id("root"));
    assert_eq!(violations[0].value, 60.0);
    assert_eq!(violations[0].children_sum, 120.0);
}

#[test]
fn given_empty_tree_when_aggregating_then_stays_empty() {
    let tree = TreeArena::new();
    let next = aggregate(&tree);
    assert!(next.is_empty());
    assert!(next.roots().is_empty());
}
