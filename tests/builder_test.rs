//! Tests for building the allocation forest from table rows

use rstest::rstest;

use alloctree::domain::{DomainError, NodeId, RowSpec, TableSpec, TreeBuilder};
use alloctree::util::testing::init_test_setup;

fn build(rows: Vec<RowSpec>) -> Result<alloctree::domain::TreeArena, DomainError> {
    init_test_setup();
    TreeBuilder::new().build(&TableSpec { rows })
}

#[test]
fn given_nested_rows_when_building_then_document_order_is_kept() {
    let tree = build(vec![
        RowSpec::group(
            "ops",
            "Operations",
            vec![
                RowSpec::leaf("rent", "Rent", 1200.0),
                RowSpec::leaf("power", "Power", 300.0),
            ],
        ),
        RowSpec::leaf("misc", "Misc", 50.0),
    ])
    .unwrap();

    let order: Vec<_> = tree
        .iter()
        .map(|(_, node, depth)| (node.id().as_str().to_string(), depth))
        .collect();
    assert_eq!(
        order,
        vec![
            ("ops".to_string(), 0),
            ("rent".to_string(), 1),
            ("power".to_string(), 1),
            ("misc".to_string(), 0),
        ]
    );
    assert_eq!(tree.roots().len(), 2);
    assert_eq!(tree.leaf_nodes().len(), 3);
}

#[test]
fn given_stated_group_value_when_building_then_children_sum_wins() {
    let mut ops = RowSpec::group(
        "ops",
        "Operations",
        vec![RowSpec::leaf("rent", "Rent", 1200.0)],
    );
    ops.value = 999.0;

    let tree = build(vec![ops]).unwrap();

    assert_eq!(tree.value_of(&NodeId::new("ops")), Some(1200.0));
}

#[test]
fn given_empty_children_list_when_building_then_row_is_leaf() {
    let mut row = RowSpec::group("solo", "Solo", vec![]);
    row.value = 42.0;

    let tree = build(vec![row]).unwrap();

    let node = tree.find(&NodeId::new("solo")).unwrap();
    assert!(node.is_leaf());
    assert_eq!(node.value, 42.0);
}

#[test]
fn given_repeated_id_when_building_then_duplicate_error() {
    let result = build(vec![RowSpec::group(
        "ops",
        "Operations",
        vec![
            RowSpec::leaf("rent", "Rent", 1.0),
            RowSpec::leaf("rent", "Rent again", 2.0),
        ],
    )]);

    assert!(matches!(result, Err(DomainError::DuplicateId(id)) if id == NodeId::new("rent")));
}

#[rstest]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::NEG_INFINITY)]
fn given_invalid_leaf_value_when_building_then_invalid_value(#[case] value: f64) {
    let result = build(vec![RowSpec::leaf("bad", "Bad", value)]);

    assert!(matches!(
        result,
        Err(DomainError::InvalidValue { id, .. }) if id == NodeId::new("bad")
    ));
}

#[rstest]
#[case("")]
#[case("   ")]
fn given_blank_id_when_building_then_empty_id(#[case] id: &str) {
    let result = build(vec![RowSpec::leaf(id, "Nameless", 1.0)]);

    assert!(matches!(result, Err(DomainError::EmptyId { label }) if label == "Nameless"));
}

#[test]
fn given_no_rows_when_building_then_empty_tree() {
    let tree = build(vec![]).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
}

#[test]
fn given_leaves_summing_past_f64_max_when_building_then_invalid_value() {
    let result = build(vec![RowSpec::group(
        "big",
        "Big",
        vec![
            RowSpec::leaf("x", "X", 1e308),
            RowSpec::leaf("y", "Y", 1e308),
        ],
    )]);

    assert!(matches!(
        result,
        Err(DomainError::InvalidValue { id, .. }) if id == NodeId::new("big")
    ));
}
