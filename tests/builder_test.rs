//! Tests for the round-based TreeBuilder / EdgeBuffer

use rstest::rstest;

use orbitmap::domain::{DomainError, EdgeBuffer, OrbitEdge, OrbitTree, TreeBuilder};

fn edges(lines: &[&str]) -> Vec<OrbitEdge> {
    lines.iter().map(|line| OrbitEdge::parse(line).unwrap()).collect()
}

fn sorted_edges(tree: &OrbitTree) -> Vec<(String, String)> {
    let mut pairs: Vec<_> = tree
        .edges()
        .into_iter()
        .map(|(parent, child)| (parent.to_string(), child.to_string()))
        .collect();
    pairs.sort();
    pairs
}

const EXAMPLE: [&str; 13] = [
    "COM)B", "B)C", "C)D", "D)E", "E)F", "B)G", "G)H", "D)I", "E)J", "J)K", "K)L", "K)YOU",
    "I)SAN",
];

// ============================================================
// Order independence
// ============================================================

#[test]
fn given_reversed_input_when_building_then_same_tree_as_sorted_input() {
    // Arrange
    let sorted = TreeBuilder::default().edges(edges(&EXAMPLE)).build().unwrap();
    let mut reversed = EXAMPLE.to_vec();
    reversed.reverse();

    // Act
    let (tree, rounds) = TreeBuilder::default()
        .edges(edges(&reversed))
        .build_with_rounds()
        .unwrap();

    // Assert
    assert_eq!(sorted_edges(&tree), sorted_edges(&sorted));
    assert_eq!(tree.checksum(), sorted.checksum());
    assert!(rounds > 1, "reversed input needs deferred rounds");
}

#[rstest]
#[case::rotated_by_3(3)]
#[case::rotated_by_7(7)]
#[case::rotated_by_12(12)]
fn given_rotated_input_when_building_then_converges(#[case] shift: usize) {
    let mut lines = EXAMPLE.to_vec();
    lines.rotate_left(shift);

    let tree = TreeBuilder::default().edges(edges(&lines)).build().unwrap();

    assert_eq!(tree.len(), EXAMPLE.len() + 1);
    assert_eq!(tree.transfers("YOU", "SAN").unwrap(), 4);
}

#[test]
fn given_custom_root_when_building_then_attaches_under_it() {
    let tree = TreeBuilder::new("SUN")
        .edge(OrbitEdge::new("EARTH", "MOON"))
        .edge(OrbitEdge::new("SUN", "EARTH"))
        .build()
        .unwrap();

    assert_eq!(tree.root().name(), "SUN");
    assert_eq!(tree.chain_to("MOON"), Some(vec!["SUN", "EARTH", "MOON"]));
}

// ============================================================
// Malformed maps
// ============================================================

#[test]
fn given_sole_orbit_around_unknown_body_when_building_then_unresolvable_parent() {
    let err = TreeBuilder::default()
        .edges(edges(&["X)Y"]))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::UnresolvableParent {
            parents: vec!["X".to_string()],
            pending: 1,
        }
    );
}

#[test]
fn given_wrong_root_when_building_then_unresolvable_parent() {
    let err = TreeBuilder::new("SUN").edges(edges(&EXAMPLE)).build().unwrap_err();
    assert!(matches!(err, DomainError::UnresolvableParent { pending: 13, .. }));
}

#[test]
fn given_cycle_detached_from_root_when_building_then_unresolvable_parent() {
    let err = TreeBuilder::default()
        .edges(edges(&["COM)A", "P)Q", "Q)P"]))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::UnresolvableParent {
            parents: vec!["P".to_string(), "Q".to_string()],
            pending: 2,
        }
    );
}

#[test]
fn given_cycle_through_root_when_building_then_duplicate_body() {
    let err = TreeBuilder::default()
        .edges(edges(&["COM)A", "A)COM"]))
        .build()
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateBody { ref name, .. } if name == "COM"));
}

#[test]
fn given_body_with_two_parents_when_building_then_duplicate_body() {
    let err = TreeBuilder::default()
        .edges(edges(&["COM)A", "COM)B", "A)C", "B)C"]))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::DuplicateBody {
            name: "C".to_string(),
            parent: "B".to_string(),
        }
    );
}

// ============================================================
// EdgeBuffer
// ============================================================

#[test]
fn given_buffer_when_attaching_then_drains_completely() {
    let mut buffer: EdgeBuffer = edges(&["A)B", "COM)A"]).into_iter().collect();
    let mut tree = OrbitTree::new("COM").unwrap();
    assert_eq!(buffer.len(), 2);

    let rounds = buffer.attach_all(&mut tree).unwrap();

    assert_eq!(rounds, 2);
    assert!(buffer.is_empty());
    assert!(tree.contains("B"));
}
