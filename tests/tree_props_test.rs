//! Property tests for orbit tree construction and queries.
//!
//! A plain child -> parent map serves as the reference model.

use std::collections::HashMap;

use proptest::prelude::*;
use proptest::sample::Index;

use orbitmap::domain::{DomainError, OrbitEdge, TreeBuilder};

fn name(idx: usize) -> String {
    if idx == 0 {
        "COM".to_string()
    } else {
        format!("N{idx}")
    }
}

/// `parents[i]` is the parent index of body `i + 1`; body 0 is the root.
fn tree_shape(max_bodies: usize) -> impl Strategy<Value = Vec<usize>> {
    (1..max_bodies).prop_flat_map(|n| (0..n).map(|i| 0..=i).collect::<Vec<_>>())
}

fn edges_for(parents: &[usize]) -> Vec<OrbitEdge> {
    parents
        .iter()
        .enumerate()
        .map(|(i, &parent)| OrbitEdge::new(name(parent), name(i + 1)))
        .collect()
}

fn shuffled_map() -> impl Strategy<Value = (Vec<usize>, Vec<OrbitEdge>)> {
    tree_shape(40).prop_flat_map(|parents| {
        let edges = edges_for(&parents);
        (Just(parents), Just(edges).prop_shuffle())
    })
}

/// Reference model: orbited body per body.
struct Reference {
    orbits: HashMap<String, String>,
}

impl Reference {
    fn new(parents: &[usize]) -> Self {
        let orbits = parents
            .iter()
            .enumerate()
            .map(|(i, &parent)| (name(i + 1), name(parent)))
            .collect();
        Self { orbits }
    }

    /// Bodies from the root down to `body`'s parent.
    fn ancestors(&self, body: &str) -> Vec<String> {
        let mut position = body.to_string();
        let mut chain = vec![];
        while let Some(object) = self.orbits.get(&position) {
            chain.push(object.clone());
            position = object.clone();
        }
        chain.reverse();
        chain
    }

    fn common_prefix(left: &[String], right: &[String]) -> usize {
        left.iter().zip(right).take_while(|(x, y)| x == y).count()
    }

    fn distance(&self, a: &str, b: &str) -> usize {
        let mut path_a = self.ancestors(a);
        path_a.push(a.to_string());
        let mut path_b = self.ancestors(b);
        path_b.push(b.to_string());
        path_a.len() + path_b.len() - 2 * Self::common_prefix(&path_a, &path_b)
    }

    /// Real transfer count between the bodies `a` and `b` orbit.
    fn transfers(&self, a: &str, b: &str) -> usize {
        let chain_a = self.ancestors(a);
        let chain_b = self.ancestors(b);
        chain_a.len() + chain_b.len() - 2 * Self::common_prefix(&chain_a, &chain_b)
    }

    fn is_ancestor(&self, ancestor: &str, body: &str) -> bool {
        self.ancestors(body).iter().any(|name| name == ancestor)
    }
}

proptest! {
    #[test]
    fn any_input_order_converges_to_same_tree((parents, shuffled) in shuffled_map()) {
        let sorted = TreeBuilder::default().edges(edges_for(&parents)).build().unwrap();
        let tree = TreeBuilder::default().edges(shuffled).build().unwrap();

        let mut expected: Vec<_> = sorted.edges();
        expected.sort();
        let mut actual: Vec<_> = tree.edges();
        actual.sort();

        prop_assert_eq!(tree.len(), parents.len() + 1);
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn checksum_equals_sum_of_reference_depths((parents, shuffled) in shuffled_map()) {
        let reference = Reference::new(&parents);
        let tree = TreeBuilder::default().edges(shuffled).build().unwrap();

        let expected: usize = (1..=parents.len())
            .map(|i| reference.ancestors(&name(i)).len())
            .sum();

        prop_assert_eq!(tree.checksum(), expected);
    }

    #[test]
    fn distance_matches_reference_and_is_symmetric(
        parents in tree_shape(40),
        a in any::<Index>(),
        b in any::<Index>(),
    ) {
        let reference = Reference::new(&parents);
        let tree = TreeBuilder::default().edges(edges_for(&parents)).build().unwrap();
        let a = name(a.index(parents.len() + 1));
        let b = name(b.index(parents.len() + 1));

        let expected = reference.distance(&a, &b);
        prop_assert_eq!(tree.distance(&a, &b), Some(expected));
        prop_assert_eq!(tree.distance(&b, &a), Some(expected));
        prop_assert_eq!(tree.distance(&a, &a), Some(0));
        prop_assert_eq!(tree.find_depth(&a), Some(reference.ancestors(&a).len()));
    }

    #[test]
    fn transfers_exact_only_when_neither_body_orbits_the_other(
        parents in tree_shape(40),
        a in any::<Index>(),
        b in any::<Index>(),
    ) {
        let reference = Reference::new(&parents);
        let tree = TreeBuilder::default().edges(edges_for(&parents)).build().unwrap();
        let a = name(a.index(parents.len() + 1));
        let b = name(b.index(parents.len() + 1));
        let distance = reference.distance(&a, &b);

        let related = a == b || reference.is_ancestor(&a, &b) || reference.is_ancestor(&b, &a);
        match tree.transfers(&a, &b) {
            Ok(transfers) if related => {
                // Ancestor/descendant pairs come out 2 short of the real count.
                prop_assert_eq!(transfers + 2, reference.transfers(&a, &b));
            }
            Ok(transfers) => prop_assert_eq!(transfers, reference.transfers(&a, &b)),
            Err(DomainError::NoTransferPath { distance: d, .. }) => {
                prop_assert!(related);
                prop_assert!(d < 2);
                prop_assert_eq!(d, distance);
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn transfers_along_a_chain_under_report_by_two(
        len in 3usize..30,
        upper in any::<Index>(),
        gap in any::<Index>(),
    ) {
        let parents: Vec<usize> = (0..len).collect();
        let tree = TreeBuilder::default().edges(edges_for(&parents)).build().unwrap();

        // pick an ancestor at depth i and a descendant at least 2 levels below
        let i = upper.index(len - 1);
        let j = i + 2 + gap.index(len + 1 - (i + 2));
        let (ancestor, descendant) = (name(i), name(j));
        let real = Reference::new(&parents).transfers(&ancestor, &descendant);

        prop_assert_eq!(real, j - i);
        prop_assert_eq!(tree.transfers(&ancestor, &descendant).unwrap(), real - 2);
    }
}
