//! Orbit tree: an append-only rooted multiway tree keyed by body name.

use std::collections::HashSet;
use std::fmt;

use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

/// A body in the orbit map, owning every body that orbits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitNode {
    name: String,
    children: Vec<OrbitNode>,
}

impl fmt::Display for OrbitNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl OrbitNode {
    fn leaf(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct orbiters, in insertion order.
    pub fn children(&self) -> &[OrbitNode] {
        &self.children
    }

    /// Pre-order search for `parent`; appends `child` under the first match.
    fn attach(&mut self, parent: &str, child: &str) -> bool {
        if self.name == parent {
            self.children.push(OrbitNode::leaf(child));
            return true;
        }
        self.children
            .iter_mut()
            .any(|node| node.attach(parent, child))
    }

    /// Sum of `children * depth` over this subtree, descending one level per generation.
    ///
    /// Called with `depth = 1` on the root this yields the total number of
    /// direct and indirect orbits.
    pub fn weighted_node_count(&self, depth: usize) -> usize {
        self.children.len() * depth
            + self
                .children
                .iter()
                .map(|child| child.weighted_node_count(depth + 1))
                .sum::<usize>()
    }

    /// Number of edges from this node down to `target`, if it lives in this subtree.
    pub fn find_depth(&self, target: &str) -> Option<usize> {
        if self.name == target {
            return Some(0);
        }
        self.children
            .iter()
            .find_map(|child| child.find_depth(target))
            .map(|depth| depth + 1)
    }

    /// Number of edges on the path between `a` and `b` within this subtree.
    ///
    /// When both targets sit below the same child, the branch point is deeper
    /// and the search continues inside that child.
    pub fn distance(&self, a: &str, b: &str) -> Option<usize> {
        let mut depth_a = (self.name == a).then_some(0);
        let mut depth_b = (self.name == b).then_some(0);

        if let (Some(da), Some(db)) = (depth_a, depth_b) {
            return Some(da + db);
        }

        for child in &self.children {
            let mut found_a_here = false;

            if depth_a.is_none() {
                depth_a = child.find_depth(a).map(|d| d + 1);
                found_a_here = depth_a.is_some();
            }

            if depth_b.is_none() {
                if let Some(d) = child.find_depth(b) {
                    if found_a_here {
                        return child.distance(a, b);
                    }
                    depth_b = Some(d + 1);
                }
            }

            if let (Some(da), Some(db)) = (depth_a, depth_b) {
                return Some(da + db);
            }
        }

        None
    }

    /// Pushes the names from this node down to `target` onto `path`.
    fn path_to<'a>(&'a self, target: &str, path: &mut Vec<&'a str>) -> bool {
        path.push(&self.name);
        if self.name == target || self.children.iter().any(|c| c.path_to(target, path)) {
            return true;
        }
        path.pop();
        false
    }
}

/// Rooted orbit tree.
///
/// Bodies are unique by name. The name index mirrors the node set so misses
/// and duplicate checks do not need a traversal.
#[derive(Debug, Clone)]
pub struct OrbitTree {
    root: OrbitNode,
    names: HashSet<String>,
}

impl OrbitTree {
    /// Create a tree containing only the root body.
    pub fn new(root_name: &str) -> DomainResult<Self> {
        if root_name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(Self {
            root: OrbitNode::leaf(root_name),
            names: HashSet::from([root_name.to_string()]),
        })
    }

    pub fn root(&self) -> &OrbitNode {
        &self.root
    }

    /// Number of bodies, root included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Attach `child` as a new leaf under `parent`.
    ///
    /// Returns `Ok(false)` without touching the tree when `parent` is not in it yet.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, parent: &str, child: &str) -> DomainResult<bool> {
        if child.is_empty() {
            return Err(DomainError::EmptyName);
        }
        if self.names.contains(child) {
            return Err(DomainError::DuplicateBody {
                name: child.to_string(),
                parent: parent.to_string(),
            });
        }
        if !self.names.contains(parent) {
            return Ok(false);
        }

        let attached = self.root.attach(parent, child);
        if attached {
            self.names.insert(child.to_string());
            trace!("attached {} to {}", child, parent);
        }
        Ok(attached)
    }

    /// Total count of direct and indirect orbits.
    #[instrument(level = "debug", skip(self))]
    pub fn checksum(&self) -> usize {
        self.root.weighted_node_count(1)
    }

    /// Edges from the root to `target`.
    pub fn find_depth(&self, target: &str) -> Option<usize> {
        self.root.find_depth(target)
    }

    /// Edges on the unique path between `a` and `b`.
    #[instrument(level = "debug", skip(self))]
    pub fn distance(&self, a: &str, b: &str) -> Option<usize> {
        self.root.distance(a, b)
    }

    /// Orbital transfers between the bodies `from` and `to` are orbiting,
    /// computed as `distance(from, to) - 2`.
    ///
    /// Only exact when neither body orbits the other, directly or indirectly.
    /// For an ancestor/descendant pair the result is 2 short of the real
    /// transfer count.
    #[instrument(level = "debug", skip(self))]
    pub fn transfers(&self, from: &str, to: &str) -> DomainResult<usize> {
        for name in [from, to] {
            if !self.contains(name) {
                return Err(DomainError::NotFound(name.to_string()));
            }
        }
        let distance = self
            .distance(from, to)
            .ok_or_else(|| DomainError::NotFound(format!("{from} / {to}")))?;

        distance
            .checked_sub(2)
            .ok_or_else(|| DomainError::NoTransferPath {
                from: from.to_string(),
                to: to.to_string(),
                distance,
            })
    }

    /// Names from the root down to `target`, both ends included.
    pub fn chain_to(&self, target: &str) -> Option<Vec<&str>> {
        let mut path = Vec::new();
        self.root.path_to(target, &mut path).then_some(path)
    }

    /// Pre-order traversal, children left to right.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Number of bodies on the longest root-to-leaf path.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        self.iter().map(|visit| visit.depth + 1).max().unwrap_or(0)
    }

    /// Names of all bodies nothing orbits.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|visit| visit.node.children.is_empty())
            .map(|visit| visit.node.name())
            .collect()
    }

    /// All `(parent, child)` relations in pre-order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.iter()
            .filter_map(|visit| visit.parent.map(|parent| (parent, visit.node.name())))
            .collect()
    }
}

/// One step of a pre-order traversal.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// Edges from the root
    pub depth: usize,
    /// Name of the orbited body, None for the root
    pub parent: Option<&'a str>,
    pub node: &'a OrbitNode,
}

pub struct Iter<'a> {
    stack: Vec<Visit<'a>>,
}

impl<'a> Iter<'a> {
    fn new(tree: &'a OrbitTree) -> Self {
        Self {
            stack: vec![Visit {
                depth: 0,
                parent: None,
                node: &tree.root,
            }],
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in visit.node.children.iter().rev() {
            self.stack.push(Visit {
                depth: visit.depth + 1,
                parent: Some(visit.node.name()),
                node: child,
            });
        }
        Some(visit)
    }
}
