//! Insertion driver: attaches buffered orbit edges to the tree in rounds.

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::entities::{OrbitEdge, DEFAULT_ROOT};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::OrbitTree;

/// Orbit edges waiting for their parent body to appear in the tree.
#[derive(Debug, Clone, Default)]
pub struct EdgeBuffer {
    pending: Vec<OrbitEdge>,
}

impl EdgeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edge: OrbitEdge) {
        self.pending.push(edge);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Insert every buffered edge into `tree`, retrying in rounds.
    ///
    /// Each round tries all pending edges once; failures are carried into the
    /// next round. A round that attaches nothing while edges remain means some
    /// parent is never introduced. Returns the number of rounds run.
    ///
    /// On error the buffer keeps every edge that was not attached, in order.
    #[instrument(level = "debug", skip_all, fields(pending = self.pending.len()))]
    pub fn attach_all(&mut self, tree: &mut OrbitTree) -> DomainResult<usize> {
        let mut rounds = 0;

        while !self.pending.is_empty() {
            rounds += 1;
            let before = self.pending.len();
            let mut deferred = Vec::new();
            let mut round = std::mem::take(&mut self.pending).into_iter();

            while let Some(edge) = round.next() {
                match tree.insert(&edge.parent, &edge.child) {
                    Ok(true) => {}
                    Ok(false) => deferred.push(edge),
                    Err(e) => {
                        deferred.push(edge);
                        deferred.extend(round);
                        self.pending = deferred;
                        return Err(e);
                    }
                }
            }

            debug!(
                "round {}: attached {}, deferred {}",
                rounds,
                before - deferred.len(),
                deferred.len()
            );

            let stalled = deferred.len() == before;
            self.pending = deferred;
            if stalled {
                let parents = self
                    .pending
                    .iter()
                    .map(|edge| edge.parent.clone())
                    .unique()
                    .sorted()
                    .collect();
                return Err(DomainError::UnresolvableParent {
                    parents,
                    pending: self.pending.len(),
                });
            }
        }

        Ok(rounds)
    }
}

impl Extend<OrbitEdge> for EdgeBuffer {
    fn extend<I: IntoIterator<Item = OrbitEdge>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}

impl FromIterator<OrbitEdge> for EdgeBuffer {
    fn from_iter<I: IntoIterator<Item = OrbitEdge>>(iter: I) -> Self {
        Self {
            pending: iter.into_iter().collect(),
        }
    }
}

/// Constructs an orbit tree from edges given in any order.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    root: String,
    buffer: EdgeBuffer,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl TreeBuilder {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            buffer: EdgeBuffer::new(),
        }
    }

    pub fn edge(mut self, edge: OrbitEdge) -> Self {
        self.buffer.push(edge);
        self
    }

    pub fn edges(mut self, edges: impl IntoIterator<Item = OrbitEdge>) -> Self {
        self.buffer.extend(edges);
        self
    }

    pub fn build(self) -> DomainResult<OrbitTree> {
        self.build_with_rounds().map(|(tree, _)| tree)
    }

    /// Build the tree and report how many insertion rounds it took.
    #[instrument(level = "debug", skip(self), fields(root = %self.root, edges = self.buffer.len()))]
    pub fn build_with_rounds(mut self) -> DomainResult<(OrbitTree, usize)> {
        let mut tree = OrbitTree::new(&self.root)?;
        let rounds = self.buffer.attach_all(&mut tree)?;
        debug!("built {} bodies in {} round(s)", tree.len(), rounds);
        Ok((tree, rounds))
    }
}
