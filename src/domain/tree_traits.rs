//! Rendering of orbit trees as `termtree` trees for display.

use termtree::Tree;
use tracing::instrument;

use crate::domain::tree::{OrbitNode, OrbitTree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for OrbitNode {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self
            .children()
            .iter()
            .map(|child| child.to_tree_string())
            .collect();

        Tree::new(self.name().to_string()).with_leaves(leaves)
    }
}

impl TreeNodeConvert for OrbitTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        self.root().to_tree_string()
    }
}
