//! Domain layer: orbit tree, edges and the insertion driver
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod tree;
pub mod tree_traits;

pub use builder::{EdgeBuffer, TreeBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use tree::{OrbitNode, OrbitTree, Visit};
pub use tree_traits::TreeNodeConvert;
