//! orbitmap: builds an orbit tree from `A)B` relations and answers orbit
//! count checksum and orbital transfer queries.
//!
//! Layers, innermost first: [`domain`] (tree, edges, insertion driver),
//! [`application`] (services), [`infrastructure`] (I/O traits, wiring),
//! [`cli`] (arguments, dispatch, output).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
