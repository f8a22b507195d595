//! Orbit map service
//!
//! Reads orbit maps, builds the orbit tree and answers the checksum and
//! transfer queries.

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{DomainError, OrbitEdge, OrbitTree, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Argument value that selects standard input.
pub const STDIN_MARKER: &str = "-";

/// A fully built orbit map.
#[derive(Debug, Clone)]
pub struct LoadedMap {
    pub tree: OrbitTree,
    /// Insertion rounds needed to attach every orbit
    pub rounds: usize,
}

/// Answers to the orbit map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbitReport {
    /// Total direct and indirect orbits
    pub checksum: usize,
    /// Orbital transfers between the configured bodies, when requested
    pub transfers: Option<usize>,
}

/// Structural overview of an orbit map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitSummary {
    pub root: String,
    pub bodies: usize,
    pub height: usize,
    pub leaves: usize,
    pub checksum: usize,
    pub rounds: usize,
}

/// Service for building and querying orbit maps.
pub struct OrbitService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl OrbitService {
    /// Create a new orbit service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Load an orbit map from `input`, or from stdin when it is `None` or `-`.
    pub fn load(&self, input: Option<&Path>) -> ApplicationResult<LoadedMap> {
        match input {
            Some(path) if path != Path::new(STDIN_MARKER) => self.load_file(path),
            _ => {
                debug!("load: reading orbit map from stdin");
                self.load_reader(io::stdin().lock())
            }
        }
    }

    /// Load an orbit map file.
    #[instrument(level = "debug", skip(self))]
    pub fn load_file(&self, path: &Path) -> ApplicationResult<LoadedMap> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::InputNotFound(path.to_path_buf()));
        }
        let content = match self.fs.read_to_string(path) {
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(ApplicationError::InvalidEncoding {
                    context: path.display().to_string(),
                    source: e,
                })
            }
            read => read.with_path_context("read orbit map", path)?,
        };
        self.load_str(&content)
    }

    /// Load an orbit map held in memory.
    pub fn load_str(&self, content: &str) -> ApplicationResult<LoadedMap> {
        self.load_reader(content.as_bytes())
    }

    /// Read every orbit from `reader`, then build the tree.
    ///
    /// All input is consumed before the first insertion, so a malformed line
    /// aborts before any tree exists.
    pub fn load_reader<R: BufRead>(&self, reader: R) -> ApplicationResult<LoadedMap> {
        let edges = self.read_edges(reader)?;
        self.build(edges)
    }

    /// Parse `PARENT)CHILD` lines into edges, reporting the first bad line.
    pub fn read_edges<R: BufRead>(&self, reader: R) -> ApplicationResult<Vec<OrbitEdge>> {
        let mut edges = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = match line {
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    return Err(ApplicationError::InvalidEncoding {
                        context: format!("line {}", idx + 1),
                        source: e,
                    })
                }
                line => line.with_context("read orbit map")?,
            };
            let edge = OrbitEdge::parse(&line).map_err(|source| ApplicationError::Line {
                line_no: idx + 1,
                source,
            })?;
            edges.push(edge);
        }
        debug!("read_edges: {} orbits", edges.len());
        Ok(edges)
    }

    /// Build the orbit tree rooted at the configured root body.
    #[instrument(level = "debug", skip_all, fields(edges = edges.len()))]
    pub fn build(&self, edges: Vec<OrbitEdge>) -> ApplicationResult<LoadedMap> {
        let (tree, rounds) = TreeBuilder::new(self.settings.root.as_str())
            .edges(edges)
            .build_with_rounds()?;
        info!("orbit map: {} bodies, {} round(s)", tree.len(), rounds);
        Ok(LoadedMap { tree, rounds })
    }

    /// Answer the checksum query and, if asked, the transfer query.
    ///
    /// Both answers are computed before returning so callers never print a
    /// partial report.
    pub fn report(&self, tree: &OrbitTree, with_transfers: bool) -> ApplicationResult<OrbitReport> {
        let checksum = tree.checksum();
        let transfers = if with_transfers {
            let transfer = &self.settings.transfer;
            Some(tree.transfers(&transfer.from, &transfer.to)?)
        } else {
            None
        };
        Ok(OrbitReport {
            checksum,
            transfers,
        })
    }

    /// Root-to-body chain for `name`.
    pub fn chain<'a>(&self, tree: &'a OrbitTree, name: &str) -> ApplicationResult<Vec<&'a str>> {
        tree.chain_to(name)
            .ok_or_else(|| DomainError::NotFound(name.to_string()).into())
    }

    pub fn summary(&self, map: &LoadedMap) -> OrbitSummary {
        OrbitSummary {
            root: map.tree.root().name().to_string(),
            bodies: map.tree.len(),
            height: map.tree.height(),
            leaves: map.tree.leaf_names().len(),
            checksum: map.tree.checksum(),
            rounds: map.rounds,
        }
    }
}
