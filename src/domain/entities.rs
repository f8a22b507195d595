//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Delimiter between the orbited body and its orbiter: `COM)B`.
pub const ORBIT_DELIMITER: char = ')';

/// Default name of the universal center of mass.
pub const DEFAULT_ROOT: &str = "COM";

/// A single orbit relation read from the map, `parent)child`.
///
/// Transient: lives in the edge buffer until it is attached to the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrbitEdge {
    /// The orbiting body
    pub child: String,
    /// The body being orbited
    pub parent: String,
}

impl OrbitEdge {
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            child: child.into(),
            parent: parent.into(),
        }
    }

    /// Parse one map line of the form `PARENT)CHILD`.
    ///
    /// A trailing `\r` is tolerated. Names are taken verbatim otherwise:
    /// no trimming, no case folding.
    pub fn parse(line: &str) -> Result<Self, DomainError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let malformed = |reason| DomainError::MalformedLine {
            line: line.to_string(),
            reason,
        };

        let (parent, child) = line
            .split_once(ORBIT_DELIMITER)
            .ok_or_else(|| malformed("missing ')' delimiter"))?;

        if child.contains(ORBIT_DELIMITER) {
            return Err(malformed("more than one ')' delimiter"));
        }
        if parent.is_empty() {
            return Err(malformed("empty parent name"));
        }
        if child.is_empty() {
            return Err(malformed("empty child name"));
        }

        Ok(Self::new(parent, child))
    }
}

impl FromStr for OrbitEdge {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OrbitEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.parent, ORBIT_DELIMITER, self.child)
    }
}
