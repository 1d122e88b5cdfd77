use std::fmt;

use gridpath_core::{Point, SnapshotError};

/// Which end of a search an error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Configuration errors, reported before any search step runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The snapshot has no start cell.
    MissingStart,
    /// The snapshot has no goal cell.
    MissingGoal,
    /// An explicitly given endpoint lies outside the grid.
    OutOfBounds { endpoint: Endpoint, pos: Point },
    /// The algorithm tag is not one of `dfs`, `bfs`, `astar`.
    UnknownAlgorithm(String),
    /// The grid itself could not be built.
    Snapshot(SnapshotError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => f.write_str("search: no start position on the grid"),
            Self::MissingGoal => f.write_str("search: no goal position on the grid"),
            Self::OutOfBounds { endpoint, pos } => {
                write!(f, "search: {endpoint} position {pos} is outside the grid")
            }
            Self::UnknownAlgorithm(tag) => write!(f, "search: unknown algorithm \u{201c}{tag}\u{201d}"),
            Self::Snapshot(e) => write!(f, "search: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Snapshot(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SnapshotError> for SearchError {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}
