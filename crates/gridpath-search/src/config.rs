//! Search configuration: which algorithm, which tie-break or heuristic, and
//! how long to wait between steps.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use gridpath_core::{Point, Snapshot};

use crate::astar::Astar;
use crate::bfs::Bfs;
use crate::dfs::Dfs;
use crate::distance::Heuristic;
use crate::error::SearchError;
use crate::neighbors::DirectionOrder;
use crate::traits::Search;

/// The search algorithm to run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Algorithm {
    Dfs,
    #[default]
    Bfs,
    Astar,
}

impl Algorithm {
    /// The tag naming this algorithm.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Dfs => "dfs",
            Self::Bfs => "bfs",
            Self::Astar => "astar",
        }
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dfs" => Ok(Self::Dfs),
            "bfs" => Ok(Self::Bfs),
            "astar" => Ok(Self::Astar),
            other => Err(SearchError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Everything needed to start a search besides the grid.
///
/// `order` only matters for DFS and BFS, `heuristic` only for A*.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub order: DirectionOrder,
    pub heuristic: Heuristic,
    /// Delay between ticks in milliseconds; 0 means as fast as possible.
    pub delay_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            order: DirectionOrder::default(),
            heuristic: Heuristic::default(),
            delay_ms: 50,
        }
    }
}

impl SearchConfig {
    /// Build a configuration from the tags a UI would hand over.
    ///
    /// `priority` is read as a direction tag for `dfs`/`bfs` and as a
    /// heuristic tag for `astar`.
    pub fn from_tags(algorithm: &str, priority: &str, delay_ms: u64) -> Result<Self, SearchError> {
        let algorithm: Algorithm = algorithm.parse()?;
        let mut config = Self {
            algorithm,
            delay_ms,
            ..Self::default()
        };
        match algorithm {
            Algorithm::Dfs | Algorithm::Bfs => config.order = DirectionOrder::from_tag(priority),
            Algorithm::Astar => config.heuristic = Heuristic::from_tag(priority),
        }
        Ok(config)
    }

    /// Set the algorithm (builder).
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the DFS/BFS direction order (builder).
    pub fn with_order(mut self, order: DirectionOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the A* heuristic (builder).
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Set the tick delay (builder).
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// The tick delay as a [`Duration`].
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// The priority tag that applies to the configured algorithm.
    pub fn priority_tag(&self) -> &'static str {
        match self.algorithm {
            Algorithm::Dfs | Algorithm::Bfs => self.order.tag(),
            Algorithm::Astar => self.heuristic.tag(),
        }
    }

    /// Construct the driver for this configuration.
    pub fn build(&self, snapshot: &Snapshot, start: Point, goal: Point) -> Box<dyn Search + Send> {
        match self.algorithm {
            Algorithm::Dfs => Box::new(Dfs::new(snapshot, start, goal, self.order)),
            Algorithm::Bfs => Box::new(Bfs::new(snapshot, start, goal, self.order)),
            Algorithm::Astar => Box::new(Astar::new(snapshot, start, goal, self.heuristic)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_select_order_or_heuristic() {
        let c = SearchConfig::from_tags("dfs", "bottomRight", 10).unwrap();
        assert_eq!(c.algorithm, Algorithm::Dfs);
        assert_eq!(c.order, DirectionOrder::BottomRight);
        assert_eq!(c.delay(), Duration::from_millis(10));

        let c = SearchConfig::from_tags("astar", "euclidean", 0).unwrap();
        assert_eq!(c.algorithm, Algorithm::Astar);
        assert_eq!(c.heuristic, Heuristic::Euclidean);
        assert_eq!(c.priority_tag(), "euclidean");
    }

    #[test]
    fn unknown_priority_falls_back() {
        let c = SearchConfig::from_tags("bfs", "default", 0).unwrap();
        assert_eq!(c.order, DirectionOrder::TopLeft);
        let c = SearchConfig::from_tags("astar", "topLeft", 0).unwrap();
        assert_eq!(c.heuristic, Heuristic::Manhattan);
    }

    #[test]
    fn unknown_algorithm_is_an_error() {
        let err = SearchConfig::from_tags("dijkstra", "topLeft", 0).unwrap_err();
        assert_eq!(err, SearchError::UnknownAlgorithm("dijkstra".into()));
        assert!(err.to_string().contains("dijkstra"));
    }

    #[test]
    fn builders() {
        let c = SearchConfig::default()
            .with_algorithm(Algorithm::Astar)
            .with_heuristic(Heuristic::Euclidean)
            .with_order(DirectionOrder::TopRight)
            .with_delay_ms(0);
        assert_eq!(c.algorithm.to_string(), "astar");
        assert_eq!(c.order, DirectionOrder::TopRight);
        assert_eq!(c.delay(), Duration::ZERO);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_uses_tag_names() {
        let c = SearchConfig::from_tags("dfs", "bottomLeft", 25).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(
            json,
            r#"{"algorithm":"dfs","order":"bottomLeft","heuristic":"manhattan","delayMs":25}"#
        );
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c: SearchConfig = serde_json::from_str(r#"{"algorithm":"astar"}"#).unwrap();
        assert_eq!(c.algorithm, Algorithm::Astar);
        assert_eq!(c.delay_ms, 50);
    }
}
