//! Shared model for the gridpath demo.
//!
//! [`Board`] folds a run's [`SearchEvent`] stream into per-cell shades that
//! a renderer paints; [`Action`] maps keys to run controls.

use std::time::Duration;

use crossterm::event::KeyCode;
use gridpath_core::{CellKind, Point, Snapshot};
use gridpath_search::{SearchConfig, SearchEvent};

pub const DEFAULT_MAP: &str = "
S.........#..........
.######...#...#####..
......#...#.......#..
..#...#...#####...#..
..#...#.......#...#..
..#...#####...#...#..
..#...........#......
..#######...###..###.
........#..........G.";

/// How much one `+`/`-` press changes the delay.
pub const DELAY_STEP: Duration = Duration::from_millis(10);
pub const MAX_DELAY: Duration = Duration::from_millis(2000);

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// What a cell should look like.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shade {
    Empty,
    Wall,
    Start,
    Goal,
    Visited,
    Path,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Mark {
    #[default]
    None,
    Visited,
    Path,
}

/// The grid plus everything the event stream has painted onto it.
pub struct Board {
    snapshot: Snapshot,
    marks: Vec<Mark>,
    visited: usize,
    path_len: Option<usize>,
    outcome: Option<SearchEvent>,
}

impl Board {
    pub fn new(snapshot: Snapshot) -> Self {
        let marks = vec![Mark::None; snapshot.len()];
        Self {
            snapshot,
            marks,
            visited: 0,
            path_len: None,
            outcome: None,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Forget every mark, keeping the grid.
    pub fn reset(&mut self) {
        self.marks.fill(Mark::None);
        self.visited = 0;
        self.path_len = None;
        self.outcome = None;
    }

    /// Fold one event into the board.
    pub fn apply(&mut self, event: &SearchEvent) {
        match *event {
            SearchEvent::Visited { pos } => {
                self.visited += 1;
                self.mark(pos, Mark::Visited);
            }
            SearchEvent::Found { path_len } => self.path_len = Some(path_len),
            SearchEvent::PathStep { pos } => self.mark(pos, Mark::Path),
            e => self.outcome = Some(e),
        }
    }

    fn mark(&mut self, p: Point, mark: Mark) {
        if let Some(k) = self.snapshot.key(p) {
            self.marks[k.index()] = mark;
        }
    }

    /// The shade of `p`. Endpoints and walls keep their own look.
    pub fn shade(&self, p: Point) -> Shade {
        let Some(k) = self.snapshot.key(p) else {
            return Shade::Empty;
        };
        match self.snapshot.at(p) {
            Some(CellKind::Wall) => Shade::Wall,
            Some(CellKind::Start) => Shade::Start,
            Some(CellKind::Goal) => Shade::Goal,
            _ => match self.marks[k.index()] {
                Mark::None => Shade::Empty,
                Mark::Visited => Shade::Visited,
                Mark::Path => Shade::Path,
            },
        }
    }

    pub fn visited(&self) -> usize {
        self.visited
    }

    pub fn outcome(&self) -> Option<SearchEvent> {
        self.outcome
    }

    /// One-line summary shown under the grid.
    pub fn status(&self, config: &SearchConfig, delay: Duration) -> String {
        let state = match (self.outcome, self.path_len) {
            (Some(SearchEvent::NotFound), _) => "no path".to_string(),
            (Some(SearchEvent::Cancelled), _) => "cancelled".to_string(),
            (Some(_), Some(n)) => format!("path {n}"),
            (None, Some(n)) => format!("path {n}, playing"),
            _ => "searching".to_string(),
        };
        format!(
            "{}/{}  delay {}ms  visited {}  {state}",
            config.algorithm,
            config.priority_tag(),
            delay.as_millis(),
            self.visited,
        )
    }
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Faster,
    Slower,
    Restart,
}

impl Action {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Self::Faster),
            KeyCode::Char('-') => Some(Self::Slower),
            KeyCode::Char('r') => Some(Self::Restart),
            _ => None,
        }
    }

    /// The delay after applying this action to `delay`.
    pub fn adjust(self, delay: Duration) -> Duration {
        match self {
            Self::Faster => delay.saturating_sub(DELAY_STEP),
            Self::Slower => (delay + DELAY_STEP).min(MAX_DELAY),
            _ => delay,
        }
    }
}

pub const HELP: &str = "q/Esc quit  +/- speed  r restart";

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_search::SearchRun;

    #[test]
    fn default_map_is_solvable() {
        let s: Snapshot = DEFAULT_MAP.parse().unwrap();
        for alg in ["dfs", "bfs", "astar"] {
            let c = SearchConfig::from_tags(alg, "", 0).unwrap();
            let events = SearchRun::start(&s, &c).unwrap().collect_events();
            assert_eq!(events.last(), Some(&SearchEvent::PathComplete), "{alg}");
        }
    }

    #[test]
    fn board_paints_events() {
        let s = Snapshot::parse("S..\n.#.\n..G").unwrap();
        let c = SearchConfig::from_tags("bfs", "topLeft", 0).unwrap();
        let mut board = Board::new(s.clone());
        for e in SearchRun::start(&s, &c).unwrap() {
            board.apply(&e);
        }
        assert_eq!(board.outcome(), Some(SearchEvent::PathComplete));
        assert_eq!(board.shade(Point::new(0, 0)), Shade::Start);
        assert_eq!(board.shade(Point::new(1, 1)), Shade::Wall);
        assert_eq!(board.shade(Point::new(2, 2)), Shade::Goal);
        // BFS top-left goes right first, so the path runs along the top.
        assert_eq!(board.shade(Point::new(1, 0)), Shade::Path);
        assert_eq!(board.shade(Point::new(2, 0)), Shade::Path);
        assert_eq!(board.shade(Point::new(2, 1)), Shade::Path);
        assert_eq!(board.shade(Point::new(0, 1)), Shade::Visited);
        assert_eq!(board.visited(), 8);
        assert!(board.status(&c, Duration::from_millis(30)).ends_with("path 4"));

        board.reset();
        assert_eq!(board.shade(Point::new(1, 0)), Shade::Empty);
        assert_eq!(board.outcome(), None);
    }

    #[test]
    fn status_reports_outcome() {
        let s = Snapshot::parse("S#G").unwrap();
        let c = SearchConfig::from_tags("astar", "euclidean", 0).unwrap();
        let mut board = Board::new(s.clone());
        for e in SearchRun::start(&s, &c).unwrap() {
            board.apply(&e);
        }
        assert_eq!(
            board.status(&c, Duration::from_millis(50)),
            "astar/euclidean  delay 50ms  visited 1  no path"
        );
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(Action::from_key(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(Action::from_key(KeyCode::Char('r')), Some(Action::Restart));
        assert_eq!(Action::from_key(KeyCode::Char('x')), None);

        let d = Duration::from_millis(5);
        assert_eq!(Action::Faster.adjust(d), Duration::ZERO);
        assert_eq!(Action::Slower.adjust(d), Duration::from_millis(15));
        assert_eq!(Action::Slower.adjust(MAX_DELAY), MAX_DELAY);
        assert_eq!(Action::Quit.adjust(d), d);
    }
}
