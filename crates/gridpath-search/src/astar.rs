use gridpath_core::{CellKey, Point, Snapshot};

use crate::distance::Heuristic;
use crate::fringe::Fringe;
use crate::neighbors::{ASTAR_DIRECTIONS, Neighbors};
use crate::recorder::PathRecorder;
use crate::traits::{Search, StepResult};

/// Per-cell A* bookkeeping.
#[derive(Clone, Copy, Default)]
struct Node {
    /// Cost from the start, `None` until the cell is first reached.
    g: Option<u32>,
    /// `g` plus the heuristic estimate to the goal.
    f: f64,
    closed: bool,
}

/// A* search with unit step cost.
///
/// The goal is detected when it is extracted from the fringe, before it
/// would be expanded, so it is never reported as visited.
pub struct Astar {
    snapshot: Snapshot,
    start: Point,
    goal: Point,
    heuristic: Heuristic,
    open: Fringe<CellKey>,
    nodes: Vec<Node>,
    parents: PathRecorder,
    nbuf: Neighbors,
    visited_count: usize,
    done: Option<StepResult>,
}

impl Astar {
    /// Prepare a search from `start` to `goal`. Both must lie inside
    /// `snapshot`.
    pub fn new(snapshot: &Snapshot, start: Point, goal: Point, heuristic: Heuristic) -> Self {
        let mut nodes = vec![Node::default(); snapshot.len()];
        let mut open = Fringe::new();
        if let Some(sk) = snapshot.key(start) {
            let f = heuristic.estimate(start, goal);
            nodes[sk.index()] = Node {
                g: Some(0),
                f,
                closed: false,
            };
            open.insert_or_update(sk, f);
        }
        Self {
            snapshot: snapshot.clone(),
            start,
            goal,
            heuristic,
            open,
            nodes,
            parents: PathRecorder::new(snapshot),
            nbuf: Neighbors::new(),
            visited_count: 0,
            done: None,
        }
    }

    /// Number of cells currently waiting in the fringe.
    pub fn open_len(&self) -> usize {
        self.open.len()
    }
}

impl Search for Astar {
    fn step(&mut self) -> StepResult {
        if let Some(done) = self.done {
            return done;
        }
        let Some((ck, _)) = self.open.extract_min() else {
            return *self.done.insert(StepResult::Exhausted);
        };
        let current = self.snapshot.point(ck);
        if current == self.goal {
            return *self.done.insert(StepResult::Found(current));
        }

        self.nodes[ck.index()].closed = true;
        self.visited_count += 1;
        let tentative_g = self.nodes[ck.index()].g.unwrap_or(0) + 1;

        let snapshot = &self.snapshot;
        let neighbors = self
            .nbuf
            .ordered(current, &ASTAR_DIRECTIONS, |n| snapshot.is_passable(n));
        for &np in neighbors {
            let Some(nk) = snapshot.key(np) else {
                continue;
            };
            let node = &mut self.nodes[nk.index()];
            if node.closed {
                continue;
            }
            if node.g.is_some_and(|g| tentative_g >= g) {
                continue;
            }
            node.g = Some(tentative_g);
            node.f = f64::from(tentative_g) + self.heuristic.estimate(np, self.goal);
            self.parents.record(nk, ck);
            self.open.insert_or_update(nk, node.f);
        }

        StepResult::Visited(current)
    }

    fn parents(&self) -> &PathRecorder {
        &self.parents
    }

    fn start(&self) -> Point {
        self.start
    }

    fn goal(&self) -> Point {
        self.goal
    }

    fn visited_count(&self) -> usize {
        self.visited_count
    }
}
