use gridpath_core::{Point, Snapshot};

use crate::neighbors::{DirectionOrder, Neighbors};
use crate::recorder::PathRecorder;
use crate::traits::{Search, StepResult};

/// Depth-first search over an explicit stack.
///
/// A cell may sit on the stack several times; stale copies are skipped
/// when popped. A neighbor's parent is written every time it is pushed,
/// so when a cell is pushed more than once before being expanded, the
/// last push wins. The reported path is therefore some valid path, not
/// necessarily the one the pop order suggests, and never guaranteed
/// shortest.
pub struct Dfs {
    snapshot: Snapshot,
    goal: Point,
    start: Point,
    dirs: [Point; 4],
    stack: Vec<Point>,
    visited: Vec<bool>,
    parents: PathRecorder,
    nbuf: Neighbors,
    visited_count: usize,
    found: bool,
    done: Option<StepResult>,
}

impl Dfs {
    /// Prepare a search from `start` to `goal`. Both must lie inside
    /// `snapshot`.
    pub fn new(snapshot: &Snapshot, start: Point, goal: Point, order: DirectionOrder) -> Self {
        Self {
            snapshot: snapshot.clone(),
            goal,
            start,
            dirs: order.directions(),
            stack: vec![start],
            visited: vec![false; snapshot.len()],
            parents: PathRecorder::new(snapshot),
            nbuf: Neighbors::new(),
            visited_count: 0,
            found: false,
            done: None,
        }
    }
}

impl Search for Dfs {
    fn step(&mut self) -> StepResult {
        if let Some(done) = self.done {
            return done;
        }
        if self.found {
            return *self.done.insert(StepResult::Found(self.goal));
        }
        let Some(current) = self.stack.pop() else {
            return *self.done.insert(StepResult::Exhausted);
        };
        let Some(ck) = self.snapshot.key(current) else {
            return StepResult::Continue;
        };
        if self.visited[ck.index()] {
            return StepResult::Continue;
        }

        self.visited[ck.index()] = true;
        self.visited_count += 1;

        if current == self.goal {
            self.found = true;
            return StepResult::Visited(current);
        }

        let snapshot = &self.snapshot;
        let visited = &self.visited;
        let neighbors = self.nbuf.ordered(current, &self.dirs, |n| {
            snapshot.is_passable(n) && snapshot.key(n).is_some_and(|k| !visited[k.index()])
        });
        // Reverse so the highest-priority direction ends on top.
        for &n in neighbors.iter().rev() {
            self.stack.push(n);
            if let Some(nk) = snapshot.key(n) {
                self.parents.record(nk, ck);
            }
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
