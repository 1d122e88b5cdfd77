use std::collections::VecDeque;

use gridpath_core::{Point, Snapshot};

use crate::neighbors::{DirectionOrder, Neighbors};
use crate::recorder::PathRecorder;
use crate::traits::{Search, StepResult};

/// Breadth-first search over a FIFO queue.
///
/// Cells are marked visited when enqueued, so each enters the queue at most
/// once and the first discovery fixes its parent. The recorded path is a
/// shortest path in step count.
pub struct Bfs {
    snapshot: Snapshot,
    start: Point,
    goal: Point,
    dirs: [Point; 4],
    queue: VecDeque<Point>,
    visited: Vec<bool>,
    parents: PathRecorder,
    nbuf: Neighbors,
    visited_count: usize,
    found: bool,
    done: Option<StepResult>,
}

impl Bfs {
    /// Prepare a search from `start` to `goal`. Both must lie inside
    /// `snapshot`.
    pub fn new(snapshot: &Snapshot, start: Point, goal: Point, order: DirectionOrder) -> Self {
        let mut visited = vec![false; snapshot.len()];
        if let Some(k) = snapshot.key(start) {
            visited[k.index()] = true;
        }
        Self {
            snapshot: snapshot.clone(),
            start,
            goal,
            dirs: order.directions(),
            queue: VecDeque::from([start]),
            visited,
            parents: PathRecorder::new(snapshot),
            nbuf: Neighbors::new(),
            visited_count: 0,
            found: false,
            done: None,
        }
    }
}

impl Search for Bfs {
    fn step(&mut self) -> StepResult {
        if let Some(done) = self.done {
            return done;
        }
        if self.found {
            return *self.done.insert(StepResult::Found(self.goal));
        }
        let Some(current) = self.queue.pop_front() else {
            return *self.done.insert(StepResult::Exhausted);
        };
        self.visited_count += 1;

        if current == self.goal {
            self.found = true;
            return StepResult::Visited(current);
        }
        let Some(ck) = self.snapshot.key(current) else {
            return StepResult::Visited(current);
        };

        let snapshot = &self.snapshot;
        let neighbors = self
            .nbuf
            .ordered(current, &self.dirs, |n| snapshot.is_passable(n));
        for &n in neighbors {
            let Some(nk) = snapshot.key(n) else {
                continue;
            };
            if self.visited[nk.index()] {
                continue;
            }
            self.visited[nk.index()] = true;
            self.queue.push_back(n);
            self.parents.record(nk, ck);
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

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::CellKind;

    #[test]
    fn open_grid_shortest_path() {
        let s = Snapshot::filled(3, 3, CellKind::Empty);
        let goal = Point::from_row_col(2, 2);
        let mut bfs = Bfs::new(&s, Point::ZERO, goal, DirectionOrder::TopLeft);
        assert_eq!(bfs.run_to_end(), StepResult::Found(goal));
        let path = bfs.path();
        assert_eq!(path.len() - 1, 4);
        assert_eq!(path.first(), Some(&goal));
        assert_eq!(path.last(), Some(&Point::ZERO));
    }

    #[test]
    fn visits_in_waves() {
        let s = Snapshot::filled(3, 3, CellKind::Empty);
        let mut bfs = Bfs::new(
            &s,
            Point::ZERO,
            Point::from_row_col(2, 2),
            DirectionOrder::TopLeft,
        );
        let mut visited = Vec::new();
        while let StepResult::Visited(p) = bfs.step() {
            visited.push(p);
        }
        let depths: Vec<i32> = visited.iter().map(|p| p.x + p.y).collect();
        assert!(depths.windows(2).all(|w| w[0] <= w[1]), "{depths:?}");
        // Right is preferred over Down in the top-left order.
        assert_eq!(visited[1], Point::from_row_col(0, 1));
        assert_eq!(visited[2], Point::from_row_col(1, 0));
        assert_eq!(visited.len(), 9);
    }

    #[test]
    fn goal_is_visited_before_found() {
        let s = Snapshot::parse("SG").unwrap();
        let mut bfs = Bfs::new(&s, Point::new(0, 0), Point::new(1, 0), DirectionOrder::TopLeft);
        assert_eq!(bfs.step(), StepResult::Visited(Point::new(0, 0)));
        assert_eq!(bfs.step(), StepResult::Visited(Point::new(1, 0)));
        assert_eq!(bfs.step(), StepResult::Found(Point::new(1, 0)));
        assert_eq!(bfs.step(), StepResult::Found(Point::new(1, 0)));
        assert_eq!(bfs.path(), vec![Point::new(1, 0), Point::new(0, 0)]);
    }

    #[test]
    fn enclosed_goal_is_exhausted() {
        let s = Snapshot::parse(
            "
S....
..###
..#G#
..###",
        )
        .unwrap();
        let goal = s.locate(CellKind::Goal).unwrap();
        let mut bfs = Bfs::new(&s, Point::ZERO, goal, DirectionOrder::BottomRight);
        assert_eq!(bfs.run_to_end(), StepResult::Exhausted);
        assert_eq!(bfs.visited_count(), 11);
    }
}
