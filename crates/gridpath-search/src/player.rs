use gridpath_core::Point;

/// Replays a found path from start to goal, one cell per frame.
///
/// Built from the goal → start sequence a search produces. The start and
/// goal cells themselves are not replayed, only the cells between them.
#[derive(Debug, Clone)]
pub struct PathPlayer {
    cells: Vec<Point>,
    next: usize,
}

impl PathPlayer {
    /// Prepare playback of `goal_to_start`.
    pub fn new(mut goal_to_start: Vec<Point>) -> Self {
        goal_to_start.reverse();
        let cells = if goal_to_start.len() > 2 {
            goal_to_start[1..goal_to_start.len() - 1].to_vec()
        } else {
            Vec::new()
        };
        Self { cells, next: 0 }
    }

    /// Number of frames not yet played.
    pub fn remaining(&self) -> usize {
        self.cells.len() - self.next
    }
}

impl Iterator for PathPlayer {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let p = self.cells.get(self.next).copied()?;
        self.next += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for PathPlayer {}
