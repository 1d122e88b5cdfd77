use gridpath_core::{CellKey, Point, Snapshot};

/// Parent-pointer map: for each discovered cell, the cell it was
/// discovered from.
///
/// Backed by a flat array indexed by [`CellKey`], one slot per grid cell.
#[derive(Debug, Clone)]
pub struct PathRecorder {
    snapshot: Snapshot,
    parents: Vec<Option<CellKey>>,
}

impl PathRecorder {
    /// An empty recorder sized for `snapshot`.
    pub fn new(snapshot: &Snapshot) -> Self {
        Self {
            snapshot: snapshot.clone(),
            parents: vec![None; snapshot.len()],
        }
    }

    /// Record that `child` was discovered from `parent`, replacing any
    /// earlier entry for `child`.
    #[inline]
    pub fn record(&mut self, child: CellKey, parent: CellKey) {
        self.parents[child.index()] = Some(parent);
    }

    /// The recorded parent of `key`, if any.
    #[inline]
    pub fn parent(&self, key: CellKey) -> Option<CellKey> {
        self.parents.get(key.index()).copied().flatten()
    }

    /// Number of cells that have a parent.
    pub fn len(&self) -> usize {
        self.parents.iter().filter(|p| p.is_some()).count()
    }

    /// Whether no parent has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.parents.iter().all(Option::is_none)
    }

    /// Walk parent pointers from `goal` back to the first cell without a
    /// parent (the start).
    ///
    /// The result runs goal → start, both included. An out-of-bounds goal
    /// yields an empty path. The walk visits at most one cell per grid
    /// cell, so a corrupted (cyclic) map returns a truncated path instead of
    /// looping.
    pub fn reconstruct(&self, goal: Point) -> Vec<Point> {
        let mut path = Vec::new();
        let Some(mut key) = self.snapshot.key(goal) else {
            return path;
        };
        path.push(goal);
        while let Some(parent) = self.parent(key) {
            if path.len() >= self.parents.len() {
                log::warn!("parent map walk from {goal} exceeded grid size, truncating");
                break;
            }
            path.push(self.snapshot.point(parent));
            key = parent;
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::CellKind;

    fn key(s: &Snapshot, x: i32, y: i32) -> CellKey {
        s.key(Point::new(x, y)).unwrap()
    }

    #[test]
    fn reconstruct_runs_goal_to_start() {
        let s = Snapshot::filled(3, 3, CellKind::Empty);
        let mut rec = PathRecorder::new(&s);
        rec.record(key(&s, 1, 0), key(&s, 0, 0));
        rec.record(key(&s, 1, 1), key(&s, 1, 0));
        rec.record(key(&s, 2, 1), key(&s, 1, 1));

        let path = rec.reconstruct(Point::new(2, 1));
        assert_eq!(
            path,
            vec![
                Point::new(2, 1),
                Point::new(1, 1),
                Point::new(1, 0),
                Point::new(0, 0)
            ]
        );
        assert_eq!(rec.len(), 3);
    }

    #[test]
    fn later_record_overwrites() {
        let s = Snapshot::filled(3, 1, CellKind::Empty);
        let mut rec = PathRecorder::new(&s);
        rec.record(key(&s, 1, 0), key(&s, 0, 0));
        rec.record(key(&s, 1, 0), key(&s, 2, 0));
        assert_eq!(rec.parent(key(&s, 1, 0)), Some(key(&s, 2, 0)));
    }

    #[test]
    fn goal_without_parent_is_a_single_cell_path() {
        let s = Snapshot::filled(2, 2, CellKind::Empty);
        let rec = PathRecorder::new(&s);
        assert!(rec.is_empty());
        assert_eq!(rec.reconstruct(Point::new(1, 1)), vec![Point::new(1, 1)]);
        assert!(rec.reconstruct(Point::new(5, 5)).is_empty());
    }

    #[test]
    fn cyclic_map_terminates() {
        let s = Snapshot::filled(2, 1, CellKind::Empty);
        let mut rec = PathRecorder::new(&s);
        rec.record(key(&s, 0, 0), key(&s, 1, 0));
        rec.record(key(&s, 1, 0), key(&s, 0, 0));
        let path = rec.reconstruct(Point::new(0, 0));
        assert_eq!(path.len(), 2);
    }
}
