use gridpath_core::Point;

use crate::recorder::PathRecorder;

/// Outcome of one [`Search::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// Work was done but nothing observable happened (e.g. a stale stack
    /// entry was skipped).
    Continue,
    /// The cell was expanded.
    Visited(Point),
    /// The goal was reached. Terminal.
    Found(Point),
    /// The fringe ran dry before the goal was reached. Terminal.
    Exhausted,
}

impl StepResult {
    /// Whether no further steps will do anything.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Found(_) | Self::Exhausted)
    }
}

/// A search algorithm driven one step at a time.
///
/// Each call to [`step`](Self::step) performs a single pop-and-expand
/// cycle and never blocks. Once a terminal result has been returned,
/// further calls return that same result and change nothing.
pub trait Search {
    /// Perform one unit of work.
    fn step(&mut self) -> StepResult;

    /// Parent pointers recorded so far.
    fn parents(&self) -> &PathRecorder;

    /// Where the search started.
    fn start(&self) -> Point;

    /// The cell being searched for.
    fn goal(&self) -> Point;

    /// Number of cells reported as [`StepResult::Visited`] so far.
    fn visited_count(&self) -> usize;

    /// Drive the search until it returns a terminal result.
    fn run_to_end(&mut self) -> StepResult {
        loop {
            let r = self.step();
            if r.is_terminal() {
                return r;
            }
        }
    }

    /// The goal → start path, once [`StepResult::Found`] has been returned.
    fn path(&self) -> Vec<Point> {
        self.parents().reconstruct(self.goal())
    }
}
