//! The stepwise scheduler: [`SearchRun`], [`RunHandle`], [`Tick`] and
//! [`SearchEvent`].
//!
//! A `SearchRun` does not own a timer. Whoever drives it calls
//! [`tick`](SearchRun::tick), waits [`delay`](SearchRun::delay), and calls
//! again. Each tick performs one search step or one playback frame.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use gridpath_core::{CellKind, Point, Snapshot};

use crate::config::{Algorithm, SearchConfig};
use crate::error::{Endpoint, SearchError};
use crate::player::PathPlayer;
use crate::ticks::TickSource;
use crate::traits::{Search, StepResult};

// ---------------------------------------------------------------------------
// RunHandle (cancellation + live delay)
// ---------------------------------------------------------------------------

/// Shared control surface of a run: a cooperative cancellation flag and the
/// current inter-tick delay.
///
/// Clones refer to the same run and may live on other threads.
#[derive(Clone, Debug)]
pub struct RunHandle {
    cancelled: Arc<AtomicBool>,
    delay_ms: Arc<AtomicU64>,
}

impl RunHandle {
    fn new(delay: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            delay_ms: Arc::new(AtomicU64::new(delay.as_millis() as u64)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Request cancellation. Takes effect at the next tick.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// The delay to wait before the next tick.
    #[inline]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms.load(Ordering::Relaxed))
    }

    /// Change the delay. Only waits scheduled after this call see it.
    #[inline]
    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms
            .store(delay.as_millis() as u64, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// What a renderer gets to see of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "camelCase"))]
pub enum SearchEvent {
    /// A cell was expanded.
    Visited { pos: Point },
    /// The goal was reached; path playback follows.
    Found { path_len: usize },
    /// One cell of the found path, start side first.
    PathStep { pos: Point },
    /// Playback finished. Terminal.
    PathComplete,
    /// The reachable area was exhausted. Terminal.
    NotFound,
    /// The run was cancelled. Terminal.
    Cancelled,
}

impl SearchEvent {
    /// Whether no further events follow this one.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::PathComplete | Self::NotFound | Self::Cancelled)
    }
}

/// Result of one [`SearchRun::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Tick again after [`SearchRun::delay`]. Skip steps carry no event.
    Continue(Option<SearchEvent>),
    /// The run ended with this event.
    Finished(SearchEvent),
    /// The run had already ended; nothing happened.
    Idle,
}

// ---------------------------------------------------------------------------
// SearchRun
// ---------------------------------------------------------------------------

enum Phase {
    Searching(Box<dyn Search + Send>),
    Playing(PathPlayer),
    Done,
}

/// One search, from the first step to its terminal event.
///
/// Owns its driver, its playback state and its [`RunHandle`]. Nothing is
/// shared with other runs except the read-only snapshot.
pub struct SearchRun {
    phase: Phase,
    handle: RunHandle,
    algorithm: Algorithm,
    start: Point,
    goal: Point,
    visited: usize,
}

impl SearchRun {
    /// Start a search between the start and goal cells of `snapshot`.
    pub fn start(snapshot: &Snapshot, config: &SearchConfig) -> Result<Self, SearchError> {
        let start = snapshot
            .locate(CellKind::Start)
            .ok_or(SearchError::MissingStart)?;
        let goal = snapshot
            .locate(CellKind::Goal)
            .ok_or(SearchError::MissingGoal)?;
        Self::with_endpoints(snapshot, start, goal, config)
    }

    /// Start a search between explicit endpoints, ignoring the start and
    /// goal cells of `snapshot`.
    pub fn with_endpoints(
        snapshot: &Snapshot,
        start: Point,
        goal: Point,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        if !snapshot.contains(start) {
            return Err(SearchError::OutOfBounds {
                endpoint: Endpoint::Start,
                pos: start,
            });
        }
        if !snapshot.contains(goal) {
            return Err(SearchError::OutOfBounds {
                endpoint: Endpoint::Goal,
                pos: goal,
            });
        }
        log::debug!(
            "starting {} ({}) on {}x{} grid from {start} to {goal}",
            config.algorithm,
            config.priority_tag(),
            snapshot.width(),
            snapshot.height(),
        );
        Ok(Self {
            phase: Phase::Searching(config.build(snapshot, start, goal)),
            handle: RunHandle::new(config.delay()),
            algorithm: config.algorithm,
            start,
            goal,
            visited: 0,
        })
    }

    /// A handle for cancelling the run or changing its delay from elsewhere.
    pub fn handle(&self) -> RunHandle {
        self.handle.clone()
    }

    /// The delay to wait before the next tick.
    pub fn delay(&self) -> Duration {
        self.handle.delay()
    }

    /// Change the delay for subsequent ticks.
    pub fn set_delay(&self, delay: Duration) {
        self.handle.set_delay(delay);
    }

    /// The algorithm driving this run.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Start position.
    pub fn start_pos(&self) -> Point {
        self.start
    }

    /// Goal position.
    pub fn goal_pos(&self) -> Point {
        self.goal
    }

    /// Number of `Visited` events emitted so far.
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// Whether the terminal event has already been emitted.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Cancel the run now.
    ///
    /// Returns [`SearchEvent::Cancelled`] if the run was still active, or
    /// `None` if it had already finished.
    pub fn cancel(&mut self) -> Option<SearchEvent> {
        if self.is_finished() {
            return None;
        }
        self.handle.cancel();
        self.finish_cancelled();
        Some(SearchEvent::Cancelled)
    }

    /// Perform one step of the search or one frame of path playback.
    pub fn tick(&mut self) -> Tick {
        if self.is_finished() {
            return Tick::Idle;
        }
        if self.handle.is_cancelled() {
            self.finish_cancelled();
            return Tick::Finished(SearchEvent::Cancelled);
        }

        let (tick, next) = match &mut self.phase {
            Phase::Searching(search) => match search.step() {
                StepResult::Continue => (Tick::Continue(None), None),
                StepResult::Visited(pos) => {
                    log::trace!("visited {pos}");
                    self.visited += 1;
                    (Tick::Continue(Some(SearchEvent::Visited { pos })), None)
                }
                StepResult::Found(_) => {
                    let path = search.path();
                    let path_len = path.len().saturating_sub(1);
                    log::debug!(
                        "{} found a path of {path_len} steps after {} visits",
                        self.algorithm,
                        self.visited
                    );
                    (
                        Tick::Continue(Some(SearchEvent::Found { path_len })),
                        Some(Phase::Playing(PathPlayer::new(path))),
                    )
                }
                StepResult::Exhausted => {
                    log::debug!(
                        "{} exhausted the grid after {} visits, no path",
                        self.algorithm,
                        self.visited
                    );
                    (Tick::Finished(SearchEvent::NotFound), Some(Phase::Done))
                }
            },
            Phase::Playing(player) => match player.next() {
                Some(pos) => (Tick::Continue(Some(SearchEvent::PathStep { pos })), None),
                None => (Tick::Finished(SearchEvent::PathComplete), Some(Phase::Done)),
            },
            Phase::Done => (Tick::Idle, None),
        };
        if let Some(next) = next {
            self.phase = next;
        }
        tick
    }

    /// Drive the run to its end, waiting on `ticks` between ticks and
    /// passing every event to `on_event`.
    ///
    /// Returns the terminal event, or `None` if the run had already ended.
    pub fn run_with<T: TickSource>(
        &mut self,
        ticks: &mut T,
        mut on_event: impl FnMut(&SearchEvent),
    ) -> Option<SearchEvent> {
        loop {
            match self.tick() {
                Tick::Continue(event) => {
                    if let Some(event) = event {
                        on_event(&event);
                    }
                    ticks.wait(self.delay());
                }
                Tick::Finished(event) => {
                    on_event(&event);
                    return Some(event);
                }
                Tick::Idle => return None,
            }
        }
    }

    /// Run to the end without waiting and return every remaining event,
    /// terminal event included.
    pub fn collect_events(&mut self) -> Vec<SearchEvent> {
        self.by_ref().collect()
    }

    fn finish_cancelled(&mut self) {
        log::debug!(
            "{} cancelled after {} visits",
            self.algorithm,
            self.visited
        );
        self.phase = Phase::Done;
    }
}

/// Iterating a run yields its remaining events without waiting between
/// ticks; skip steps are passed over.
impl Iterator for SearchRun {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        loop {
            match self.tick() {
                Tick::Continue(Some(event)) | Tick::Finished(event) => return Some(event),
                Tick::Continue(None) => continue,
                Tick::Idle => return None,
            }
        }
    }
}
