//! Stepwise pathfinding on a grid snapshot.
//!
//! Every search here advances one pop-and-expand cycle per call, so a
//! renderer can animate it:
//!
//! - **DFS** with a configurable neighbour order ([`Dfs`])
//! - **BFS** with a configurable neighbour order ([`Bfs`])
//! - **A\*** with a Manhattan or Euclidean heuristic ([`Astar`])
//!
//! A [`SearchRun`] wraps one of these drivers, turns its steps into
//! [`SearchEvent`]s, plays back the found path, and honours cancellation
//! and delay changes through its [`RunHandle`].
//!
//! # Building blocks
//!
//! | Type | Role |
//! |---|---|
//! | [`Search`] | one step of a driver |
//! | [`Fringe`] | indexed min-heap with decrease-key (A* open set) |
//! | [`PathRecorder`] | parent pointers and path reconstruction |
//! | [`PathPlayer`] | replays a path start → goal |
//! | [`TickSource`] | waits between ticks ([`SleepTicks`], [`ManualTicks`]) |

mod astar;
mod bfs;
mod config;
mod dfs;
mod distance;
mod error;
mod fringe;
mod neighbors;
mod player;
mod recorder;
mod run;
mod ticks;
mod traits;

pub use astar::Astar;
pub use bfs::Bfs;
pub use config::{Algorithm, SearchConfig};
pub use dfs::Dfs;
pub use distance::{Heuristic, euclidean, manhattan};
pub use error::{Endpoint, SearchError};
pub use fringe::Fringe;
pub use neighbors::{ASTAR_DIRECTIONS, DirectionOrder, Neighbors};
pub use player::PathPlayer;
pub use recorder::PathRecorder;
pub use run::{RunHandle, SearchEvent, SearchRun, Tick};
pub use ticks::{ManualTicks, SleepTicks, TickSource};
pub use traits::{Search, StepResult};
