//! Grid types shared by the gridpath search engine.
//!
//! This crate provides geometry primitives, cell kinds, and the frozen
//! [`Snapshot`] a search reads from.

pub mod cell;
pub mod geom;
pub mod snapshot;

pub use cell::CellKind;
pub use geom::{Point, Range};
pub use snapshot::{CellKey, Snapshot, SnapshotError};
