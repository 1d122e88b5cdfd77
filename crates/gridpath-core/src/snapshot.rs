//! The [`Snapshot`] type: a frozen 2D grid of [`CellKind`]s.
//!
//! A `Snapshot` is captured once when a search starts and never changes
//! afterwards. Cloning is cheap: all clones share the same immutable
//! backing buffer. Cells are addressed by [`Point`] or by a flat
//! [`CellKey`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::cell::CellKind;
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// CellKey
// ---------------------------------------------------------------------------

/// Flat, row-major index of a cell: `row * cols + col`.
///
/// Only meaningful together with the snapshot that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(pub usize);

impl CellKey {
    /// The underlying index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

// ---------------------------------------------------------------------------
// SnapshotError
// ---------------------------------------------------------------------------

/// Errors that can occur when building a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The grid has no rows or no columns.
    Empty,
    /// A row's width differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A text map contains a character with no [`CellKind`] meaning.
    InvalidCell { ch: char, pos: Point },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("snapshot: grid is empty"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "snapshot: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidCell { ch, pos } => {
                write!(f, "snapshot: invalid cell \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// An immutable rows × cols grid of [`CellKind`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    cells: Arc<[CellKind]>,
    bounds: Range,
}

impl Snapshot {
    /// Build a snapshot from rows of cells.
    ///
    /// Every row must have the same, non-zero width.
    pub fn from_rows(rows: Vec<Vec<CellKind>>) -> Result<Self, SnapshotError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(SnapshotError::Empty);
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, r) in rows.into_iter().enumerate() {
            if r.len() != width {
                return Err(SnapshotError::Ragged {
                    row,
                    expected: width,
                    found: r.len(),
                });
            }
            cells.extend(r);
        }
        Ok(Self {
            cells: cells.into(),
            bounds: Range::new(0, 0, width as i32, height as i32),
        })
    }

    /// Parse a text map: one row per line, `.`/space = empty, `#` = wall,
    /// `S` = start, `G` = goal.
    ///
    /// Leading and trailing blank lines are ignored.
    pub fn parse(s: &str) -> Result<Self, SnapshotError> {
        let lines: Vec<&str> = s.lines().collect();
        let first = lines.iter().position(|l| !l.trim().is_empty());
        let last = lines.iter().rposition(|l| !l.trim().is_empty());
        let (Some(first), Some(last)) = (first, last) else {
            return Err(SnapshotError::Empty);
        };

        let mut rows = Vec::with_capacity(last - first + 1);
        for (y, line) in lines[first..=last].iter().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                let kind = CellKind::from_char(ch).ok_or(SnapshotError::InvalidCell {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                row.push(kind);
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// A `width` × `height` snapshot with every cell set to `kind`.
    ///
    /// Non-positive dimensions are clamped to 1.
    pub fn filled(width: i32, height: i32, kind: CellKind) -> Self {
        let w = width.max(1);
        let h = height.max(1);
        Self {
            cells: vec![kind; (w * h) as usize].into(),
            bounds: Range::new(0, 0, w, h),
        }
    }

    /// Return a copy of this snapshot with the cell at `p` replaced.
    ///
    /// The receiver is left untouched. Out-of-bounds points return an
    /// unchanged copy.
    pub fn with_cell(&self, p: Point, kind: CellKind) -> Self {
        let mut cells = self.cells.to_vec();
        if let Some(k) = self.key(p) {
            cells[k.index()] = kind;
        }
        Self {
            cells: cells.into(),
            bounds: self.bounds,
        }
    }

    /// The bounding range, always anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a snapshot has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat key of `p`, or `None` if `p` is out of bounds.
    #[inline]
    pub fn key(&self, p: Point) -> Option<CellKey> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(CellKey(p.y as usize * self.width() as usize + p.x as usize))
    }

    /// Inverse of [`key`](Self::key).
    #[inline]
    pub fn point(&self, key: CellKey) -> Point {
        let w = self.width() as usize;
        Point::new((key.0 % w) as i32, (key.0 / w) as i32)
    }

    /// The cell at `p`, or `None` if `p` is out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<CellKind> {
        self.key(p).map(|k| self.cells[k.index()])
    }

    /// Whether `p` is in bounds and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.at(p).is_some_and(CellKind::is_passable)
    }

    /// Position of the last cell of the given kind in row-major order.
    pub fn locate(&self, kind: CellKind) -> Option<Point> {
        self.cells
            .iter()
            .rposition(|&c| c == kind)
            .map(|i| self.point(CellKey(i)))
    }

    /// Row-major iterator over `(Point, CellKind)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellKind)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// The rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> + '_ {
        self.cells.chunks(self.width() as usize)
    }
}

impl FromStr for Snapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for kind in row {
                write!(f, "{}", kind.to_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Snapshot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Snapshot {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<CellKind>>::deserialize(deserializer)?;
        Snapshot::from_rows(rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "
S..#
.#..
...G
";

    #[test]
    fn parse_and_size() {
        let s = Snapshot::parse(ROOM).unwrap();
        assert_eq!(s.width(), 4);
        assert_eq!(s.height(), 3);
        assert_eq!(s.len(), 12);
        assert_eq!(s.at(Point::new(3, 0)), Some(CellKind::Wall));
        assert_eq!(s.at(Point::new(1, 1)), Some(CellKind::Wall));
        assert_eq!(s.at(Point::new(4, 0)), None);
    }

    #[test]
    fn locate_endpoints() {
        let s: Snapshot = ROOM.parse().unwrap();
        assert_eq!(s.locate(CellKind::Start), Some(Point::from_row_col(0, 0)));
        assert_eq!(s.locate(CellKind::Goal), Some(Point::from_row_col(2, 3)));
    }

    #[test]
    fn locate_prefers_last_in_row_major_order() {
        let s = Snapshot::parse("S.S\n...").unwrap();
        assert_eq!(s.locate(CellKind::Start), Some(Point::new(2, 0)));
        assert_eq!(s.locate(CellKind::Goal), None);
    }

    #[test]
    fn key_is_row_major_and_invertible() {
        let s = Snapshot::filled(5, 3, CellKind::Empty);
        assert_eq!(s.key(Point::new(0, 0)), Some(CellKey(0)));
        assert_eq!(s.key(Point::new(4, 0)), Some(CellKey(4)));
        assert_eq!(s.key(Point::new(0, 1)), Some(CellKey(5)));
        assert_eq!(s.key(Point::new(5, 0)), None);
        assert_eq!(s.key(Point::new(0, -1)), None);
        for p in s.bounds() {
            assert_eq!(s.point(s.key(p).unwrap()), p);
        }
    }

    #[test]
    fn passable_excludes_walls_and_out_of_bounds() {
        let s = Snapshot::parse(ROOM).unwrap();
        assert!(s.is_passable(Point::new(0, 0)));
        assert!(!s.is_passable(Point::new(3, 0)));
        assert!(!s.is_passable(Point::new(-1, 0)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Snapshot::parse("S..\n..\n..G").unwrap_err();
        assert_eq!(
            err,
            SnapshotError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn empty_and_invalid_input() {
        assert_eq!(Snapshot::parse("\n\n").unwrap_err(), SnapshotError::Empty);
        assert_eq!(Snapshot::from_rows(vec![]).unwrap_err(), SnapshotError::Empty);
        let err = Snapshot::parse("S.\n.x").unwrap_err();
        assert_eq!(
            err,
            SnapshotError::InvalidCell {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn with_cell_leaves_original_untouched() {
        let a = Snapshot::filled(3, 3, CellKind::Empty);
        let b = a.with_cell(Point::new(1, 1), CellKind::Wall);
        assert_eq!(a.at(Point::new(1, 1)), Some(CellKind::Empty));
        assert_eq!(b.at(Point::new(1, 1)), Some(CellKind::Wall));
    }

    #[test]
    fn display_renders_text_map() {
        let s = Snapshot::parse("S #\n..G").unwrap();
        assert_eq!(s.to_string(), "S.#\n..G");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn snapshot_serializes_as_rows() {
        let s = Snapshot::parse("S#\n.G").unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"[["start","wall"],["empty","goal"]]"#);
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn ragged_json_is_rejected() {
        let res: Result<Snapshot, _> = serde_json::from_str(r#"[["start"],["empty","goal"]]"#);
        assert!(res.is_err());
    }
}
