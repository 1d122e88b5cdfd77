use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use gridpath_core::Point;

pub const UP: Point = Point::new(0, -1);
pub const DOWN: Point = Point::new(0, 1);
pub const LEFT: Point = Point::new(-1, 0);
pub const RIGHT: Point = Point::new(1, 0);

/// Fixed expansion order used by A*, whatever the configured priority.
pub const ASTAR_DIRECTIONS: [Point; 4] = [UP, DOWN, LEFT, RIGHT];

/// Tie-break order over the four cardinal directions for DFS and BFS.
///
/// When several neighbors are equally eligible, the one whose direction
/// comes first in [`directions`](Self::directions) is explored first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum DirectionOrder {
    /// Up, Left, Right, Down.
    #[default]
    TopLeft,
    /// Up, Right, Left, Down.
    TopRight,
    /// Down, Left, Right, Up.
    BottomLeft,
    /// Down, Right, Left, Up.
    BottomRight,
}

impl DirectionOrder {
    /// The direction offsets, highest priority first.
    pub const fn directions(self) -> [Point; 4] {
        match self {
            Self::TopLeft => [UP, LEFT, RIGHT, DOWN],
            Self::TopRight => [UP, RIGHT, LEFT, DOWN],
            Self::BottomLeft => [DOWN, LEFT, RIGHT, UP],
            Self::BottomRight => [DOWN, RIGHT, LEFT, UP],
        }
    }

    /// Map a priority tag to an order. Unknown tags (including `default`)
    /// select [`DirectionOrder::TopLeft`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "topRight" => Self::TopRight,
            "bottomLeft" => Self::BottomLeft,
            "bottomRight" => Self::BottomRight,
            _ => Self::TopLeft,
        }
    }

    /// The tag naming this order.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::TopLeft => "topLeft",
            Self::TopRight => "topRight",
            Self::BottomLeft => "bottomLeft",
            Self::BottomRight => "bottomRight",
        }
    }
}

impl FromStr for DirectionOrder {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl fmt::Display for DirectionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Reusable neighbor buffer.
///
/// Enumerates the cardinal neighbors of a point in a caller-given order,
/// filtered by a predicate, without allocating after the first call.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the neighbors `p + d` for each `d` in `dirs`, in that order,
    /// keeping only those for which `keep` returns `true`.
    pub fn ordered(
        &mut self,
        p: Point,
        dirs: &[Point; 4],
        keep: impl Fn(Point) -> bool,
    ) -> &[Point] {
        self.buf.clear();
        for &d in dirs {
            let n = p + d;
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_top_left() {
        assert_eq!(DirectionOrder::default(), DirectionOrder::TopLeft);
        assert_eq!(DirectionOrder::from_tag("default"), DirectionOrder::TopLeft);
        assert_eq!(DirectionOrder::from_tag("sideways"), DirectionOrder::TopLeft);
        assert_eq!(
            DirectionOrder::TopLeft.directions(),
            [UP, LEFT, RIGHT, DOWN]
        );
    }

    #[test]
    fn every_order_is_a_permutation() {
        for order in [
            DirectionOrder::TopLeft,
            DirectionOrder::TopRight,
            DirectionOrder::BottomLeft,
            DirectionOrder::BottomRight,
        ] {
            let mut dirs = order.directions().to_vec();
            dirs.sort();
            let mut all = ASTAR_DIRECTIONS.to_vec();
            all.sort();
            assert_eq!(dirs, all, "{order}");
            assert_eq!(DirectionOrder::from_tag(order.tag()), order);
        }
    }

    #[test]
    fn bottom_orders_start_downwards() {
        assert_eq!(DirectionOrder::BottomLeft.directions()[0], DOWN);
        assert_eq!(DirectionOrder::BottomRight.directions()[1], RIGHT);
        assert_eq!(DirectionOrder::TopRight.directions()[1], RIGHT);
    }

    #[test]
    fn ordered_filters_and_keeps_order() {
        let mut nb = Neighbors::new();
        let p = Point::new(0, 0);
        let dirs = DirectionOrder::TopLeft.directions();
        let got = nb.ordered(p, &dirs, |n| n.x >= 0 && n.y >= 0);
        assert_eq!(got, &[Point::new(1, 0), Point::new(0, 1)]);
    }
}
