use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use gridpath_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    dx.hypot(dy)
}

/// Remaining-cost estimate used by A*.
///
/// Both variants are admissible on a 4-connected grid with unit step
/// cost, so A* stays optimal with either; they differ in expansion order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    /// Estimated cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Point, to: Point) -> f64 {
        match self {
            Self::Manhattan => f64::from(manhattan(from, to)),
            Self::Euclidean => euclidean(from, to),
        }
    }

    /// Map a priority tag to a heuristic. Anything but `euclidean` means
    /// Manhattan.
    pub fn from_tag(tag: &str) -> Self {
        if tag == "euclidean" {
            Self::Euclidean
        } else {
            Self::Manhattan
        }
    }

    /// The tag naming this heuristic.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
        }
    }
}

impl FromStr for Heuristic {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
