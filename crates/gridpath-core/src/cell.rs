//! What occupies a single grid cell.

use std::fmt;

/// The kind of a grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    Goal,
}

impl CellKind {
    /// Whether a search may step onto this cell.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// The character used for this kind in text maps.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::Goal => 'G',
        }
    }

    /// Parse a text-map character. Both `.` and space mean [`CellKind::Empty`].
    #[inline]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' | ' ' => Some(Self::Empty),
            '#' => Some(Self::Wall),
            'S' => Some(Self::Start),
            'G' => Some(Self::Goal),
            _ => None,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Wall => "wall",
            Self::Start => "start",
            Self::Goal => "goal",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_mapping_round_trips() {
        for kind in [CellKind::Empty, CellKind::Wall, CellKind::Start, CellKind::Goal] {
            assert_eq!(CellKind::from_char(kind.to_char()), Some(kind));
        }
        assert_eq!(CellKind::from_char(' '), Some(CellKind::Empty));
        assert_eq!(CellKind::from_char('x'), None);
    }

    #[test]
    fn only_walls_block() {
        assert!(CellKind::Empty.is_passable());
        assert!(CellKind::Start.is_passable());
        assert!(CellKind::Goal.is_passable());
        assert!(!CellKind::Wall.is_passable());
    }
}
