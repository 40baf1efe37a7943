//! Compass heading used as the direction label on map edges and as the
//! facing of a taxi at a node.

use std::fmt;

/// One of the eight compass directions.  North is `+y`, east is `+x`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Heading {
    pub const ALL: [Heading; 8] = [
        Heading::North,
        Heading::NorthEast,
        Heading::East,
        Heading::SouthEast,
        Heading::South,
        Heading::SouthWest,
        Heading::West,
        Heading::NorthWest,
    ];

    /// Unit grid step `(dx, dy)` for this heading.
    pub fn step(self) -> (i32, i32) {
        match self {
            Heading::North     => (0, 1),
            Heading::NorthEast => (1, 1),
            Heading::East      => (1, 0),
            Heading::SouthEast => (1, -1),
            Heading::South     => (0, -1),
            Heading::SouthWest => (-1, -1),
            Heading::West      => (-1, 0),
            Heading::NorthWest => (-1, 1),
        }
    }

    /// Heading of the displacement `(dx, dy)`, judged by sign only.
    ///
    /// Returns `None` for the zero displacement.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Heading> {
        let (sx, sy) = (dx.signum(), dy.signum());
        Heading::ALL.into_iter().find(|h| h.step() == (sx, sy))
    }

    /// Compass bearing in degrees, clockwise from north.
    pub fn degrees(self) -> u16 {
        match self {
            Heading::North     => 0,
            Heading::NorthEast => 45,
            Heading::East      => 90,
            Heading::SouthEast => 135,
            Heading::South     => 180,
            Heading::SouthWest => 225,
            Heading::West      => 270,
            Heading::NorthWest => 315,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Heading::North     => "N",
            Heading::NorthEast => "NE",
            Heading::East      => "E",
            Heading::SouthEast => "SE",
            Heading::South     => "S",
            Heading::SouthWest => "SW",
            Heading::West      => "W",
            Heading::NorthWest => "NW",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
