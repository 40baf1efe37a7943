//! Position plus facing of a taxi at a node.

use std::fmt;

use cab_core::{Coord, Heading};

/// A node coordinate and the heading a taxi faces there.
///
/// Every node movement call returns a `Pose`; equality with the expected
/// pose is how the taxi detects that a move was granted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pose {
    pub at: Coord,
    pub heading: Heading,
}

impl Pose {
    #[inline]
    pub fn new(at: Coord, heading: Heading) -> Self {
        Self { at, heading }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facing {}", self.at, self.heading)
    }
}
