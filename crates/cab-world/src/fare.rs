//! The passenger object exchanged between nodes and taxis.

use cab_core::{Coord, Credits, FareId, Tick};

/// A fare: someone waiting at `origin` to be taken to `destination`.
///
/// A taxi holds a `Fare` only between a successful pickup at the origin node
/// and a successful drop-off at the destination node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fare {
    pub id: FareId,
    pub origin: Coord,
    pub destination: Coord,
    pub price: Credits,
    /// Tick at which the fare called for service.
    pub called_at: Tick,
}
