//! Bid evaluation.
//!
//! [`assess`] is a pure function of its [`BidInput`]: the taxi plans the two
//! legs, converts them to tick costs with [`leg_cost`], and hands over a
//! snapshot of its own state.  Nothing here touches the world.

use cab_core::{Credits, Tick};
use cab_map::Route;

/// Flat estimate of ticks spent per route waypoint.
pub const TICKS_PER_WAYPOINT: u64 = 2;

/// Time cost of driving `route`, or `None` when the route is empty
/// (unreachable).
pub fn leg_cost(route: &Route) -> Option<u64> {
    (!route.is_empty()).then(|| route.len() as u64 * TICKS_PER_WAYPOINT)
}

/// Everything the bid decision depends on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BidInput {
    pub offered_at:           Tick,
    pub now:                  Tick,
    pub price:                Credits,
    pub max_wait:             u64,
    pub balance:              Credits,
    pub carrying_passenger:   bool,
    pub holds_allocated_fare: bool,
    /// Cost of the leg from the taxi to the fare's origin.
    pub time_to_origin:       Option<u64>,
    /// Cost of the leg from the origin to the destination.
    pub time_to_destination:  Option<u64>,
}

/// Outcome of each bid criterion.  Bid only when all hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BidAssessment {
    /// No passenger aboard and no other fare allocated.
    pub available:       bool,
    /// Balance covers the drive to the origin.
    pub affordable:      bool,
    /// Price exceeds the cost of both legs.
    pub profitable:      bool,
    /// The fare has not waited `max_wait` ticks yet.
    pub still_waiting:   bool,
    /// Enough patience remains for the drive to the origin.
    pub arrives_in_time: bool,
}

impl BidAssessment {
    pub fn should_bid(&self) -> bool {
        self.available
            && self.affordable
            && self.profitable
            && self.still_waiting
            && self.arrives_in_time
    }
}

/// Evaluate an offer.
///
/// An unreachable leg (`None`) fails every criterion that depends on it.
pub fn assess(input: &BidInput) -> BidAssessment {
    let elapsed = i128::from(input.now.since(input.offered_at));
    let max_wait = i128::from(input.max_wait);
    let balance = i128::from(input.balance);
    let price = i128::from(input.price);
    let to_origin = input.time_to_origin.map(i128::from);
    let to_destination = input.time_to_destination.map(i128::from);

    BidAssessment {
        available: !input.carrying_passenger && !input.holds_allocated_fare,
        affordable: to_origin.is_some_and(|t| balance > t),
        profitable: match (to_origin, to_destination) {
            (Some(a), Some(b)) => price > a + b,
            _ => false,
        },
        still_waiting: max_wait > elapsed,
        arrives_in_time: to_origin.is_some_and(|t| max_wait - elapsed > t),
    }
}
