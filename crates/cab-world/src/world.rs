//! Collaborator traits the taxi depends on.

use cab_core::{Coord, Heading, TaxiId, Tick};
use cab_map::{KnowledgeMap, NodeResolver};

use crate::{Fare, Message, Pose};

/// Node operations, addressed by coordinate.
///
/// Implementations serialize conflicting occupancy requests; the taxi never
/// blocks on them and simply retries on a later tick when declined.
pub trait NodeControl {
    /// Enter the node at `at` from outside the network (first placement).
    fn occupy(&mut self, at: Coord, heading: Heading, taxi: TaxiId) -> Option<Pose>;

    /// Leave the node at `at` toward the neighbour in direction `toward`,
    /// returning the pose at that neighbour if the move went through.
    fn vacate(&mut self, at: Coord, heading: Heading, toward: Heading) -> Option<Pose>;

    /// Request to leave `at` in direction `toward`.  Returns the pose the
    /// taxi would have at the next node, or `None` if there is no such exit.
    fn turn(&mut self, at: Coord, heading: Heading, toward: Heading) -> Option<Pose>;

    /// Request to carry straight on through `at`.
    fn continue_through(&mut self, at: Coord, heading: Heading) -> Option<Pose>;

    /// Collect the fare allocated to `taxi` waiting at `at`, if any.
    fn pickup_fare(&mut self, at: Coord, heading: Heading, taxi: TaxiId) -> Option<Fare>;

    /// Deliver `fare` at `at`.  On refusal the fare is handed back.
    fn dropoff_fare(&mut self, at: Coord, fare: Fare, heading: Heading, taxi: TaxiId)
        -> Result<(), Fare>;
}

/// The allocator side of the fare auction.
pub trait Dispatcher {
    /// Submit this taxi's bid for the fare waiting at `origin`.
    fn transmit_fare_bid(&mut self, origin: Coord, taxi: TaxiId);

    /// Take every message queued for `taxi` since the last call.
    fn collect_messages(&mut self, taxi: TaxiId) -> Vec<Message>;
}

/// The shared world a taxi operates in.
pub trait World: NodeResolver + NodeControl + Dispatcher {
    /// The full service-area map, as handed to a taxi with no map of its own.
    fn export_map(&self) -> KnowledgeMap;

    /// The simulation clock.
    fn sim_time(&self) -> Tick;

    /// Register `taxi` for placement at `at`, returning the pose it will take
    /// up once the node lets it in.
    fn add_taxi(&mut self, taxi: TaxiId, at: Coord) -> Option<Pose>;
}
