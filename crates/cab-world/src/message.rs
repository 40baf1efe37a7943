//! Dispatcher → taxi messages.

use cab_core::{Coord, Credits};

/// An inbound message from the dispatcher.
///
/// Messages arrive asynchronously and in no guaranteed order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// A new fare is available for bidding.
    FareAdvice {
        origin:      Coord,
        destination: Coord,
        price:       Credits,
    },

    /// This taxi won the auction for the fare at `origin` bound for
    /// `destination`.
    FareAllocated {
        origin:      Coord,
        destination: Coord,
    },

    /// Payment for a completed drop-off.
    FarePaid { amount: Credits },

    /// The allocated fare at `origin` gave up before being collected.
    FareCancelled { origin: Coord },
}
