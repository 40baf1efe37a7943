//! Scalar unit aliases shared by the map, the taxi, and the world.

/// Money: account balances, fare prices, and payments.  Signed because a
/// taxi's balance may be driven to or below zero by the per-tick charge.
pub type Credits = i64;

/// Edge length between two adjacent nodes, in world distance units.
pub type Distance = u32;
