//! `cab-core`: foundational types for the `rust_cab` taxi framework.
//!
//! This crate is a dependency of every other `cab-*` crate.  It intentionally
//! has no `cab-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `TaxiId`, `FareId`, `Coord`                           |
//! | [`heading`]     | `Heading` compass direction                           |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `SimRng` (seeded, simulation-level)                   |
//! | [`units`]       | `Credits`, `Distance`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod heading;
pub mod ids;
pub mod rng;
pub mod time;
pub mod units;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use heading::Heading;
pub use ids::{Coord, FareId, TaxiId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
pub use units::{Credits, Distance};
