//! `cab-world`: the collaborators a taxi talks to, and a reference world.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`world`]   | `World`, `NodeControl`, `Dispatcher` traits                       |
//! | [`pose`]    | `Pose`: a (node, heading) pair                                   |
//! | [`fare`]    | `Fare`: a passenger handed over by a node                        |
//! | [`message`] | `Message`: the four dispatcher → taxi message kinds              |
//! | [`grid`]    | `GridWorld`, `GridWorldBuilder`: reference world implementation  |
//!
//! # Design notes
//!
//! The taxi addresses nodes only by coordinate.  Nodes are the sole authority
//! on physical occupancy: every movement call returns the resulting [`Pose`]
//! (or `None` when declined) and the taxi compares it with what it expected.
//!
//! [`GridWorld`] exists so the decision engine can be exercised end to end.
//! Its allocation policy (closest bidder wins) is deliberately simple and is
//! not part of any taxi's contract.

pub mod fare;
pub mod grid;
pub mod message;
pub mod pose;
pub mod world;

#[cfg(test)]
mod tests;

pub use fare::Fare;
pub use grid::{GridWorld, GridWorldBuilder};
pub use message::Message;
pub use pose::Pose;
pub use world::{Dispatcher, NodeControl, World};
