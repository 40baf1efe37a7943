//! `cab-map`: the taxi's local knowledge of the road network and routing
//! over it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`knowledge`] | `KnowledgeMap`, `Edge`, `NodeResolver`                       |
//! | [`planner`]   | `Planner` trait, `Route`, `DijkstraPlanner`                  |
//! | [`error`]     | `MapError`, `MapResult<T>`                                   |
//!
//! The map only grows: nodes are added or overwritten, never removed.  Every
//! node added through [`KnowledgeMap::add_node`] or merged through
//! [`KnowledgeMap::import`] is checked against a [`NodeResolver`] (the world)
//! so the map never references a coordinate the world cannot resolve.

pub mod error;
pub mod knowledge;
pub mod planner;

#[cfg(test)]
mod tests;

pub use error::{MapError, MapResult};
pub use knowledge::{Adjacency, Edge, KnowledgeMap, NodeResolver};
pub use planner::{DijkstraPlanner, Planner, Route};
