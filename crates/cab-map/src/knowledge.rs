//! The taxi's knowledge map of its service area.
//!
//! # Data layout
//!
//! A two-level hash map: node coordinate → (neighbour coordinate → [`Edge`]).
//! Such a structure allows O(1) lookup of "can I get from here to there in
//! one hop, in which direction, and how far?": the only questions the
//! movement controller and planner ever ask.

use rustc_hash::FxHashMap;

use cab_core::{Coord, Distance, Heading};

use crate::{MapError, MapResult};

// ── NodeResolver ──────────────────────────────────────────────────────────────

/// The part of the world the map needs to validate itself.
///
/// Implemented by the world (see `cab_world::World`).  The map only ever asks
/// whether a coordinate names a real node and how far apart two nodes are.
pub trait NodeResolver {
    /// `true` if `at` is a node of the world's road network.
    fn resolves(&self, at: Coord) -> bool;

    /// Edge length between two resolvable nodes.
    fn distance(&self, from: Coord, to: Coord) -> Distance;
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// A directed hop to a neighbouring node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Direction to leave the current node in to reach the neighbour.
    pub heading: Heading,
    /// Edge length, used as the planner's cost.
    pub distance: Distance,
}

impl Edge {
    #[inline]
    pub fn new(heading: Heading, distance: Distance) -> Self {
        Self { heading, distance }
    }
}

/// Outgoing edges of one node, keyed by neighbour coordinate.
pub type Adjacency = FxHashMap<Coord, Edge>;

// ── KnowledgeMap ──────────────────────────────────────────────────────────────

/// Directed, weighted adjacency map of the service area.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnowledgeMap {
    nodes: FxHashMap<Coord, Adjacency>,
}

impl KnowledgeMap {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Trusted construction (world exports, fixtures) ────────────────────

    /// Ensure `at` is present as a node, with no outgoing edges if new.
    pub fn insert_node(&mut self, at: Coord) {
        self.nodes.entry(at).or_default();
    }

    /// Add or overwrite the directed edge `from → to`.
    ///
    /// No resolution check is made; this is how the world builds the map it
    /// exports.  Taxis extend their own map with [`add_node`](Self::add_node).
    pub fn connect(&mut self, from: Coord, to: Coord, heading: Heading, distance: Distance) {
        self.nodes.entry(from).or_default().insert(to, Edge::new(heading, distance));
    }

    // ── Validated construction ────────────────────────────────────────────

    /// Add or replace the adjacency of one node.
    ///
    /// Each neighbour is named by the heading that leads to it and its
    /// coordinate; edge lengths are taken from `resolver`.  The node is left
    /// untouched if it or any neighbour does not resolve.
    pub fn add_node<I, R>(&mut self, at: Coord, neighbours: I, resolver: &R) -> MapResult<()>
    where
        I: IntoIterator<Item = (Heading, Coord)>,
        R: NodeResolver + ?Sized,
    {
        let adjacency = resolve_adjacency(at, neighbours, resolver)?;
        self.nodes.insert(at, adjacency);
        Ok(())
    }

    /// Import a whole map.
    ///
    /// An empty map simply adopts `other`.  Otherwise every node of `other`
    /// is merged as if by [`add_node`](Self::add_node), with edge lengths
    /// recomputed by `resolver`.  The merge is all-or-nothing: if any node
    /// fails to resolve, `self` is left unchanged.
    pub fn import<R>(&mut self, other: KnowledgeMap, resolver: &R) -> MapResult<()>
    where
        R: NodeResolver + ?Sized,
    {
        if self.nodes.is_empty() {
            *self = other;
            return Ok(());
        }

        let mut staged = Vec::with_capacity(other.nodes.len());
        for (at, adjacency) in other.nodes {
            let neighbours = adjacency.into_iter().map(|(to, e)| (e.heading, to));
            staged.push((at, resolve_adjacency(at, neighbours, resolver)?));
        }
        self.nodes.extend(staged);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn contains(&self, at: Coord) -> bool {
        self.nodes.contains_key(&at)
    }

    /// Outgoing edges of `at`, or `None` if the node is unknown.
    pub fn neighbours(&self, at: Coord) -> Option<&Adjacency> {
        self.nodes.get(&at)
    }

    /// The edge `from → to`, if both are known and adjacent.
    pub fn edge(&self, from: Coord, to: Coord) -> Option<Edge> {
        self.nodes.get(&from)?.get(&to).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|adj| adj.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over `(node, adjacency)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Adjacency)> + '_ {
        self.nodes.iter().map(|(&c, adj)| (c, adj))
    }

    /// Iterate over node coordinates in unspecified order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.nodes.keys().copied()
    }

    /// Total edge length along `path`, or `None` if any consecutive pair is
    /// not a known edge.  A single-node path has length zero.
    pub fn path_distance(&self, path: &[Coord]) -> Option<u64> {
        path.windows(2)
            .map(|hop| self.edge(hop[0], hop[1]).map(|e| u64::from(e.distance)))
            .sum()
    }
}

/// Resolve `at` and each neighbour through `resolver`, producing the
/// adjacency to store for `at`.
fn resolve_adjacency<I, R>(at: Coord, neighbours: I, resolver: &R) -> MapResult<Adjacency>
where
    I: IntoIterator<Item = (Heading, Coord)>,
    R: NodeResolver + ?Sized,
{
    if !resolver.resolves(at) {
        return Err(MapError::UnknownNode(at));
    }
    let mut adjacency = Adjacency::default();
    for (heading, neighbour) in neighbours {
        if !resolver.resolves(neighbour) {
            return Err(MapError::UnknownNeighbour { node: at, neighbour });
        }
        adjacency.insert(neighbour, Edge::new(heading, resolver.distance(at, neighbour)));
    }
    Ok(adjacency)
}
