//! Route planning trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The taxi calls routing via the [`Planner`] trait, so applications can swap
//! in another search (A*, congestion-aware) without touching the decision
//! engine.  The default [`DijkstraPlanner`] is exact for non-negative weights.
//!
//! # Unreachable goals
//!
//! An unreachable goal is not an error: planning returns an empty [`Route`],
//! which callers read as "no known path" and decline or do nothing.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use rustc_hash::{FxHashMap, FxHashSet};

use cab_core::Coord;

use crate::KnowledgeMap;

// ── Route ─────────────────────────────────────────────────────────────────────

/// Ordered waypoints from the current position to a goal.
///
/// A planned route starts at the origin and ends at the goal.  It is
/// consumed front-to-back and is empty on arrival or when no path exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    waypoints: VecDeque<Coord>,
}

impl Route {
    pub fn new(waypoints: Vec<Coord>) -> Self {
        Self { waypoints: waypoints.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// The next waypoint, if any.
    #[inline]
    pub fn head(&self) -> Option<Coord> {
        self.waypoints.front().copied()
    }

    /// The final waypoint, if any.
    #[inline]
    pub fn goal(&self) -> Option<Coord> {
        self.waypoints.back().copied()
    }

    /// Remove and return the next waypoint.
    #[inline]
    pub fn pop_head(&mut self) -> Option<Coord> {
        self.waypoints.pop_front()
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Copy of the remaining waypoints as a `Vec`.
    pub fn to_vec(&self) -> Vec<Coord> {
        self.waypoints.iter().copied().collect()
    }
}

impl FromIterator<Coord> for Route {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        Self { waypoints: iter.into_iter().collect() }
    }
}

// ── Planner trait ─────────────────────────────────────────────────────────────

/// Pluggable route planner.
///
/// Implementations must be `Send + Sync` so a single planner can be shared by
/// many taxis running on different threads.
pub trait Planner: Send + Sync {
    /// Plan a route over `map` from `from` to `to`.
    ///
    /// Returns an empty route if `to` is unreachable.  When `from == to`
    /// the route is the single waypoint `[from]`.
    fn plan(&self, map: &KnowledgeMap, from: Coord, to: Coord) -> Route;
}

// ── DijkstraPlanner ───────────────────────────────────────────────────────────

/// Single-source shortest path by cumulative edge distance.
///
/// Ties between equal-cost frontier entries are broken by coordinate order,
/// which is consistent but carries no meaning.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPlanner;

impl Planner for DijkstraPlanner {
    fn plan(&self, map: &KnowledgeMap, from: Coord, to: Coord) -> Route {
        dijkstra(map, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(map: &KnowledgeMap, from: Coord, to: Coord) -> Route {
    if from == to {
        return Route::new(vec![from]);
    }

    // best[v] = best known cumulative distance to v.
    let mut best: FxHashMap<Coord, u64> = FxHashMap::default();
    // parent[v] = node that reached v on the best known path.
    let mut parent: FxHashMap<Coord, Coord> = FxHashMap::default();
    let mut settled: FxHashSet<Coord> = FxHashSet::default();

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as min-heap.
    let mut frontier: BinaryHeap<Reverse<(u64, Coord)>> = BinaryHeap::new();
    best.insert(from, 0);
    frontier.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = frontier.pop() {
        // Skip stale heap entries.
        if !settled.insert(node) {
            continue;
        }
        if node == to {
            break;
        }

        // Nodes referenced as neighbours but never imported have no
        // outgoing edges.
        let Some(adjacency) = map.neighbours(node) else {
            continue;
        };
        for (&next, edge) in adjacency {
            if settled.contains(&next) {
                continue;
            }
            let candidate = cost + u64::from(edge.distance);
            if best.get(&next).is_none_or(|&known| candidate < known) {
                best.insert(next, candidate);
                parent.insert(next, node);
                frontier.push(Reverse((candidate, next)));
            }
        }
    }

    if !settled.contains(&to) {
        return Route::empty();
    }
    reconstruct(&parent, from, to)
}

/// Walk parent pointers back from `to` and reverse.
fn reconstruct(parent: &FxHashMap<Coord, Coord>, from: Coord, to: Coord) -> Route {
    let mut path = vec![to];
    let mut cur = to;
    while cur != from {
        match parent.get(&cur) {
            Some(&p) => {
                path.push(p);
                cur = p;
            }
            None => break,
        }
    }
    path.reverse();
    Route::new(path)
}
