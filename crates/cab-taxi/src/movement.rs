//! Movement state machine.
//!
//! ```text
//!            add_taxi               signal == to && occupy/vacate == to
//! Unplaced ──────────► Transitioning ─────────────────────────────────► Stopped
//!                           ▲                                             │
//!                           └──────────── turn / continue_through ────────┘
//! ```
//!
//! A transition is committed only when the node's signal matches the pose
//! the taxi expected *and* the node confirms the move with the same pose.
//! Anything else leaves the taxi waiting; it retries on the next tick.

use tracing::{error, trace};

use cab_core::{Coord, TaxiId};
use cab_map::{KnowledgeMap, Route};
use cab_world::{NodeControl, Pose};

use crate::{TaxiError, TaxiResult};

/// Where the taxi is, physically.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MovementState {
    /// Not yet in the network.
    #[default]
    Unplaced,
    /// At a node with no move pending.
    Stopped { at: Pose },
    /// Waiting for a move to `to`.  `from` is `None` while entering the
    /// network for the first time.
    Transitioning { from: Option<Pose>, to: Pose },
}

impl MovementState {
    /// Current physical pose: the node the taxi occupies, or `None` while
    /// unplaced or still entering.
    pub fn pose(&self) -> Option<Pose> {
        match *self {
            MovementState::Unplaced => None,
            MovementState::Stopped { at } => Some(at),
            MovementState::Transitioning { from, .. } => from,
        }
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, MovementState::Stopped { .. })
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, MovementState::Transitioning { .. })
    }
}

/// Drives a taxi along its route one confirmed node at a time.
#[derive(Clone, Debug, Default)]
pub struct MovementController {
    state: MovementState,
}

impl MovementController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn pose(&self) -> Option<Pose> {
        self.state.pose()
    }

    pub fn location(&self) -> Option<Coord> {
        self.state.pose().map(|p| p.at)
    }

    /// Await entry at `entry`, the pose returned by the world when the taxi
    /// was registered.  Ignored once the taxi is already placed.
    pub fn await_entry(&mut self, entry: Pose) {
        if self.state == MovementState::Unplaced {
            self.state = MovementState::Transitioning { from: None, to: entry };
        }
    }

    /// Advance one tick.
    ///
    /// `signal` is the pose the world currently grants this taxi, if any.
    /// Waypoints are consumed from `route` as they are reached; `map` is
    /// consulted for the heading toward the next waypoint.
    ///
    /// # Errors
    ///
    /// [`TaxiError::FellOffMap`] when the taxi stands on a node its map does
    /// not know, [`TaxiError::NoKnownEdge`] when the next waypoint is not a
    /// neighbour of the current node.  Both are fatal.
    pub fn drive<W>(
        &mut self,
        taxi:   TaxiId,
        signal: Option<Pose>,
        route:  &mut Route,
        map:    &KnowledgeMap,
        world:  &mut W,
    ) -> TaxiResult<()>
    where
        W: NodeControl + ?Sized,
    {
        if let MovementState::Transitioning { from, to } = self.state {
            if signal != Some(to) {
                return Ok(());
            }
            let granted = match from {
                None => world.occupy(to.at, to.heading, taxi),
                Some(from) => world.vacate(from.at, from.heading, to.heading),
            };
            if granted != Some(to) {
                trace!(%taxi, expected = %to, "move declined, waiting");
                return Ok(());
            }
            trace!(%taxi, at = %to, "arrived");
            self.state = MovementState::Stopped { at: to };

            if route.head() == Some(to.at) {
                route.pop_head();
            } else if !route.is_empty() {
                // Not a waypoint: keep going the same way.
                if let Some(next) = world.continue_through(to.at, to.heading) {
                    self.state = MovementState::Transitioning { from: Some(to), to: next };
                }
                return Ok(());
            }
        }

        let MovementState::Stopped { at } = self.state else {
            return Ok(());
        };
        if route.head() == Some(at.at) {
            route.pop_head();
        }
        let Some(next) = route.head() else {
            return Ok(());
        };

        let Some(adjacency) = map.neighbours(at.at) else {
            error!(%taxi, at = %at.at, "current node missing from map");
            return Err(TaxiError::FellOffMap(at.at));
        };
        let Some(edge) = adjacency.get(&next) else {
            error!(%taxi, from = %at.at, to = %next, "no edge toward next waypoint");
            return Err(TaxiError::NoKnownEdge { from: at.at, to: next });
        };
        if let Some(pending) = world.turn(at.at, at.heading, edge.heading) {
            self.state = MovementState::Transitioning { from: Some(at), to: pending };
        }
        Ok(())
    }
}
