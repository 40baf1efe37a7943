//! Simulation observer trait for progress reporting and data collection.

use cab_core::{Coord, Credits, FareId, TaxiId, Tick};
use cab_map::Planner;
use cab_taxi::Taxi;

/// Read-only view of one taxi, handed to [`SimObserver::on_snapshot`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaxiSnapshot {
    pub taxi:       TaxiId,
    pub on_duty:    bool,
    pub location:   Option<Coord>,
    pub balance:    Credits,
    /// Fare on board and where it is going.
    pub passenger:  Option<(FareId, Coord)>,
    /// Final waypoint of the current route.
    pub route_goal: Option<Coord>,
    /// Origins of the fares allocated to this taxi and not yet collected.
    pub allocated:  Vec<Coord>,
}

impl TaxiSnapshot {
    pub fn of<P: Planner>(taxi: &Taxi<P>) -> Self {
        Self {
            taxi:       taxi.id(),
            on_duty:    taxi.is_on_duty(),
            location:   taxi.current_location(),
            balance:    taxi.balance(),
            passenger:  taxi.passenger().map(|f| (f.id, f.destination)),
            route_goal: taxi.route().goal(),
            allocated:  taxi.ledger().allocated_origins(),
        }
    }
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the number of taxis on duty.
    fn on_tick_end(&mut self, _tick: Tick, _on_duty: usize) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks), after the tick's processing.
    fn on_snapshot(&mut self, _tick: Tick, _taxis: &[TaxiSnapshot]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
