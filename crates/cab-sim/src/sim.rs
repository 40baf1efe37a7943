//! The `Sim` struct and its tick loop.

use tracing::{debug, error};

use cab_core::Tick;
use cab_map::{DijkstraPlanner, Planner};
use cab_taxi::Taxi;
use cab_world::GridWorld;

use crate::{FareGenerator, SimConfig, SimError, SimObserver, SimResult, TaxiSnapshot};

/// The main simulation runner.
///
/// Each tick:
///
/// 1. **Duty**: off-duty taxis try to come on duty.
/// 2. **Fares**: the [`FareGenerator`] may post a fare.
/// 3. **Taxis**: each on-duty taxi ticks, in id order, with the signal the
///    world shows it.  A taxi that went off duty is retired from the world.
/// 4. **Dispatch**: the world allocates bid-on fares and expires abandoned
///    ones.
/// 5. The clock advances.
///
/// A navigation error from any taxi aborts the run.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: Planner = DijkstraPlanner> {
    pub config: SimConfig,

    /// The world, its dispatcher, and the clock.
    pub world: GridWorld,

    /// Taxis in ascending id order; `taxis[i].id() == TaxiId(i)`.
    pub taxis: Vec<Taxi<P>>,

    pub generator: FareGenerator,
}

impl<P: Planner> Sim<P> {
    // ── Public API ────────────────────────────────────────────────────────

    pub fn now(&self) -> Tick {
        self.world.now()
    }

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.now() < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.now());
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process one tick and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.now();
        observer.on_tick_start(now);
        let on_duty = self.process_tick(now)?;
        observer.on_tick_end(now, on_duty);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.snapshot());
        }
        self.world.advance_clock();
        Ok(())
    }

    pub fn snapshot(&self) -> Vec<TaxiSnapshot> {
        self.taxis.iter().map(TaxiSnapshot::of).collect()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<usize> {
        for taxi in self.taxis.iter_mut().filter(|t| !t.is_on_duty()) {
            taxi.come_on_duty(&mut self.world)
                .map_err(|source| SimError::Taxi { taxi: taxi.id(), source })?;
        }

        if let Some(fare) = self.generator.maybe_post(&mut self.world) {
            debug!(%fare, %now, "fare called");
        }

        let mut on_duty = 0;
        for taxi in self.taxis.iter_mut().filter(|t| t.is_on_duty()) {
            let id = taxi.id();
            let signal = self.world.signal(id);
            if let Err(source) = taxi.tick(&mut self.world, signal) {
                error!(taxi = %id, %now, error = %source, "taxi failed, aborting run");
                return Err(SimError::Taxi { taxi: id, source });
            }
            if taxi.is_on_duty() {
                on_duty += 1;
            } else {
                self.world.retire_taxi(id);
            }
        }

        self.world.allocate();
        self.world.expire_fares();
        Ok(on_duty)
    }
}
