//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use cab_core::{SimRng, TaxiId};
use cab_map::{DijkstraPlanner, Planner};
use cab_taxi::{Taxi, TaxiConfig};
use cab_world::GridWorldBuilder;

use crate::{FareGenerator, Sim, SimConfig, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, fare stream, dispatcher timing
/// - [`GridWorldBuilder`]: the road network
///
/// Taxis are added with [`taxi`](Self::taxi) / [`taxis`](Self::taxis) and
/// numbered in the order they were added.
///
/// # Example
///
/// ```
/// use cab_sim::{NoopObserver, SimBuilder, SimConfig};
/// use cab_taxi::TaxiConfig;
/// use cab_world::GridWorldBuilder;
///
/// let config = SimConfig { total_ticks: 30, ..SimConfig::default() };
/// let mut sim = SimBuilder::new(config, GridWorldBuilder::grid(4, 4))
///     .taxis(2, TaxiConfig::default())
///     .build()
///     .unwrap();
/// sim.run(&mut NoopObserver).unwrap();
/// assert_eq!(sim.now().0, 30);
/// ```
pub struct SimBuilder<P: Planner + Clone = DijkstraPlanner> {
    config:  SimConfig,
    world:   GridWorldBuilder,
    taxis:   Vec<TaxiConfig>,
    planner: P,
}

impl SimBuilder<DijkstraPlanner> {
    pub fn new(config: SimConfig, world: GridWorldBuilder) -> Self {
        Self::with_planner(config, world, DijkstraPlanner)
    }
}

impl<P: Planner + Clone> SimBuilder<P> {
    /// Create a builder whose taxis all route with `planner`.
    pub fn with_planner(config: SimConfig, world: GridWorldBuilder, planner: P) -> Self {
        Self { config, world, taxis: Vec::new(), planner }
    }

    pub fn taxi(mut self, config: TaxiConfig) -> Self {
        self.taxis.push(config);
        self
    }

    /// Add `n` taxis sharing `config`.
    pub fn taxis(mut self, n: usize, config: TaxiConfig) -> Self {
        self.taxis.extend(std::iter::repeat_n(config, n));
        self
    }

    /// Validate inputs, build the world and the taxis, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;

        let mut world = self.world;
        world
            .allocation_delay(self.config.allocation_delay)
            .abandon_after(self.config.abandon_after);
        let world = world.build();
        if world.node_count() == 0 {
            return Err(SimError::Config("world has no nodes".into()));
        }

        let mut taxis = Vec::with_capacity(self.taxis.len());
        for (i, config) in self.taxis.into_iter().enumerate() {
            let id = TaxiId::try_from(i)
                .map_err(|_| SimError::Config(format!("too many taxis ({i})")))?;
            let taxi = Taxi::with_planner(id, config, self.planner.clone(), &world)
                .map_err(|source| SimError::Taxi { taxi: id, source })?;
            taxis.push(taxi);
        }

        let mut rng = SimRng::new(self.config.seed);
        let generator = FareGenerator::new(
            rng.child(0),
            self.config.fare_probability,
            self.config.fare_price_per_distance,
            world.node_coords().collect(),
        );

        info!(
            nodes = world.node_count(),
            taxis = taxis.len(),
            seed = self.config.seed,
            "simulation built"
        );
        Ok(Sim { config: self.config, world, taxis, generator })
    }
}
