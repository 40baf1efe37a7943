//! `cab-sim`: tick loop orchestrator for the rust_cab framework.
//!
//! Drives a fleet of [`cab_taxi::Taxi`]s through a [`cab_world::GridWorld`],
//! with random fares from a seeded [`FareGenerator`].
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Duty     : off-duty taxis try to come on duty (and enter the world)
//!   ② Fares    : FareGenerator may post a fare; the world advertises it
//!   ③ Taxis    : each on-duty taxi ticks with its traffic signal;
//!                 taxis that went off duty leave the world
//!   ④ Dispatch : allocate fares whose bidding closed; cancel abandoned ones
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut sim = SimBuilder::new(SimConfig::default(), GridWorldBuilder::grid(10, 10))
//!     .taxis(4, TaxiConfig::default())
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use generator::FareGenerator;
pub use observer::{NoopObserver, SimObserver, TaxiSnapshot};
pub use sim::Sim;
