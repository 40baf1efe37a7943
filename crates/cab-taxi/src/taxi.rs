//! The taxi agent.

use tracing::{debug, info, warn};

use cab_core::{Coord, Credits, Heading, TaxiId, Tick};
use cab_map::{DijkstraPlanner, KnowledgeMap, Planner, Route};
use cab_world::{Fare, Message, Pose, World};

use crate::bid::{self, BidAssessment, BidInput};
use crate::duty::{Account, DutyRoster};
use crate::ledger::{Decision, FareKey, FareLedger, FareOffer};
use crate::movement::{MovementController, MovementState};
use crate::protocol::{self, Applied};
use crate::{TaxiConfig, TaxiError, TaxiResult};

/// An autonomous taxi.
///
/// Each tick the owner calls [`tick`](Self::tick) with the traffic signal
/// the world currently shows this taxi.  The taxi reads its messages,
/// drives, decides what to do with its fares when idle, and pays one credit
/// for the tick.
///
/// The planner is a type parameter so alternative routing strategies can be
/// plugged in; [`DijkstraPlanner`] is the default.
pub struct Taxi<P: Planner = DijkstraPlanner> {
    id:        TaxiId,
    planner:   P,
    map:       KnowledgeMap,
    home:      Coord,
    idle_loss: Credits,
    max_wait:  u64,

    ledger:    FareLedger,
    movement:  MovementController,
    route:     Route,
    passenger: Option<Fare>,
    account:   Account,
    duty:      DutyRoster,
}

impl Taxi<DijkstraPlanner> {
    /// Create a taxi routing with [`DijkstraPlanner`].
    ///
    /// # Errors
    ///
    /// [`TaxiError::Config`] if `config` fails validation or the map it ends
    /// up with has no entry point.
    pub fn new<W: World + ?Sized>(id: TaxiId, config: TaxiConfig, world: &W) -> TaxiResult<Self> {
        Self::with_planner(id, config, DijkstraPlanner, world)
    }
}

impl<P: Planner> Taxi<P> {
    /// Create a taxi with a custom planner.
    ///
    /// The map is the configured service area if one was supplied, or the
    /// world's full map otherwise.  The taxi starts off duty with a balance
    /// of `idle_loss`.
    pub fn with_planner<W: World + ?Sized>(
        id:         TaxiId,
        mut config: TaxiConfig,
        planner:    P,
        world:      &W,
    ) -> TaxiResult<Self> {
        config.validate()?;
        let map = config.service_area.take().unwrap_or_else(|| world.export_map());
        let home = match config.home {
            Some(home) => home,
            None => entry_point(&map)
                .ok_or_else(|| TaxiError::Config("map has no entry point".into()))?,
        };
        if !map.contains(home) {
            return Err(TaxiError::Config(format!("home {home} is not in the taxi's map")));
        }

        Ok(Self {
            id,
            planner,
            map,
            home,
            idle_loss: config.idle_loss,
            max_wait: config.max_wait,
            ledger: FareLedger::new(),
            movement: MovementController::new(),
            route: Route::empty(),
            passenger: None,
            account: Account::new(config.idle_loss),
            duty: DutyRoster::from_config(&config),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> TaxiId {
        self.id
    }

    pub fn is_on_duty(&self) -> bool {
        self.duty.is_on_duty()
    }

    pub fn balance(&self) -> Credits {
        self.account.balance()
    }

    /// Node the taxi currently occupies; `None` before it has entered the
    /// network.
    pub fn current_location(&self) -> Option<Coord> {
        self.movement.location()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn passenger(&self) -> Option<&Fare> {
        self.passenger.as_ref()
    }

    pub fn ledger(&self) -> &FareLedger {
        &self.ledger
    }

    pub fn map(&self) -> &KnowledgeMap {
        &self.map
    }

    pub fn home(&self) -> Coord {
        self.home
    }

    pub fn duty(&self) -> &DutyRoster {
        &self.duty
    }

    /// `true` when stopped at a node with nowhere left to go.
    pub fn is_idle(&self) -> bool {
        self.movement.state().is_stopped() && self.route.is_empty()
    }

    // ── Map knowledge ─────────────────────────────────────────────────────

    /// Merge `other` into the taxi's map, validating against `world`.
    pub fn import_map<W: World + ?Sized>(&mut self, other: KnowledgeMap, world: &W) -> TaxiResult<()> {
        self.map.import(other, world)?;
        Ok(())
    }

    /// Add (or replace) a single node of the taxi's map.
    pub fn add_map_node<I, W>(&mut self, at: Coord, neighbours: I, world: &W) -> TaxiResult<()>
    where
        I: IntoIterator<Item = (Heading, Coord)>,
        W: World + ?Sized,
    {
        self.map.add_node(at, neighbours, world)?;
        Ok(())
    }

    // ── Duty ──────────────────────────────────────────────────────────────

    /// Try to start a shift.
    ///
    /// Returns `Ok(false)` outside the duty window.  An exhausted balance is
    /// restored to `idle_loss`.  A taxi not yet in the network registers at
    /// its home node and enters on a later tick once the node lets it in.
    ///
    /// # Errors
    ///
    /// [`TaxiError::Config`] if the world refuses the home node.
    pub fn come_on_duty<W: World + ?Sized>(&mut self, world: &mut W) -> TaxiResult<bool> {
        if self.duty.is_on_duty() {
            return Ok(true);
        }
        let now = world.sim_time();
        if !self.duty.may_come_on_duty(now) {
            return Ok(false);
        }
        if self.movement.state() == MovementState::Unplaced {
            let Some(entry) = world.add_taxi(self.id, self.home) else {
                warn!(taxi = %self.id, home = %self.home, "world refused entry point");
                return Err(TaxiError::Config(format!(
                    "home {} is not a node of this world",
                    self.home
                )));
            };
            self.movement.await_entry(entry);
        }
        self.account.replenish(self.idle_loss);
        self.duty.go_on_duty();
        info!(taxi = %self.id, %now, balance = self.account.balance(), "on duty");
        Ok(true)
    }

    fn go_off_duty(&mut self, now: Tick) {
        self.duty.go_off_duty(now);
        info!(taxi = %self.id, %now, balance = self.account.balance(), "off duty");
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run one tick: duty check, messages, movement, decisions, debit.
    ///
    /// An off-duty taxi does nothing.  Messages are read first, so a payment
    /// already waiting counts towards the balance.  A taxi whose balance has
    /// still run out then goes off duty instead of moving or deciding, and
    /// the tick is charged all the same.
    ///
    /// # Errors
    ///
    /// Navigation failures from [`drive`](Self::drive); the taxi should not
    /// be ticked again after one.
    pub fn tick<W: World + ?Sized>(&mut self, world: &mut W, signal: Option<Pose>) -> TaxiResult<()> {
        if !self.duty.is_on_duty() {
            return Ok(());
        }
        let now = world.sim_time();
        self.receive_all(world, now);
        if self.account.is_exhausted() {
            self.go_off_duty(now);
            self.account.debit(1);
            return Ok(());
        }

        self.drive(world, signal)?;
        if self.is_idle() {
            self.decide(world, now);
        }
        // Payment for a drop-off made this tick lands before the debit.
        self.receive_all(world, now);
        self.account.debit(1);
        Ok(())
    }

    /// Handle one dispatcher message received at `now`.
    pub fn receive(&mut self, message: Message, now: Tick) -> Applied {
        let applied = protocol::apply(message, now, &mut self.ledger, &mut self.account);
        match &applied {
            Applied::Recorded(key) => debug!(taxi = %self.id, origin = %key.origin, "fare advised"),
            Applied::Duplicate(key) => debug!(taxi = %self.id, origin = %key.origin, "duplicate advice ignored"),
            Applied::Allocated(key) => info!(taxi = %self.id, origin = %key.origin, "fare allocated"),
            Applied::Paid(amount) => info!(taxi = %self.id, amount, "fare paid"),
            Applied::Cancelled(key) => info!(taxi = %self.id, origin = %key.origin, "fare cancelled"),
            Applied::Ignored => {}
        }
        applied
    }

    fn receive_all<W: World + ?Sized>(&mut self, world: &mut W, now: Tick) {
        for message in world.collect_messages(self.id) {
            self.receive(message, now);
        }
    }

    /// Advance the movement state machine by one step.
    pub fn drive<W: World + ?Sized>(&mut self, world: &mut W, signal: Option<Pose>) -> TaxiResult<()> {
        self.movement.drive(self.id, signal, &mut self.route, &self.map, world)
    }

    // ── Decisions ─────────────────────────────────────────────────────────

    /// Drop off any passenger, then sweep the ledger.
    fn decide<W: World + ?Sized>(&mut self, world: &mut W, now: Tick) {
        let Some(at) = self.movement.pose() else {
            return;
        };
        if let Some(fare) = self.passenger.take() {
            match world.dropoff_fare(at.at, fare, at.heading, self.id) {
                Ok(()) => info!(taxi = %self.id, at = %at.at, "passenger dropped off"),
                Err(fare) => self.passenger = Some(fare),
            }
        }
        self.sweep(world, at, now);
    }

    fn sweep<W: World + ?Sized>(&mut self, world: &mut W, at: Pose, now: Tick) {
        let mut finished = Vec::new();

        for key in self.ledger.keys() {
            let Some(offer) = self.ledger.get(&key).cloned() else {
                continue;
            };

            if offer.allocated && self.passenger.is_none() {
                if at.at != key.origin {
                    if self.route.is_empty() {
                        self.route = self.planner.plan(&self.map, at.at, key.origin);
                        if self.route.is_empty() {
                            warn!(taxi = %self.id, origin = %key.origin, "no route to allocated fare");
                        }
                    }
                    continue;
                }
                match world.pickup_fare(at.at, at.heading, self.id) {
                    Some(fare) => {
                        info!(taxi = %self.id, at = %at.at, destination = %fare.destination, "passenger picked up");
                        self.route = self.planner.plan(&self.map, at.at, fare.destination);
                        if self.route.is_empty() {
                            warn!(taxi = %self.id, destination = %fare.destination, "no route to destination");
                        }
                        self.passenger = Some(fare);
                        finished.push(key);
                    }
                    None if key.age(now) > self.max_wait => {
                        warn!(taxi = %self.id, origin = %key.origin, "allocated fare not there, giving up");
                        finished.push(key);
                    }
                    None => {}
                }
            } else if !offer.allocated && key.age(now) > self.max_wait {
                debug!(taxi = %self.id, origin = %key.origin, "offer expired");
                finished.push(key);
            } else if offer.decision == Decision::Undecided {
                let bid = self.assess(key, &offer, at.at, now).should_bid();
                if bid {
                    debug!(taxi = %self.id, origin = %key.origin, price = offer.price, "bidding");
                    world.transmit_fare_bid(key.origin, self.id);
                }
                if let Some(entry) = self.ledger.get_mut(&key) {
                    entry.decision = if bid { Decision::Bid } else { Decision::Declined };
                }
            }
        }

        for key in finished {
            self.ledger.remove(&key);
        }
    }

    /// Evaluate the offer under `key` from the taxi's position `from`.
    pub fn assess(&self, key: FareKey, offer: &FareOffer, from: Coord, now: Tick) -> BidAssessment {
        let to_origin = self.planner.plan(&self.map, from, key.origin);
        let to_destination = self.planner.plan(&self.map, key.origin, offer.destination);
        bid::assess(&BidInput {
            offered_at:           key.offered_at,
            now,
            price:                offer.price,
            max_wait:             self.max_wait,
            balance:              self.account.balance(),
            carrying_passenger:   self.passenger.is_some(),
            holds_allocated_fare: self.ledger.has_allocated(),
            time_to_origin:       bid::leg_cost(&to_origin),
            time_to_destination:  bid::leg_cost(&to_destination),
        })
    }
}

/// Where a taxi enters a map when it has no configured home: the node in the
/// westernmost column with the lowest `y`.
pub fn entry_point(map: &KnowledgeMap) -> Option<Coord> {
    map.coords().min()
}
