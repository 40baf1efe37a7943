//! Reference grid world with an integrated dispatcher.
//!
//! # Model
//!
//! - Nodes sit on integer grid points; roads join nodes one grid step apart
//!   (8-neighbourhood), one-way or both ways.
//! - At most one taxi occupies a node.  A taxi asks its node for an exit with
//!   `turn`/`continue_through`; [`GridWorld::signal`] grants that exit once
//!   the target node is free, and `vacate` performs the move.
//! - Fares are posted with [`GridWorld::post_fare`], advertised to every
//!   active taxi, allocated after `allocation_delay` ticks to the bidder
//!   closest to the origin, and cancelled when left uncollected for longer
//!   than `abandon_after` ticks.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use cab_core::{Coord, Credits, Distance, FareId, Heading, SimClock, TaxiId, Tick};
use cab_map::{KnowledgeMap, NodeResolver};

use crate::{Dispatcher, Fare, Message, NodeControl, Pose, World};

// ── Internal records ──────────────────────────────────────────────────────────

#[derive(Default)]
struct GridNode {
    /// Headings of roads leaving this node.
    exits: Vec<Heading>,
    occupant: Option<TaxiId>,
    /// Exit most recently requested by the occupant.
    exit_request: Option<Pose>,
}

struct TaxiSlot {
    /// Node currently occupied, `None` until the taxi has entered.
    at: Option<Coord>,
    /// Pending entry pose, set by `add_taxi`.
    entry: Option<Pose>,
}

struct FareRecord {
    fare: Fare,
    bids: Vec<TaxiId>,
    allocated_to: Option<TaxiId>,
    collected: bool,
}

// ── GridWorld ─────────────────────────────────────────────────────────────────

/// A small, deterministic world for driving taxis in tests and demos.
///
/// Construct with [`GridWorldBuilder`].
pub struct GridWorld {
    clock: SimClock,
    nodes: BTreeMap<Coord, GridNode>,
    taxis: BTreeMap<TaxiId, TaxiSlot>,
    fares: BTreeMap<FareId, FareRecord>,
    mailboxes: HashMap<TaxiId, Vec<Message>>,
    next_fare: u32,
    allocation_delay: u64,
    abandon_after: u64,
    delivered: u64,
}

impl GridWorld {
    // ── Clock ─────────────────────────────────────────────────────────────

    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn advance_clock(&mut self) {
        self.clock.advance();
    }

    // ── Taxis ─────────────────────────────────────────────────────────────

    /// The traffic signal for `taxi`: the pose it may move to this tick, if
    /// its requested exit (or its entry node) is free.
    pub fn signal(&self, taxi: TaxiId) -> Option<Pose> {
        let slot = self.taxis.get(&taxi)?;
        let wanted = match slot.at {
            Some(at) => self.nodes.get(&at)?.exit_request?,
            None => slot.entry?,
        };
        let target = self.nodes.get(&wanted.at)?;
        target.occupant.is_none().then_some(wanted)
    }

    /// Remove `taxi` from the network (gone off duty).
    pub fn retire_taxi(&mut self, taxi: TaxiId) {
        let at = self.taxis.remove(&taxi).and_then(|slot| slot.at);
        if let Some(node) = at.and_then(|at| self.nodes.get_mut(&at)) {
            node.occupant = None;
            node.exit_request = None;
        }
        self.mailboxes.remove(&taxi);
    }

    /// Node occupied by `taxi`, if it has entered the network.
    pub fn taxi_position(&self, taxi: TaxiId) -> Option<Coord> {
        self.taxis.get(&taxi)?.at
    }

    /// Taxi occupying `at`, if any.
    pub fn occupant(&self, at: Coord) -> Option<TaxiId> {
        self.nodes.get(&at)?.occupant
    }

    /// Queue a message for `taxi` directly, bypassing the auction.
    pub fn send(&mut self, taxi: TaxiId, message: Message) {
        self.mailboxes.entry(taxi).or_default().push(message);
    }

    // ── Fares ─────────────────────────────────────────────────────────────

    /// Post a new fare and advertise it to every registered taxi.
    ///
    /// Returns `None` if either end is not a node.
    pub fn post_fare(&mut self, origin: Coord, destination: Coord, price: Credits) -> Option<FareId> {
        if !self.nodes.contains_key(&origin) || !self.nodes.contains_key(&destination) {
            return None;
        }
        let id = FareId(self.next_fare);
        self.next_fare += 1;
        let fare = Fare { id, origin, destination, price, called_at: self.now() };
        debug!(fare = %id, %origin, %destination, price, "fare posted");

        let advice = Message::FareAdvice { origin, destination, price };
        let recipients: Vec<TaxiId> = self.taxis.keys().copied().collect();
        for taxi in recipients {
            self.send(taxi, advice.clone());
        }
        self.fares.insert(id, FareRecord { fare, bids: Vec::new(), allocated_to: None, collected: false });
        Some(id)
    }

    /// Allocate every fare whose bidding window has closed to the bidder
    /// closest (straight line) to its origin; ties go to the lowest id.
    pub fn allocate(&mut self) {
        let now = self.now();
        let mut awards = Vec::new();
        for record in self.fares.values_mut() {
            if record.allocated_to.is_some()
                || record.bids.is_empty()
                || now.since(record.fare.called_at) < self.allocation_delay
            {
                continue;
            }
            let origin = record.fare.origin;
            let taxis = &self.taxis;
            let winner = record
                .bids
                .iter()
                .copied()
                .filter_map(|t| {
                    let slot = taxis.get(&t)?;
                    let pos = slot.at.or(slot.entry.map(|p| p.at))?;
                    Some((pos.euclidean(origin), t))
                })
                .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
                .map(|(_, t)| t);
            if let Some(winner) = winner {
                record.allocated_to = Some(winner);
                awards.push((winner, origin, record.fare.destination, record.fare.id));
            }
        }
        for (taxi, origin, destination, fare) in awards {
            debug!(%fare, %taxi, "fare allocated");
            self.send(taxi, Message::FareAllocated { origin, destination });
        }
    }

    /// Drop fares left uncollected for longer than `abandon_after`, telling
    /// the allocated taxi (if any) that the fare cancelled.
    pub fn expire_fares(&mut self) {
        let now = self.now();
        let abandoned: Vec<FareId> = self
            .fares
            .values()
            .filter(|r| !r.collected && now.since(r.fare.called_at) > self.abandon_after)
            .map(|r| r.fare.id)
            .collect();
        for id in abandoned {
            let Some(record) = self.fares.remove(&id) else { continue };
            debug!(fare = %id, "fare abandoned");
            if let Some(taxi) = record.allocated_to {
                self.send(taxi, Message::FareCancelled { origin: record.fare.origin });
            }
        }
    }

    /// Open (posted, not yet delivered) fares.
    pub fn open_fares(&self) -> impl Iterator<Item = &Fare> + '_ {
        self.fares.values().map(|r| &r.fare)
    }

    /// Taxi a fare was allocated to, if any.
    pub fn allocation(&self, fare: FareId) -> Option<TaxiId> {
        self.fares.get(&fare)?.allocated_to
    }

    /// Number of fares delivered so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    // ── Topology ──────────────────────────────────────────────────────────

    pub fn node_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.nodes.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Neighbour reached by leaving `at` toward `heading`, if that road exists.
    fn exit_target(&self, at: Coord, heading: Heading) -> Option<Coord> {
        let node = self.nodes.get(&at)?;
        if !node.exits.contains(&heading) {
            return None;
        }
        let (dx, dy) = heading.step();
        let target = at.offset(dx, dy);
        self.nodes.contains_key(&target).then_some(target)
    }
}

// ── Collaborator traits ───────────────────────────────────────────────────────

impl NodeResolver for GridWorld {
    fn resolves(&self, at: Coord) -> bool {
        self.nodes.contains_key(&at)
    }

    fn distance(&self, from: Coord, to: Coord) -> Distance {
        from.euclidean(to).round() as Distance
    }
}

impl NodeControl for GridWorld {
    fn occupy(&mut self, at: Coord, heading: Heading, taxi: TaxiId) -> Option<Pose> {
        let node = self.nodes.get_mut(&at)?;
        if node.occupant.is_some() {
            return None;
        }
        node.occupant = Some(taxi);
        node.exit_request = None;
        if let Some(slot) = self.taxis.get_mut(&taxi) {
            slot.at = Some(at);
            slot.entry = None;
        }
        Some(Pose::new(at, heading))
    }

    fn vacate(&mut self, at: Coord, _heading: Heading, toward: Heading) -> Option<Pose> {
        let target = self.exit_target(at, toward)?;
        if self.nodes.get(&target)?.occupant.is_some() {
            return None;
        }
        let node = self.nodes.get_mut(&at)?;
        let taxi = node.occupant.take()?;
        node.exit_request = None;

        let next = self.nodes.get_mut(&target)?;
        next.occupant = Some(taxi);
        next.exit_request = None;
        if let Some(slot) = self.taxis.get_mut(&taxi) {
            slot.at = Some(target);
        }
        Some(Pose::new(target, toward))
    }

    fn turn(&mut self, at: Coord, _heading: Heading, toward: Heading) -> Option<Pose> {
        let target = self.exit_target(at, toward)?;
        let request = Pose::new(target, toward);
        self.nodes.get_mut(&at)?.exit_request = Some(request);
        Some(request)
    }

    fn continue_through(&mut self, at: Coord, heading: Heading) -> Option<Pose> {
        self.turn(at, heading, heading)
    }

    fn pickup_fare(&mut self, at: Coord, _heading: Heading, taxi: TaxiId) -> Option<Fare> {
        let record = self.fares.values_mut().find(|r| {
            r.fare.origin == at && r.allocated_to == Some(taxi) && !r.collected
        })?;
        record.collected = true;
        Some(record.fare.clone())
    }

    fn dropoff_fare(&mut self, at: Coord, fare: Fare, _heading: Heading, taxi: TaxiId)
        -> Result<(), Fare>
    {
        if fare.destination != at {
            return Err(fare);
        }
        self.fares.remove(&fare.id);
        self.delivered += 1;
        self.send(taxi, Message::FarePaid { amount: fare.price });
        Ok(())
    }
}

impl Dispatcher for GridWorld {
    fn transmit_fare_bid(&mut self, origin: Coord, taxi: TaxiId) {
        // The most recent unallocated fare at that origin.
        let record = self
            .fares
            .values_mut()
            .rev()
            .find(|r| r.fare.origin == origin && r.allocated_to.is_none());
        if let Some(record) = record {
            if !record.bids.contains(&taxi) {
                record.bids.push(taxi);
            }
        }
    }

    fn collect_messages(&mut self, taxi: TaxiId) -> Vec<Message> {
        self.mailboxes.remove(&taxi).unwrap_or_default()
    }
}

impl World for GridWorld {
    fn export_map(&self) -> KnowledgeMap {
        let mut map = KnowledgeMap::new();
        for (&at, node) in &self.nodes {
            map.insert_node(at);
            for &heading in &node.exits {
                if let Some(to) = self.exit_target(at, heading) {
                    map.connect(at, to, heading, self.distance(at, to));
                }
            }
        }
        map
    }

    fn sim_time(&self) -> Tick {
        self.now()
    }

    fn add_taxi(&mut self, taxi: TaxiId, at: Coord) -> Option<Pose> {
        let node = self.nodes.get(&at)?;
        let heading = node.exits.first().copied().unwrap_or(Heading::North);
        let entry = Pose::new(at, heading);
        self.taxis.insert(taxi, TaxiSlot { at: None, entry: Some(entry) });
        Some(entry)
    }
}

// ── GridWorldBuilder ──────────────────────────────────────────────────────────

/// Construct a [`GridWorld`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use cab_world::GridWorldBuilder;
///
/// let world = GridWorldBuilder::grid(3, 2).build();
/// assert_eq!(world.node_count(), 6);
/// ```
pub struct GridWorldBuilder {
    nodes: BTreeMap<Coord, Vec<Heading>>,
    allocation_delay: u64,
    abandon_after: u64,
}

impl GridWorldBuilder {
    pub fn new() -> Self {
        Self { nodes: BTreeMap::new(), allocation_delay: 1, abandon_after: 60 }
    }

    /// A `width × height` Manhattan grid with two-way roads between every
    /// orthogonally adjacent pair of nodes.
    pub fn grid(width: i32, height: i32) -> Self {
        let mut b = Self::new();
        for x in 0..width {
            for y in 0..height {
                b.add_node(Coord::new(x, y));
                if x + 1 < width {
                    b.add_road(Coord::new(x, y), Coord::new(x + 1, y));
                }
                if y + 1 < height {
                    b.add_road(Coord::new(x, y), Coord::new(x, y + 1));
                }
            }
        }
        b
    }

    pub fn add_node(&mut self, at: Coord) -> &mut Self {
        self.nodes.entry(at).or_default();
        self
    }

    /// Add a one-way road `from → to`.  The two nodes must be one grid step
    /// apart; returns `false` (and adds nothing) otherwise.
    pub fn add_one_way(&mut self, from: Coord, to: Coord) -> bool {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        if dx.abs() > 1 || dy.abs() > 1 {
            return false;
        }
        let Some(heading) = Heading::from_delta(dx, dy) else {
            return false;
        };
        self.nodes.entry(to).or_default();
        let exits = self.nodes.entry(from).or_default();
        if !exits.contains(&heading) {
            exits.push(heading);
        }
        true
    }

    /// Add a two-way road between adjacent nodes `a` and `b`.
    pub fn add_road(&mut self, a: Coord, b: Coord) -> bool {
        self.add_one_way(a, b) && self.add_one_way(b, a)
    }

    /// Ticks a fare stays open for bids before it is allocated.
    pub fn allocation_delay(&mut self, ticks: u64) -> &mut Self {
        self.allocation_delay = ticks;
        self
    }

    /// Ticks an uncollected fare waits before giving up.
    pub fn abandon_after(&mut self, ticks: u64) -> &mut Self {
        self.abandon_after = ticks;
        self
    }

    pub fn build(&self) -> GridWorld {
        let nodes = self
            .nodes
            .iter()
            .map(|(&at, exits)| (at, GridNode { exits: exits.clone(), ..GridNode::default() }))
            .collect();
        GridWorld {
            clock: SimClock::new(),
            nodes,
            taxis: BTreeMap::new(),
            fares: BTreeMap::new(),
            mailboxes: HashMap::new(),
            next_fare: 0,
            allocation_delay: self.allocation_delay,
            abandon_after: self.abandon_after,
            delivered: 0,
        }
    }
}

impl Default for GridWorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}
