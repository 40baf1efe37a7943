//! The taxi's private record of fare offers.
//!
//! Offers are keyed by `(offered_at, origin)`.  Iteration follows key order,
//! so a sweep over the ledger visits the oldest offers first and two taxis
//! fed the same message stream make the same choices.

use std::collections::BTreeMap;

use cab_core::{Coord, Credits, Tick};

/// Identity of an offer: when it was advertised and where the fare waits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FareKey {
    pub offered_at: Tick,
    pub origin:     Coord,
}

impl FareKey {
    #[inline]
    pub fn new(offered_at: Tick, origin: Coord) -> Self {
        Self { offered_at, origin }
    }

    /// Ticks since the offer was advertised.
    #[inline]
    pub fn age(&self, now: Tick) -> u64 {
        now.since(self.offered_at)
    }
}

/// The taxi's bid decision on an offer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Decision {
    /// Not yet evaluated.
    #[default]
    Undecided,
    /// A bid was transmitted.
    Bid,
    /// Evaluated and passed over.
    Declined,
}

/// What the taxi knows about one advertised fare.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FareOffer {
    pub destination: Coord,
    pub price:       Credits,
    pub decision:    Decision,
    /// Set once the dispatcher confirms this taxi won the fare.
    pub allocated:   bool,
}

impl FareOffer {
    pub fn new(destination: Coord, price: Credits) -> Self {
        Self { destination, price, decision: Decision::Undecided, allocated: false }
    }
}

/// Ordered store of [`FareOffer`]s.
#[derive(Clone, Debug, Default)]
pub struct FareLedger {
    offers: BTreeMap<FareKey, FareOffer>,
}

impl FareLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Recording ─────────────────────────────────────────────────────────

    /// Record a new offer.  A second offer with the same key is ignored and
    /// `false` returned; the first one is kept untouched.
    pub fn record(&mut self, key: FareKey, offer: FareOffer) -> bool {
        use std::collections::btree_map::Entry;
        match self.offers.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(offer);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Mark the offer matching `origin` and `destination` as allocated.
    ///
    /// Declined offers never match.  If a matching offer is already
    /// allocated nothing changes, so a repeated confirmation is harmless.
    /// Returns the key of the allocated offer, or `None` when no offer
    /// matches.
    pub fn confirm_allocation(&mut self, origin: Coord, destination: Coord) -> Option<FareKey> {
        let mut first_match = None;
        for (key, offer) in &self.offers {
            if key.origin != origin
                || offer.destination != destination
                || offer.decision == Decision::Declined
            {
                continue;
            }
            if offer.allocated {
                return Some(*key);
            }
            first_match.get_or_insert(*key);
        }
        let key = first_match?;
        if let Some(offer) = self.offers.get_mut(&key) {
            offer.allocated = true;
        }
        Some(key)
    }

    /// Drop the allocated offer at `origin`.  Unallocated offers are left
    /// alone.
    pub fn cancel(&mut self, origin: Coord) -> Option<(FareKey, FareOffer)> {
        let key = self
            .offers
            .iter()
            .find(|(k, o)| k.origin == origin && o.allocated)
            .map(|(k, _)| *k)?;
        self.offers.remove(&key).map(|offer| (key, offer))
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub fn get(&self, key: &FareKey) -> Option<&FareOffer> {
        self.offers.get(key)
    }

    pub fn get_mut(&mut self, key: &FareKey) -> Option<&mut FareOffer> {
        self.offers.get_mut(key)
    }

    pub fn remove(&mut self, key: &FareKey) -> Option<FareOffer> {
        self.offers.remove(key)
    }

    /// Snapshot of the current keys, oldest first.  Sweeps iterate over this
    /// and apply removals afterwards.
    pub fn keys(&self) -> Vec<FareKey> {
        self.offers.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FareKey, &FareOffer)> + '_ {
        self.offers.iter()
    }

    /// `true` if any offer has been allocated to this taxi.
    pub fn has_allocated(&self) -> bool {
        self.offers.values().any(|o| o.allocated)
    }

    /// Origins of the offers allocated to this taxi, oldest first.
    pub fn allocated_origins(&self) -> Vec<Coord> {
        self.offers.iter().filter(|(_, o)| o.allocated).map(|(k, _)| k.origin).collect()
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}
