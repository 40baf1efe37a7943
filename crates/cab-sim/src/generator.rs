//! Random fare arrivals.

use cab_core::{Coord, Credits, FareId, SimRng};
use cab_world::GridWorld;

/// Posts fares between random pairs of distinct nodes.
///
/// Each call to [`maybe_post`](Self::maybe_post) is one Bernoulli trial with
/// probability `probability`.  The price is the straight-line trip distance,
/// rounded up, times `price_per_distance`.
pub struct FareGenerator {
    rng:                SimRng,
    probability:        f64,
    price_per_distance: Credits,
    nodes:              Vec<Coord>,
}

impl FareGenerator {
    pub fn new(rng: SimRng, probability: f64, price_per_distance: Credits, nodes: Vec<Coord>) -> Self {
        Self { rng, probability, price_per_distance, nodes }
    }

    /// Maybe post one fare.  Returns its id if one was posted.
    pub fn maybe_post(&mut self, world: &mut GridWorld) -> Option<FareId> {
        if self.nodes.len() < 2 || !self.rng.gen_bool(self.probability) {
            return None;
        }
        let (origin, destination) = self.pick_trip();
        world.post_fare(origin, destination, self.price(origin, destination))
    }

    pub fn price(&self, origin: Coord, destination: Coord) -> Credits {
        let distance = origin.euclidean(destination).ceil() as Credits;
        distance.max(1) * self.price_per_distance
    }

    /// Two distinct nodes.  Requires at least two.
    fn pick_trip(&mut self) -> (Coord, Coord) {
        let n = self.nodes.len();
        let from = self.rng.gen_range(0..n);
        // Skip over `from` so the destination always differs.
        let mut to = self.rng.gen_range(0..n - 1);
        if to >= from {
            to += 1;
        }
        (self.nodes[from], self.nodes[to])
    }
}
