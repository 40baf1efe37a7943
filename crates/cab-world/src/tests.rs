//! Unit tests for cab-world's reference grid world.

#[cfg(test)]
mod helpers {
    use cab_core::{Coord, TaxiId};

    use crate::{GridWorld, GridWorldBuilder, NodeControl, World};

    pub fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    /// 3×3 grid, allocation after 1 tick, abandonment after 5.
    pub fn small_world() -> GridWorld {
        let mut b = GridWorldBuilder::grid(3, 3);
        b.allocation_delay(1).abandon_after(5);
        b.build()
    }

    /// Register and immediately place `taxi` at `at`.
    pub fn place(world: &mut GridWorld, taxi: TaxiId, at: Coord) {
        let entry = world.add_taxi(taxi, at).unwrap();
        world.occupy(entry.at, entry.heading, taxi).unwrap();
    }
}

// ── Topology ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod topology {
    use cab_core::Heading;
    use cab_map::NodeResolver;

    use super::helpers::{c, small_world};
    use crate::{GridWorldBuilder, World};

    #[test]
    fn grid_exports_all_roads() {
        let world = small_world();
        let map = world.export_map();
        assert_eq!(map.node_count(), 9);
        // 3×3 grid: 12 two-way roads.
        assert_eq!(map.edge_count(), 24);
        let e = map.edge(c(1, 1), c(1, 2)).unwrap();
        assert_eq!(e.heading, Heading::North);
        assert_eq!(e.distance, 1);
    }

    #[test]
    fn resolver() {
        let world = small_world();
        assert!(world.resolves(c(2, 2)));
        assert!(!world.resolves(c(3, 0)));
        assert_eq!(world.distance(c(0, 0), c(0, 2)), 2);
    }

    #[test]
    fn one_way_and_non_adjacent_roads() {
        let mut b = GridWorldBuilder::new();
        assert!(b.add_one_way(c(0, 0), c(1, 0)));
        assert!(!b.add_road(c(0, 0), c(5, 0)));
        let map = b.build().export_map();
        assert!(map.edge(c(0, 0), c(1, 0)).is_some());
        assert!(map.edge(c(1, 0), c(0, 0)).is_none());
        assert!(!map.contains(c(5, 0)));
    }
}

// ── Node movement ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use cab_core::{Heading, TaxiId};

    use super::helpers::{c, place, small_world};
    use crate::{NodeControl, Pose, World};

    #[test]
    fn signal_grants_entry_when_free() {
        let mut world = small_world();
        let entry = world.add_taxi(TaxiId(0), c(0, 0)).unwrap();
        assert_eq!(world.signal(TaxiId(0)), Some(entry));

        // Another taxi takes the node first.
        place(&mut world, TaxiId(1), c(0, 0));
        assert_eq!(world.signal(TaxiId(0)), None);
        assert!(world.occupy(entry.at, entry.heading, TaxiId(0)).is_none());
    }

    #[test]
    fn turn_then_vacate_moves_taxi() {
        let mut world = small_world();
        place(&mut world, TaxiId(0), c(0, 0));

        let request = world.turn(c(0, 0), Heading::North, Heading::East).unwrap();
        assert_eq!(request, Pose::new(c(1, 0), Heading::East));
        assert_eq!(world.signal(TaxiId(0)), Some(request));

        let moved = world.vacate(c(0, 0), Heading::North, Heading::East).unwrap();
        assert_eq!(moved, request);
        assert_eq!(world.taxi_position(TaxiId(0)), Some(c(1, 0)));
        assert_eq!(world.occupant(c(0, 0)), None);
        assert_eq!(world.occupant(c(1, 0)), Some(TaxiId(0)));
    }

    #[test]
    fn turn_without_road_is_declined() {
        let mut world = small_world();
        place(&mut world, TaxiId(0), c(0, 0));
        assert!(world.turn(c(0, 0), Heading::North, Heading::West).is_none());
        assert!(world.continue_through(c(0, 0), Heading::South).is_none());
        assert_eq!(
            world.continue_through(c(0, 0), Heading::North),
            Some(Pose::new(c(0, 1), Heading::North))
        );
    }

    #[test]
    fn blocked_target_holds_signal_and_vacate() {
        let mut world = small_world();
        place(&mut world, TaxiId(0), c(0, 0));
        place(&mut world, TaxiId(1), c(1, 0));
        world.turn(c(0, 0), Heading::North, Heading::East).unwrap();
        assert_eq!(world.signal(TaxiId(0)), None);
        assert!(world.vacate(c(0, 0), Heading::North, Heading::East).is_none());
        assert_eq!(world.taxi_position(TaxiId(0)), Some(c(0, 0)));
    }

    #[test]
    fn retire_frees_node() {
        let mut world = small_world();
        place(&mut world, TaxiId(0), c(1, 1));
        world.retire_taxi(TaxiId(0));
        assert_eq!(world.occupant(c(1, 1)), None);
        assert_eq!(world.signal(TaxiId(0)), None);
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch {
    use cab_core::{Heading, TaxiId};

    use super::helpers::{c, place, small_world};
    use crate::{Dispatcher, Message, NodeControl};

    #[test]
    fn post_fare_advises_registered_taxis() {
        let mut world = small_world();
        place(&mut world, TaxiId(0), c(0, 0));
        place(&mut world, TaxiId(1), c(2, 2));
        world.post_fare(c(1, 1), c(2, 0), 40).unwrap();

        let advice = Message::FareAdvice { origin: c(1, 1), destination: c(2, 0), price: 40 };
        assert_eq!(world.collect_messages(TaxiId(0)), vec![advice.clone()]);
        assert_eq!(world.collect_messages(TaxiId(1)), vec![advice]);
        assert!(world.collect_messages(TaxiId(0)).is_empty());
    }

    #[test]
    fn post_fare_off_network_rejected() {
        let mut world = small_world();
        assert!(world.post_fare(c(7, 7), c(0, 0), 10).is_none());
    }

    #[test]
    fn closest_bidder_wins_after_delay() {
        let mut world = small_world();
        place(&mut world, TaxiId(0), c(0, 0));
        place(&mut world, TaxiId(1), c(2, 2));
        let fare = world.post_fare(c(2, 1), c(0, 0), 30).unwrap();
        world.transmit_fare_bid(c(2, 1), TaxiId(0));
        world.transmit_fare_bid(c(2, 1), TaxiId(1));

        world.allocate(); // window still open at tick 0
        assert_eq!(world.allocation(fare), None);

        world.advance_clock();
        world.allocate();
        assert_eq!(world.allocation(fare), Some(TaxiId(1)));
        let msgs = world.collect_messages(TaxiId(1));
        assert!(msgs.contains(&Message::FareAllocated { origin: c(2, 1), destination: c(0, 0) }));
    }

    #[test]
    fn pickup_requires_allocation_and_dropoff_pays() {
        let mut world = small_world();
        place(&mut world, TaxiId(0), c(1, 1));
        let id = world.post_fare(c(1, 1), c(1, 2), 25).unwrap();
        assert!(world.pickup_fare(c(1, 1), Heading::North, TaxiId(0)).is_none());

        world.transmit_fare_bid(c(1, 1), TaxiId(0));
        world.advance_clock();
        world.allocate();
        world.collect_messages(TaxiId(0));

        let fare = world.pickup_fare(c(1, 1), Heading::North, TaxiId(0)).unwrap();
        assert_eq!(fare.id, id);
        // Cannot be picked up twice.
        assert!(world.pickup_fare(c(1, 1), Heading::North, TaxiId(0)).is_none());

        // Wrong place: handed back.
        let fare = world.dropoff_fare(c(1, 1), fare, Heading::North, TaxiId(0)).unwrap_err();
        world.dropoff_fare(c(1, 2), fare, Heading::North, TaxiId(0)).unwrap();
        assert_eq!(world.delivered(), 1);
        assert_eq!(world.collect_messages(TaxiId(0)), vec![Message::FarePaid { amount: 25 }]);
        assert_eq!(world.open_fares().count(), 0);
    }

    #[test]
    fn abandoned_allocated_fare_is_cancelled() {
        let mut world = small_world(); // abandon_after = 5
        place(&mut world, TaxiId(0), c(0, 0));
        world.post_fare(c(2, 2), c(0, 0), 30).unwrap();
        world.transmit_fare_bid(c(2, 2), TaxiId(0));
        world.advance_clock();
        world.allocate();
        world.collect_messages(TaxiId(0));

        // Ticks 2..=5: age never exceeds 5.
        for _ in 0..4 {
            world.advance_clock();
            world.expire_fares();
        }
        assert_eq!(world.open_fares().count(), 1);
        world.advance_clock();
        world.expire_fares();
        assert_eq!(world.open_fares().count(), 0);
        assert_eq!(
            world.collect_messages(TaxiId(0)),
            vec![Message::FareCancelled { origin: c(2, 2) }]
        );
    }
}
