//! Unit tests for cab-core primitives.

#[cfg(test)]
mod ids {
    use crate::{Coord, FareId, TaxiId};

    #[test]
    fn index_roundtrip() {
        let id = TaxiId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(TaxiId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn display() {
        assert_eq!(TaxiId(7).to_string(), "TaxiId(7)");
        assert_eq!(FareId(3).to_string(), "FareId(3)");
        assert_eq!(Coord::new(2, -5).to_string(), "(2,-5)");
    }

    #[test]
    fn coord_ordering_is_x_then_y() {
        assert!(Coord::new(0, 9) < Coord::new(1, 0));
        assert!(Coord::new(1, 0) < Coord::new(1, 1));
    }

    #[test]
    fn coord_offset_and_distance() {
        let c = Coord::from((3, 4));
        assert_eq!(c.offset(-3, -4), Coord::new(0, 0));
        assert!((Coord::new(0, 0).euclidean(c) - 5.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod heading {
    use crate::Heading;

    #[test]
    fn from_delta_uses_sign_only() {
        assert_eq!(Heading::from_delta(0, 5), Some(Heading::North));
        assert_eq!(Heading::from_delta(-2, 0), Some(Heading::West));
        assert_eq!(Heading::from_delta(3, -3), Some(Heading::SouthEast));
        assert_eq!(Heading::from_delta(0, 0), None);
    }

    #[test]
    fn step_matches_from_delta() {
        for h in Heading::ALL {
            let (dx, dy) = h.step();
            assert_eq!(Heading::from_delta(dx, dy), Some(h));
        }
    }

    #[test]
    fn degrees_and_labels() {
        assert_eq!(Heading::East.degrees(), 90);
        assert_eq!(Heading::NorthWest.to_string(), "NW");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_offset() {
        assert_eq!(Tick(10).offset(3), Tick(13));
        assert_eq!(Tick::ZERO.offset(0), Tick::ZERO);
    }

    #[test]
    fn since_saturates() {
        assert_eq!(Tick(10).since(Tick(4)), 6);
        assert_eq!(Tick(4).since(Tick(10)), 0);
    }

    #[test]
    fn clock_dhm() {
        let mut clock = SimClock::new();
        // 1 day, 1 hour, 5 minutes
        for _ in 0..(1_440 + 65) {
            clock.advance();
        }
        assert_eq!(clock.elapsed_dhm(), (1, 1, 5));
        assert_eq!(clock.to_string(), "T1505 (day 1 01:05)");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: u32 = r1.gen_range(0..1_000);
            let b: u32 = r2.gen_range(0..1_000);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(rng.gen_bool(7.0)); // clamped
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(1);
        let mut a = root.child(1);
        let mut b = root.child(2);
        let xa: u64 = a.gen_range(0..u64::MAX);
        let xb: u64 = b.gen_range(0..u64::MAX);
        assert_ne!(xa, xb);
    }
}
