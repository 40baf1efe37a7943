//! Unit tests for cab-map.
//!
//! All tests use hand-crafted maps so they run without a world.

#[cfg(test)]
mod helpers {
    use cab_core::{Coord, Distance, Heading};
    use rustc_hash::FxHashSet;

    use crate::{KnowledgeMap, NodeResolver};

    /// Add a two-way road between `a` and `b` with headings derived from the
    /// displacement.
    pub fn road(map: &mut KnowledgeMap, a: (i32, i32), b: (i32, i32), distance: Distance) {
        let (a, b) = (Coord::from(a), Coord::from(b));
        let there = Heading::from_delta(b.x - a.x, b.y - a.y).unwrap();
        let back = Heading::from_delta(a.x - b.x, a.y - b.y).unwrap();
        map.connect(a, b, there, distance);
        map.connect(b, a, back, distance);
    }

    /// Small test map:
    ///
    /// ```text
    ///   (0,1) ─── (1,1) ─── (2,1)
    ///     │                   │
    ///   (0,0) ─── (1,0) ─── (2,0)
    /// ```
    ///
    /// Bottom row edges cost 1, the left and right verticals 1, the top row
    /// costs 5 per edge.  Shortest (0,1)→(2,1) is therefore down, across,
    /// and up (cost 4) rather than straight across the top (cost 10).
    pub fn ladder_map() -> KnowledgeMap {
        let mut m = KnowledgeMap::new();
        road(&mut m, (0, 0), (1, 0), 1);
        road(&mut m, (1, 0), (2, 0), 1);
        road(&mut m, (0, 0), (0, 1), 1);
        road(&mut m, (2, 0), (2, 1), 1);
        road(&mut m, (0, 1), (1, 1), 5);
        road(&mut m, (1, 1), (2, 1), 5);
        m
    }

    /// Resolver over an explicit node set with Manhattan distances.
    pub struct SetResolver(pub FxHashSet<Coord>);

    impl SetResolver {
        pub fn of(coords: &[(i32, i32)]) -> Self {
            SetResolver(coords.iter().map(|&c| Coord::from(c)).collect())
        }
    }

    impl NodeResolver for SetResolver {
        fn resolves(&self, at: Coord) -> bool {
            self.0.contains(&at)
        }

        fn distance(&self, from: Coord, to: Coord) -> Distance {
            ((to.x - from.x).abs() + (to.y - from.y).abs()) as Distance
        }
    }
}

// ── KnowledgeMap structure ────────────────────────────────────────────────────

#[cfg(test)]
mod knowledge {
    use cab_core::{Coord, Heading};

    use super::helpers::{ladder_map, SetResolver};
    use crate::{Edge, KnowledgeMap, MapError};

    #[test]
    fn empty_map() {
        let m = KnowledgeMap::new();
        assert!(m.is_empty());
        assert_eq!(m.node_count(), 0);
        assert_eq!(m.edge_count(), 0);
    }

    #[test]
    fn ladder_counts() {
        let m = ladder_map();
        assert_eq!(m.node_count(), 6);
        assert_eq!(m.edge_count(), 12); // 6 roads, both directions
    }

    #[test]
    fn edge_lookup() {
        let m = ladder_map();
        let e = m.edge(Coord::new(0, 0), Coord::new(1, 0)).unwrap();
        assert_eq!(e, Edge::new(Heading::East, 1));
        assert!(m.edge(Coord::new(0, 0), Coord::new(2, 0)).is_none());
        assert!(m.edge(Coord::new(9, 9), Coord::new(0, 0)).is_none());
    }

    #[test]
    fn path_distance_sums_edges() {
        let m = ladder_map();
        let path = [Coord::new(0, 1), Coord::new(0, 0), Coord::new(1, 0)];
        assert_eq!(m.path_distance(&path), Some(2));
        assert_eq!(m.path_distance(&[Coord::new(0, 0)]), Some(0));
        // (0,0) → (2,0) is not a single hop.
        assert_eq!(m.path_distance(&[Coord::new(0, 0), Coord::new(2, 0)]), None);
    }

    #[test]
    fn add_node_uses_resolver_distance() {
        let resolver = SetResolver::of(&[(0, 0), (0, 3), (4, 0)]);
        let mut m = KnowledgeMap::new();
        m.add_node(
            Coord::new(0, 0),
            [(Heading::North, Coord::new(0, 3)), (Heading::East, Coord::new(4, 0))],
            &resolver,
        )
        .unwrap();
        assert_eq!(m.edge(Coord::new(0, 0), Coord::new(0, 3)), Some(Edge::new(Heading::North, 3)));
        assert_eq!(m.edge(Coord::new(0, 0), Coord::new(4, 0)), Some(Edge::new(Heading::East, 4)));
    }

    #[test]
    fn add_node_replaces_adjacency() {
        let resolver = SetResolver::of(&[(0, 0), (1, 0), (0, 1)]);
        let mut m = KnowledgeMap::new();
        m.add_node(Coord::new(0, 0), [(Heading::East, Coord::new(1, 0))], &resolver).unwrap();
        m.add_node(Coord::new(0, 0), [(Heading::North, Coord::new(0, 1))], &resolver).unwrap();
        let adj = m.neighbours(Coord::new(0, 0)).unwrap();
        assert_eq!(adj.len(), 1);
        assert!(adj.contains_key(&Coord::new(0, 1)));
    }

    #[test]
    fn add_node_rejects_unknown_node() {
        let resolver = SetResolver::of(&[(1, 0)]);
        let mut m = KnowledgeMap::new();
        let err = m
            .add_node(Coord::new(0, 0), [(Heading::East, Coord::new(1, 0))], &resolver)
            .unwrap_err();
        assert_eq!(err, MapError::UnknownNode(Coord::new(0, 0)));
        assert!(m.is_empty());
    }

    #[test]
    fn add_node_rejects_unknown_neighbour() {
        let resolver = SetResolver::of(&[(0, 0)]);
        let mut m = KnowledgeMap::new();
        let err = m
            .add_node(Coord::new(0, 0), [(Heading::East, Coord::new(1, 0))], &resolver)
            .unwrap_err();
        assert!(matches!(err, MapError::UnknownNeighbour { neighbour, .. } if neighbour == Coord::new(1, 0)));
        assert!(!m.contains(Coord::new(0, 0)));
    }

    #[test]
    fn import_into_empty_adopts_wholesale() {
        // Resolver knows nothing: adoption must not consult it.
        let resolver = SetResolver::of(&[]);
        let mut m = KnowledgeMap::new();
        m.import(ladder_map(), &resolver).unwrap();
        assert_eq!(m, ladder_map());
    }

    #[test]
    fn import_merges_and_recomputes_distances() {
        let resolver = SetResolver::of(&[(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1), (3, 0)]);
        let mut m = KnowledgeMap::new();
        m.connect(Coord::new(3, 0), Coord::new(2, 0), Heading::West, 7);

        m.import(ladder_map(), &resolver).unwrap();
        assert_eq!(m.node_count(), 7);
        // Top-row edge weight 5 is replaced by the resolver's distance 1.
        assert_eq!(m.edge(Coord::new(0, 1), Coord::new(1, 1)).unwrap().distance, 1);
        // Existing node untouched.
        assert_eq!(m.edge(Coord::new(3, 0), Coord::new(2, 0)).unwrap().distance, 7);
    }

    #[test]
    fn failed_import_leaves_map_unchanged() {
        // (2,1) is missing from the world.
        let resolver = SetResolver::of(&[(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (3, 0)]);
        let mut m = KnowledgeMap::new();
        m.connect(Coord::new(3, 0), Coord::new(2, 0), Heading::West, 7);
        let before = m.clone();

        assert!(m.import(ladder_map(), &resolver).is_err());
        assert_eq!(m, before);
    }
}

// ── Dijkstra planning ─────────────────────────────────────────────────────────

#[cfg(test)]
mod planning {
    use cab_core::{Coord, Heading};
    use rustc_hash::FxHashMap;

    use super::helpers::{ladder_map, road};
    use crate::{DijkstraPlanner, KnowledgeMap, Planner, Route};

    fn coords(v: &[(i32, i32)]) -> Vec<Coord> {
        v.iter().map(|&c| Coord::from(c)).collect()
    }

    #[test]
    fn same_node_is_single_waypoint() {
        let m = ladder_map();
        let r = DijkstraPlanner.plan(&m, Coord::new(1, 0), Coord::new(1, 0));
        assert_eq!(r.to_vec(), coords(&[(1, 0)]));
    }

    #[test]
    fn shortest_path_avoids_expensive_row() {
        let m = ladder_map();
        let r = DijkstraPlanner.plan(&m, Coord::new(0, 1), Coord::new(2, 1));
        assert_eq!(r.to_vec(), coords(&[(0, 1), (0, 0), (1, 0), (2, 0), (2, 1)]));
        assert_eq!(m.path_distance(&r.to_vec()), Some(4));
        assert_eq!(r.head(), Some(Coord::new(0, 1)));
        assert_eq!(r.goal(), Some(Coord::new(2, 1)));
    }

    #[test]
    fn unreachable_is_empty_route() {
        let mut m = ladder_map();
        m.insert_node(Coord::new(9, 9)); // island
        let r = DijkstraPlanner.plan(&m, Coord::new(0, 0), Coord::new(9, 9));
        assert!(r.is_empty());
        assert_eq!(r, Route::empty());
    }

    #[test]
    fn one_way_blocks_return() {
        let mut m = KnowledgeMap::new();
        m.connect(Coord::new(0, 0), Coord::new(1, 0), Heading::East, 1);
        assert_eq!(DijkstraPlanner.plan(&m, Coord::new(0, 0), Coord::new(1, 0)).len(), 2);
        assert!(DijkstraPlanner.plan(&m, Coord::new(1, 0), Coord::new(0, 0)).is_empty());
    }

    #[test]
    fn unknown_origin_is_empty_route() {
        let m = ladder_map();
        assert!(DijkstraPlanner.plan(&m, Coord::new(7, 7), Coord::new(0, 0)).is_empty());
    }

    #[test]
    fn route_consumption() {
        let mut r: Route = coords(&[(0, 0), (1, 0)]).into_iter().collect();
        assert_eq!(r.pop_head(), Some(Coord::new(0, 0)));
        assert_eq!(r.len(), 1);
        r.clear();
        assert!(r.is_empty());
        assert_eq!(r.pop_head(), None);
    }

    /// All-pairs shortest distances by Floyd–Warshall, for cross-checking.
    fn all_pairs(map: &KnowledgeMap) -> FxHashMap<(Coord, Coord), u64> {
        let nodes: Vec<Coord> = map.coords().collect();
        let mut d: FxHashMap<(Coord, Coord), u64> = FxHashMap::default();
        for &a in &nodes {
            d.insert((a, a), 0);
            for (&b, e) in map.neighbours(a).unwrap() {
                let w = u64::from(e.distance);
                let slot = d.entry((a, b)).or_insert(w);
                *slot = (*slot).min(w);
            }
        }
        for &k in &nodes {
            for &i in &nodes {
                for &j in &nodes {
                    if let (Some(&ik), Some(&kj)) = (d.get(&(i, k)), d.get(&(k, j))) {
                        let via = ik + kj;
                        let slot = d.entry((i, j)).or_insert(via);
                        *slot = (*slot).min(via);
                    }
                }
            }
        }
        d
    }

    #[test]
    fn matches_all_pairs_shortest_distance() {
        // 4×4 grid with uneven weights and two one-way streets.
        let mut m = KnowledgeMap::new();
        for x in 0..4 {
            for y in 0..4 {
                if x < 3 {
                    road(&mut m, (x, y), (x + 1, y), ((x * 7 + y * 3) % 5 + 1) as u32);
                }
                if y < 3 {
                    road(&mut m, (x, y), (x, y + 1), ((x * 2 + y * 5) % 4 + 1) as u32);
                }
            }
        }
        // Make (1,1)→(2,1) and (2,2)→(2,3) one-way by overwriting the reverse
        // direction with an isolated detour node edge.
        let mut one_way = KnowledgeMap::new();
        for (from, adj) in m.iter() {
            for (&to, e) in adj {
                let reverse_blocked = (from, to) == (Coord::new(2, 1), Coord::new(1, 1))
                    || (from, to) == (Coord::new(2, 3), Coord::new(2, 2));
                if !reverse_blocked {
                    one_way.connect(from, to, e.heading, e.distance);
                }
            }
        }
        one_way.insert_node(Coord::new(9, 9)); // unreachable island

        let truth = all_pairs(&one_way);
        let nodes: Vec<Coord> = one_way.coords().collect();
        for &a in &nodes {
            for &b in &nodes {
                let route = DijkstraPlanner.plan(&one_way, a, b);
                match truth.get(&(a, b)) {
                    Some(&best) => {
                        assert_eq!(route.head(), Some(a));
                        assert_eq!(route.goal(), Some(b));
                        assert_eq!(one_way.path_distance(&route.to_vec()), Some(best), "{a} → {b}");
                    }
                    None => assert!(route.is_empty(), "{a} → {b} should be unreachable"),
                }
            }
        }
    }
}
