//! Synthetic downtown street grid.
//!
//! - Every avenue (column) is two-way.
//! - Even streets (rows) are two-way; odd streets alternate one-way east
//!   and one-way west.
//! - A two-way diagonal boulevard runs north-east from the south-west
//!   corner.
//!
//! Avenues plus street 0 keep every node reachable from every other.

use cab_core::Coord;
use cab_world::GridWorldBuilder;

pub fn build_downtown(width: i32, height: i32) -> GridWorldBuilder {
    let mut b = GridWorldBuilder::new();
    for x in 0..width {
        for y in 0..height {
            let here = Coord::new(x, y);
            b.add_node(here);
            if y + 1 < height {
                b.add_road(here, here.offset(0, 1));
            }
            if x + 1 < width {
                let east = here.offset(1, 0);
                match y % 4 {
                    1 => b.add_one_way(here, east),
                    3 => b.add_one_way(east, here),
                    _ => b.add_road(here, east),
                };
            }
        }
    }
    for i in 0..width.min(height) - 1 {
        b.add_road(Coord::new(i, i), Coord::new(i + 1, i + 1));
    }
    b
}
