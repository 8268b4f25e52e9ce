// patterns.rs - Preset seeds and random fill

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use log::debug;

use crate::Grid;

/// A preset as `(col, row)` offsets from its top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Bounding box as `(width, height)`.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(w, h), &(c, r)| (w.max(c + 1), h.max(r + 1)))
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (0, 4), (1, 4), (0, 5), (1, 5),
            (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8),
            (13, 2), (13, 8), (14, 5), (15, 3), (15, 7), (16, 4), (16, 5),
            (16, 6), (17, 5), (20, 2), (20, 3), (20, 4), (21, 2), (21, 3),
            (21, 4), (22, 1), (22, 5), (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (34, 3), (35, 2), (35, 3),
        ],
    },
];

/// Stamp `pattern` centred on the grid. Only live cells are written, and
/// offsets that run past an edge wrap around like neighbor lookups do.
pub fn stamp(grid: &mut Grid, pattern: &Pattern) {
    let (w, h) = pattern.extent();
    let origin_col = grid.cols().saturating_sub(w) / 2;
    let origin_row = grid.rows().saturating_sub(h) / 2;

    for &(dc, dr) in pattern.cells {
        let col = (origin_col + dc) % grid.cols();
        let row = (origin_row + dr) % grid.rows();
        grid.set_alive(col, row, true);
    }
    debug!("stamped {} at ({origin_col}, {origin_row})", pattern.name);
}

/// Overwrite every cell from a seeded generator; roughly a third end up alive.
pub fn randomize(grid: &mut Grid, seed_value: u64) {
    let mut hasher = DefaultHasher::new();
    seed_value.hash(&mut hasher);
    let mut seed = hasher.finish();

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            grid.set_alive(col, row, (seed >> 33) % 3 == 0);
        }
    }
    debug!("random fill (seed {seed_value}): {} alive", grid.population());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extents() {
        let by_name = |name: &str| PATTERNS.iter().find(|p| p.name == name).unwrap();
        assert_eq!(by_name("Glider").extent(), (3, 3));
        assert_eq!(by_name("Blinker").extent(), (3, 1));
        assert_eq!(by_name("Gosper Glider Gun").extent(), (36, 9));
    }

    #[test]
    fn presets_have_no_duplicate_cells() {
        for pattern in PATTERNS {
            let mut cells = pattern.cells.to_vec();
            cells.sort_unstable();
            cells.dedup();
            assert_eq!(cells.len(), pattern.cells.len(), "{}", pattern.name);
        }
    }

    #[test]
    fn stamp_centres_and_keeps_existing_cells() {
        let mut grid = Grid::new(9, 9);
        grid.set_alive(0, 0, true);
        stamp(&mut grid, &PATTERNS[1]); // Blinker

        assert!(grid.get(0, 0));
        assert!(grid.get(3, 4) && grid.get(4, 4) && grid.get(5, 4));
        assert_eq!(grid.population(), 4);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn stamp_wraps_when_pattern_is_larger_than_grid() {
        let mut grid = Grid::new(10, 5);
        let gun = PATTERNS.iter().find(|p| p.name == "Gosper Glider Gun").unwrap();
        stamp(&mut grid, gun);
        assert!(grid.population() > 0);
        assert!(grid.population() <= gun.cells.len());
    }

    #[test]
    fn randomize_is_deterministic_per_seed() {
        let mut a = Grid::new(32, 32);
        let mut b = Grid::new(32, 32);
        randomize(&mut a, 7);
        randomize(&mut b, 7);
        assert_eq!(a.cells(), b.cells());

        let alive = a.population();
        assert!(alive > 32 * 32 / 6 && alive < 32 * 32 / 2, "density off: {alive}");
    }
}
