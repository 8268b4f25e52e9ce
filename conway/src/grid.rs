// grid.rs - Toroidal grid for Conway's Game of Life

use log::trace;

/// Offsets of the Moore neighborhood, row-major, centre excluded.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// B3/S23: the fate of one cell given its live neighbor count.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Wrap `coord + delta` onto `[0, size)`. Only steps of one cell are ever
/// taken, so `-1` becomes `size - 1` and `size` becomes `0`.
#[inline]
fn wrap(coord: usize, delta: isize, size: usize) -> usize {
    match delta {
        -1 if coord == 0 => size - 1,
        -1 => coord - 1,
        1 if coord + 1 == size => 0,
        1 => coord + 1,
        _ => coord,
    }
}

/// Fixed-size cell matrix with ping-pong buffers.
///
/// Cells live in a flat `row * cols + col` array. `step` writes the next
/// generation into the back buffer and swaps, so neighbor counts for a
/// generation always read that generation's untouched state.
#[derive(Debug, Clone)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,  // Front buffer: the current generation
    next: Vec<bool>,   // Back buffer, only meaningful inside `step`
    generation: u64,
}

impl Grid {
    /// An all-dead grid of `cols × rows` cells at generation 0.
    ///
    /// # Panics
    /// If either dimension is zero.
    pub fn new(cols: usize, rows: usize) -> Self {
        assert!(cols > 0 && rows > 0, "grid must be at least 1x1, got {cols}x{rows}");
        let len = cols * rows;
        Self {
            cols,
            rows,
            cells: vec![false; len],
            next: vec![false; len],
            generation: 0,
        }
    }

    /// Grid covering a pixel viewport. Any remainder smaller than one cell
    /// is left over as margin.
    pub fn for_viewport(width: u32, height: u32, cell_size: u32) -> Self {
        assert!(cell_size > 0, "cell size must be non-zero");
        Self::new((width / cell_size) as usize, (height / cell_size) as usize)
    }

    pub fn cols(&self) -> usize { self.cols }
    pub fn rows(&self) -> usize { self.rows }
    pub fn generation(&self) -> u64 { self.generation }

    /// Current generation, row-major.
    pub fn cells(&self) -> &[bool] { &self.cells }

    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.cols && row < self.rows,
            "cell ({col}, {row}) is outside the {}x{} grid",
            self.cols,
            self.rows,
        );
        row * self.cols + col
    }

    /// # Panics
    /// If `(col, row)` is outside the grid.
    pub fn get(&self, col: usize, row: usize) -> bool {
        self.cells[self.index(col, row)]
    }

    /// Direct edit. Leaves the generation counter alone.
    pub fn set_alive(&mut self, col: usize, row: usize, alive: bool) {
        let i = self.index(col, row);
        self.cells[i] = alive;
    }

    pub fn toggle(&mut self, col: usize, row: usize) {
        let i = self.index(col, row);
        self.cells[i] = !self.cells[i];
    }

    /// Kill every cell. Counts as a direct edit, not a generation.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Live cells among the 8 neighbors of `(col, row)`, wrapping both axes.
    pub fn alive_neighbors(&self, col: usize, row: usize) -> u8 {
        self.index(col, row);
        Self::count_in(&self.cells, self.cols, self.rows, col, row)
    }

    fn count_in(cells: &[bool], cols: usize, rows: usize, col: usize, row: usize) -> u8 {
        let mut count = 0;
        for &(dc, dr) in &NEIGHBOR_OFFSETS {
            let nc = wrap(col, dc, cols);
            let nr = wrap(row, dr, rows);
            if cells[nr * cols + nc] { count += 1; }
        }
        count
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        let (cols, rows) = (self.cols, self.rows);
        for row in 0..rows {
            for col in 0..cols {
                let i = row * cols + col;
                let neighbors = Self::count_in(&self.cells, cols, rows, col, row);
                self.next[i] = next_state(self.cells[i], neighbors);
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next);
        self.generation += 1;
        trace!("generation {} computed", self.generation);
    }
}
