use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Single axis used for board width and height.
pub type Coord = u16;

/// Linear cell index, `row * width + col`.
pub type CellIndex = usize;

/// Count type used for hazard counts and total-cell counts.
pub type CellCount = usize;

/// Neighbor indices of a single cell, never more than eight.
pub type Neighbors = SmallVec<[CellIndex; 8]>;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount) * (b as CellCount)
}

/// Compass displacements as `(rows, cols)`, in the same order as the linear
/// offsets `-W-1, -W, -W+1, -1, +1, W-1, W, W+1`.
const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Board geometry: maps linear indices to rows and columns and enumerates
/// neighbors without wrapping across the left or right edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: Coord,
    height: Coord,
}

impl Grid {
    pub const fn new(width: Coord, height: Coord) -> Self {
        Self { width, height }
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn cell_count(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn contains(&self, index: CellIndex) -> bool {
        index < self.cell_count()
    }

    /// `(row, col)` of `index`. The index is not bounds checked.
    pub const fn coords(&self, index: CellIndex) -> (usize, usize) {
        let width = self.width as usize;
        (index / width, index % width)
    }

    pub const fn index(&self, row: usize, col: usize) -> CellIndex {
        row * self.width as usize + col
    }

    pub fn iter_neighbors(&self, index: CellIndex) -> NeighborIter {
        NeighborIter::new(*self, index)
    }

    /// All valid neighbors of `index`: 3 for a corner, 5 for an edge and 8
    /// for an interior cell. Empty when `index` is outside the grid.
    pub fn neighbors_of(&self, index: CellIndex) -> Neighbors {
        self.iter_neighbors(index).collect()
    }

    /// Applies `delta` to the cell at `(row, col)`, returning a value only when
    /// it remains on the board.
    fn apply_delta(&self, (row, col): (usize, usize), delta: (isize, isize)) -> Option<CellIndex> {
        let (d_row, d_col) = delta;

        let next_row = row.checked_add_signed(d_row)?;
        if next_row >= self.height as usize {
            return None;
        }

        let next_col = col.checked_add_signed(d_col)?;
        if next_col >= self.width as usize {
            return None;
        }

        Some(self.index(next_row, next_col))
    }
}

#[derive(Debug)]
pub struct NeighborIter {
    grid: Grid,
    center: Option<(usize, usize)>,
    index: u8,
}

impl NeighborIter {
    fn new(grid: Grid, index: CellIndex) -> Self {
        let center = grid.contains(index).then(|| grid.coords(index));
        Self {
            grid,
            center,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let center = self.center?;
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = self
                .grid
                .apply_delta(center, DISPLACEMENTS[self.index as usize]);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
