use std::collections::HashSet;

use crate::input::Direction;

/// Grid coordinate, 0-indexed from the top-left corner.
///
/// Signed so that a step off the board is representable and can be rejected
/// by [`GridWorld::in_bounds`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Logical grid dimensions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub height: u16,
    pub width: u16,
}

impl GridSize {
    #[must_use]
    pub const fn new(height: u16, width: u16) -> Self {
        Self { height, width }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && cell.row < i32::from(self.height)
            && cell.col < i32::from(self.width)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let width = i32::from(self.width);
        (0..i32::from(self.height))
            .flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }

    /// Row-major index of an in-bounds cell.
    #[must_use]
    pub fn index_of(self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        Some(row * usize::from(self.width) + col)
    }
}

/// Bounded coordinate space with static wall cells.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GridWorld {
    size: GridSize,
    walls: HashSet<Cell>,
}

impl GridWorld {
    /// An open board with no walls.
    #[must_use]
    pub fn open(size: GridSize) -> Self {
        Self {
            size,
            walls: HashSet::new(),
        }
    }

    /// A board with the given wall cells. Walls outside the bounds are dropped.
    #[must_use]
    pub fn with_walls(size: GridSize, walls: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            size,
            walls: walls.into_iter().filter(|cell| size.contains(*cell)).collect(),
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.size.contains(cell)
    }

    #[must_use]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    /// In bounds and not a wall.
    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_wall(cell)
    }
}
