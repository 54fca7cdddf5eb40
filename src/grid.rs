use anyhow::{Context, Result, bail};

/// Largest grid accepted, edge-wall ring included
pub const MAX_CELLS: usize = 1 << 24;

/// A single cell of the house grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Walkable floor with remaining dirt units
    Floor { dirt: u32 },
    /// Interior wall read from the layout
    Wall,
    /// Synthesized ring around the house
    EdgeWall,
    /// The charging station, never dirty
    Docking,
}

impl Cell {
    /// Resolve a layout symbol into a cell
    ///
    /// Anything that is not a wall, a docking station or a digit is clean floor.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            'W' => Cell::Wall,
            'D' => Cell::Docking,
            _ => Cell::Floor {
                dirt: symbol.to_digit(10).unwrap_or(0),
            },
        }
    }

    pub fn dirt(&self) -> u32 {
        match self {
            Cell::Floor { dirt } => *dirt,
            Cell::Wall | Cell::EdgeWall | Cell::Docking => 0,
        }
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall | Cell::EdgeWall)
    }
}

/// Grid position, x = column and y = row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

/// House grid including the edge-wall ring
///
/// Shape is fixed at build time; only floor dirt levels change afterwards.
#[derive(Clone, Debug)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
    cells: Vec<Cell>,
    docking: Position,
}

impl Grid {
    /// Build a grid from interior layout lines
    ///
    /// `declared_rows`/`declared_cols` exclude the wall ring, so the grid is two
    /// cells larger in each dimension. Missing lines and short lines are padded
    /// with clean floor; characters past the declared width are ignored. Fails
    /// when the grid would exceed [`MAX_CELLS`] or the interior holds no docking
    /// station. With several, the last one read wins.
    pub fn build<S: AsRef<str>>(
        lines: &[S],
        declared_rows: usize,
        declared_cols: usize,
    ) -> Result<Self> {
        let rows = declared_rows.checked_add(2).context("Too many rows")?;
        let cols = declared_cols.checked_add(2).context("Too many columns")?;
        let size = rows
            .checked_mul(cols)
            .filter(|&size| size <= MAX_CELLS)
            .with_context(|| {
                format!("Grid of {declared_rows}x{declared_cols} exceeds {MAX_CELLS} cells")
            })?;
        let mut cells = vec![Cell::Floor { dirt: 0 }; size];
        let mut docking = None;

        for row in 0..declared_rows {
            let mut symbols = lines.get(row).map(|line| line.as_ref().chars());
            for col in 0..declared_cols {
                let symbol = symbols.as_mut().and_then(|chars| chars.next()).unwrap_or(' ');
                let cell = Cell::from_symbol(symbol);
                if cell == Cell::Docking {
                    docking = Some(Position::new(col as i32 + 1, row as i32 + 1));
                }
                cells[(row + 1) * cols + col + 1] = cell;
            }
        }

        for row in 0..rows {
            for col in 0..cols {
                if row == 0 || row == rows - 1 || col == 0 || col == cols - 1 {
                    cells[row * cols + col] = Cell::EdgeWall;
                }
            }
        }

        let Some(docking) = docking else {
            bail!("House has no docking station");
        };
        Ok(Grid {
            rows: rows as i32,
            cols: cols as i32,
            cells,
            docking,
        })
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.cols && y >= 0 && y < self.rows
    }

    /// Convert (x, y) coordinates to cell ID
    pub fn get_id(&self, x: i32, y: i32) -> i32 {
        x + y * self.cols
    }

    /// Get the cell at (x, y), `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.cells[self.get_id(x, y) as usize])
    }

    /// Check if a cell at (x, y) is a wall
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        // Out of bounds is considered blocked
        self.get(x, y).map_or(true, |cell| cell.is_wall())
    }

    pub fn docking(&self) -> Position {
        self.docking
    }

    pub fn is_docking(&self, pos: Position) -> bool {
        pos == self.docking
    }

    /// Remove one unit of dirt at (x, y)
    ///
    /// Returns false when the cell is clean, not floor or outside the grid.
    pub fn clean(&mut self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let id = self.get_id(x, y) as usize;
        match &mut self.cells[id] {
            Cell::Floor { dirt } if *dirt > 0 => {
                *dirt -= 1;
                true
            }
            _ => false,
        }
    }

    /// Sum of dirt over every cell
    pub fn total_dirt(&self) -> u32 {
        self.cells.iter().map(Cell::dirt).sum()
    }

    /// Iterate over every cell with its position, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(id, cell)| (Position::new(id as i32 % cols, id as i32 / cols), *cell))
    }
}
