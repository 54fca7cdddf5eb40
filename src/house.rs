//! The house-layout file and its text snapshot.
use crate::grid::{Cell, Grid};
use crate::input::{header_int, read_lines};
use anyhow::{Context, Result, anyhow, bail};
use log::info;
use std::path::Path;

const FIRST_GRID_LINE: usize = 5;

/// Parsed house-layout file
#[derive(Clone, Debug)]
pub struct HouseLayout {
    /// Free-text first line, used as the window title
    pub description: String,
    /// Display only: the replay never stops because of it
    pub max_steps: u64,
    pub max_battery: i64,
    pub grid: Grid,
}

impl HouseLayout {
    pub fn load(file_path: &Path) -> Result<Self> {
        let lines = read_lines(file_path)?;
        let house = Self::parse(&lines)
            .with_context(|| format!("Invalid house layout {}", file_path.display()))?;
        info!(
            "Loaded house {:?}: {}x{} cells, {} dirt, docking at ({}, {})",
            house.description,
            house.grid.rows,
            house.grid.cols,
            house.grid.total_dirt(),
            house.grid.docking().x,
            house.grid.docking().y
        );
        Ok(house)
    }

    pub fn parse(lines: &[String]) -> Result<Self> {
        let description = lines
            .first()
            .ok_or_else(|| anyhow!("Empty house layout"))?
            .trim()
            .to_string();
        let max_steps = header_int(lines, 1)?;
        let max_battery: i64 = header_int(lines, 2)?;
        if max_battery < 0 {
            bail!("maxBattery must not be negative, got {}", max_battery);
        }
        let rows = header_int(lines, 3)?;
        let cols = header_int(lines, 4)?;

        let grid_lines = lines.get(FIRST_GRID_LINE..).unwrap_or_default();
        let grid = Grid::build(grid_lines, rows, cols)?;

        Ok(HouseLayout {
            description,
            max_steps,
            max_battery,
            grid,
        })
    }

    /// Current state of the house in layout file format
    pub fn snapshot(&self, grid: &Grid) -> String {
        layout_text(&self.description, self.max_steps, self.max_battery, grid)
    }
}

/// Render a grid back into the house-layout format
///
/// Only the interior is written. Clean floor becomes a space and dirt above 9
/// is written as `9`.
pub fn layout_text(description: &str, max_steps: u64, max_battery: i64, grid: &Grid) -> String {
    let mut text = format!(
        "{description}\nmaxSteps = {max_steps}\nmaxBattery = {max_battery}\nrows = {}\ncols = {}\n",
        grid.rows - 2,
        grid.cols - 2
    );

    for y in 1..grid.rows - 1 {
        for x in 1..grid.cols - 1 {
            let symbol = match grid.get(x, y) {
                Some(Cell::Wall) => 'W',
                Some(Cell::Docking) => 'D',
                Some(Cell::Floor { dirt: 0 }) => ' ',
                Some(Cell::Floor { dirt }) => char::from_digit(dirt.min(9), 10).unwrap_or('9'),
                Some(Cell::EdgeWall) | None => 'W',
            };
            text.push(symbol);
        }
        text.push('\n');
    }
    text
}
