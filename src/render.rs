//! Drawing of the replay. The engine never depends on this module.
use crate::config::VisualConfig;
use crate::grid::{Cell, Grid, Position};
use crate::robot::RobotState;
use crate::trace::RunStatus;
use crate::viewport::Viewport;
use macroquad::prelude::*;

/// Counters shown on top of the house
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudStats {
    pub step: usize,
    pub max_steps: u64,
    pub battery: i64,
    pub max_battery: i64,
    pub dirt_left: u32,
}

impl HudStats {
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Step: {}/{}", self.step, self.max_steps),
            format!("Battery: {}/{}", self.battery, self.max_battery),
            format!("Dirt: {}", self.dirt_left),
        ]
    }
}

/// Consumer of the replay state, called once per tick after the state changed
pub trait Renderer {
    fn draw(&mut self, grid: &Grid, robot: &RobotState, viewport: &Viewport);
    fn draw_overlay(&mut self, hud: &HudStats);
    fn draw_end_screen(&mut self, score: i64, status: &RunStatus);
}

const BACKGROUND: Color = Color::new(29.0 / 255.0, 89.0 / 255.0, 1.0 / 255.0, 1.0);
const TEXT: Color = Color::new(241.0 / 255.0, 229.0 / 255.0, 209.0 / 255.0, 1.0);
const FRAME: Color = Color::new(196.0 / 255.0, 202.0 / 255.0, 202.0 / 255.0, 1.0);
const ROBOT_FRAME: Color = Color::new(65.0 / 255.0, 65.0 / 255.0, 67.0 / 255.0, 1.0);
const ROBOT: Color = Color::new(168.0 / 255.0, 170.0 / 255.0, 169.0 / 255.0, 1.0);
const DOCKING: Color = Color::new(160.0 / 255.0, 112.0 / 255.0, 188.0 / 255.0, 1.0);
const FLOOR: Color = Color::new(170.0 / 255.0, 159.0 / 255.0, 137.0 / 255.0, 1.0);
const EDGE_WALL: Color = Color::new(156.0 / 255.0, 69.0 / 255.0, 49.0 / 255.0, 1.0);
const WALL: Color = Color::new(192.0 / 255.0, 141.0 / 255.0, 122.0 / 255.0, 1.0);
const DIRT: Color = Color::new(47.0 / 255.0, 79.0 / 255.0, 79.0 / 255.0, 1.0);

/// Window renderer built on macroquad
pub struct ScreenRenderer {
    cell_size: f32,
    margin: f32,
    dirt_size: f32,
    dirt_per_speck: u32,
    font_size: u16,
    /// Speck offsets inside each cell, by cell ID, fixed for the whole replay
    specks: Vec<Vec<(f32, f32)>>,
}

impl ScreenRenderer {
    pub fn new(grid: &Grid, visual: &VisualConfig) -> Self {
        let dirt_per_speck = visual.dirt_per_speck.max(1);
        let spread = (visual.cell_size - 1 - visual.dirt_size).max(0);

        let specks: Vec<Vec<(f32, f32)>> = grid
            .cells()
            .map(|(_, cell)| {
                (0..cell.dirt().div_ceil(dirt_per_speck))
                    .map(|_| {
                        (
                            macroquad::rand::gen_range(0, spread + 1) as f32,
                            macroquad::rand::gen_range(0, spread + 1) as f32,
                        )
                    })
                    .collect()
            })
            .collect();

        ScreenRenderer {
            cell_size: visual.cell_size as f32,
            margin: visual.cell_margin as f32,
            dirt_size: visual.dirt_size as f32,
            dirt_per_speck,
            font_size: visual.font_size,
            specks,
        }
    }

    fn screen_coords(&self, viewport: &Viewport, pos: Position) -> (f32, f32) {
        let (x, y) = viewport.to_screen(pos);
        (x as f32 * self.cell_size, y as f32 * self.cell_size)
    }

    fn draw_framed(&self, x: f32, y: f32, size: f32, frame: Color, fill: Color) {
        draw_rectangle(x, y, size, size, frame);
        draw_rectangle(
            x + self.margin,
            y + self.margin,
            size - 2.0 * self.margin,
            size - 2.0 * self.margin,
            fill,
        );
    }

    fn draw_cell(&self, grid: &Grid, pos: Position, cell: Cell, x: f32, y: f32) {
        let size = self.cell_size;
        match cell {
            Cell::Wall => self.draw_framed(x, y, size, FRAME, WALL),
            Cell::EdgeWall => self.draw_framed(x, y, size, FRAME, EDGE_WALL),
            Cell::Docking => {
                draw_rectangle(x, y, size, size, FLOOR);
                let pad = self.margin;
                self.draw_framed(x + pad, y + pad, size - 2.0 * pad, FRAME, DOCKING);
            }
            Cell::Floor { dirt } => {
                draw_rectangle(x, y, size, size, FLOOR);
                let id = grid.get_id(pos.x, pos.y) as usize;
                let shown = dirt.div_ceil(self.dirt_per_speck) as usize;
                for (dx, dy) in self.specks[id].iter().take(shown) {
                    draw_rectangle(x + dx, y + dy, self.dirt_size, self.dirt_size, DIRT);
                }
            }
        }
    }

    /// Text centred horizontally near the top of the window, `line` rows down
    pub fn draw_message(&self, text: &str, line: i32) {
        let dims = measure_text(text, None, self.font_size, 1.0);
        let x = screen_width() / 2.0 - dims.width / 2.0;
        let y = screen_height() / 6.0 + line as f32 * dims.height * 2.0;
        draw_text(text, x, y, self.font_size as f32, TEXT);
    }
}

impl Renderer for ScreenRenderer {
    fn draw(&mut self, grid: &Grid, robot: &RobotState, viewport: &Viewport) {
        clear_background(BACKGROUND);

        for (pos, cell) in grid.cells() {
            if !viewport.is_visible(pos) {
                continue;
            }
            let (x, y) = self.screen_coords(viewport, pos);
            self.draw_cell(grid, pos, cell, x, y);
        }

        let pad = 3.0 * self.margin;
        let (x, y) = self.screen_coords(viewport, robot.pos);
        self.draw_framed(x + pad, y + pad, self.cell_size - 2.0 * pad, ROBOT_FRAME, ROBOT);
    }

    fn draw_overlay(&mut self, hud: &HudStats) {
        let font_size = self.font_size as f32;
        for (line, text) in hud.lines().iter().enumerate() {
            let y = 10.0 + line as f32 * font_size + font_size * 0.75;
            draw_text(text, 10.0, y, font_size, TEXT);
        }
    }

    fn draw_end_screen(&mut self, score: i64, status: &RunStatus) {
        self.draw_message(&status.to_string(), -1);
        self.draw_message(&format!("Score: {}", score), 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_lines() {
        let hud = HudStats {
            step: 4,
            max_steps: 100,
            battery: -2,
            max_battery: 50,
            dirt_left: 7,
        };
        assert_eq!(hud.lines(), ["Step: 4/100", "Battery: -2/50", "Dirt: 7"]);
    }
}
