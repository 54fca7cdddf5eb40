use crate::grid::Position;
use log::debug;

/// Visible window over the house grid, following the robot
///
/// A model cell (x, y) is drawn at screen cell (x + x_left, y + y_top). The
/// camera focus (x_mid, y_mid) sits in the middle of the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub x_left: i32,
    pub y_top: i32,
    pub x_mid: i32,
    pub y_mid: i32,
    /// Visible extent in cells
    pub width: i32,
    pub height: i32,
}

/// Which border the window slid past on a follow
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shift {
    Left,
    Right,
    Up,
    Down,
}

impl Viewport {
    /// Window of `width` x `height` cells with `focus` in the middle
    pub fn centered_on(focus: Position, width: i32, height: i32) -> Self {
        Viewport {
            x_left: width / 2 - focus.x,
            y_top: height / 2 - focus.y,
            x_mid: focus.x,
            y_mid: focus.y,
            width,
            height,
        }
    }

    pub fn left_border(&self) -> i32 {
        self.x_mid - self.width / 2
    }

    pub fn right_border(&self) -> i32 {
        self.x_mid + self.width / 2 - 1
    }

    pub fn top_border(&self) -> i32 {
        self.y_mid - self.height / 2
    }

    pub fn bottom_border(&self) -> i32 {
        self.y_mid + self.height / 2 - 1
    }

    /// Slide the window by one cell if the robot sits on one of its borders
    ///
    /// Borders are checked left, right, top, bottom and at most one shift
    /// happens per call, so a robot on a corner only moves the x axis.
    pub fn follow(&mut self, robot: Position) -> Option<Shift> {
        let shift = if robot.x == self.left_border() {
            self.x_left += 1;
            self.x_mid -= 1;
            Shift::Left
        } else if robot.x == self.right_border() {
            self.x_left -= 1;
            self.x_mid += 1;
            Shift::Right
        } else if robot.y == self.top_border() {
            self.y_top += 1;
            self.y_mid -= 1;
            Shift::Up
        } else if robot.y == self.bottom_border() {
            self.y_top -= 1;
            self.y_mid += 1;
            Shift::Down
        } else {
            return None;
        };

        debug!("Viewport shifted {:?}, focus now ({}, {})", shift, self.x_mid, self.y_mid);
        Some(shift)
    }

    /// Screen cell of a model cell
    pub fn to_screen(&self, pos: Position) -> (i32, i32) {
        (pos.x + self.x_left, pos.y + self.y_top)
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        let (x, y) = self.to_screen(pos);
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }
}
