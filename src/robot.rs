use crate::grid::{Grid, Position};
use crate::trace::Step;

/// Mutable robot state driven by the replayed trace
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RobotState {
    pub pos: Position,
    /// Not clamped at zero; the trace decides when the robot is dead
    pub battery: i64,
    pub max_battery: i64,
}

impl RobotState {
    /// Robot sitting on the docking station with a full battery
    pub fn docked(grid: &Grid, max_battery: i64) -> Self {
        RobotState {
            pos: grid.docking(),
            battery: max_battery,
            max_battery,
        }
    }

    pub fn at_docking(&self, grid: &Grid) -> bool {
        grid.is_docking(self.pos)
    }

    /// Battery gained by one charging step: `ceil(max_battery / 20)`
    pub fn charge_rate(&self) -> i64 {
        self.max_battery / 20 + i64::from(self.max_battery % 20 != 0)
    }

    /// Charge one step if on the docking station. Returns whether it applied.
    pub fn try_charge(&mut self, grid: &Grid) -> bool {
        if !self.at_docking(grid) {
            return false;
        }
        self.battery = self.battery.saturating_add(self.charge_rate()).min(self.max_battery);
        true
    }

    /// Apply one non-terminal step and return the dirt removed (0 or 1)
    ///
    /// Moves are not checked against walls: the trace is trusted to keep the
    /// robot on walkable cells. `Finish` leaves everything untouched.
    pub fn apply_step(&mut self, grid: &mut Grid, step: Step) -> u32 {
        match step {
            Step::Finish => return 0,
            Step::North => self.pos.y -= 1,
            Step::East => self.pos.x += 1,
            Step::South => self.pos.y += 1,
            Step::West => self.pos.x -= 1,
            Step::Stay => {}
        }

        let mut cleaned = 0;
        if step == Step::Stay {
            self.try_charge(grid);
            if grid.clean(self.pos.x, self.pos.y) {
                cleaned = 1;
            }
        }

        if !self.at_docking(grid) {
            self.battery -= 1;
        }
        cleaned
    }
}
