//! Forward-only replay of an action trace.
use crate::grid::Grid;
use crate::robot::RobotState;
use crate::trace::Step;
use log::{info, trace, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Finished,
}

/// Result of a single [`StepEngine::advance`] call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Applied(Step),
    Finished,
}

/// Consumes the trace one step per tick
///
/// `iteration` only grows. Once finished, further ticks change nothing.
#[derive(Clone, Debug)]
pub struct StepEngine {
    grid: Grid,
    robot: RobotState,
    steps: Vec<Step>,
    iteration: usize,
    dirt_left: u32,
    state: EngineState,
}

impl StepEngine {
    pub fn new(grid: Grid, max_battery: i64, steps: Vec<Step>) -> Self {
        let robot = RobotState::docked(&grid, max_battery);
        let dirt_left = grid.total_dirt();
        StepEngine {
            grid,
            robot,
            steps,
            iteration: 0,
            dirt_left,
            state: EngineState::Running,
        }
    }

    pub fn advance(&mut self) -> Tick {
        if self.state == EngineState::Finished {
            return Tick::Finished;
        }

        let step = match self.steps.get(self.iteration) {
            None | Some(Step::Finish) => {
                self.state = EngineState::Finished;
                info!(
                    "Replay finished after {} steps, {} dirt left, battery {}/{}",
                    self.iteration, self.dirt_left, self.robot.battery, self.robot.max_battery
                );
                return Tick::Finished;
            }
            Some(step) => *step,
        };

        self.dirt_left -= self.robot.apply_step(&mut self.grid, step);
        self.iteration += 1;

        let pos = self.robot.pos;
        if self.grid.is_blocked(pos.x, pos.y) {
            warn!(
                "Step {} ({:?}) put the robot on a wall at ({}, {})",
                self.iteration, step, pos.x, pos.y
            );
        }
        trace!(
            "Step {} {:?}: at ({}, {}), battery {}, dirt left {}",
            self.iteration,
            step,
            pos.x,
            pos.y,
            self.robot.battery,
            self.dirt_left
        );

        Tick::Applied(step)
    }

    /// Advance until finished, returning the number of steps applied
    pub fn run_to_end(&mut self) -> usize {
        let start = self.iteration;
        while self.advance() != Tick::Finished {}
        self.iteration - start
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == EngineState::Finished
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn dirt_left(&self) -> u32 {
        self.dirt_left
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn robot(&self) -> &RobotState {
        &self.robot
    }

    pub fn at_docking(&self) -> bool {
        self.robot.at_docking(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::parse_steps;

    fn engine(lines: &[&str], rows: usize, cols: usize, steps: &str) -> StepEngine {
        let grid = Grid::build(lines, rows, cols).unwrap();
        StepEngine::new(grid, 100, parse_steps(steps).unwrap())
    }

    #[test]
    fn test_initial_state() {
        let engine = engine(&["D5"], 1, 2, "EsF");

        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(engine.iteration(), 0);
        assert_eq!(engine.dirt_left(), 5);
        assert!(engine.at_docking());
    }

    #[test]
    fn test_finish_symbol_stops_replay() {
        let mut engine = engine(&["D5"], 1, 2, "EssFss");

        assert_eq!(engine.run_to_end(), 3);
        assert_eq!(engine.iteration(), 3);
        assert_eq!(engine.dirt_left(), 3);
        assert!(engine.is_finished());
    }

    #[test]
    fn test_end_of_trace_stops_replay() {
        let mut engine = engine(&["D5"], 1, 2, "Es");

        assert_eq!(engine.advance(), Tick::Applied(Step::East));
        assert_eq!(engine.advance(), Tick::Applied(Step::Stay));
        assert_eq!(engine.advance(), Tick::Finished);
        assert_eq!(engine.iteration(), 2);
    }

    #[test]
    fn test_empty_trace_finishes_immediately() {
        let mut engine = engine(&["D"], 1, 1, "");
        assert_eq!(engine.advance(), Tick::Finished);
        assert_eq!(engine.iteration(), 0);
    }

    #[test]
    fn test_ticks_after_finish_are_no_ops() {
        let mut engine = engine(&["D5"], 1, 2, "EsWF");
        engine.run_to_end();
        let robot = engine.robot().clone();
        let dirt = engine.dirt_left();

        for _ in 0..10 {
            assert_eq!(engine.advance(), Tick::Finished);
        }
        assert_eq!(engine.robot(), &robot);
        assert_eq!(engine.dirt_left(), dirt);
        assert_eq!(engine.iteration(), 3);
    }

    #[test]
    fn test_dirt_left_tracks_grid() {
        let mut engine = engine(&["D31", " 2 "], 2, 3, "EsssEssSWssF");

        while engine.advance() != Tick::Finished {
            assert_eq!(engine.dirt_left(), engine.grid().total_dirt());
        }
        assert_eq!(engine.dirt_left(), 0);
    }
}
