//! A loaded replay: house, trace, engine and camera.
use crate::engine::{EngineState, StepEngine, Tick};
use crate::grid::Grid;
use crate::house::HouseLayout;
use crate::render::{HudStats, Renderer};
use crate::robot::RobotState;
use crate::trace::{ActionTrace, RunStatus};
use crate::viewport::Viewport;
use anyhow::Result;
use log::{info, warn};
use serde::Serialize;
use std::path::Path;

/// Outcome of a replay next to what the planner reported
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub steps_replayed: usize,
    pub reported_steps: u64,
    pub dirt_left: u32,
    pub reported_dirt_left: u64,
    pub battery: i64,
    pub max_battery: i64,
    pub at_docking: bool,
    pub reported_in_dock: Option<bool>,
    pub status: RunStatus,
    pub score: i64,
}

pub struct Replay {
    house: HouseLayout,
    trace: ActionTrace,
    engine: StepEngine,
    viewport: Viewport,
}

impl Replay {
    /// Load both input files and place the camera on the docking station
    pub fn load(house_path: &Path, trace_path: &Path, visible: (i32, i32)) -> Result<Self> {
        let house = HouseLayout::load(house_path)?;
        let trace = ActionTrace::load(trace_path)?;
        info!(
            "Loaded trace of {} steps (reported status {}, score {})",
            trace.len(),
            trace.status,
            trace.score
        );
        Ok(Self::new(house, trace, visible))
    }

    pub fn new(house: HouseLayout, trace: ActionTrace, visible: (i32, i32)) -> Self {
        let engine = StepEngine::new(house.grid.clone(), house.max_battery, trace.steps.clone());
        let viewport = Viewport::centered_on(house.grid.docking(), visible.0, visible.1);
        Replay {
            house,
            trace,
            engine,
            viewport,
        }
    }

    /// Advance one step and move the camera, without drawing
    pub fn step(&mut self) -> EngineState {
        if self.engine.is_finished() {
            return EngineState::Finished;
        }
        match self.engine.advance() {
            Tick::Applied(_) => {
                self.viewport.follow(self.engine.robot().pos);
            }
            Tick::Finished => self.check_reported_outcome(),
        }
        self.engine.state()
    }

    /// One playback tick: advance, follow, then draw the new state
    pub fn tick<R: Renderer>(&mut self, renderer: &mut R) -> EngineState {
        if self.engine.is_finished() {
            return EngineState::Finished;
        }
        let state = self.step();
        self.draw(renderer);
        state
    }

    /// Draw the current frame and its overlay
    pub fn draw<R: Renderer>(&self, renderer: &mut R) {
        renderer.draw(self.engine.grid(), self.engine.robot(), &self.viewport);
        renderer.draw_overlay(&self.hud());
    }

    pub fn draw_end_screen<R: Renderer>(&self, renderer: &mut R) {
        renderer.draw_end_screen(self.trace.score, &self.trace.status);
    }

    /// Replay to the end without a window
    pub fn run_headless(&mut self) -> ReplaySummary {
        while self.step() == EngineState::Running {}
        self.summary()
    }

    fn check_reported_outcome(&self) {
        let dirt_left = self.engine.dirt_left();
        if u64::from(dirt_left) != self.trace.final_dirt_left {
            warn!(
                "Replay left {} dirt but the trace reports {}",
                dirt_left, self.trace.final_dirt_left
            );
        }
    }

    pub fn hud(&self) -> HudStats {
        let robot = self.engine.robot();
        HudStats {
            step: self.engine.iteration(),
            max_steps: self.house.max_steps,
            battery: robot.battery,
            max_battery: robot.max_battery,
            dirt_left: self.engine.dirt_left(),
        }
    }

    pub fn summary(&self) -> ReplaySummary {
        let robot = self.engine.robot();
        ReplaySummary {
            steps_replayed: self.engine.iteration(),
            reported_steps: self.trace.num_steps,
            dirt_left: self.engine.dirt_left(),
            reported_dirt_left: self.trace.final_dirt_left,
            battery: robot.battery,
            max_battery: robot.max_battery,
            at_docking: self.engine.at_docking(),
            reported_in_dock: self.trace.in_dock,
            status: self.trace.status.clone(),
            score: self.trace.score,
        }
    }

    /// Current house in layout file format
    pub fn snapshot(&self) -> String {
        self.house.snapshot(self.engine.grid())
    }

    pub fn description(&self) -> &str {
        &self.house.description
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn robot(&self) -> &RobotState {
        self.engine.robot()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn engine(&self) -> &StepEngine {
        &self.engine
    }
}
