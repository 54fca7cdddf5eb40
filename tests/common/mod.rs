#![allow(dead_code)]

use cleanbot_replay::render::{HudStats, Renderer};
use cleanbot_replay::{Grid, Position, RobotState, RunStatus, Viewport};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

/// Every renderer call, in order
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Draw {
        robot: Position,
        battery: i64,
        total_dirt: u32,
        viewport: Viewport,
    },
    Overlay(HudStats),
    EndScreen(i64, RunStatus),
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<Call>,
}

impl RecordingRenderer {
    pub fn frames(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Draw { .. }))
            .collect()
    }

    pub fn overlays(&self) -> Vec<HudStats> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Overlay(hud) => Some(*hud),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, grid: &Grid, robot: &RobotState, viewport: &Viewport) {
        self.calls.push(Call::Draw {
            robot: robot.pos,
            battery: robot.battery,
            total_dirt: grid.total_dirt(),
            viewport: *viewport,
        });
    }

    fn draw_overlay(&mut self, hud: &HudStats) {
        self.calls.push(Call::Overlay(*hud));
    }

    fn draw_end_screen(&mut self, score: i64, status: &RunStatus) {
        self.calls.push(Call::EndScreen(score, status.clone()));
    }
}

/// House layout file text
pub fn house_text(
    max_steps: u64,
    max_battery: i64,
    rows: usize,
    cols: usize,
    grid: &[&str],
) -> String {
    let mut text = format!(
        "Test house\nmaxSteps = {max_steps}\nmaxBattery = {max_battery}\n\
         rows = {rows}\ncols = {cols}\n"
    );
    for line in grid {
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// Action trace file text in the planner's layout
pub fn trace_text(steps: &str, final_dirt_left: u64, status: &str, score: i64) -> String {
    format!(
        "NumSteps = {}\nDirtLeft = {}\nStatus = {}\nInDock = FALSE\nScore = {}\nSteps\n{}\n",
        steps.len(),
        final_dirt_left,
        status,
        score,
        steps
    )
}

pub fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Write both input files into a fresh directory
pub fn write_inputs(house: &str, trace: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let house_path = dir.path().join("house.txt");
    let trace_path = dir.path().join("trace.txt");
    std::fs::write(&house_path, house).unwrap();
    std::fs::write(&trace_path, trace).unwrap();
    (dir, house_path, trace_path)
}

pub fn demo_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}
