pub mod config;
pub mod engine;
pub mod grid;
pub mod house;
pub mod input;
pub mod log;
pub mod render;
pub mod replay;
pub mod robot;
pub mod trace;
pub mod viewport;

pub use engine::{EngineState, StepEngine, Tick};
pub use grid::{Cell, Grid, Position};
pub use house::HouseLayout;
pub use replay::{Replay, ReplaySummary};
pub use robot::RobotState;
pub use trace::{ActionTrace, RunStatus, Step};
pub use viewport::Viewport;
