use anyhow::{Context, Result};
use arboard::Clipboard;
use clap::Parser;
use cleanbot_replay::config::{Config, DEFAULT_CONFIG_PATH};
use cleanbot_replay::log::LogOutput;
use cleanbot_replay::render::ScreenRenderer;
use cleanbot_replay::{EngineState, Replay};
use ::log::{error, info};
use macroquad::prelude::*;
use macroquad::window::Conf;
use std::path::PathBuf;
use std::time::Duration;

/// Replay a cleaning robot's recorded run over its house
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// House layout file
    house: PathBuf,
    /// Action trace file produced by the planner
    trace: PathBuf,
    /// Replay without a window and print a JSON summary
    #[arg(long)]
    headless: bool,
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

/// Keeps the loop at a fixed number of frames per second
struct FrameClock {
    period: f64,
    last: f64,
}

impl FrameClock {
    fn new(period: f64) -> Self {
        FrameClock {
            period,
            last: get_time(),
        }
    }

    /// Sleep out whatever is left of the current frame
    fn tick(&mut self) {
        let remaining = self.period - (get_time() - self.last);
        if remaining > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(remaining));
        }
        self.last = get_time();
    }
}

/// Window close or Escape, checked once per frame
fn cancelled() -> bool {
    is_quit_requested() || is_key_pressed(KeyCode::Escape)
}

fn copy_snapshot_to_clipboard(replay: &Replay) {
    match Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(replay.snapshot()) {
                error!("Failed to copy to clipboard: {}", e);
            } else {
                info!("House snapshot copied to clipboard");
                // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                std::thread::sleep(Duration::from_millis(100));
            }
        }
        Err(e) => error!("Failed to access clipboard: {}", e),
    }
}

fn handle_keys(replay: &Replay) {
    if is_key_pressed(KeyCode::C) {
        copy_snapshot_to_clipboard(replay);
    }
}

/// Show the first frame until a key is pressed. Returns false if cancelled.
async fn wait_for_start(
    replay: &Replay,
    renderer: &mut ScreenRenderer,
    clock: &mut FrameClock,
) -> bool {
    loop {
        if cancelled() {
            return false;
        }
        if get_last_key_pressed().is_some() {
            return true;
        }
        replay.draw(renderer);
        renderer.draw_message("Press any key to start the simulation", 0);
        next_frame().await;
        clock.tick();
    }
}

async fn playback(mut replay: Replay, config: Config) {
    prevent_quit();
    let mut renderer = ScreenRenderer::new(replay.grid(), &config.visual);
    let mut clock = FrameClock::new(config.tick_seconds());

    if config.playback.wait_for_start
        && !wait_for_start(&replay, &mut renderer, &mut clock).await
    {
        return;
    }

    info!("Starting playback");
    while replay.state() == EngineState::Running {
        if cancelled() {
            info!("Playback cancelled at step {}", replay.engine().iteration());
            return;
        }
        handle_keys(&replay);
        replay.tick(&mut renderer);
        next_frame().await;
        clock.tick();
    }

    let summary = replay.summary();
    info!("Final score {} ({})", summary.score, summary.status);
    while !cancelled() {
        handle_keys(&replay);
        replay.draw(&mut renderer);
        replay.draw_end_screen(&mut renderer);
        next_frame().await;
        clock.tick();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, source) = Config::load(&cli.config);
    let log_file =
        (!config.logging.log_file.is_empty()).then(|| PathBuf::from(&config.logging.log_file));
    // Headless mode prints JSON on stdout, so the log moves to stderr
    let output = if cli.headless {
        LogOutput::Stderr
    } else {
        LogOutput::Split
    };
    cleanbot_replay::log::init(&config.logging.level, log_file.as_deref(), output)?;
    source.report(&cli.config);

    let mut replay = Replay::load(&cli.house, &cli.trace, config.visible_cells())?;

    if cli.headless {
        let summary = replay.run_headless();
        let json = serde_json::to_string_pretty(&summary)
            .context("Failed to serialise replay summary")?;
        println!("{json}");
        return Ok(());
    }

    let conf = Conf {
        window_title: replay.description().to_string(),
        window_width: config.window.width,
        window_height: config.window.height,
        ..Default::default()
    };
    macroquad::Window::from_config(conf, playback(replay, config));
    Ok(())
}
