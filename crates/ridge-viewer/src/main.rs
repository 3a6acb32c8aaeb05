//! Ridge - procedural terrain viewer binary
//!
//! Opens a window onto an endless noise-generated landscape and flies a
//! first-person camera over it.
//!
//! Usage:
//!   ridge [--config <file.toml>] [--seed N] [--fullscreen] [--continuous-origin] [--ridged]

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use ridge_core::{FractalKind, OriginMode, ViewerConfig};
use ridge_viewer::ViewerApp;
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "ridge")]
#[command(about = "Ridge terrain viewer - fly over procedurally generated terrain")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the noise seed
    #[arg(long)]
    seed: Option<u32>,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,

    /// Let the terrain window slide with the camera instead of snapping to whole units
    #[arg(long)]
    continuous_origin: bool,

    /// Use ridged noise instead of plain Perlin
    #[arg(long)]
    ridged: bool,
}

impl Args {
    fn apply(&self, config: &mut ViewerConfig) {
        if let Some(seed) = self.seed {
            config.noise.seed = seed;
        }
        if self.fullscreen {
            config.window.fullscreen = true;
        }
        if self.continuous_origin {
            config.terrain.origin_mode = OriginMode::Continuous;
        }
        if self.ridged {
            config.noise.fractal = FractalKind::Ridged;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ViewerConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    info!(
        "Terrain {}x{} seed {} ({:?}, {:?} origin)",
        config.terrain.grid_width,
        config.terrain.grid_depth,
        config.noise.seed,
        config.noise.fractal,
        config.terrain.origin_mode,
    );
    info!("Controls:");
    info!("  WASD / arrows - Move");
    info!("  Space / E     - Up");
    info!("  Ctrl / Q      - Down");
    info!("  Shift         - Sprint");
    info!("  Mouse         - Look");
    info!("  F1            - Toggle shading");
    info!("  Escape        - Release cursor / Exit");

    let mut app = ViewerApp::new(config).context("Failed to set up terrain")?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;

    Ok(())
}
