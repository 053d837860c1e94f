mod app;
mod audio;
mod config;
mod host;
mod keybinds;

use clap::Parser;
use log::{error, info};
use retroframe_core::Frontend;
use std::cell::RefCell;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;
use winit::event_loop::EventLoop;

use app::App;
use config::FrontendConfig;
use host::{HeadlessHost, WindowHost, WindowState};
use keybinds::Hotkeys;

#[derive(Parser)]
#[command(name = "retroframe", about = "Runs a libretro core")]
struct Args {
    /// Path to the libretro core (.so, .dll or .dylib)
    core: Option<PathBuf>,

    /// Content to load; omit for cores that run without content
    content: Option<PathBuf>,

    /// Config file (defaults to the per-user config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Integer window scale
    #[arg(long)]
    scale: Option<u32>,

    /// Discard the core's audio
    #[arg(long)]
    no_audio: bool,

    /// Run this many frames without a window, then exit
    #[arg(long)]
    frames: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let Some(core) = args.core.clone() else {
        error!("No core supplied");
        return ExitCode::FAILURE;
    };

    let config_path = args.config.clone().unwrap_or_else(config::default_config_path);
    let mut cfg = config::load_from_file(&config_path);
    if let Some(scale) = args.scale {
        cfg.scale = scale.max(1);
    }

    let result = match args.frames {
        Some(frames) => run_headless(&core, args.content.as_deref(), &cfg, frames),
        None => run_windowed(&core, args.content.as_deref(), &cfg, args.no_audio),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn start(frontend: &mut Frontend, core: &Path, content: Option<&Path>) -> Result<(), Box<dyn Error>> {
    frontend.init_core(core)?;
    info!(
        "Loaded {} {}",
        frontend.core_name().unwrap_or_default(),
        frontend.core_version().unwrap_or_default()
    );
    frontend.load_content(content)?;
    Ok(())
}

fn run_headless(
    core: &Path,
    content: Option<&Path>,
    cfg: &FrontendConfig,
    frames: u64,
) -> Result<(), Box<dyn Error>> {
    let mut frontend = Frontend::new(Box::new(HeadlessHost::default()), cfg.bridge_config());
    start(&mut frontend, core, content)?;

    let mut ran = 0;
    while ran < frames && !frontend.should_close() {
        frontend.run_frame();
        ran += 1;
    }
    info!("Ran {ran} frame(s)");

    frontend.unload_content();
    frontend.close();
    Ok(())
}

fn run_windowed(
    core: &Path,
    content: Option<&Path>,
    cfg: &FrontendConfig,
    no_audio: bool,
) -> Result<(), Box<dyn Error>> {
    let state = Rc::new(RefCell::new(WindowState::new(
        !no_audio,
        cfg.audio_latency_frames as usize,
    )));
    let mut frontend = Frontend::new(
        Box::new(WindowHost::new(Rc::clone(&state))),
        cfg.bridge_config(),
    );
    start(&mut frontend, core, content)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(
        frontend,
        state,
        Hotkeys::from_config(&cfg.hotkeys),
        cfg.state_directory(),
        cfg.scale,
    );
    let result = event_loop.run_app(&mut app);

    let mut frontend = app.into_frontend();
    frontend.unload_content();
    frontend.close();
    result?;
    Ok(())
}
