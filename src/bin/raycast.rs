//! First-person view of a tile map.
//!
//! ```bash
//! cargo run --release -- --assets assets
//! cargo run --release -- --level maps/e1.ron --config engine.ron --fov 75
//! ```
//!
//! W/S or ↑/↓ move, ←/→ turn, A/D strafe, Shift runs, Space or E opens
//! doors, Esc quits.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use log::info;
use minifb::{Key, ScaleMode, Window, WindowOptions};

use raycast_rs::{
    Engine, EngineConfig,
    assets::load_bank,
    renderer::Software,
    sim::{FrameClock, InputCmd},
    world::{Level, LevelDef},
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Level description (RON); the built-in map when omitted
    #[arg(long, value_name = "FILE")]
    level: Option<PathBuf>,

    /// Engine tunables (RON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory the level's texture paths are relative to
    #[arg(long, value_name = "DIR", default_value = "assets")]
    assets: PathBuf,

    /// Framebuffer width in pixels
    #[arg(long)]
    width: Option<usize>,

    /// Framebuffer height in pixels
    #[arg(long)]
    height: Option<usize>,

    /// Horizontal field of view in degrees
    #[arg(long)]
    fov: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    // ─────────── configuration ────────────
    let mut cfg = match &opts.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(w) = opts.width {
        cfg.width = w;
    }
    if let Some(h) = opts.height {
        cfg.height = h;
    }
    if let Some(fov) = opts.fov {
        cfg.fov_deg = fov;
    }
    cfg.validate().context("command line overrides")?;

    // ─────────── level & textures ────────────
    let def = match &opts.level {
        Some(path) => {
            LevelDef::load(path).with_context(|| format!("loading level {}", path.display()))?
        }
        None => LevelDef::builtin(),
    };
    let bank = load_bank(&def.textures, &opts.assets);
    let level = Level::from_def(&def, cfg.door_use_radius).context("building level")?;

    let renderer = Software::new(cfg.shading, cfg.sky, cfg.ground);
    let mut engine = Engine::from_config(renderer, level, bank, &cfg);

    // ─────────── window ────────────
    let title = if def.name.is_empty() {
        "raycast".to_string()
    } else {
        format!("raycast - {}", def.name)
    };
    let mut win = Window::new(
        &title,
        cfg.width,
        cfg.height,
        WindowOptions {
            resize: true,
            scale_mode: ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    let mut clock = FrameClock::new(cfg.max_frame_dt);

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let dt = clock.tick();
        let cmd = read_input(&win);

        if let Some(ev) = engine.update(&cmd, dt) {
            info!("{ev:?}");
        }

        let t0 = Instant::now();
        let mut presented = Ok(());
        engine.render_frame(|fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            presented = win.update_with_buffer(fb, w, h);
        });
        presented?;

        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/// Sample the keyboard into one frame's command.
fn read_input(win: &Window) -> InputCmd {
    let down = |keys: &[Key]| keys.iter().any(|&k| win.is_key_down(k));

    InputCmd {
        forward: InputCmd::axis(down(&[Key::W, Key::Up]), down(&[Key::S, Key::Down])),
        strafe: InputCmd::axis(down(&[Key::D]), down(&[Key::A])),
        turn: InputCmd::axis(down(&[Key::Left]), down(&[Key::Right])),
        run: down(&[Key::LeftShift, Key::RightShift]),
        // raw level; the door set detects the rising edge
        use_act: down(&[Key::Space, Key::E]),
    }
}
