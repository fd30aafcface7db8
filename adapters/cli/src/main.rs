#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Sky Hop experience.

mod app;
mod high_score;

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use anyhow::Result;
use clap::Parser;
use skyhop_core::WINDOW_TITLE;
use skyhop_rendering::{Color, NullAudio, Presentation, RenderingBackend};
use skyhop_rendering_macroquad::MacroquadBackend;
use skyhop_system_menu::MenuModel;
use skyhop_system_spawning::{Config as SpawnConfig, Spawning};
use skyhop_world::{query, World};

use app::Session;

/// Command-line options for the Sky Hop binary.
#[derive(Debug, Parser)]
#[command(name = "skyhop", about = "Vertical platform hopper")]
struct Args {
    /// Seed for the platform and enemy spawn RNG. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// File the high score is persisted to.
    #[arg(long, default_value = "score.txt")]
    score_file: PathBuf,

    /// Render as fast as possible instead of syncing to the display.
    #[arg(long)]
    no_vsync: bool,

    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Load texture assets from assets/manifest.toml instead of drawing shapes.
    #[arg(long)]
    sprites: bool,
}

/// Entry point for the Sky Hop command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let high_score = high_score::load(&args.score_file);
    let world = World::with_high_score(high_score);
    let mut menu = MenuModel::new(query::viewport(&world));
    menu.set_high_score(high_score);

    let session = Rc::new(RefCell::new(Session::new(
        world,
        Spawning::new(SpawnConfig::new(seed)),
        menu,
        NullAudio,
        args.score_file,
    )));

    let scene = session.borrow().initial_scene()?;
    let presentation = Presentation::new(WINDOW_TITLE, Color::from_rgb_u8(0x18, 0x2c, 0x44), scene);

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps)
        .with_sprite_loading(args.sprites);

    let loop_session = Rc::clone(&session);
    backend.run(presentation, move |_frame_dt, input, scene| {
        loop_session.borrow_mut().frame(input, scene);
    })?;

    // Covers a run that was still in progress when the window closed.
    session.borrow().persist_final_score();
    Ok(())
}
