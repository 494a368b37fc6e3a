//! Octo-Robot - a small 2D collection game
//!
//! The robot roams a bounded world collecting scattered items. All game
//! rules live in `octo-robot-core`; this crate owns the window, keyboard
//! polling, sprites and HUD, and steps the core simulation once per
//! fixed-timestep frame.

mod game;
mod ui;

use std::process::ExitCode;

use anyhow::Context;
use bevy::prelude::*;
use bevy::window::WindowMode;

use octo_robot_core::LevelConfig;

use game::{GamePlugin, ScoreBoard, Session};
use ui::UiPlugin;

/// Window size, matching the classic 800x600 level.
const WORLD_WIDTH: f32 = 800.0;
const WORLD_HEIGHT: f32 = 600.0;

/// Client states
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Active session
    #[default]
    Playing,
    /// Every item collected; results on screen
    Completed,
}

fn main() -> ExitCode {
    match run() {
        Ok(AppExit::Success) => ExitCode::SUCCESS,
        Ok(AppExit::Error(code)) => ExitCode::from(code.get()),
        Err(e) => {
            eprintln!("octo-robot: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<AppExit> {
    // Single optional CLI argument: a level file. Defaults otherwise.
    let config = match std::env::args().nth(1) {
        Some(path) => LevelConfig::load(&path)
            .with_context(|| format!("failed to load level {path:?}"))?,
        None => LevelConfig::default(),
    };

    let session = Session::new(config).context("failed to build the level")?;
    let scores = ScoreBoard::open_default();

    let exit = App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Octo-Robot".into(),
                resolution: (WORLD_WIDTH, WORLD_HEIGHT).into(),
                mode: WindowMode::Windowed,
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        // Core simulation rate
        .insert_resource(Time::<Fixed>::from_hz(octo_robot_core::TICK_RATE as f64))
        .insert_resource(session)
        .insert_resource(scores)
        .init_state::<AppState>()
        .add_plugins((GamePlugin, UiPlugin))
        .add_systems(Startup, setup_camera)
        .run();

    Ok(exit)
}

/// 2D camera centered on the world, sky-blue clear color.
fn setup_camera(mut commands: Commands, session: Res<Session>) {
    let center = session.world.bounds.center();

    commands.spawn((
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.53, 0.81, 0.92)),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 1000.0),
    ));

    info!("Octo-Robot v{} initialized", octo_robot_core::VERSION);
}
