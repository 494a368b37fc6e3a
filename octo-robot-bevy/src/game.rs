//! Game plugin: session resource, input capture, simulation stepping and
//! sprite synchronization.
//!
//! The core world is the single source of truth. Sprites are a projection
//! of it: every frame the item sprites are diffed against the live item
//! map, and the player sprite mirrors the player rect.

use std::collections::HashSet;
use std::path::PathBuf;

use bevy::app::AppExit;
use bevy::prelude::*;

use octo_robot_core::game::events::GameEventData;
use octo_robot_core::{
    tick, HighScoreTable, InputFrame, InputRecording, ItemKind, LevelConfig, LevelError,
    WorldState,
};

use crate::AppState;

/// Name recorded on the high-score table.
///
/// The original game had an interactive name-entry screen; until that
/// returns, every run is credited to the robot.
const PLAYER_NAME: &str = "Octo";

/// High-score file, kept next to the executable's working directory.
const SCORE_FILE: &str = "high_scores.json";

// ============================================================================
// RESOURCES
// ============================================================================

/// The running session: core world plus the config that built it and the
/// input recording accumulated so far.
#[derive(Resource)]
pub struct Session {
    /// The simulation state
    pub world: WorldState,
    /// Level the world was built from
    pub config: LevelConfig,
    /// Delta-compressed input log of this session
    pub recording: InputRecording,
}

impl Session {
    /// Build a fresh session from a level config.
    pub fn new(config: LevelConfig) -> Result<Self, LevelError> {
        let world = config.build()?;
        let recording = InputRecording::new(config.seed);
        Ok(Self {
            world,
            config,
            recording,
        })
    }

    /// Rebuild the world with a new scatter seed.
    pub fn restart(&mut self, seed: u64) {
        self.config.seed = seed;
        // The config validated when the session was first built and only
        // the seed changed, so a failure here means a bug, not bad data.
        match self.config.build() {
            Ok(world) => {
                self.world = world;
                self.recording = InputRecording::new(seed);
                info!(seed, "session restarted");
            }
            Err(e) => error!("restart failed: {e}"),
        }
    }
}

/// The persisted high-score table and where it lives.
#[derive(Resource)]
pub struct ScoreBoard {
    /// Ranked entries
    pub table: HighScoreTable,
    /// Backing file
    pub path: PathBuf,
}

impl ScoreBoard {
    /// Load the default score file (missing or corrupt files start empty).
    pub fn open_default() -> Self {
        let path = PathBuf::from(SCORE_FILE);
        let table = HighScoreTable::load(&path);
        Self { table, path }
    }

    /// Record a finished session and persist the table.
    pub fn record(&mut self, score: u32, collected: u32, time_seconds: f64) {
        let position = self.table.add(PLAYER_NAME, score, collected, time_seconds);
        if position > 0 {
            info!(position, score, "new high score");
        }
        if let Err(e) = self.table.save(&self.path) {
            warn!("could not save high scores: {e}");
        }
    }
}

/// The keyboard state captured this frame, normalized for the core.
#[derive(Resource, Default)]
pub struct CurrentInput(pub InputFrame);

// ============================================================================
// COMPONENTS
// ============================================================================

/// Anything spawned for the running session (cleaned up on state exit).
#[derive(Component)]
pub struct SessionSprite;

/// The player's sprite.
#[derive(Component)]
pub struct PlayerSprite;

/// Sprite mirroring the live item with this id.
#[derive(Component)]
pub struct ItemSprite(pub u32);

// ============================================================================
// PLUGIN
// ============================================================================

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentInput>()
            .add_systems(OnEnter(AppState::Playing), setup_session_sprites)
            .add_systems(OnExit(AppState::Playing), cleanup_session_sprites)
            // One core tick per fixed-timestep frame
            .add_systems(
                FixedUpdate,
                (capture_input, advance_simulation)
                    .chain()
                    .run_if(in_state(AppState::Playing)),
            )
            .add_systems(
                Update,
                (
                    (sync_player_sprite, sync_item_sprites, handle_restart_key)
                        .run_if(in_state(AppState::Playing)),
                    handle_completed_input.run_if(in_state(AppState::Completed)),
                    handle_quit_key,
                ),
            );
    }
}

// ============================================================================
// INPUT
// ============================================================================

/// Poll the movement keys (WASD or arrows) into an [`InputFrame`].
///
/// Anything else on the keyboard simply is not mapped.
fn capture_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<CurrentInput>) {
    let left = keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft);
    let right = keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight);
    let up = keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp);
    let down = keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown);

    input.0 = InputFrame::from_keys(left, right, up, down);
}

// ============================================================================
// SIMULATION
// ============================================================================

/// Run one core tick and react to its events.
fn advance_simulation(
    mut session: ResMut<Session>,
    input: Res<CurrentInput>,
    mut scores: ResMut<ScoreBoard>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let frame = input.0;
    let current_tick = session.world.tick;
    session.recording.record(current_tick, frame);

    let result = tick(&mut session.world, &frame);

    for event in &result.events {
        match &event.data {
            GameEventData::ItemCollected {
                kind,
                points,
                new_collected,
                new_score,
                ..
            } => {
                info!(
                    "collected a {} (+{} pts) - {} items, {} pts",
                    kind.label(),
                    points,
                    new_collected,
                    new_score
                );
            }
            GameEventData::SessionCompleted {
                collected, score, ..
            } => {
                let elapsed = session.world.elapsed_seconds();
                info!("all {collected} items collected in {elapsed:.1}s ({score} pts)");
                scores.record(*score, *collected, elapsed);
                next_state.set(AppState::Completed);
            }
        }
    }
}

// ============================================================================
// SPRITES
// ============================================================================

/// Translation for a core rect (sprites are center-anchored).
fn rect_translation(rect: &octo_robot_core::Rect, z: f32) -> Vec3 {
    let center = rect.center();
    Vec3::new(center.x, center.y, z)
}

/// Display color per item kind.
fn kind_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Battery => Color::srgb(0.95, 0.85, 0.2),
        ItemKind::Gear => Color::srgb(0.6, 0.6, 0.6),
        ItemKind::Gem => Color::srgb(0.2, 0.9, 0.9),
        ItemKind::Crystal => Color::srgb(0.7, 0.3, 0.9),
        ItemKind::PowerCore => Color::srgb(0.95, 0.25, 0.2),
    }
}

/// Spawn the ground strip and the player. Item sprites appear through the
/// per-frame diff in [`sync_item_sprites`].
fn setup_session_sprites(mut commands: Commands, session: Res<Session>) {
    let bounds = session.world.bounds;

    // Ground strip along the bottom of the world
    let ground_h = bounds.h / 6.0;
    commands.spawn((
        SessionSprite,
        Sprite {
            color: Color::srgb(0.1, 0.45, 0.2),
            custom_size: Some(Vec2::new(bounds.w, ground_h)),
            ..default()
        },
        Transform::from_xyz(
            bounds.left() + bounds.w / 2.0,
            bounds.bottom() + ground_h / 2.0,
            1.0,
        ),
    ));

    // The robot
    let player = &session.world.player;
    commands.spawn((
        SessionSprite,
        PlayerSprite,
        Name::new("Player"),
        Sprite {
            color: Color::srgb(0.5, 0.2, 0.8),
            custom_size: Some(Vec2::new(player.rect.w, player.rect.h)),
            ..default()
        },
        Transform::from_translation(rect_translation(&player.rect, 10.0)),
    ));
}

fn cleanup_session_sprites(mut commands: Commands, query: Query<Entity, With<SessionSprite>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

/// Mirror the player rect into its sprite transform.
fn sync_player_sprite(
    session: Res<Session>,
    mut query: Query<&mut Transform, With<PlayerSprite>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    transform.translation = rect_translation(&session.world.player.rect, 10.0);
}

/// Diff item sprites against the live item map: despawn collected ones,
/// spawn any the map has that the screen does not (fresh session, restart).
///
/// Kept sprites are re-pointed at the live item every frame. A restart
/// rescatters with item ids starting over from zero, so a sprite's id can
/// suddenly name a different item at a different position.
fn sync_item_sprites(
    mut commands: Commands,
    session: Res<Session>,
    mut query: Query<(Entity, &ItemSprite, &mut Transform, &mut Sprite)>,
) {
    let mut on_screen: HashSet<u32> = HashSet::with_capacity(query.iter().len());

    for (entity, sprite, mut transform, mut visual) in &mut query {
        match session.world.items.get(&sprite.0) {
            Some(item) => {
                transform.translation = rect_translation(&item.rect, 5.0);
                visual.color = kind_color(item.kind);
                visual.custom_size = Some(Vec2::new(item.rect.w, item.rect.h));
                on_screen.insert(sprite.0);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for item in session.world.items.values() {
        if on_screen.contains(&item.id) {
            continue;
        }
        commands.spawn((
            SessionSprite,
            ItemSprite(item.id),
            Sprite {
                color: kind_color(item.kind),
                custom_size: Some(Vec2::new(item.rect.w, item.rect.h)),
                ..default()
            },
            Transform::from_translation(rect_translation(&item.rect, 5.0)),
        ));
    }
}

// ============================================================================
// SESSION CONTROL
// ============================================================================

/// R mid-game rescatters the level with a fresh seed.
fn handle_restart_key(keyboard: Res<ButtonInput<KeyCode>>, mut session: ResMut<Session>) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        session.restart(rand::random());
    }
}

/// On the results screen, R starts a new session.
fn handle_completed_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<Session>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        session.restart(rand::random());
        next_state.set(AppState::Playing);
    }
}

/// Esc closes the game from any state. Normal close, exit code 0.
fn handle_quit_key(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
}

// ============================================================================
// TESTS
// ============================================================================
