//! UI plugin: the in-game HUD and the results screen.

use bevy::prelude::*;

use crate::game::{ScoreBoard, Session};
use crate::AppState;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Playing), setup_hud)
            .add_systems(OnExit(AppState::Playing), cleanup_hud)
            .add_systems(Update, update_hud.run_if(in_state(AppState::Playing)))
            .add_systems(OnEnter(AppState::Completed), setup_results)
            .add_systems(OnExit(AppState::Completed), cleanup_results);
    }
}

/// Marker for HUD UI
#[derive(Component)]
struct HudUI;

/// Marker for the collection counter text
#[derive(Component)]
struct CountText;

/// Marker for the score text
#[derive(Component)]
struct ScoreText;

/// Marker for the elapsed-time text
#[derive(Component)]
struct TimeText;

/// Marker for the results overlay
#[derive(Component)]
struct ResultsUI;

/// "m:ss.t" clock display. Rounds to tenths before splitting so 59.96s
/// rolls over to "1:00.0" rather than showing "0:60.0".
fn format_time(seconds: f64) -> String {
    let tenths = (seconds.max(0.0) * 10.0).round() as u64;
    let minutes = tenths / 600;
    let secs = (tenths % 600) as f64 / 10.0;
    format!("{}:{:04.1}", minutes, secs)
}

// ============================================================================
// HUD
// ============================================================================

fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(40.0),
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                padding: UiRect::horizontal(Val::Px(12.0)),
                ..default()
            },
            HudUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Items Collected: 0"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::BLACK),
                CountText,
            ));
            parent.spawn((
                Text::new("Score: 0"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::BLACK),
                ScoreText,
            ));
            parent.spawn((
                Text::new("0:00.0"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::BLACK),
                TimeText,
            ));
        });
}

fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudUI>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

fn update_hud(
    session: Res<Session>,
    mut count_text: Query<&mut Text, (With<CountText>, Without<ScoreText>, Without<TimeText>)>,
    mut score_text: Query<&mut Text, (With<ScoreText>, Without<CountText>, Without<TimeText>)>,
    mut time_text: Query<&mut Text, (With<TimeText>, Without<CountText>, Without<ScoreText>)>,
) {
    let world = &session.world;

    if let Ok(mut text) = count_text.get_single_mut() {
        **text = format!(
            "Items Collected: {} / {}",
            world.collected,
            world.collected as usize + world.live_item_count()
        );
    }

    if let Ok(mut text) = score_text.get_single_mut() {
        **text = format!("Score: {}", world.score);
    }

    if let Ok(mut text) = time_text.get_single_mut() {
        **text = format_time(world.elapsed_seconds());
    }
}

// ============================================================================
// RESULTS SCREEN
// ============================================================================

fn setup_results(mut commands: Commands, session: Res<Session>, scores: Res<ScoreBoard>) {
    let world = &session.world;
    let summary = format!(
        "{} items in {}  -  {} pts",
        world.collected,
        format_time(world.elapsed_seconds()),
        world.score
    );

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            ResultsUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("ALL ITEMS COLLECTED!"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.3, 1.0, 0.4)),
                Node {
                    margin: UiRect::bottom(Val::Px(16.0)),
                    ..default()
                },
            ));
            parent.spawn((
                Text::new(summary),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(24.0)),
                    ..default()
                },
            ));

            if !scores.table.is_empty() {
                parent.spawn((
                    Text::new("Best Runs"),
                    TextFont {
                        font_size: 26.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.95, 0.85, 0.2)),
                    Node {
                        margin: UiRect::bottom(Val::Px(8.0)),
                        ..default()
                    },
                ));
                for (i, entry) in scores.table.top(5).iter().enumerate() {
                    parent.spawn((
                        Text::new(format!(
                            "{}. {} - {} pts in {}",
                            i + 1,
                            entry.name,
                            entry.score,
                            format_time(entry.time_seconds)
                        )),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.85, 0.85, 0.85)),
                    ));
                }
            }

            parent.spawn((
                Text::new("R - play again      Esc - quit"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
                Node {
                    margin: UiRect::top(Val::Px(28.0)),
                    ..default()
                },
            ));
        });
}

fn cleanup_results(mut commands: Commands, query: Query<Entity, With<ResultsUI>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ============================================================================
// TESTS
// ============================================================================
