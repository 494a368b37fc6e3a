//! The Per-Frame Update Step
//!
//! One full update cycle in fixed order: input intent, movement,
//! collision/collection, completion check. The client calls [`tick`] once
//! per fixed-timestep frame; [`replay`] re-runs a recorded session
//! headlessly to the same final state.

use tracing::info;

use crate::game::collision::overlapping_items;
use crate::game::events::GameEvent;
use crate::game::input::{InputFrame, InputRecording};
use crate::game::item::collect_item;
use crate::game::movement::step_player;
use crate::game::state::{SessionPhase, WorldState};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Whether the session completed this tick (or already had)
    pub completed: bool,
}

/// Run one update cycle.
///
/// Order is fixed: advance the tick counter, move the player, resolve
/// collisions against a snapshot of the live items, then check
/// completion. Ticking a completed world is a no-op.
pub fn tick(world: &mut WorldState, input: &InputFrame) -> TickResult {
    let mut result = TickResult::default();

    if world.is_completed() {
        result.completed = true;
        return result;
    }

    // 0. Advance tick counter
    world.tick += 1;

    // 1. Input -> movement
    let intent = input.intent();
    let bounds = world.bounds;
    step_player(&mut world.player, intent, &bounds);

    // 2. Collision & collection: snapshot first, then remove.
    // Order across simultaneous overlaps is ascending item id.
    let hits = overlapping_items(world);
    for item_id in hits {
        if let Some(event) = collect_item(world, item_id) {
            world.push_event(event);
        }
    }

    // 3. Completion: the live map emptied out
    if world.items.is_empty() {
        world.phase = SessionPhase::Completed;
        world.completed_tick = Some(world.tick);
        world.push_event(GameEvent::session_completed(
            world.tick,
            world.collected,
            world.score,
        ));
        info!(
            tick = world.tick,
            collected = world.collected,
            score = world.score,
            "session completed"
        );
        result.completed = true;
    }

    result.events = world.take_events();
    result
}

/// Replay a recorded session against a freshly built world.
///
/// Returns the final world and every event generated. With the same
/// starting world (same level seed) this reproduces the original session
/// exactly.
pub fn replay(mut world: WorldState, recording: &InputRecording) -> (WorldState, Vec<GameEvent>) {
    let mut all_events = Vec::new();

    for (_, frame) in recording.replay_iter() {
        let result = tick(&mut world, &frame);
        all_events.extend(result.events);
        if result.completed {
            break;
        }
    }

    (world, all_events)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::{Rect, Vec2};
    use crate::game::events::GameEventData;
    use crate::game::state::{ItemKind, PlayerState};

    fn world_with_player(x: f32, y: f32) -> WorldState {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let player = PlayerState::new(Rect::new(x, y, 10.0, 10.0), 5.0);
        WorldState::new(bounds, player, 0)
    }

    fn idle() -> InputFrame {
        InputFrame::new()
    }

    #[test]
    fn test_tick_moves_then_collects() {
        let mut world = world_with_player(0.0, 0.0);
        // Out of reach at (0,0); one tick of rightward movement at speed 5
        // brings the player's right edge to x = 15, touching the item.
        let id = world.spawn_item(ItemKind::Battery, Rect::new(15.0, 0.0, 10.0, 10.0));
        world.spawn_item(ItemKind::Gear, Rect::new(700.0, 500.0, 10.0, 10.0));

        let right = InputFrame::from_keys(false, true, false, false);
        let result = tick(&mut world, &right);

        assert_eq!(world.player.position(), Vec2::new(5.0, 0.0));
        assert_eq!(world.collected, 1);
        assert!(!world.items.contains_key(&id));
        assert_eq!(result.events.len(), 1);
        assert!(!result.completed);
    }

    #[test]
    fn test_two_simultaneous_overlaps_count_two() {
        // Two items overlapping the player in the same frame.
        let mut world = world_with_player(100.0, 100.0);
        world.player.rect = Rect::new(100.0, 100.0, 50.0, 50.0);
        let a = world.spawn_item(ItemKind::Battery, Rect::new(110.0, 110.0, 10.0, 10.0));
        let b = world.spawn_item(ItemKind::Gear, Rect::new(130.0, 120.0, 10.0, 10.0));
        world.spawn_item(ItemKind::Gem, Rect::new(700.0, 500.0, 10.0, 10.0));

        let result = tick(&mut world, &idle());

        assert_eq!(world.collected, 2);
        assert!(!world.items.contains_key(&a));
        assert!(!world.items.contains_key(&b));
        assert_eq!(result.events.len(), 2);

        // Processing order across simultaneous overlaps: ascending id.
        match (&result.events[0].data, &result.events[1].data) {
            (
                GameEventData::ItemCollected { item_id: first, .. },
                GameEventData::ItemCollected { item_id: second, .. },
            ) => {
                assert_eq!(*first, a);
                assert_eq!(*second, b);
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_resolver_idempotent_without_movement() {
        let mut world = world_with_player(5.0, 5.0);
        world.spawn_item(ItemKind::Battery, Rect::new(10.0, 10.0, 10.0, 10.0));
        world.spawn_item(ItemKind::Gear, Rect::new(400.0, 400.0, 10.0, 10.0));

        let first = tick(&mut world, &idle());
        assert_eq!(world.collected, 1);
        assert_eq!(first.events.len(), 1);

        // Second tick with no movement: the item is gone, nothing happens.
        let second = tick(&mut world, &idle());
        assert_eq!(world.collected, 1);
        assert!(second.events.is_empty());
    }

    #[test]
    fn test_count_matches_overlaps_and_remainder_lives() {
        let mut world = world_with_player(0.0, 0.0);
        world.player.rect = Rect::new(0.0, 0.0, 100.0, 100.0);

        let mut expected_hits = 0;
        for i in 0..10 {
            let x = i as f32 * 60.0; // first two overlap the 100-wide player
            world.spawn_item(ItemKind::Battery, Rect::new(x, 0.0, 30.0, 30.0));
            if x <= 100.0 {
                expected_hits += 1;
            }
        }

        tick(&mut world, &idle());

        assert_eq!(world.collected, expected_hits);
        assert_eq!(world.items.len(), 10 - expected_hits as usize);
        // Remainder is exactly the non-overlapping set.
        for item in world.items.values() {
            assert!(!item.rect.intersects(&world.player.rect));
        }
    }

    #[test]
    fn test_completion_when_map_empties() {
        let mut world = world_with_player(5.0, 5.0);
        world.spawn_item(ItemKind::Crystal, Rect::new(10.0, 10.0, 10.0, 10.0));

        let result = tick(&mut world, &idle());

        assert!(result.completed);
        assert!(world.is_completed());
        assert_eq!(world.completed_tick, Some(1));

        let completed_event = result
            .events
            .iter()
            .find(|e| matches!(e.data, GameEventData::SessionCompleted { .. }))
            .expect("completion event");
        assert_eq!(
            completed_event.data,
            GameEventData::SessionCompleted {
                collected: 1,
                score: 10,
                duration_ticks: 1,
            }
        );
    }

    #[test]
    fn test_tick_after_completion_is_noop() {
        let mut world = world_with_player(5.0, 5.0);
        world.spawn_item(ItemKind::Battery, Rect::new(10.0, 10.0, 10.0, 10.0));

        tick(&mut world, &idle());
        assert!(world.is_completed());
        let tick_at_completion = world.tick;

        let right = InputFrame::from_keys(false, true, false, false);
        let result = tick(&mut world, &right);

        assert!(result.completed);
        assert!(result.events.is_empty());
        assert_eq!(world.tick, tick_at_completion);
        assert_eq!(world.player.position(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_replay_reproduces_session() {
        use crate::core::rng::DeterministicRng;
        use crate::game::item::scatter_items;

        let build = || {
            let mut world = world_with_player(100.0, 100.0);
            world.player.rect = Rect::new(100.0, 100.0, 50.0, 50.0);
            let mut rng = DeterministicRng::new(4242);
            scatter_items(&mut world, &mut rng, 5, Vec2::new(30.0, 30.0));
            world
        };

        // Live session with a scripted input pattern, recorded as we go.
        let mut live = build();
        let mut recording = InputRecording::new(4242);
        let mut live_events = Vec::new();
        for t in 0..600u32 {
            let frame = match (t / 60) % 4 {
                0 => InputFrame::from_keys(false, true, false, false),
                1 => InputFrame::from_keys(false, false, true, false),
                2 => InputFrame::from_keys(true, false, false, false),
                _ => InputFrame::from_keys(false, false, false, true),
            };
            recording.record(t, frame);
            let result = tick(&mut live, &frame);
            live_events.extend(result.events);
            if result.completed {
                break;
            }
        }

        let (replayed, replay_events) = replay(build(), &recording);

        assert_eq!(replayed.tick, live.tick);
        assert_eq!(replayed.collected, live.collected);
        assert_eq!(replayed.score, live.score);
        assert_eq!(replayed.player.rect, live.player.rect);
        assert_eq!(replayed.items, live.items);
        assert_eq!(replay_events, live_events);
    }
}
