//! Item Spawning and Collection
//!
//! Scattering places items uniformly inside the bounds (inset so the
//! whole item rect fits) with a weighted kind distribution. Collection
//! removes the item from the live map and bumps the counters; a removed
//! id is gone for good.

use tracing::debug;

use crate::core::rng::DeterministicRng;
use crate::core::vec2::{Rect, Vec2};
use crate::game::events::GameEvent;
use crate::game::state::{ItemKind, WorldState};

/// Pick a kind with the classic weighted distribution.
///
/// Battery 40%, Gear 30%, Gem 15%, Crystal 10%, PowerCore 5%.
pub fn random_item_kind(rng: &mut DeterministicRng) -> ItemKind {
    let roll = rng.next_int(100);

    if roll < 40 {
        ItemKind::Battery
    } else if roll < 70 {
        ItemKind::Gear
    } else if roll < 85 {
        ItemKind::Gem
    } else if roll < 95 {
        ItemKind::Crystal
    } else {
        ItemKind::PowerCore
    }
}

/// Scatter `count` items of `item_size` into the world.
///
/// Positions come from the world's seed via the deterministic RNG, inset
/// so every item rect lies fully inside the bounds. Caller has already
/// validated that the bounds can fit the item size.
pub fn scatter_items(world: &mut WorldState, rng: &mut DeterministicRng, count: u32, item_size: Vec2) {
    let area = Rect::new(
        world.bounds.left(),
        world.bounds.bottom(),
        world.bounds.w - item_size.x,
        world.bounds.h - item_size.y,
    );

    for _ in 0..count {
        let pos = rng.point_in(&area);
        let kind = random_item_kind(rng);
        let id = world.spawn_item(kind, Rect::new(pos.x, pos.y, item_size.x, item_size.y));
        debug!(id, kind = kind.label(), x = pos.x as f64, y = pos.y as f64, "scattered item");
    }
}

/// Collect one item: remove it from the live map, increment the count by
/// exactly one, add the kind's value to the score.
///
/// Returns `None` if the id is not live (already collected) - the second
/// collection of an id is always a no-op.
pub fn collect_item(world: &mut WorldState, item_id: u32) -> Option<GameEvent> {
    let item = world.items.remove(&item_id)?;

    world.collected += 1;
    let points = item.value();
    world.score = world.score.saturating_add(points);

    Some(GameEvent::item_collected(
        world.tick,
        item.id,
        item.kind,
        points,
        world.collected,
        world.score,
    ))
}

// =============================================================================
// TESTS
// =============================================================================
