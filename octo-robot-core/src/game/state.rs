//! World State Definitions
//!
//! All state for one game session. Uses BTreeMap for deterministic
//! iteration order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::vec2::{Rect, Vec2};
use crate::game::events::GameEvent;

// =============================================================================
// ITEM KIND
// =============================================================================

/// Category tag for a collectible item.
///
/// The kind only affects display color and point value, never movement or
/// collision behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ItemKind {
    /// Yellow - common, 1 point
    Battery = 0,
    /// Gray - common, 2 points
    Gear = 1,
    /// Cyan - uncommon, 5 points
    Gem = 2,
    /// Purple - rare, 10 points
    Crystal = 3,
    /// Red - rarest, 20 points
    PowerCore = 4,
}

impl ItemKind {
    /// Get point value for this kind.
    pub fn value(self) -> u32 {
        match self {
            ItemKind::Battery => 1,
            ItemKind::Gear => 2,
            ItemKind::Gem => 5,
            ItemKind::Crystal => 10,
            ItemKind::PowerCore => 20,
        }
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Battery => "battery",
            ItemKind::Gear => "gear",
            ItemKind::Gem => "gem",
            ItemKind::Crystal => "crystal",
            ItemKind::PowerCore => "power core",
        }
    }

    /// Get from index.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(ItemKind::Battery),
            1 => Some(ItemKind::Gear),
            2 => Some(ItemKind::Gem),
            3 => Some(ItemKind::Crystal),
            4 => Some(ItemKind::PowerCore),
            _ => None,
        }
    }
}

// =============================================================================
// ITEM STATE
// =============================================================================

/// A live collectible item.
///
/// Items exist only while uncollected: collection removes the entry from
/// the world's item map outright. Ids come from a monotonic counter and
/// are never reused.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemState {
    /// Unique item id (monotonic counter)
    pub id: u32,
    /// Item category
    pub kind: ItemKind,
    /// Bounding rectangle in world coordinates
    pub rect: Rect,
}

impl ItemState {
    /// Create a new item.
    pub fn new(id: u32, kind: ItemKind, rect: Rect) -> Self {
        Self { id, kind, rect }
    }

    /// Point value of this item.
    pub fn value(&self) -> u32 {
        self.kind.value()
    }
}

// =============================================================================
// PLAYER STATE
// =============================================================================

/// The player-controlled robot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Bounding rectangle in world coordinates
    pub rect: Rect,
    /// Movement speed in world units per tick
    pub speed: f32,
}

impl PlayerState {
    /// Create a new player.
    pub fn new(rect: Rect, speed: f32) -> Self {
        Self { rect, speed }
    }

    /// Bottom-left position.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.rect.position()
    }
}

// =============================================================================
// SESSION PHASE
// =============================================================================

/// Current phase of a session. The transition is one-way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Every item collected; world no longer ticks
    Completed,
}

// =============================================================================
// WORLD STATE
// =============================================================================

/// Complete state of one game session.
///
/// Owned by the client and passed by mutable reference through the update
/// cycle; the render pass only reads it. Uses BTreeMap so that the
/// simultaneous-overlap processing order is stable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldState {
    /// Current tick (60 per second)
    pub tick: u32,

    /// Current session phase
    pub phase: SessionPhase,

    /// World boundary rectangle; the player never leaves it
    pub bounds: Rect,

    /// The player
    pub player: PlayerState,

    /// All live items (BTreeMap for deterministic iteration)
    pub items: BTreeMap<u32, ItemState>,

    /// Next item id (monotonic counter)
    pub next_item_id: u32,

    /// Number of items collected so far.
    ///
    /// Invariant: equals the number of entries ever removed from `items`.
    pub collected: u32,

    /// Accumulated point score (sum of collected kinds' values)
    pub score: u32,

    /// Seed the level was scattered with (kept for replay)
    pub seed: u64,

    /// Tick at which the session completed, if it has
    pub completed_tick: Option<u32>,

    /// Events generated this tick (drained by the tick function)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl WorldState {
    /// Create an empty world with a player and no items.
    pub fn new(bounds: Rect, player: PlayerState, seed: u64) -> Self {
        Self {
            tick: 0,
            phase: SessionPhase::Playing,
            bounds,
            player,
            items: BTreeMap::new(),
            next_item_id: 0,
            collected: 0,
            score: 0,
            seed,
            completed_tick: None,
            pending_events: Vec::new(),
        }
    }

    /// Spawn a new item, returning its id.
    pub fn spawn_item(&mut self, kind: ItemKind, rect: Rect) -> u32 {
        let id = self.next_item_id;
        self.next_item_id += 1;
        self.items.insert(id, ItemState::new(id, kind, rect));
        id
    }

    /// Number of live items.
    pub fn live_item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the session has completed.
    pub fn is_completed(&self) -> bool {
        matches!(self.phase, SessionPhase::Completed)
    }

    /// Elapsed session time in seconds at the current tick.
    pub fn elapsed_seconds(&self) -> f64 {
        self.tick as f64 / crate::TICK_RATE as f64
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_kind_values() {
        assert_eq!(ItemKind::Battery.value(), 1);
        assert_eq!(ItemKind::Gear.value(), 2);
        assert_eq!(ItemKind::Gem.value(), 5);
        assert_eq!(ItemKind::Crystal.value(), 10);
        assert_eq!(ItemKind::PowerCore.value(), 20);
    }

    #[test]
    fn test_item_kind_from_index() {
        for i in 0..5u8 {
            let kind = ItemKind::from_index(i).unwrap();
            assert_eq!(kind as u8, i);
        }
        assert_eq!(ItemKind::from_index(5), None);
    }

    #[test]
    fn test_item_ids_monotonic() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let player = PlayerState::new(Rect::new(100.0, 100.0, 50.0, 50.0), 5.0);
        let mut world = WorldState::new(bounds, player, 0);

        let a = world.spawn_item(ItemKind::Battery, Rect::new(10.0, 10.0, 30.0, 30.0));
        let b = world.spawn_item(ItemKind::Gear, Rect::new(50.0, 50.0, 30.0, 30.0));
        assert_eq!(a, 0);
        assert_eq!(b, 1);

        // Removal never frees an id for reuse.
        world.items.remove(&a);
        let c = world.spawn_item(ItemKind::Gem, Rect::new(90.0, 90.0, 30.0, 30.0));
        assert_eq!(c, 2);
    }

    #[test]
    fn test_btreemap_iteration_sorted() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let player = PlayerState::new(Rect::new(0.0, 0.0, 50.0, 50.0), 5.0);
        let mut world = WorldState::new(bounds, player, 0);

        for _ in 0..8 {
            world.spawn_item(ItemKind::Battery, Rect::new(0.0, 0.0, 30.0, 30.0));
        }

        let ids: Vec<u32> = world.items.keys().copied().collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_elapsed_seconds() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let player = PlayerState::new(Rect::new(0.0, 0.0, 50.0, 50.0), 5.0);
        let mut world = WorldState::new(bounds, player, 0);

        world.tick = 90;
        assert_eq!(world.elapsed_seconds(), 1.5);
    }
}
