//! Collision Detection
//!
//! Axis-aligned bounding-box tests between the player and live items.
//! The overlap test is closed-interval: touching edges count as a
//! collision. That policy is fixed so a frame resolves identically
//! everywhere.

use crate::core::vec2::Rect;
use crate::game::state::WorldState;

/// Closed-interval AABB overlap test.
///
/// Overlap on both the X and Y intervals, edges inclusive.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// Ids of all live items overlapping the player, in ascending id order.
///
/// Returns a snapshot: callers remove items afterwards, so an item can
/// never be skipped because the map shrank mid-iteration. All overlaps
/// present at the start of the frame are resolved within that frame.
pub fn overlapping_items(world: &WorldState) -> Vec<u32> {
    let player_rect = &world.player.rect;

    world
        .items
        .values()
        .filter(|item| rects_overlap(player_rect, &item.rect))
        .map(|item| item.id)
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::state::{ItemKind, PlayerState};

    fn world_with_player(x: f32, y: f32) -> WorldState {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        let player = PlayerState::new(Rect::new(x, y, 10.0, 10.0), 5.0);
        WorldState::new(bounds, player, 0)
    }

    #[test]
    fn test_overlap_detected() {
        // Player (5,5)-(15,15) against item (10,10)-(20,20).
        let mut world = world_with_player(5.0, 5.0);
        let id = world.spawn_item(ItemKind::Battery, Rect::new(10.0, 10.0, 10.0, 10.0));

        assert_eq!(overlapping_items(&world), vec![id]);
    }

    #[test]
    fn test_edge_touch_counts() {
        // Closed intervals: edges meeting exactly at x=10 still collide.
        let mut world = world_with_player(0.0, 0.0);
        let id = world.spawn_item(ItemKind::Gear, Rect::new(10.0, 0.0, 10.0, 10.0));

        assert_eq!(overlapping_items(&world), vec![id]);
    }

    #[test]
    fn test_no_overlap() {
        let mut world = world_with_player(0.0, 0.0);
        world.spawn_item(ItemKind::Battery, Rect::new(10.1, 0.0, 10.0, 10.0));
        world.spawn_item(ItemKind::Gem, Rect::new(0.0, 500.0, 10.0, 10.0));

        assert!(overlapping_items(&world).is_empty());
    }

    #[test]
    fn test_multiple_overlaps_in_id_order() {
        let mut world = world_with_player(100.0, 100.0);
        world.player.rect = Rect::new(100.0, 100.0, 50.0, 50.0);

        let far = world.spawn_item(ItemKind::Battery, Rect::new(700.0, 500.0, 30.0, 30.0));
        let a = world.spawn_item(ItemKind::Gear, Rect::new(110.0, 110.0, 30.0, 30.0));
        let b = world.spawn_item(ItemKind::Gem, Rect::new(130.0, 120.0, 30.0, 30.0));

        let hits = overlapping_items(&world);
        assert_eq!(hits, vec![a, b]);
        assert!(!hits.contains(&far));
    }

    #[test]
    fn test_snapshot_unaffected_by_player_fields() {
        // Pure read: calling twice gives the same answer.
        let mut world = world_with_player(5.0, 5.0);
        world.spawn_item(ItemKind::Crystal, Rect::new(10.0, 10.0, 10.0, 10.0));

        let first = overlapping_items(&world);
        let second = overlapping_items(&world);
        assert_eq!(first, second);
        assert_eq!(world.player.position(), Vec2::new(5.0, 5.0));
    }
}
