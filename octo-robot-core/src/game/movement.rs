//! Player Movement
//!
//! Applies a per-frame intent vector to the player position and clamps
//! the full bounding rectangle inside the world boundary. No partial
//! exit: every edge of the player stays within the bounds.

use crate::core::vec2::{Rect, Vec2};
use crate::game::state::PlayerState;

/// Compute `pos + intent * speed` for one tick.
///
/// Each intent axis is in {-1, 0, +1}; zero intent is a no-op.
#[inline]
pub fn integrate(pos: Vec2, intent: (i8, i8), speed: f32) -> Vec2 {
    Vec2::new(
        pos.x + intent.0 as f32 * speed,
        pos.y + intent.1 as f32 * speed,
    )
}

/// Clamp a bottom-left position so a rect of `size` stays fully inside
/// `bounds`.
///
/// If the size exceeds the bounds on an axis, the position collapses to
/// the bounds' lower edge on that axis.
#[inline]
pub fn clamp_to_bounds(pos: Vec2, size: Vec2, bounds: &Rect) -> Vec2 {
    let max_x = (bounds.right() - size.x).max(bounds.left());
    let max_y = (bounds.top() - size.y).max(bounds.bottom());
    Vec2::new(
        pos.x.clamp(bounds.left(), max_x),
        pos.y.clamp(bounds.bottom(), max_y),
    )
}

/// Move the player one tick in the direction of `intent`.
///
/// Mutates only the player's position. Out-of-range speeds are valid:
/// the clamp keeps the result in bounds regardless.
pub fn step_player(player: &mut PlayerState, intent: (i8, i8), bounds: &Rect) {
    let next = integrate(player.position(), intent, player.speed);
    let clamped = clamp_to_bounds(next, player.rect.size(), bounds);
    player.rect.set_position(clamped);
}

// =============================================================================
// TESTS
// =============================================================================
