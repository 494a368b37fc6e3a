//! Level Configuration and World Construction
//!
//! A [`LevelConfig`] describes one session: the boundary rectangle, the
//! player's start, and the items - either an explicit placement list or a
//! count to scatter with the level seed. Configs load from JSON files;
//! the defaults reproduce the classic 800x600 layout.
//!
//! Construction failures are the only fatal startup errors in the game.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::rng::DeterministicRng;
use crate::core::vec2::{Rect, Vec2};
use crate::game::item::scatter_items;
use crate::game::state::{ItemKind, PlayerState, WorldState};

/// Errors raised while loading or building a level.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level file could not be read
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    /// The level file is not valid JSON
    #[error("failed to parse level file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The level data is structurally invalid
    #[error("invalid level: {0}")]
    Invalid(String),
}

/// Explicit placement of a single item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemPlacement {
    /// Item category
    pub kind: ItemKind,
    /// Bottom-left X
    pub x: f32,
    /// Bottom-left Y
    pub y: f32,
}

/// Complete description of one level.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Level display name
    pub name: String,

    /// World boundary rectangle
    pub bounds: Rect,

    /// Player start (bottom-left corner)
    pub player_start: Vec2,

    /// Player bounding-box size
    pub player_size: Vec2,

    /// Player speed in world units per tick
    pub player_speed: f32,

    /// Item bounding-box size
    pub item_size: Vec2,

    /// Number of items to scatter when `items` is empty
    pub item_count: u32,

    /// Seed for the scatter RNG
    pub seed: u64,

    /// Explicit item placements; when non-empty, overrides scattering
    pub items: Vec<ItemPlacement>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            name: "Enhanced World".to_string(),
            bounds: Rect::new(0.0, 0.0, 800.0, 600.0),
            player_start: Vec2::new(100.0, 100.0),
            player_size: Vec2::new(50.0, 50.0),
            player_speed: 5.0,
            item_size: Vec2::new(30.0, 30.0),
            item_count: 5,
            seed: 1,
            items: Vec::new(),
        }
    }
}

impl LevelConfig {
    /// Load a level config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let config: LevelConfig = serde_json::from_str(&data)?;
        info!(path = %path.display(), name = %config.name, "loaded level config");
        Ok(config)
    }

    /// Same config with a different scatter seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the config and build the session world.
    pub fn build(&self) -> Result<WorldState, LevelError> {
        self.validate()?;

        let player_rect = Rect::new(
            self.player_start.x,
            self.player_start.y,
            self.player_size.x,
            self.player_size.y,
        );
        let player = PlayerState::new(player_rect, self.player_speed);
        let mut world = WorldState::new(self.bounds, player, self.seed);

        if self.items.is_empty() {
            let mut rng = DeterministicRng::new(self.seed);
            scatter_items(&mut world, &mut rng, self.item_count, self.item_size);
        } else {
            for placement in &self.items {
                let rect = Rect::new(placement.x, placement.y, self.item_size.x, self.item_size.y);
                if !self.bounds.contains_rect(&rect) {
                    return Err(LevelError::Invalid(format!(
                        "item at ({}, {}) does not fit inside the bounds",
                        placement.x, placement.y
                    )));
                }
                world.spawn_item(placement.kind, rect);
            }
        }

        info!(
            name = %self.name,
            items = world.live_item_count(),
            seed = self.seed,
            "built world"
        );
        Ok(world)
    }

    fn validate(&self) -> Result<(), LevelError> {
        if !self.bounds.is_valid() {
            return Err(LevelError::Invalid(format!(
                "bounds must have positive size and finite coordinates, got {:?}",
                self.bounds
            )));
        }
        if !(self.player_size.x > 0.0 && self.player_size.y > 0.0 && self.player_size.is_finite()) {
            return Err(LevelError::Invalid(format!(
                "player size must be positive and finite, got {:?}",
                self.player_size
            )));
        }
        if !(self.item_size.x > 0.0 && self.item_size.y > 0.0 && self.item_size.is_finite()) {
            return Err(LevelError::Invalid(format!(
                "item size must be positive and finite, got {:?}",
                self.item_size
            )));
        }
        if !self.player_start.is_finite() || !self.player_speed.is_finite() {
            return Err(LevelError::Invalid(
                "player start and speed must be finite".to_string(),
            ));
        }

        let player_rect = Rect::new(
            self.player_start.x,
            self.player_start.y,
            self.player_size.x,
            self.player_size.y,
        );
        if !self.bounds.contains_rect(&player_rect) {
            return Err(LevelError::Invalid(format!(
                "player start {:?} does not fit inside the bounds {:?}",
                player_rect, self.bounds
            )));
        }

        if self.items.is_empty()
            && self.item_count > 0
            && (self.item_size.x > self.bounds.w || self.item_size.y > self.bounds.h)
        {
            return Err(LevelError::Invalid(
                "item size exceeds the bounds; nothing can be scattered".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_builds_classic_world() {
        let world = LevelConfig::default().build().unwrap();

        assert_eq!(world.bounds, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(world.player.rect, Rect::new(100.0, 100.0, 50.0, 50.0));
        assert_eq!(world.player.speed, 5.0);
        assert_eq!(world.live_item_count(), 5);
        assert_eq!(world.collected, 0);
    }

    #[test]
    fn test_same_seed_same_world() {
        let config = LevelConfig::default().with_seed(77);
        let a = config.build().unwrap();
        let b = config.build().unwrap();
        assert_eq!(a.items, b.items);
    }

    #[test]
    fn test_explicit_items_override_scatter() {
        let mut config = LevelConfig::default();
        config.items = vec![
            ItemPlacement { kind: ItemKind::Battery, x: 10.0, y: 10.0 },
            ItemPlacement { kind: ItemKind::PowerCore, x: 500.0, y: 400.0 },
        ];

        let world = config.build().unwrap();
        assert_eq!(world.live_item_count(), 2);
        assert_eq!(world.items.get(&0).unwrap().kind, ItemKind::Battery);
        assert_eq!(world.items.get(&1).unwrap().kind, ItemKind::PowerCore);
    }

    #[test]
    fn test_rejects_bad_bounds() {
        let mut config = LevelConfig::default();
        config.bounds = Rect::new(0.0, 0.0, -10.0, 600.0);
        assert!(matches!(config.build(), Err(LevelError::Invalid(_))));

        config.bounds = Rect::new(f32::NAN, 0.0, 800.0, 600.0);
        assert!(matches!(config.build(), Err(LevelError::Invalid(_))));
    }

    #[test]
    fn test_rejects_player_outside_bounds() {
        let mut config = LevelConfig::default();
        config.player_start = Vec2::new(790.0, 100.0); // 50-wide player sticks out
        assert!(matches!(config.build(), Err(LevelError::Invalid(_))));
    }

    #[test]
    fn test_rejects_nonpositive_sizes() {
        let mut config = LevelConfig::default();
        config.player_size = Vec2::new(0.0, 50.0);
        assert!(matches!(config.build(), Err(LevelError::Invalid(_))));

        let mut config = LevelConfig::default();
        config.item_size = Vec2::new(30.0, -1.0);
        assert!(matches!(config.build(), Err(LevelError::Invalid(_))));
    }

    #[test]
    fn test_rejects_out_of_bounds_placement() {
        let mut config = LevelConfig::default();
        config.items = vec![ItemPlacement { kind: ItemKind::Gear, x: 790.0, y: 0.0 }];
        assert!(matches!(config.build(), Err(LevelError::Invalid(_))));
    }

    #[test]
    fn test_load_json_roundtrip() {
        let config = LevelConfig::default().with_seed(31337);
        let json = serde_json::to_string_pretty(&config).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = LevelConfig::load(file.path()).unwrap();
        assert_eq!(loaded.seed, 31337);
        assert_eq!(loaded.bounds, config.bounds);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = LevelConfig::load("/nonexistent/level.json").unwrap_err();
        assert!(matches!(err, LevelError::Io(_)));
    }

    #[test]
    fn test_load_corrupt_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json {").unwrap();

        let err = LevelConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let loaded: LevelConfig = serde_json::from_str(r#"{ "seed": 9, "item_count": 12 }"#).unwrap();
        assert_eq!(loaded.seed, 9);
        assert_eq!(loaded.item_count, 12);
        assert_eq!(loaded.bounds, Rect::new(0.0, 0.0, 800.0, 600.0));
    }
}
