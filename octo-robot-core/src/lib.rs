//! # Octo-Robot Core
//!
//! Deterministic game logic for the Octo-Robot collection game.
//!
//! ## Architecture
//!
//! ```text
//! core/           - Deterministic primitives
//! ├── vec2.rs     - 2D vectors and axis-aligned rectangles
//! └── rng.rs      - Deterministic Xoroshiro128+ PRNG
//!
//! game/           - Game logic (one update cycle per frame)
//! ├── input.rs    - Input normalization and recording
//! ├── state.rs    - World, player and item state
//! ├── movement.rs - Player movement with boundary clamping
//! ├── collision.rs- AABB collision detection
//! ├── item.rs     - Item spawning and collection
//! ├── tick.rs     - The per-frame update step
//! └── events.rs   - Session events
//!
//! level.rs        - Level configuration and world construction
//! score.rs        - Persisted high-score table
//! ```
//!
//! The crate knows nothing about windows, sprites or frame loops. The
//! render client calls [`game::tick::tick`] once per fixed-timestep frame
//! and reads the [`game::state::WorldState`] for drawing. Given the same
//! level seed and the same input recording, a session replays to an
//! identical final state: iteration is over `BTreeMap`, randomness comes
//! from a seeded [`DeterministicRng`], and nothing reads the clock.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod level;
pub mod score;

pub use crate::core::rng::DeterministicRng;
pub use crate::core::vec2::{Rect, Vec2};
pub use crate::game::input::{InputFrame, InputRecording};
pub use crate::game::state::{ItemKind, ItemState, PlayerState, SessionPhase, WorldState};
pub use crate::game::tick::{replay, tick, TickResult};
pub use crate::level::{LevelConfig, LevelError};
pub use crate::score::{HighScoreEntry, HighScoreTable, ScoreError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
