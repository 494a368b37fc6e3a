//! Game Logic Module
//!
//! One update cycle per frame, 100% deterministic.
//!
//! ## Module Structure
//!
//! - `input`: Input normalization and recording
//! - `state`: World, player and item state
//! - `movement`: Player movement with boundary clamping
//! - `collision`: AABB collision detection
//! - `item`: Item spawning and collection
//! - `tick`: The per-frame update step
//! - `events`: Session events for the UI and replay tests

pub mod collision;
pub mod events;
pub mod input;
pub mod item;
pub mod movement;
pub mod state;
pub mod tick;

// Re-export key types
pub use events::{GameEvent, GameEventData};
pub use input::{InputFrame, InputRecording};
pub use state::{ItemKind, ItemState, PlayerState, SessionPhase, WorldState};
pub use tick::TickResult;
