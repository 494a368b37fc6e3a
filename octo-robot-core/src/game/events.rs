//! Session Events
//!
//! Events generated during a tick, consumed by the client for logging and
//! HUD refresh and by tests for assertions.

use serde::{Deserialize, Serialize};

use crate::game::state::ItemKind;

/// Event payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// The player collected an item
    ItemCollected {
        /// Id of the removed item
        item_id: u32,
        /// Category of the removed item
        kind: ItemKind,
        /// Points the kind was worth
        points: u32,
        /// Collection count after removal
        new_collected: u32,
        /// Score after removal
        new_score: u32,
    },

    /// Every item has been collected
    SessionCompleted {
        /// Total items collected
        collected: u32,
        /// Final score
        score: u32,
        /// Session length in ticks
        duration_ticks: u32,
    },
}

/// A game event with the tick it occurred on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when the event occurred
    pub tick: u32,
    /// Event payload
    pub data: GameEventData,
}

impl GameEvent {
    /// Create an item-collected event.
    pub fn item_collected(
        tick: u32,
        item_id: u32,
        kind: ItemKind,
        points: u32,
        new_collected: u32,
        new_score: u32,
    ) -> Self {
        Self {
            tick,
            data: GameEventData::ItemCollected {
                item_id,
                kind,
                points,
                new_collected,
                new_score,
            },
        }
    }

    /// Create a session-completed event.
    pub fn session_completed(tick: u32, collected: u32, score: u32) -> Self {
        Self {
            tick,
            data: GameEventData::SessionCompleted {
                collected,
                score,
                duration_ticks: tick,
            },
        }
    }
}
