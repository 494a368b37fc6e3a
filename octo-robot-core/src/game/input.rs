//! Input Normalization and Recording
//!
//! The client polls the keyboard once per frame and packs the pressed
//! movement keys into an [`InputFrame`]. The core only ever sees the
//! normalized frame, so unrecognized keys never reach game logic.
//!
//! [`InputRecording`] keeps a delta-compressed log of frames so a whole
//! session can be replayed headlessly for determinism tests.

use serde::{Deserialize, Serialize};

// =============================================================================
// INPUT FRAME
// =============================================================================

/// Pressed state of the movement keys for a single frame.
///
/// This is the minimal input that affects game state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Direction flags (packed bits):
    /// - Bit 0: left held
    /// - Bit 1: right held
    /// - Bit 2: up held
    /// - Bit 3: down held
    /// - Bit 4-7: Reserved
    pub flags: u8,
}

impl InputFrame {
    /// Left flag bit
    pub const FLAG_LEFT: u8 = 0x01;
    /// Right flag bit
    pub const FLAG_RIGHT: u8 = 0x02;
    /// Up flag bit
    pub const FLAG_UP: u8 = 0x04;
    /// Down flag bit
    pub const FLAG_DOWN: u8 = 0x08;

    /// Create a new idle frame (nothing held).
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create a frame from individual key states.
    pub const fn from_keys(left: bool, right: bool, up: bool, down: bool) -> Self {
        let mut flags = 0u8;
        if left {
            flags |= Self::FLAG_LEFT;
        }
        if right {
            flags |= Self::FLAG_RIGHT;
        }
        if up {
            flags |= Self::FLAG_UP;
        }
        if down {
            flags |= Self::FLAG_DOWN;
        }
        Self { flags }
    }

    /// Per-axis movement intent, each axis in {-1, 0, +1}.
    ///
    /// Opposing simultaneous presses on one axis cancel to 0.
    #[inline]
    pub fn intent(&self) -> (i8, i8) {
        let x = (self.flags & Self::FLAG_RIGHT != 0) as i8 - (self.flags & Self::FLAG_LEFT != 0) as i8;
        let y = (self.flags & Self::FLAG_UP != 0) as i8 - (self.flags & Self::FLAG_DOWN != 0) as i8;
        (x, y)
    }

    /// Check if this is an idle frame (no keys held).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    /// Check if the frame produces any movement intent.
    #[inline]
    pub fn has_movement(&self) -> bool {
        self.intent() != (0, 0)
    }
}

// =============================================================================
// INPUT RECORDING
// =============================================================================

/// Input state change at a specific tick.
///
/// Only stored when the frame CHANGES, not every tick.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct InputDelta {
    /// Tick when this input state began
    pub tick: u32,
    /// The new input state
    pub frame: InputFrame,
}

/// Delta-compressed input log for one session.
///
/// Used for replay playback and determinism tests.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputRecording {
    /// Level seed the session ran with
    pub seed: u64,

    /// Last tick recorded
    pub end_tick: u32,

    /// Ticks where the input changed
    deltas: Vec<InputDelta>,

    /// Last recorded frame (for delta comparison)
    #[serde(skip)]
    last_frame: InputFrame,
}

impl InputRecording {
    /// Create a new recording for a session with the given level seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            end_tick: 0,
            deltas: Vec::new(),
            last_frame: InputFrame::new(),
        }
    }

    /// Record the frame for a tick. Only stores it if it changed.
    pub fn record(&mut self, tick: u32, frame: InputFrame) {
        self.end_tick = tick;
        if frame != self.last_frame || self.deltas.is_empty() {
            self.deltas.push(InputDelta { tick, frame });
            self.last_frame = frame;
        }
    }

    /// Get the frame in effect at a specific tick.
    ///
    /// Uses binary search over the deltas.
    pub fn frame_at(&self, tick: u32) -> InputFrame {
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        if idx == 0 {
            InputFrame::new()
        } else {
            self.deltas[idx - 1].frame
        }
    }

    /// Number of stored deltas.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Iterate frames tick-by-tick from 0 through `end_tick`.
    pub fn replay_iter(&self) -> ReplayIter<'_> {
        ReplayIter {
            recording: self,
            current_tick: 0,
            delta_idx: 0,
            current_frame: InputFrame::new(),
        }
    }
}

/// Iterator yielding `(tick, frame)` for every tick of a recording.
pub struct ReplayIter<'a> {
    recording: &'a InputRecording,
    current_tick: u32,
    delta_idx: usize,
    current_frame: InputFrame,
}

impl<'a> Iterator for ReplayIter<'a> {
    type Item = (u32, InputFrame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_tick > self.recording.end_tick {
            return None;
        }

        while self.delta_idx < self.recording.deltas.len() {
            let delta = &self.recording.deltas[self.delta_idx];
            if delta.tick <= self.current_tick {
                self.current_frame = delta.frame;
                self.delta_idx += 1;
            } else {
                break;
            }
        }

        let result = (self.current_tick, self.current_frame);
        self.current_tick += 1;
        Some(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================
