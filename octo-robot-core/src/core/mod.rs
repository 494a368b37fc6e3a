//! Deterministic primitives: geometry and randomness.

pub mod rng;
pub mod vec2;
