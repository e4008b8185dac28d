//! Replicate prediction client and entourage generation pipeline.
//!
//! Provides a typed REST wrapper for the prediction endpoints, a polling
//! helper that waits for predictions to settle, and the two-stage pipeline
//! (image generation, then background removal) that turns a composed prompt
//! into a cutout image URL.

pub mod api;
pub mod pipeline;
pub mod polling;
