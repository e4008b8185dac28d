//! Prompt composition for entourage image generation.
//!
//! Classifies a free-text subject description, injects demographic variety
//! for under-specified people, detects supporting props, and assembles the
//! final prompt handed to the image model. Everything here is pure apart
//! from the caller-supplied random source.

pub mod composer;
pub mod diversity;
pub mod error;
pub mod style;
pub mod subject;
pub mod surface;
pub mod types;
