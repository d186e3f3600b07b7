//! mediameta - Inspect ffprobe reports as localized, labeled metadata
//!
//! This library crate exposes configuration loading and rendering for the
//! binary and for integration testing.

pub mod config;
pub mod render;
