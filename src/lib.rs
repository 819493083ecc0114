//! Floor-plan annotation editor
//!
//! Walls, doors and windows are drawn as press-drag-release segments; fire,
//! security and motion sensors are placed with a single press. The crate
//! holds the interaction state machine, the plan model, undo, rendering to
//! a raster surface and plan document conversion.

pub mod annotations;
pub mod config;
pub mod core;
pub mod domain;
pub mod persistence;
pub mod render;
pub mod session;
pub mod storage;

pub use crate::core::Editor;
