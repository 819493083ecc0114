//! Plan annotation interaction
//!
//! This module provides the pointer-driven state machine that turns raw
//! pointer input and tool commands into committed walls, doors, windows
//! and sensors.

pub mod handlers;

pub use handlers::{Outcome, handle_editor_msg, handle_pointer};
