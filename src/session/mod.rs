//! Editing session module
//!
//! This module contains:
//! - Session state: the plan model, active tool and drag
//! - Message types for editor interactions
//! - Single-step undo
//! - Keyboard shortcut mapping

pub mod history;
pub mod messages;
pub mod shortcuts;
pub mod state;
