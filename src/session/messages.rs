//! Message types for an editing session
//!
//! This module contains:
//! - PointerEvent for raw pointer input on the drawing surface
//! - EditorMsg, the full command set a host application can send
//!
//! Both are serde-serializable so an input script can be recorded and replayed.

use serde::{Deserialize, Serialize};

use crate::domain::{Point, Tool};

// ============================================================================
// Pointer Types
// ============================================================================

/// Pointer input in surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvent {
    /// Button pressed at position
    Down(Point),
    /// Pointer moved to position
    Move(Point),
    /// Button released at position
    Up(Point),
    /// Pointer left the drawing surface
    Leave,
}

// ============================================================================
// Editor Messages
// ============================================================================

/// All editor messages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMsg {
    /// Pointer input on the surface
    Pointer(PointerEvent),
    /// Change the active tool
    SelectTool(Tool),
    /// Remove the most recent element
    Undo,
    /// Remove every element (confirmation is up to the caller)
    Clear,
}

impl EditorMsg {
    pub fn down(x: f32, y: f32) -> Self {
        EditorMsg::Pointer(PointerEvent::Down(Point::new(x, y)))
    }

    pub fn moved(x: f32, y: f32) -> Self {
        EditorMsg::Pointer(PointerEvent::Move(Point::new(x, y)))
    }

    pub fn up(x: f32, y: f32) -> Self {
        EditorMsg::Pointer(PointerEvent::Up(Point::new(x, y)))
    }

    pub fn leave() -> Self {
        EditorMsg::Pointer(PointerEvent::Leave)
    }
}
