//! Core editor module
//!
//! This module contains the editor facade a host application embeds: it owns
//! the session and drawing surface and exposes the select-tool, undo, clear,
//! save and load commands.

pub mod editor;

pub use editor::Editor;
