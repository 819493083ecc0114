//! Plan rendering module
//!
//! This module contains:
//! - Path geometry shared by all paint operations
//! - Scene building: the full display list for one frame
//! - Raster painting using tiny-skia

pub mod geometry;
pub mod image;
pub mod scene;

pub use self::image::{Surface, render};
pub use self::scene::{PaintCommand, Scene};
