//! Raster rendering of plan scenes using tiny-skia
//!
//! The surface is repainted from scratch for every scene: cleared to the
//! background, then each paint command in order.

use anyhow::Context;
use image::RgbaImage;
use tiny_skia::{Color, FillRule, Paint, Pixmap, Transform};

use super::geometry::{build_circle_path, build_segment_path, round_stroke};
use super::scene::{PaintCommand, Scene};
use crate::config::EditorConfig;
use crate::session::state::EditorSession;

/// Fixed-size drawing surface owned by one editor
pub struct Surface {
    pixmap: Pixmap,
    config: EditorConfig,
}

impl Surface {
    /// Create a surface sized from the config canvas dimensions
    pub fn new(config: EditorConfig) -> anyhow::Result<Self> {
        let pixmap = Pixmap::new(config.canvas_width, config.canvas_height).with_context(|| {
            format!(
                "Invalid canvas size {}x{}",
                config.canvas_width, config.canvas_height
            )
        })?;
        let mut surface = Self { pixmap, config };
        surface.clear();
        Ok(surface)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill the whole surface with the background color
    pub fn clear(&mut self) {
        let [r, g, b, a] = self.config.background.to_rgba_u8();
        self.pixmap.fill(Color::from_rgba8(r, g, b, a));
    }

    /// Repaint the surface with the given scene
    pub fn paint(&mut self, scene: &Scene) {
        let [r, g, b, a] = scene.background;
        self.pixmap.fill(Color::from_rgba8(r, g, b, a));

        for command in &scene.commands {
            match command {
                PaintCommand::Segment {
                    start,
                    end,
                    color,
                    width,
                    ..
                } => {
                    let Some(path) = build_segment_path(*start, *end) else {
                        continue;
                    };
                    let paint = solid_paint(*color);
                    self.pixmap.stroke_path(
                        &path,
                        &paint,
                        &round_stroke(*width),
                        Transform::identity(),
                        None,
                    );
                }
                PaintCommand::Sensor {
                    center,
                    radius,
                    fill,
                    outline,
                    outline_width,
                    ..
                } => {
                    let Some(path) = build_circle_path(*center, *radius) else {
                        continue;
                    };
                    self.pixmap.fill_path(
                        &path,
                        &solid_paint(*fill),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                    self.pixmap.stroke_path(
                        &path,
                        &solid_paint(*outline),
                        &round_stroke(*outline_width),
                        Transform::identity(),
                        None,
                    );
                }
            }
        }
    }

    /// Color of one pixel, or `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Copy the surface into an image buffer
    ///
    /// The background is opaque, so premultiplied pixmap data equals
    /// straight RGBA.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width(), self.height());
        img.copy_from_slice(self.pixmap.data());
        img
    }
}

fn solid_paint([r, g, b, a]: [u8; 4]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Redraw the whole session: committed elements plus the drag preview
///
/// Returns the scene that was painted.
pub fn render(surface: &mut Surface, session: &EditorSession) -> Scene {
    let preview = session.preview();
    let scene = Scene::build(surface.config(), &session.model, preview.as_ref());
    surface.paint(&scene);
    scene
}
