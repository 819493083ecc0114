//! Configuration persistence for editor settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::{LineKind, SensorKind};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl PlanColor {
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            255,
        ]
    }
}

/// Stroke used for one line kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeConfig {
    pub color: PlanColor,
    /// Line width in logical pixels
    pub width: f32,
}

/// Editor configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Drawing surface width in logical pixels
    pub canvas_width: u32,
    /// Drawing surface height in logical pixels
    pub canvas_height: u32,
    pub background: PlanColor,
    pub wall: StrokeConfig,
    pub door: StrokeConfig,
    pub window: StrokeConfig,
    /// Radius of every sensor marker
    pub sensor_radius: f32,
    pub fire_color: PlanColor,
    pub security_color: PlanColor,
    pub motion_color: PlanColor,
    pub sensor_outline: StrokeConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            // Off-white paper
            background: PlanColor::rgb8(250, 250, 250),
            wall: StrokeConfig {
                color: PlanColor::rgb8(33, 33, 33),
                width: 6.0,
            },
            door: StrokeConfig {
                color: PlanColor::rgb8(141, 85, 36),
                width: 4.0,
            },
            window: StrokeConfig {
                color: PlanColor::rgb8(120, 190, 235),
                width: 2.0,
            },
            sensor_radius: 8.0,
            fire_color: PlanColor::rgb8(220, 38, 38),
            security_color: PlanColor::rgb8(37, 99, 235),
            motion_color: PlanColor::rgb8(22, 163, 74),
            sensor_outline: StrokeConfig {
                color: PlanColor::rgb8(30, 30, 30),
                width: 1.5,
            },
        }
    }
}

impl EditorConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "floorsketch";

    pub fn line_stroke(&self, kind: LineKind) -> StrokeConfig {
        match kind {
            LineKind::Wall => self.wall,
            LineKind::Door => self.door,
            LineKind::Window => self.window,
        }
    }

    pub fn sensor_color(&self, kind: SensorKind) -> PlanColor {
        match kind {
            SensorKind::Fire => self.fire_color,
            SensorKind::Security => self.security_color,
            SensorKind::Motion => self.motion_color,
        }
    }

    /// Default config file location
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        if config.canvas_width == 0 || config.canvas_height == 0 {
            anyhow::bail!(
                "Canvas size must be non-zero, got {}x{}",
                config.canvas_width,
                config.canvas_height
            );
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles_are_ordered_by_weight() {
        let config = EditorConfig::default();
        assert!(config.wall.width > config.door.width);
        assert!(config.door.width > config.window.width);
        assert_eq!(config.line_stroke(LineKind::Door), config.door);
        assert_eq!(config.sensor_color(SensorKind::Motion), config.motion_color);
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(PlanColor::rgb8(12, 200, 255).to_rgba_u8(), [12, 200, 255, 255]);
        let out_of_range = PlanColor {
            r: 1.5,
            g: -0.2,
            b: 0.5,
        };
        assert_eq!(out_of_range.to_rgba_u8(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"canvas_width": 1024, "sensor_radius": 12.0}"#).unwrap();

        let config = EditorConfig::load_from(&path).unwrap();
        assert_eq!(config.canvas_width, 1024);
        assert_eq!(config.canvas_height, 600);
        assert_eq!(config.sensor_radius, 12.0);
        assert_eq!(config.wall, EditorConfig::default().wall);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = EditorConfig::default();
        config.canvas_height = 333;
        config.save_to(&path).unwrap();
        assert_eq!(EditorConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(EditorConfig::load_from(&path).is_err());

        std::fs::write(&path, r#"{"canvas_width": 0}"#).unwrap();
        assert!(EditorConfig::load_from(&path).is_err());
    }
}
