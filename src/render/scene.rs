//! Display list built from the plan on every redraw
//!
//! The scene is the complete, ordered description of one frame: background,
//! every line in commit order, the drag preview, then every sensor in commit
//! order. It is rebuilt from scratch each time and never patched.

use crate::config::EditorConfig;
use crate::domain::{ElementId, LineKind, Point, SensorKind};
use crate::session::state::{PlanModel, PreviewSegment};

/// One paint operation
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    /// Stroked line segment; `element` is `None` for the drag preview
    Segment {
        element: Option<ElementId>,
        kind: LineKind,
        start: Point,
        end: Point,
        color: [u8; 4],
        width: f32,
    },
    /// Filled, outlined sensor marker
    Sensor {
        element: ElementId,
        kind: SensorKind,
        center: Point,
        radius: f32,
        fill: [u8; 4],
        outline: [u8; 4],
        outline_width: f32,
    },
}

impl PaintCommand {
    /// Committed element this command paints, if any
    pub fn element(&self) -> Option<ElementId> {
        match self {
            PaintCommand::Segment { element, .. } => *element,
            PaintCommand::Sensor { element, .. } => Some(*element),
        }
    }

    pub fn is_preview(&self) -> bool {
        matches!(self, PaintCommand::Segment { element: None, .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub background: [u8; 4],
    pub commands: Vec<PaintCommand>,
}

impl Scene {
    pub fn build(
        config: &EditorConfig,
        model: &PlanModel,
        preview: Option<&PreviewSegment>,
    ) -> Self {
        let mut commands = Vec::with_capacity(model.len() + 1);

        for line in model.lines() {
            let stroke = config.line_stroke(line.kind);
            commands.push(PaintCommand::Segment {
                element: Some(line.id),
                kind: line.kind,
                start: line.start,
                end: line.end,
                color: stroke.color.to_rgba_u8(),
                width: stroke.width,
            });
        }

        if let Some(preview) = preview {
            let stroke = config.line_stroke(preview.kind);
            commands.push(PaintCommand::Segment {
                element: None,
                kind: preview.kind,
                start: preview.segment.start,
                end: preview.segment.end,
                color: stroke.color.to_rgba_u8(),
                width: stroke.width,
            });
        }

        let outline = config.sensor_outline.color.to_rgba_u8();
        for sensor in model.sensors() {
            commands.push(PaintCommand::Sensor {
                element: sensor.id,
                kind: sensor.kind,
                center: sensor.position,
                radius: config.sensor_radius,
                fill: config.sensor_color(sensor.kind).to_rgba_u8(),
                outline,
                outline_width: config.sensor_outline.width,
            });
        }

        Self {
            background: config.background.to_rgba_u8(),
            commands,
        }
    }

    /// Ids of committed elements in paint order
    pub fn element_ids(&self) -> Vec<ElementId> {
        self.commands.iter().filter_map(PaintCommand::element).collect()
    }

    pub fn preview(&self) -> Option<&PaintCommand> {
        self.commands.iter().find(|c| c.is_preview())
    }

    /// True when nothing but the background is painted
    pub fn is_blank(&self) -> bool {
        self.commands.is_empty()
    }
}
