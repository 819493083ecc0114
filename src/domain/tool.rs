//! Active drawing tool selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::element::{LineKind, SensorKind, UnknownKind};

/// The single active tool of an editing session
///
/// Line tools start a drag on pointer-down; sensor tools commit immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tool {
    #[default]
    None,
    Line(LineKind),
    Sensor(SensorKind),
}

impl Tool {
    pub const WALL: Tool = Tool::Line(LineKind::Wall);
    pub const DOOR: Tool = Tool::Line(LineKind::Door);
    pub const WINDOW: Tool = Tool::Line(LineKind::Window);
    pub const FIRE_SENSOR: Tool = Tool::Sensor(SensorKind::Fire);
    pub const SECURITY_SENSOR: Tool = Tool::Sensor(SensorKind::Security);
    pub const MOTION_SENSOR: Tool = Tool::Sensor(SensorKind::Motion);

    /// Every selectable tool, in toolbar order
    pub const ALL: [Tool; 7] = [
        Tool::None,
        Tool::WALL,
        Tool::DOOR,
        Tool::WINDOW,
        Tool::FIRE_SENSOR,
        Tool::SECURITY_SENSOR,
        Tool::MOTION_SENSOR,
    ];

    /// Get the next tool in the cycle
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Command name of this tool
    pub fn name(self) -> &'static str {
        match self {
            Tool::None => "none",
            Tool::Line(LineKind::Wall) => "wall",
            Tool::Line(LineKind::Door) => "door",
            Tool::Line(LineKind::Window) => "window",
            Tool::Sensor(SensorKind::Fire) => "fire-sensor",
            Tool::Sensor(SensorKind::Security) => "security-sensor",
            Tool::Sensor(SensorKind::Motion) => "motion-sensor",
        }
    }
}

impl FromStr for Tool {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

impl TryFrom<String> for Tool {
    type Error = UnknownKind;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Tool> for String {
    fn from(tool: Tool) -> Self {
        tool.name().to_string()
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
