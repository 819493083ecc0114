//! Floor-plan element types
//!
//! All element types store coordinates in surface-local logical coordinates.
//! Elements are immutable once committed; the plan model only ever appends
//! new ones or drops them from the tail.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{Point, Segment};

/// Identity of a committed element, assigned in commit order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A kind name that matches neither a line kind nor a sensor kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown element kind: {0:?}")]
pub struct UnknownKind(pub String);

/// Building structure drawn as a line segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Wall,
    Door,
    Window,
}

impl LineKind {
    pub const ALL: [LineKind; 3] = [LineKind::Wall, LineKind::Door, LineKind::Window];

    /// Stable name used in persisted plan documents
    pub fn as_str(self) -> &'static str {
        match self {
            LineKind::Wall => "wall",
            LineKind::Door => "door",
            LineKind::Window => "window",
        }
    }
}

impl FromStr for LineKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wall" => Ok(LineKind::Wall),
            "door" => Ok(LineKind::Door),
            "window" => Ok(LineKind::Window),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point sensor placed with a single click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Fire,
    Security,
    Motion,
}

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [SensorKind::Fire, SensorKind::Security, SensorKind::Motion];

    /// Stable name used in persisted plan documents
    pub fn as_str(self) -> &'static str {
        match self {
            SensorKind::Fire => "fire",
            SensorKind::Security => "security",
            SensorKind::Motion => "motion",
        }
    }
}

impl FromStr for SensorKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fire" => Ok(SensorKind::Fire),
            "security" => Ok(SensorKind::Security),
            "motion" => Ok(SensorKind::Motion),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wall, door or window segment
#[derive(Clone, Debug, PartialEq)]
pub struct LineElement {
    pub id: ElementId,
    pub kind: LineKind,
    /// Anchor captured on pointer-down
    pub start: Point,
    /// Pointer position at commit
    pub end: Point,
}

impl LineElement {
    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }
}

/// Fire, security or motion sensor
#[derive(Clone, Debug, PartialEq)]
pub struct SensorElement {
    pub id: ElementId,
    pub kind: SensorKind,
    pub position: Point,
}

/// Unified element type for ordered drawing and undo
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Line(LineElement),
    Sensor(SensorElement),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Line(line) => line.id,
            Element::Sensor(sensor) => sensor.id,
        }
    }

    /// Persisted kind name of this element
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Line(line) => line.kind.as_str(),
            Element::Sensor(sensor) => sensor.kind.as_str(),
        }
    }

    pub fn as_line(&self) -> Option<&LineElement> {
        match self {
            Element::Line(line) => Some(line),
            Element::Sensor(_) => None,
        }
    }

    pub fn as_sensor(&self) -> Option<&SensorElement> {
        match self {
            Element::Sensor(sensor) => Some(sensor),
            Element::Line(_) => None,
        }
    }
}

/// Element data before the plan model assigns it an identity
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementDraft {
    Line {
        kind: LineKind,
        start: Point,
        end: Point,
    },
    Sensor {
        kind: SensorKind,
        position: Point,
    },
}

impl ElementDraft {
    pub fn with_id(self, id: ElementId) -> Element {
        match self {
            ElementDraft::Line { kind, start, end } => Element::Line(LineElement {
                id,
                kind,
                start,
                end,
            }),
            ElementDraft::Sensor { kind, position } => Element::Sensor(SensorElement {
                id,
                kind,
                position,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_parse_back() {
        for kind in LineKind::ALL {
            assert_eq!(kind.as_str().parse::<LineKind>(), Ok(kind));
        }
        for kind in SensorKind::ALL {
            assert_eq!(kind.as_str().parse::<SensorKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "pillar".parse::<LineKind>().unwrap_err();
        assert_eq!(err, UnknownKind("pillar".to_string()));
        assert_eq!(err.to_string(), "unknown element kind: \"pillar\"");
        assert!("wall".parse::<SensorKind>().is_err());
    }

    #[test]
    fn test_draft_with_id() {
        let draft = ElementDraft::Sensor {
            kind: SensorKind::Motion,
            position: Point::new(5.0, 6.0),
        };
        let element = draft.with_id(ElementId(7));
        assert_eq!(element.id(), ElementId(7));
        assert_eq!(element.kind_name(), "motion");
        assert!(element.as_line().is_none());
        assert_eq!(element.as_sensor().map(|s| s.position), Some(Point::new(5.0, 6.0)));
    }
}
