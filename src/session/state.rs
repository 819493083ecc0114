use crate::domain::{
    Element, ElementDraft, ElementId, LineElement, LineKind, Point, Segment, SensorElement,
    SensorKind, Tool,
};

/// Per-kind tally of committed elements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElementCounts {
    pub walls: usize,
    pub doors: usize,
    pub windows: usize,
    pub fire_sensors: usize,
    pub security_sensors: usize,
    pub motion_sensors: usize,
}

impl ElementCounts {
    pub fn lines(&self) -> usize {
        self.walls + self.doors + self.windows
    }

    pub fn sensors(&self) -> usize {
        self.fire_sensors + self.security_sensors + self.motion_sensors
    }

    pub fn total(&self) -> usize {
        self.lines() + self.sensors()
    }
}

/// Ordered, append-only collection of committed plan elements
///
/// Element order equals commit order. Identities come from a counter that
/// never rewinds, so ids stay unique across undo, clear and load.
#[derive(Clone, Debug)]
pub struct PlanModel {
    elements: Vec<Element>,
    next_id: u64,
}

impl Default for PlanModel {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            next_id: 1,
        }
    }
}

impl PlanModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a new element at the tail and return its identity
    pub fn append(&mut self, draft: ElementDraft) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push(draft.with_id(id));
        id
    }

    /// Drop the most recently committed element, if any
    pub fn remove_last(&mut self) -> Option<Element> {
        self.elements.pop()
    }

    pub fn all(&self) -> &[Element] {
        &self.elements
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineElement> {
        self.elements.iter().filter_map(Element::as_line)
    }

    pub fn sensors(&self) -> impl Iterator<Item = &SensorElement> {
        self.elements.iter().filter_map(Element::as_sensor)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Identity the next commit will receive
    pub fn next_id(&self) -> ElementId {
        ElementId(self.next_id)
    }

    /// Swap in a previously persisted element list
    ///
    /// The id counter only moves forward, past the largest loaded id.
    pub fn replace_with(&mut self, elements: Vec<Element>) {
        let max_loaded = elements.iter().map(|e| e.id().0).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_loaded.saturating_add(1));
        self.elements = elements;
    }

    pub fn counts(&self) -> ElementCounts {
        let mut counts = ElementCounts::default();
        for element in &self.elements {
            match element {
                Element::Line(line) => match line.kind {
                    LineKind::Wall => counts.walls += 1,
                    LineKind::Door => counts.doors += 1,
                    LineKind::Window => counts.windows += 1,
                },
                Element::Sensor(sensor) => match sensor.kind {
                    SensorKind::Fire => counts.fire_sensors += 1,
                    SensorKind::Security => counts.security_sensors += 1,
                    SensorKind::Motion => counts.motion_sensors += 1,
                },
            }
        }
        counts
    }
}

/// Pointer drag in progress for a line tool
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Position captured on pointer-down
        anchor: Point,
        /// Last reported pointer position
        current: Point,
        kind: LineKind,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Uncommitted segment shown while dragging
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewSegment {
    pub kind: LineKind,
    pub segment: Segment,
}

/// Everything one editing session owns: active tool, drag and plan
#[derive(Clone, Debug, Default)]
pub struct EditorSession {
    pub tool: Tool,
    pub drag: DragState,
    pub model: PlanModel,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preview segment of the current drag
    ///
    /// Nothing is previewed until the pointer has moved off the anchor.
    pub fn preview(&self) -> Option<PreviewSegment> {
        match self.drag {
            DragState::Dragging {
                anchor,
                current,
                kind,
            } if anchor != current => Some(PreviewSegment {
                kind,
                segment: Segment::new(anchor, current),
            }),
            _ => None,
        }
    }

    /// Abandon any drag in progress, returning whether one existed
    pub fn cancel_drag(&mut self) -> bool {
        std::mem::take(&mut self.drag).is_dragging()
    }
}
