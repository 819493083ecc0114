//! Editor message handlers
//!
//! Turns pointer input and tool commands into plan mutations. Every handler
//! runs to completion synchronously and reports what changed through an
//! [`Outcome`], so the caller knows when to repaint.

use crate::domain::{ElementDraft, ElementId, Point, Segment, Tool};
use crate::session::history;
use crate::session::messages::{EditorMsg, PointerEvent};
use crate::session::state::{DragState, EditorSession, PreviewSegment};

/// Result of handling one editor message
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Nothing to do for this input
    Ignored,
    /// A line drag began; nothing new is visible yet
    DragStarted,
    /// The drag moved; the preview segment changed
    Preview(PreviewSegment),
    /// The drag moved back onto its anchor; no preview is shown
    PreviewCleared,
    /// A new element was appended to the plan
    Committed(ElementId),
    /// Drag released on its anchor; zero-length segments are not committed
    Rejected,
    /// Drag discarded without committing
    Canceled,
    /// Active tool changed
    ToolChanged { canceled_drag: bool },
    /// Undo dropped this element
    Removed(ElementId),
    /// All elements were discarded
    Cleared,
    /// A persisted plan replaced the model
    Loaded(usize),
}

impl Outcome {
    /// Whether what is shown on the surface may have changed
    pub fn needs_redraw(&self) -> bool {
        !matches!(
            self,
            Outcome::Ignored
                | Outcome::DragStarted
                | Outcome::ToolChanged {
                    canceled_drag: false
                }
        )
    }
}

/// Handle an EditorMsg, modifying session state
pub fn handle_editor_msg(session: &mut EditorSession, msg: EditorMsg) -> Outcome {
    match msg {
        EditorMsg::Pointer(event) => handle_pointer(session, event),
        EditorMsg::SelectTool(tool) => select_tool(session, tool),
        EditorMsg::Undo => undo(session),
        EditorMsg::Clear => clear(session),
    }
}

// ============================================================================
// Pointer handlers
// ============================================================================

pub fn handle_pointer(session: &mut EditorSession, event: PointerEvent) -> Outcome {
    match event {
        PointerEvent::Down(pos) => pointer_down(session, pos),
        PointerEvent::Move(pos) => pointer_move(session, pos),
        PointerEvent::Up(pos) => pointer_up(session, pos),
        PointerEvent::Leave => pointer_leave(session),
    }
}

fn pointer_down(session: &mut EditorSession, pos: Point) -> Outcome {
    if session.drag.is_dragging() {
        // Only one drag at a time
        return Outcome::Ignored;
    }
    if !pos.is_finite() {
        log::warn!("Ignoring pointer-down at non-finite position {:?}", pos);
        return Outcome::Ignored;
    }

    match session.tool {
        Tool::Line(kind) => {
            session.drag = DragState::Dragging {
                anchor: pos,
                current: pos,
                kind,
            };
            log::trace!("Started {} drag at ({}, {})", kind, pos.x, pos.y);
            Outcome::DragStarted
        }
        Tool::Sensor(kind) => {
            let id = session
                .model
                .append(ElementDraft::Sensor { kind, position: pos });
            log::debug!("Placed {} sensor {} at ({}, {})", kind, id, pos.x, pos.y);
            Outcome::Committed(id)
        }
        Tool::None => Outcome::Ignored,
    }
}

fn pointer_move(session: &mut EditorSession, pos: Point) -> Outcome {
    let DragState::Dragging {
        anchor,
        current,
        kind,
    } = &mut session.drag
    else {
        return Outcome::Ignored;
    };
    if !pos.is_finite() {
        return Outcome::Ignored;
    }

    *current = pos;
    let segment = Segment::new(*anchor, pos);
    if segment.is_degenerate() {
        return Outcome::PreviewCleared;
    }
    log::trace!("Preview {} to ({}, {})", kind, pos.x, pos.y);
    Outcome::Preview(PreviewSegment {
        kind: *kind,
        segment,
    })
}

fn pointer_up(session: &mut EditorSession, pos: Point) -> Outcome {
    let DragState::Dragging { anchor, kind, .. } = std::mem::take(&mut session.drag) else {
        return Outcome::Ignored;
    };

    if !pos.is_finite() {
        log::warn!("Dropped {} released at non-finite position {:?}", kind, pos);
        return Outcome::Rejected;
    }
    if Segment::new(anchor, pos).is_degenerate() {
        log::debug!("Dropped zero-length {} at ({}, {})", kind, pos.x, pos.y);
        return Outcome::Rejected;
    }

    let id = session.model.append(ElementDraft::Line {
        kind,
        start: anchor,
        end: pos,
    });
    log::debug!(
        "Committed {} {} from ({}, {}) to ({}, {})",
        kind,
        id,
        anchor.x,
        anchor.y,
        pos.x,
        pos.y
    );
    Outcome::Committed(id)
}

fn pointer_leave(session: &mut EditorSession) -> Outcome {
    if session.cancel_drag() {
        log::debug!("Pointer left surface, drag canceled");
        Outcome::Canceled
    } else {
        Outcome::Ignored
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Switch the active tool; switching away mid-drag cancels the drag
pub fn select_tool(session: &mut EditorSession, tool: Tool) -> Outcome {
    if session.tool == tool {
        return Outcome::Ignored;
    }

    log::debug!("Tool changed: {} -> {}", session.tool, tool);
    session.tool = tool;
    let canceled_drag = session.cancel_drag();
    Outcome::ToolChanged { canceled_drag }
}

/// Remove the most recent element; an active drag is left running
pub fn undo(session: &mut EditorSession) -> Outcome {
    match history::undo(&mut session.model) {
        Some(element) => Outcome::Removed(element.id()),
        None => Outcome::Ignored,
    }
}

/// Discard every element and any drag in progress
pub fn clear(session: &mut EditorSession) -> Outcome {
    let dropped = session.model.len();
    session.model.clear();
    session.cancel_drag();
    log::debug!("Cleared plan ({} elements dropped)", dropped);
    Outcome::Cleared
}
