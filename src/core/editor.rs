use crate::annotations::{self, Outcome};
use crate::config::EditorConfig;
use crate::domain::Tool;
use crate::persistence::{self, DeserializationError, PlanDocument};
use crate::render::{self, Scene, Surface};
use crate::session::messages::{EditorMsg, PointerEvent};
use crate::session::shortcuts::{self, Key, Modifiers};
use crate::session::state::EditorSession;

/// Floor-plan editor: one session bound to one drawing surface
///
/// Every command runs synchronously and repaints the surface whenever what
/// is shown changed, so the surface always reflects the session.
pub struct Editor {
    session: EditorSession,
    surface: Surface,
    last_scene: Scene,
}

impl Editor {
    pub fn new(config: EditorConfig) -> anyhow::Result<Self> {
        let mut surface = Surface::new(config)?;
        let session = EditorSession::new();
        let last_scene = render::render(&mut surface, &session);
        Ok(Self {
            session,
            surface,
            last_scene,
        })
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Scene painted by the most recent redraw
    pub fn scene(&self) -> &Scene {
        &self.last_scene
    }

    pub fn tool(&self) -> Tool {
        self.session.tool
    }

    pub fn handle(&mut self, msg: EditorMsg) -> Outcome {
        let outcome = annotations::handle_editor_msg(&mut self.session, msg);
        self.redraw_if(outcome)
    }

    pub fn pointer(&mut self, event: PointerEvent) -> Outcome {
        self.handle(EditorMsg::Pointer(event))
    }

    pub fn select_tool(&mut self, tool: Tool) -> Outcome {
        self.handle(EditorMsg::SelectTool(tool))
    }

    /// Route a key press through the editor shortcuts
    pub fn key(&mut self, key: Key, modifiers: Modifiers) -> Outcome {
        match shortcuts::handle_key_event(key, modifiers, self.tool()) {
            Some(msg) => self.handle(msg),
            None => Outcome::Ignored,
        }
    }

    pub fn undo(&mut self) -> Outcome {
        self.handle(EditorMsg::Undo)
    }

    /// Drop every element; asking the user first is the caller's job
    pub fn clear(&mut self) -> Outcome {
        self.handle(EditorMsg::Clear)
    }

    /// Hand the current plan off for persistence
    pub fn save(&self) -> PlanDocument {
        let doc = persistence::serialize(&self.session.model);
        log::info!("Saved plan with {} elements", doc.elements.len());
        doc
    }

    /// Replace the plan with a persisted one
    ///
    /// On error the current plan is left untouched.
    pub fn load(&mut self, doc: &PlanDocument) -> Result<usize, DeserializationError> {
        let elements = persistence::deserialize(doc)?;
        let count = elements.len();
        self.session.cancel_drag();
        self.session.model.replace_with(elements);
        log::info!("Loaded plan with {} elements", count);
        self.redraw_if(Outcome::Loaded(count));
        Ok(count)
    }

    /// Repaint unconditionally
    pub fn redraw(&mut self) -> &Scene {
        self.last_scene = render::render(&mut self.surface, &self.session);
        &self.last_scene
    }

    fn redraw_if(&mut self, outcome: Outcome) -> Outcome {
        if outcome.needs_redraw() {
            self.redraw();
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ElementId, LineKind, Point};
    use crate::persistence::ElementRecord;

    fn editor() -> Editor {
        Editor::new(EditorConfig::default()).unwrap()
    }

    fn draw(editor: &mut Editor, from: (f32, f32), to: (f32, f32)) -> Outcome {
        editor.handle(EditorMsg::down(from.0, from.1));
        editor.handle(EditorMsg::moved(to.0, to.1));
        editor.handle(EditorMsg::up(to.0, to.1))
    }

    #[test]
    fn test_new_editor_is_blank() {
        let editor = editor();
        assert!(editor.scene().is_blank());
        assert_eq!(editor.tool(), Tool::None);
        assert_eq!(editor.surface().width(), 800);
        assert_eq!(editor.surface().height(), 600);
    }

    #[test]
    fn test_preview_then_commit_updates_scene() {
        let mut editor = editor();
        editor.select_tool(Tool::WALL);
        editor.handle(EditorMsg::down(10.0, 10.0));
        editor.handle(EditorMsg::moved(50.0, 10.0));

        let preview = editor.scene().preview().cloned().unwrap();
        assert_eq!(
            preview,
            render::PaintCommand::Segment {
                element: None,
                kind: LineKind::Wall,
                start: Point::new(10.0, 10.0),
                end: Point::new(50.0, 10.0),
                color: EditorConfig::default().wall.color.to_rgba_u8(),
                width: EditorConfig::default().wall.width,
            }
        );
        assert!(editor.session().model.is_empty());

        let outcome = editor.handle(EditorMsg::up(50.0, 10.0));
        assert!(matches!(outcome, Outcome::Committed(_)));
        assert!(editor.scene().preview().is_none());
        assert_eq!(editor.scene().element_ids().len(), 1);
    }

    #[test]
    fn test_scene_tracks_every_commit_and_undo() {
        let mut editor = editor();
        editor.select_tool(Tool::DOOR);
        for i in 0..4 {
            let y = 20.0 + i as f32 * 20.0;
            draw(&mut editor, (10.0, y), (90.0, y));
        }
        editor.select_tool(Tool::FIRE_SENSOR);
        editor.handle(EditorMsg::down(200.0, 200.0));
        editor.handle(EditorMsg::down(220.0, 200.0));
        assert_eq!(editor.scene().element_ids().len(), 6);

        for remaining in (3..6).rev() {
            editor.undo();
            assert_eq!(editor.scene().element_ids().len(), remaining);
        }
        let ids: Vec<_> = editor.session().model.all().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![ElementId(1), ElementId(2), ElementId(3)]);
    }

    #[test]
    fn test_clear_paints_empty_surface() {
        let mut editor = editor();
        editor.select_tool(Tool::WALL);
        draw(&mut editor, (10.0, 100.0), (200.0, 100.0));
        editor.select_tool(Tool::MOTION_SENSOR);
        editor.handle(EditorMsg::down(300.0, 300.0));

        assert_eq!(editor.clear(), Outcome::Cleared);
        assert!(editor.session().model.is_empty());
        assert!(editor.scene().is_blank());
        let bg = EditorConfig::default().background.to_rgba_u8();
        assert_eq!(editor.surface().pixel(100, 100), Some(bg));
        assert_eq!(editor.surface().pixel(300, 300), Some(bg));
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut editor = editor();
        editor.select_tool(Tool::WINDOW);
        draw(&mut editor, (5.0, 5.0), (60.0, 5.0));
        editor.select_tool(Tool::SECURITY_SENSOR);
        editor.handle(EditorMsg::down(30.0, 40.0));
        let doc = editor.save();

        let mut other = self::editor();
        assert_eq!(other.load(&doc), Ok(2));
        assert_eq!(other.session().model.all(), editor.session().model.all());
        assert_eq!(other.scene(), editor.scene());

        // New commits continue after the loaded ids
        other.select_tool(Tool::FIRE_SENSOR);
        let Outcome::Committed(id) = other.handle(EditorMsg::down(1.0, 1.0)) else {
            panic!("sensor should commit");
        };
        assert_eq!(id, ElementId(3));
    }

    #[test]
    fn test_failed_load_keeps_plan() {
        let mut editor = editor();
        editor.select_tool(Tool::WALL);
        draw(&mut editor, (0.0, 0.0), (40.0, 0.0));
        let before = editor.session().model.all().to_vec();

        let bad = PlanDocument {
            version: 1,
            elements: vec![ElementRecord {
                kind: "column".to_string(),
                id: None,
                fields: Default::default(),
            }],
        };
        assert!(matches!(
            editor.load(&bad),
            Err(DeserializationError::UnknownKind { .. })
        ));
        assert_eq!(editor.session().model.all(), before.as_slice());
        assert_eq!(editor.scene().element_ids().len(), 1);
    }

    #[test]
    fn test_load_rejects_out_of_range_id() {
        let mut editor = editor();
        let doc = PlanDocument {
            version: 1,
            elements: vec![ElementRecord {
                kind: "fire".to_string(),
                id: Some(u64::MAX),
                fields: [("x".to_string(), 1.0), ("y".to_string(), 2.0)]
                    .into_iter()
                    .collect(),
            }],
        };
        assert!(matches!(
            editor.load(&doc),
            Err(DeserializationError::IdOutOfRange { index: 0, .. })
        ));
        assert!(editor.session().model.is_empty());
        assert_eq!(editor.session().model.next_id(), ElementId(1));
    }

    #[test]
    fn test_load_cancels_drag() {
        let mut editor = editor();
        editor.select_tool(Tool::WALL);
        editor.handle(EditorMsg::down(0.0, 0.0));
        editor.handle(EditorMsg::moved(30.0, 0.0));
        assert!(editor.scene().preview().is_some());

        editor.load(&PlanDocument::default()).unwrap();
        assert!(!editor.session().drag.is_dragging());
        assert!(editor.scene().is_blank());
    }

    #[test]
    fn test_keyboard_drives_editor() {
        let mut editor = editor();
        assert_eq!(
            editor.key(Key::Character('w'), Modifiers::NONE),
            Outcome::ToolChanged {
                canceled_drag: false
            }
        );
        assert_eq!(editor.tool(), Tool::WALL);
        draw(&mut editor, (10.0, 10.0), (90.0, 10.0));

        // Space moves on to the door tool
        editor.key(Key::Character(' '), Modifiers::NONE);
        assert_eq!(editor.tool(), Tool::DOOR);

        editor.handle(EditorMsg::down(0.0, 50.0));
        editor.handle(EditorMsg::moved(40.0, 50.0));
        assert_eq!(
            editor.key(Key::Escape, Modifiers::NONE),
            Outcome::ToolChanged {
                canceled_drag: true
            }
        );
        assert!(editor.scene().preview().is_none());

        assert_eq!(
            editor.key(Key::Character('z'), Modifiers::CTRL),
            Outcome::Removed(ElementId(1))
        );
        assert!(editor.scene().is_blank());
        assert_eq!(editor.key(Key::Character('q'), Modifiers::NONE), Outcome::Ignored);
    }

    #[test]
    fn test_leave_cancels_and_undo_hits_prior_element() {
        let mut editor = editor();
        editor.select_tool(Tool::WALL);
        let Outcome::Committed(first) = draw(&mut editor, (0.0, 0.0), (40.0, 0.0)) else {
            panic!("first wall should commit");
        };
        editor.handle(EditorMsg::down(10.0, 10.0));
        editor.handle(EditorMsg::moved(70.0, 10.0));
        assert_eq!(editor.handle(EditorMsg::leave()), Outcome::Canceled);
        assert_eq!(editor.session().model.len(), 1);
        assert!(editor.scene().preview().is_none());

        assert_eq!(editor.undo(), Outcome::Removed(first));
        assert!(editor.session().model.is_empty());
    }
}
