use crate::domain::Tool;
use crate::session::messages::EditorMsg;

/// Key press as delivered by the host toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Escape,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub control: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { control: false };
    pub const CTRL: Modifiers = Modifiers { control: true };
}

pub fn handle_key_event(key: Key, modifiers: Modifiers, current_tool: Tool) -> Option<EditorMsg> {
    match key {
        // Ctrl+Z: undo last element
        Key::Character(c) if c.eq_ignore_ascii_case(&'z') && modifiers.control => {
            Some(EditorMsg::Undo)
        }
        // Other Ctrl chords belong to the host application
        Key::Character(_) if modifiers.control => None,

        // Space cycles to the next tool
        Key::Character(' ') => Some(EditorMsg::SelectTool(current_tool.next())),

        Key::Character(c) => tool_for_char(c.to_ascii_lowercase()).map(EditorMsg::SelectTool),

        // Escape drops the active tool, which also cancels a drag
        Key::Escape => Some(EditorMsg::SelectTool(Tool::None)),
    }
}

fn tool_for_char(c: char) -> Option<Tool> {
    match c {
        'w' => Some(Tool::WALL),
        'd' => Some(Tool::DOOR),
        'n' => Some(Tool::WINDOW),
        'f' => Some(Tool::FIRE_SENSOR),
        's' => Some(Tool::SECURITY_SENSOR),
        'm' => Some(Tool::MOTION_SENSOR),
        _ => None,
    }
}
