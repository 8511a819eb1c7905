//! Polled input snapshot.
//!
//! Games never see raw events. Once per tick the runner folds the pending
//! [`InputEvent`]s into an [`InputState`], which answers "is this key held?"
//! (level) and "did this key go down since the last tick?" (edge).

use glam::Vec2;

use crate::input::queue::InputEvent;

/// Keys the shell tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Shift,
    Space,
    Escape,
    Enter,
    X,
    Z,
    O,
}

impl Key {
    pub const COUNT: usize = 11;

    /// Map a DOM `keyCode` to a tracked key.
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            38 => Some(Self::Up),
            40 => Some(Self::Down),
            37 => Some(Self::Left),
            39 => Some(Self::Right),
            16 => Some(Self::Shift),
            32 => Some(Self::Space),
            27 => Some(Self::Escape),
            13 => Some(Self::Enter),
            88 => Some(Self::X),
            90 => Some(Self::Z),
            79 => Some(Self::O),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` value. Middle and extra buttons are ignored.
    pub fn from_button(button: u8) -> Option<Self> {
        match button {
            0 => Some(Self::Left),
            2 => Some(Self::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Level and edge state for every tracked key and mouse button.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: [bool; Key::COUNT],
    pressed: [bool; Key::COUNT],
    buttons: [bool; 2],
    clicked: [bool; 2],
    mouse: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a batch of raw events into the snapshot.
    /// Edges from the previous batch are cleared first.
    pub fn ingest<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        self.clear_edges();
        for event in events {
            self.apply(event);
        }
    }

    /// Apply a single raw event.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key_code } => {
                if let Some(key) = Key::from_key_code(key_code) {
                    // Auto-repeat delivers KeyDown while held; every delivery counts as an edge.
                    self.keys[key.index()] = true;
                    self.pressed[key.index()] = true;
                }
            }
            InputEvent::KeyUp { key_code } => {
                if let Some(key) = Key::from_key_code(key_code) {
                    self.keys[key.index()] = false;
                }
            }
            InputEvent::PointerDown { x, y, button } => {
                self.mouse = Vec2::new(x, y);
                if let Some(b) = MouseButton::from_button(button) {
                    self.buttons[b.index()] = true;
                    self.clicked[b.index()] = true;
                }
            }
            InputEvent::PointerUp { x, y, button } => {
                self.mouse = Vec2::new(x, y);
                if let Some(b) = MouseButton::from_button(button) {
                    self.buttons[b.index()] = false;
                }
            }
            InputEvent::PointerMove { x, y } => {
                self.mouse = Vec2::new(x, y);
            }
        }
    }

    /// Forget edges so the next fixed step does not see them again.
    pub fn clear_edges(&mut self) {
        self.pressed = [false; Key::COUNT];
        self.clicked = [false; 2];
    }

    /// Whether the key is currently held.
    pub fn is_down(&self, key: Key) -> bool {
        self.keys[key.index()]
    }

    /// Whether the key went down since the last batch.
    pub fn just_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    pub fn just_clicked(&self, button: MouseButton) -> bool {
        self.clicked[button.index()]
    }

    /// Last known cursor position in world coordinates.
    pub fn mouse(&self) -> Vec2 {
        self.mouse
    }
}
