//! Held-input tracking.
//!
//! Event handlers mutate [`InputState`] between ticks; the engine takes an
//! [`InputSnapshot`] at the start of each tick.

use std::collections::HashSet;

use glam::Vec2;

use delve_core::commands::{InputEvent, PlayerCommand};
use delve_core::enums::{FireSource, Key};

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    /// Pointer motion accumulated since the last snapshot.
    pointer_delta: Vec2,
    pointer_captured: bool,
    menu_visible: bool,
}

/// Input as seen by one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub held: HashSet<Key>,
    pub pointer_delta: Vec2,
    pub pointer_captured: bool,
}

impl InputSnapshot {
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns a command when the event triggers an action.
    pub fn apply(&mut self, event: InputEvent) -> Option<PlayerCommand> {
        match event {
            InputEvent::KeyDown { key } => {
                let newly_pressed = self.held.insert(key);
                // Auto-repeat keydowns do not fire again.
                if key == Key::Shoot && newly_pressed {
                    return Some(PlayerCommand::Fire {
                        source: FireSource::Keyboard,
                    });
                }
            }
            InputEvent::KeyUp { key } => {
                self.held.remove(&key);
            }
            InputEvent::PointerDelta { dx, dy } => {
                if self.pointer_captured {
                    self.pointer_delta += Vec2::new(dx, dy);
                }
            }
            InputEvent::PointerCapture { captured } => {
                self.pointer_captured = captured && !self.menu_visible;
                if !self.pointer_captured {
                    self.pointer_delta = Vec2::ZERO;
                }
            }
            InputEvent::MenuVisible { visible } => {
                self.menu_visible = visible;
                if visible {
                    self.pointer_captured = false;
                    self.pointer_delta = Vec2::ZERO;
                }
            }
        }
        None
    }

    /// Snapshot for this tick; consumes the accumulated pointer delta.
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            held: self.held.clone(),
            pointer_delta: std::mem::take(&mut self.pointer_delta),
            pointer_captured: self.pointer_captured,
        }
    }

    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    pub fn menu_visible(&self) -> bool {
        self.menu_visible
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
