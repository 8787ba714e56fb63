use std::collections::HashSet;

use glam::Vec2;
use sdl2::{event::Event, keyboard::Keycode, mouse::MouseButton};

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    pub pressed: HashSet<Keycode>,
    pub released: HashSet<Keycode>,
}

/// The current state of the mouse.
#[derive(Default)]
pub struct MouseState {
    pub position: Vec2,
    pub delta: Vec2,
    pub down: HashSet<MouseButton>,
    pub pressed: HashSet<MouseButton>,
    pub released: HashSet<MouseButton>,
    pub scroll_delta: Vec2,
}

/// Keyboard and mouse state accumulated over one frame of events.
#[derive(Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
}

impl InputState {
    /// Forgets per-frame edges and deltas. Held keys and buttons persist.
    pub fn begin_frame(&mut self) {
        self.mouse.delta = Vec2::ZERO;
        self.mouse.scroll_delta = Vec2::ZERO;
        self.keyboard.pressed.clear();
        self.keyboard.released.clear();
        self.mouse.pressed.clear();
        self.mouse.released.clear();
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::MouseMotion {
                x, y, xrel, yrel, ..
            } => {
                self.mouse.position = Vec2::new(*x as f32, *y as f32);
                self.mouse.delta += Vec2::new(*xrel as f32, *yrel as f32);
            }
            Event::MouseWheel { x, y, .. } => {
                self.mouse.scroll_delta += Vec2::new(*x as f32, *y as f32);
            }
            Event::MouseButtonDown { mouse_btn, .. } => {
                self.mouse.down.insert(*mouse_btn);
                self.mouse.pressed.insert(*mouse_btn);
            }
            Event::MouseButtonUp { mouse_btn, .. } => {
                self.mouse.down.remove(mouse_btn);
                self.mouse.released.insert(*mouse_btn);
            }
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => {
                self.keyboard.down.insert(*keycode);
                self.keyboard.pressed.insert(*keycode);
            }
            Event::KeyUp {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => {
                self.keyboard.down.remove(keycode);
                self.keyboard.released.insert(*keycode);
            }
            _ => {}
        }
    }

    pub fn context(&self, delta_time: f32) -> UpdateContext<'_> {
        UpdateContext::new(&self.keyboard, &self.mouse, delta_time)
    }
}

/// Context provided to demos during the update phase.
pub struct UpdateContext<'a> {
    pub keyboard: &'a KeyboardState,
    pub mouse: &'a MouseState,
    pub delta_time: f32,
}

impl<'a> UpdateContext<'a> {
    /// Creates a new `UpdateContext` from the given keyboard and mouse states and delta time.
    pub fn new(keyboard: &'a KeyboardState, mouse: &'a MouseState, delta_time: f32) -> Self {
        Self {
            keyboard,
            mouse,
            delta_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use sdl2::keyboard::Mod;

    use super::*;

    fn key_event(keycode: Keycode, down: bool, repeat: bool) -> Event {
        if down {
            Event::KeyDown {
                timestamp: 0,
                window_id: 0,
                keycode: Some(keycode),
                scancode: None,
                keymod: Mod::NOMOD,
                repeat,
            }
        } else {
            Event::KeyUp {
                timestamp: 0,
                window_id: 0,
                keycode: Some(keycode),
                scancode: None,
                keymod: Mod::NOMOD,
                repeat,
            }
        }
    }

    #[test]
    fn held_keys_survive_frames() {
        let mut input = InputState::default();
        input.handle_event(&key_event(Keycode::W, true, false));
        assert!(input.keyboard.pressed.contains(&Keycode::W));

        input.begin_frame();
        assert!(input.keyboard.pressed.is_empty());
        assert!(input.keyboard.down.contains(&Keycode::W));

        input.handle_event(&key_event(Keycode::W, false, false));
        assert!(!input.keyboard.down.contains(&Keycode::W));
        assert!(input.keyboard.released.contains(&Keycode::W));
    }

    #[test]
    fn key_repeats_are_not_presses() {
        let mut input = InputState::default();
        input.handle_event(&key_event(Keycode::Num1, true, true));
        assert!(input.keyboard.pressed.is_empty());
        assert!(input.keyboard.down.is_empty());
    }
}
