//! Translation of SDL events into egui input.

use egui::{Event as GuiEvent, Key, Modifiers, MouseWheelUnit, PointerButton, Pos2, Vec2};
use sdl2::{
    event::Event,
    keyboard::{Keycode, Mod},
    mouse::MouseButton,
};

pub fn map_modifiers(keymod: Mod) -> Modifiers {
    let ctrl = keymod.intersects(Mod::LCTRLMOD | Mod::RCTRLMOD);
    Modifiers {
        alt: keymod.intersects(Mod::LALTMOD | Mod::RALTMOD),
        ctrl,
        shift: keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD),
        mac_cmd: false,
        command: ctrl,
    }
}

pub fn map_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::X1 => Some(PointerButton::Extra1),
        MouseButton::X2 => Some(PointerButton::Extra2),
        _ => None,
    }
}

/// Maps the keys egui widgets react to. Letters and digits go through
/// their names.
pub fn map_key(keycode: Keycode) -> Option<Key> {
    let key = match keycode {
        Keycode::Left => Key::ArrowLeft,
        Keycode::Right => Key::ArrowRight,
        Keycode::Up => Key::ArrowUp,
        Keycode::Down => Key::ArrowDown,
        Keycode::Return => Key::Enter,
        Keycode::Tab => Key::Tab,
        Keycode::Backspace => Key::Backspace,
        Keycode::Delete => Key::Delete,
        Keycode::Home => Key::Home,
        Keycode::End => Key::End,
        Keycode::PageUp => Key::PageUp,
        Keycode::PageDown => Key::PageDown,
        Keycode::Space => Key::Space,
        Keycode::Escape => Key::Escape,
        other => return Key::from_name(&other.name()),
    };
    Some(key)
}

/// Converts one SDL event. `pointer` tracks the last known cursor position,
/// which SDL does not repeat on wheel events.
pub fn translate(event: &Event, pointer: &mut Pos2, modifiers: &mut Modifiers) -> Vec<GuiEvent> {
    match event {
        Event::MouseMotion { x, y, .. } => {
            *pointer = Pos2::new(*x as f32, *y as f32);
            vec![GuiEvent::PointerMoved(*pointer)]
        }
        Event::MouseButtonDown { mouse_btn, x, y, .. }
        | Event::MouseButtonUp { mouse_btn, x, y, .. } => {
            let Some(button) = map_button(*mouse_btn) else {
                return Vec::new();
            };
            *pointer = Pos2::new(*x as f32, *y as f32);
            vec![GuiEvent::PointerButton {
                pos: *pointer,
                button,
                pressed: matches!(event, Event::MouseButtonDown { .. }),
                modifiers: *modifiers,
            }]
        }
        Event::MouseWheel { x, y, .. } => vec![GuiEvent::MouseWheel {
            unit: MouseWheelUnit::Line,
            delta: Vec2::new(*x as f32, *y as f32),
            modifiers: *modifiers,
        }],
        Event::TextInput { text, .. } => vec![GuiEvent::Text(text.clone())],
        Event::KeyDown {
            keycode,
            keymod,
            repeat,
            ..
        }
        | Event::KeyUp {
            keycode,
            keymod,
            repeat,
            ..
        } => {
            *modifiers = map_modifiers(*keymod);
            let Some(key) = keycode.and_then(map_key) else {
                return Vec::new();
            };
            let pressed = matches!(event, Event::KeyDown { .. });
            let mut events = Vec::with_capacity(2);
            if pressed && modifiers.command {
                match key {
                    Key::C => events.push(GuiEvent::Copy),
                    Key::X => events.push(GuiEvent::Cut),
                    _ => {}
                }
            }
            events.push(GuiEvent::Key {
                key,
                physical_key: None,
                pressed,
                repeat: *repeat,
                modifiers: *modifiers,
            });
            events
        }
        Event::Window {
            win_event: sdl2::event::WindowEvent::Leave,
            ..
        } => vec![GuiEvent::PointerGone],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_keys_map_explicitly() {
        assert_eq!(map_key(Keycode::Return), Some(Key::Enter));
        assert_eq!(map_key(Keycode::Backspace), Some(Key::Backspace));
        assert_eq!(map_key(Keycode::Left), Some(Key::ArrowLeft));
    }

    #[test]
    fn letters_map_by_name() {
        assert_eq!(map_key(Keycode::A), Some(Key::A));
        assert_eq!(map_key(Keycode::Z), Some(Key::Z));
    }

    #[test]
    fn either_control_key_is_command() {
        let modifiers = map_modifiers(Mod::RCTRLMOD | Mod::LSHIFTMOD);
        assert!(modifiers.ctrl && modifiers.command && modifiers.shift);
        assert!(!modifiers.alt);
    }

    #[test]
    fn pointer_events_track_the_cursor() {
        let mut pointer = Pos2::ZERO;
        let mut modifiers = Modifiers::default();
        let motion = Event::MouseMotion {
            timestamp: 0,
            window_id: 0,
            which: 0,
            mousestate: sdl2::mouse::MouseState::from_sdl_state(0),
            x: 40,
            y: 25,
            xrel: 3,
            yrel: 1,
        };
        let events = translate(&motion, &mut pointer, &mut modifiers);
        assert_eq!(events, vec![GuiEvent::PointerMoved(Pos2::new(40.0, 25.0))]);
        assert_eq!(pointer, Pos2::new(40.0, 25.0));

        let release = Event::MouseButtonUp {
            timestamp: 0,
            window_id: 0,
            which: 0,
            mouse_btn: MouseButton::Left,
            clicks: 1,
            x: 41,
            y: 26,
        };
        let events = translate(&release, &mut pointer, &mut modifiers);
        assert_eq!(
            events,
            vec![GuiEvent::PointerButton {
                pos: Pos2::new(41.0, 26.0),
                button: PointerButton::Primary,
                pressed: false,
                modifiers: Modifiers::default(),
            }]
        );
    }
}
