use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{Event, Key, MouseButton};

/// Pixels per wheel notch for touchpads that report pixel deltas.
const PIXELS_PER_NOTCH: f64 = 40.0;

/// Translates a winit `WindowEvent` into an engine [`Event`].
///
/// Returns `None` for events the harness does not forward. Key repeats are
/// dropped so held toggles fire once.
pub(crate) fn translate_window_event(event: &WindowEvent) -> Option<Event> {
    match event {
        WindowEvent::CloseRequested => Some(Event::Exit),

        WindowEvent::Resized(size) => Some(Event::Resize {
            width: size.width,
            height: size.height,
        }),

        WindowEvent::CursorMoved { position, .. } => Some(Event::MouseMove {
            x: position.x as i32,
            y: position.y as i32,
        }),

        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button)?;
            Some(Event::MouseButton {
                button,
                pressed: *state == ElementState::Pressed,
            })
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(_, y) => y.round() as i32,
                MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_NOTCH).round() as i32,
            };
            (delta != 0).then_some(Event::MouseWheel { delta })
        }

        WindowEvent::KeyboardInput { event, .. } if !event.repeat => Some(Event::Key {
            key: map_key(event.physical_key),
            pressed: event.state == ElementState::Pressed,
        }),

        _ => None,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> Option<MouseButton> {
    match b {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Space => Key::Space,
            KeyCode::Backspace => Key::Backspace,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            KeyCode::F1 => Key::F1,
            KeyCode::F2 => Key::F2,
            KeyCode::F3 => Key::F3,
            KeyCode::F4 => Key::F4,
            KeyCode::F5 => Key::F5,
            KeyCode::F6 => Key::F6,
            KeyCode::F7 => Key::F7,
            KeyCode::F8 => Key::F8,
            KeyCode::F9 => Key::F9,
            KeyCode::F10 => Key::F10,
            KeyCode::F11 => Key::F11,
            KeyCode::F12 => Key::F12,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode carries no stable numeric.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
