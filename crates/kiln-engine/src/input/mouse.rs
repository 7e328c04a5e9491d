use super::{Event, MouseButton};

/// Current mouse state in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    /// Accumulated wheel position.
    pub z: i32,
    pub buttons: [bool; 3],
}

impl MouseState {
    #[inline]
    pub fn button(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    /// Applies a mouse event. Returns `false` for events that are not about
    /// the mouse.
    pub fn apply(&mut self, event: &Event) -> bool {
        match *event {
            Event::MouseMove { x, y } => {
                self.x = x;
                self.y = y;
            }
            Event::MouseButton { button, pressed } => {
                self.buttons[button.index()] = pressed;
            }
            Event::MouseWheel { delta } => {
                self.z = self.z.saturating_add(delta);
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_position_buttons_and_wheel() {
        let mut mouse = MouseState::default();
        assert!(mouse.apply(&Event::MouseMove { x: 10, y: 20 }));
        assert!(mouse.apply(&Event::MouseButton { button: MouseButton::Right, pressed: true }));
        assert!(mouse.apply(&Event::MouseWheel { delta: 2 }));
        assert!(mouse.apply(&Event::MouseWheel { delta: -1 }));

        assert_eq!((mouse.x, mouse.y, mouse.z), (10, 20, 1));
        assert!(mouse.button(MouseButton::Right));
        assert!(!mouse.button(MouseButton::Left));
    }

    #[test]
    fn ignores_other_events() {
        let mut mouse = MouseState::default();
        assert!(!mouse.apply(&Event::Exit));
        assert_eq!(mouse, MouseState::default());
    }
}
