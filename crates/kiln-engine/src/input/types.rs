/// Keyboard key identifier.
///
/// Only keys the harness binds or examples commonly use are named; anything
/// else arrives as `Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    Unknown(u32),
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Platform event in the order it was received.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    /// The platform asked the application to quit.
    Exit,
    /// New drawable size in physical pixels.
    Resize { width: u32, height: u32 },
    Key { key: Key, pressed: bool },
    /// Cursor position in physical pixels.
    MouseMove { x: i32, y: i32 },
    MouseButton { button: MouseButton, pressed: bool },
    /// Scroll in wheel notches, positive away from the user.
    MouseWheel { delta: i32 },
}
