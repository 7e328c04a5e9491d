use crate::coords::{Rect, Vec2};

/// Renderer-agnostic overlay command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Solid rectangle, `rgba` is `0xRRGGBBAA`.
    Rect { rect: Rect, rgba: u32 },
    /// Single line of text; `origin` is the top-left of the first cell.
    Text { origin: Vec2, text: String, rgba: u32 },
}

/// A command together with the clip rect active when it was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    /// `None` draws unclipped.
    pub clip: Option<Rect>,
}

/// Overlay commands for one frame, painted in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    /// Top is the effective clip, already intersected with its parents.
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded items and the clip stack, keeping capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.clip_stack.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem {
            cmd,
            clip: self.clip_stack.last().copied(),
        });
    }

    #[inline]
    pub fn push_rect(&mut self, rect: Rect, rgba: u32) {
        self.push(DrawCmd::Rect { rect, rgba });
    }

    #[inline]
    pub fn push_text(&mut self, origin: Vec2, text: impl Into<String>, rgba: u32) {
        self.push(DrawCmd::Text {
            origin,
            text: text.into(),
            rgba,
        });
    }

    /// Clips following commands to `rect`, intersected with the current clip.
    ///
    /// Must be balanced with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            Some(&parent) => parent.intersect(rect).unwrap_or_default(),
        };
        self.clip_stack.push(effective);
    }

    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip without push_clip");
        self.clip_stack.pop();
    }
}
