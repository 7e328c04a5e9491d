use std::collections::HashMap;

use crate::coords::{Rect, Vec2};
use crate::gfx::{Gfx, CELL_HEIGHT, CELL_WIDTH};
use crate::input::{MouseButton, MouseState};

use super::DrawList;

const PADDING: f32 = 8.0;
const TITLE_HEIGHT: f32 = 24.0;
const ROW_HEIGHT: f32 = 18.0;
const SEPARATOR_HEIGHT: f32 = 9.0;
const MIN_WIDTH: f32 = 120.0;

const TITLE_RGBA: u32 = 0x294a_7aff;
const BODY_RGBA: u32 = 0x0f0f_0ff0;
const TEXT_RGBA: u32 = 0xffff_ffff;
const SEPARATOR_RGBA: u32 = 0x6e6e_8080;

/// Muted text colour for secondary lines.
pub const MUTED_RGBA: u32 = 0xa0a0_a0ff;

/// One content row of a dialog.
#[derive(Debug, Clone, PartialEq)]
enum Row {
    Text { text: String, rgba: u32 },
    Separator,
}

impl Row {
    fn height(&self) -> f32 {
        match self {
            Row::Text { .. } => ROW_HEIGHT,
            Row::Separator => SEPARATOR_HEIGHT,
        }
    }

    fn chars(&self) -> usize {
        match self {
            Row::Text { text, .. } => text.chars().count(),
            Row::Separator => 0,
        }
    }
}

/// Content builder handed to [`Overlay::window`].
#[derive(Debug, Default)]
pub struct DialogUi {
    rows: Vec<Row>,
}

impl DialogUi {
    pub fn text(&mut self, text: impl Into<String>) {
        self.text_colored(text, TEXT_RGBA);
    }

    pub fn text_colored(&mut self, text: impl Into<String>, rgba: u32) {
        self.rows.push(Row::Text {
            text: text.into(),
            rgba,
        });
    }

    pub fn separator(&mut self) {
        self.rows.push(Row::Separator);
    }
}

/// Outcome of laying out a dialog this frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WindowResponse {
    /// Full window rect including the title bar.
    pub rect: Rect,
    pub collapsed: bool,
    /// Cursor is over the window.
    pub hovered: bool,
}

#[derive(Debug, Default)]
struct WindowMemory {
    collapsed: bool,
}

/// Immediate-mode overlay for small debug dialogs.
///
/// Call [`begin_frame`](Self::begin_frame), any number of
/// [`window`](Self::window)s, then [`end_frame`](Self::end_frame) to hand the
/// recorded list to the renderer. Collapse state persists per title.
#[derive(Debug, Default)]
pub struct Overlay {
    list: DrawList,
    mouse: MouseState,
    prev_left: bool,
    screen: Rect,
    windows: HashMap<String, WindowMemory>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self, mouse: &MouseState, width: u32, height: u32) {
        self.prev_left = self.mouse.button(MouseButton::Left);
        self.mouse = *mouse;
        self.screen = Rect::new(0.0, 0.0, width as f32, height as f32);
        self.list.clear();
    }

    fn cursor(&self) -> Vec2 {
        Vec2::new(self.mouse.x as f32, self.mouse.y as f32)
    }

    fn left_pressed(&self) -> bool {
        self.mouse.button(MouseButton::Left) && !self.prev_left
    }

    /// Lays out and records a dialog whose top-left is `pos`.
    ///
    /// Clicking the title bar toggles collapse.
    pub fn window(
        &mut self,
        title: &str,
        pos: Vec2,
        build: impl FnOnce(&mut DialogUi),
    ) -> WindowResponse {
        let mut ui = DialogUi::default();
        build(&mut ui);

        let widest = ui
            .rows
            .iter()
            .map(Row::chars)
            .chain(std::iter::once(title.chars().count()))
            .max()
            .unwrap_or(0);
        let width = (widest as f32 * CELL_WIDTH as f32 + 2.0 * PADDING).max(MIN_WIDTH);

        let title_bar = Rect::new(pos.x, pos.y, width, TITLE_HEIGHT);
        let pressed_title = self.left_pressed() && title_bar.contains(self.cursor());

        let memory = self.windows.entry(title.to_string()).or_default();
        if pressed_title {
            memory.collapsed = !memory.collapsed;
        }
        let collapsed = memory.collapsed;

        let body_height = if collapsed {
            0.0
        } else {
            ui.rows.iter().map(Row::height).sum::<f32>() + 2.0 * PADDING
        };
        let rect = Rect::new(pos.x, pos.y, width, TITLE_HEIGHT + body_height);

        self.list.push_clip(self.screen);
        self.list.push_rect(title_bar, TITLE_RGBA);
        self.list.push_text(
            Vec2::new(pos.x + PADDING, pos.y + (TITLE_HEIGHT - CELL_HEIGHT as f32) * 0.5),
            title,
            TEXT_RGBA,
        );

        if !collapsed {
            let body = Rect::new(pos.x, pos.y + TITLE_HEIGHT, width, body_height);
            self.list.push_rect(body, BODY_RGBA);
            self.list.push_clip(body.inset(PADDING * 0.5));

            let mut y = body.origin.y + PADDING;
            for row in &ui.rows {
                match row {
                    Row::Text { text, rgba } => {
                        let baseline = y + (ROW_HEIGHT - CELL_HEIGHT as f32) * 0.5;
                        self.list
                            .push_text(Vec2::new(pos.x + PADDING, baseline), text.as_str(), *rgba);
                    }
                    Row::Separator => {
                        let line = Rect::new(
                            pos.x + PADDING,
                            y + (SEPARATOR_HEIGHT * 0.5).floor(),
                            width - 2.0 * PADDING,
                            1.0,
                        );
                        self.list.push_rect(line, SEPARATOR_RGBA);
                    }
                }
                y += row.height();
            }
            self.list.pop_clip();
        }
        self.list.pop_clip();

        WindowResponse {
            rect,
            collapsed,
            hovered: rect.contains(self.cursor()),
        }
    }

    /// Commands recorded so far this frame.
    #[inline]
    pub fn list(&self) -> &DrawList {
        &self.list
    }

    /// Submits this frame's draw list to `gfx`.
    pub fn end_frame(&mut self, gfx: &mut dyn Gfx) {
        gfx.submit_overlay(std::mem::take(&mut self.list));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::DrawCmd;

    fn mouse_at(x: i32, y: i32, left: bool) -> MouseState {
        MouseState {
            x,
            y,
            z: 0,
            buttons: [left, false, false],
        }
    }

    fn hello(ui: &mut DialogUi) {
        ui.text("Initialization and debug text.");
        ui.separator();
        ui.text_colored("Frame: 16.667 ms", MUTED_RGBA);
    }

    // ── layout ───────────────────────────────────────────────────────────

    #[test]
    fn width_fits_longest_row() {
        let mut overlay = Overlay::new();
        overlay.begin_frame(&MouseState::default(), 1280, 720);
        let resp = overlay.window("00-helloworld", Vec2::new(10.0, 10.0), hello);

        let chars = "Initialization and debug text.".len() as f32;
        assert_eq!(resp.rect.size.x, chars * CELL_WIDTH as f32 + 2.0 * PADDING);
        assert_eq!(
            resp.rect.size.y,
            TITLE_HEIGHT + 2.0 * ROW_HEIGHT + SEPARATOR_HEIGHT + 2.0 * PADDING
        );
        assert!(!resp.collapsed);
    }

    #[test]
    fn narrow_window_uses_min_width() {
        let mut overlay = Overlay::new();
        overlay.begin_frame(&MouseState::default(), 640, 480);
        let resp = overlay.window("x", Vec2::zero(), |ui| ui.text("a"));
        assert_eq!(resp.rect.size.x, MIN_WIDTH);
    }

    #[test]
    fn records_title_body_and_rows() {
        let mut overlay = Overlay::new();
        overlay.begin_frame(&MouseState::default(), 1280, 720);
        overlay.window("00-helloworld", Vec2::new(10.0, 10.0), hello);

        let texts: Vec<&str> = overlay
            .list()
            .items()
            .iter()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            ["00-helloworld", "Initialization and debug text.", "Frame: 16.667 ms"]
        );
        assert!(overlay.list().items().iter().all(|item| item.clip.is_some()));
    }

    // ── interaction ──────────────────────────────────────────────────────

    #[test]
    fn title_click_toggles_collapse_once_per_press() {
        let mut overlay = Overlay::new();
        let pos = Vec2::new(10.0, 10.0);

        overlay.begin_frame(&mouse_at(20, 15, true), 1280, 720);
        assert!(overlay.window("w", pos, hello).collapsed);

        // Held button is not a new press.
        overlay.begin_frame(&mouse_at(20, 15, true), 1280, 720);
        let resp = overlay.window("w", pos, hello);
        assert!(resp.collapsed);
        assert_eq!(resp.rect.size.y, TITLE_HEIGHT);

        overlay.begin_frame(&mouse_at(20, 15, false), 1280, 720);
        overlay.window("w", pos, hello);
        overlay.begin_frame(&mouse_at(20, 15, true), 1280, 720);
        assert!(!overlay.window("w", pos, hello).collapsed);
    }

    #[test]
    fn click_on_body_does_not_collapse() {
        let mut overlay = Overlay::new();
        overlay.begin_frame(&mouse_at(20, 50, true), 1280, 720);
        let resp = overlay.window("w", Vec2::new(10.0, 10.0), hello);
        assert!(!resp.collapsed);
        assert!(resp.hovered);
    }
}
