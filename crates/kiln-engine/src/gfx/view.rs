use super::{ClearFlags, GfxError, ViewId, MAX_VIEWS};

/// Clear state of a view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewClear {
    pub flags: ClearFlags,
    /// Packed `0xRRGGBBAA`.
    pub rgba: u32,
    pub depth: f32,
    pub stencil: u8,
}

impl Default for ViewClear {
    fn default() -> Self {
        Self {
            flags: ClearFlags::empty(),
            rgba: 0x0000_00ff,
            depth: 1.0,
            stencil: 0,
        }
    }
}

/// Viewport rectangle of a view, in backbuffer pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ViewRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ViewRect {
    /// Clamps the rect to a `width x height` backbuffer.
    ///
    /// Returns `(x, y, w, h)` ready for `set_viewport`, or `None` when
    /// nothing of the rect is visible.
    pub fn clamped(self, width: u32, height: u32) -> Option<(f32, f32, f32, f32)> {
        let x0 = u32::from(self.x).min(width);
        let y0 = u32::from(self.y).min(height);
        let x1 = (u32::from(self.x) + u32::from(self.width)).min(width);
        let y1 = (u32::from(self.y) + u32::from(self.height)).min(height);
        (x1 > x0 && y1 > y0).then(|| (x0 as f32, y0 as f32, (x1 - x0) as f32, (y1 - y0) as f32))
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub(crate) struct ViewState {
    pub clear: ViewClear,
    pub rect: ViewRect,
    pub touched: bool,
}

/// Per-view state for all `MAX_VIEWS` views.
#[derive(Debug)]
pub(crate) struct ViewTable {
    views: Vec<ViewState>,
}

impl Default for ViewTable {
    fn default() -> Self {
        Self {
            views: vec![ViewState::default(); MAX_VIEWS],
        }
    }
}

impl ViewTable {
    pub(crate) fn get_mut(&mut self, id: ViewId) -> Result<&mut ViewState, GfxError> {
        self.views
            .get_mut(id as usize)
            .ok_or(GfxError::InvalidView(id))
    }

    pub(crate) fn touch(&mut self, id: ViewId) -> Result<(), GfxError> {
        self.get_mut(id)?.touched = true;
        Ok(())
    }

    /// Views to process this frame, in ascending id order.
    pub(crate) fn touched(&self) -> impl Iterator<Item = (ViewId, &ViewState)> {
        self.views
            .iter()
            .enumerate()
            .filter(|(_, v)| v.touched)
            .map(|(i, v)| (i as ViewId, v))
    }

    /// Forgets this frame's touches. Clear and rect state persist.
    pub(crate) fn end_frame(&mut self) {
        for v in &mut self.views {
            v.touched = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touched_views_come_out_in_id_order() {
        let mut table = ViewTable::default();
        table.touch(7).unwrap();
        table.touch(0).unwrap();
        table.touch(7).unwrap();
        let ids: Vec<ViewId> = table.touched().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 7]);
    }

    #[test]
    fn end_frame_keeps_clear_state() {
        let mut table = ViewTable::default();
        let view = table.get_mut(0).unwrap();
        view.clear.flags = ClearFlags::COLOR | ClearFlags::DEPTH;
        view.clear.rgba = 0x3030_30ff;
        table.touch(0).unwrap();

        table.end_frame();
        assert_eq!(table.touched().count(), 0);
        assert_eq!(table.get_mut(0).unwrap().clear.rgba, 0x3030_30ff);
    }

    #[test]
    fn out_of_range_view_is_an_error() {
        let mut table = ViewTable::default();
        assert!(matches!(table.touch(256), Err(GfxError::InvalidView(256))));
        assert!(table.touch(255).is_ok());
    }

    #[test]
    fn rect_clamps_to_backbuffer() {
        let rect = ViewRect { x: 0, y: 0, width: 1280, height: 720 };
        assert_eq!(rect.clamped(1280, 720), Some((0.0, 0.0, 1280.0, 720.0)));
        assert_eq!(rect.clamped(800, 600), Some((0.0, 0.0, 800.0, 600.0)));

        let off = ViewRect { x: 900, y: 0, width: 10, height: 10 };
        assert_eq!(off.clamped(800, 600), None);
        assert_eq!(ViewRect::default().clamped(800, 600), None);
    }
}
