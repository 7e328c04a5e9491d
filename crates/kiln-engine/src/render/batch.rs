use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::gfx::{Color, DebugText, CELL_HEIGHT, CELL_WIDTH};
use crate::overlay::{DrawCmd, DrawList};

use super::common::{clip_to_scissor, Scissor};
use super::AtlasGlyph;

const KIND_SOLID: f32 = 0.0;
const KIND_GLYPH: f32 = 1.0;

/// Instance data layout (52 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
///  offset 48  kind     f32        loc 6
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct QuadInstance {
    pub dst_min: [f32; 2],
    pub dst_max: [f32; 2],
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    pub color: [f32; 4],
    pub kind: f32,
}

impl QuadInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4, // color
        6 => Float32    // kind
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    fn solid(rect: Rect, color: Color) -> Self {
        let max = rect.max();
        Self {
            dst_min: [rect.origin.x, rect.origin.y],
            dst_max: [max.x, max.y],
            uv_min: [0.0; 2],
            uv_max: [0.0; 2],
            color: color.to_array(),
            kind: KIND_SOLID,
        }
    }

    fn glyph(x: f32, y: f32, glyph: &AtlasGlyph, color: Color) -> Self {
        let (x0, y0) = (x + glyph.offset[0], y + glyph.offset[1]);
        Self {
            dst_min: [x0, y0],
            dst_max: [x0 + glyph.size[0], y0 + glyph.size[1]],
            uv_min: glyph.uv_min,
            uv_max: glyph.uv_max,
            color: color.to_array(),
            kind: KIND_GLYPH,
        }
    }
}

/// Source of glyph placements while flattening text.
pub(crate) trait GlyphLookup {
    fn glyph(&mut self, ch: char) -> Option<AtlasGlyph>;
}

/// Consecutive instances sharing one scissor rect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct Run {
    pub scissor: Scissor,
    pub start: u32,
    pub end: u32,
}

/// Instances for one overlay pass, grouped into scissor runs in paint order.
#[derive(Debug, Default)]
pub(crate) struct QuadBatch {
    instances: Vec<QuadInstance>,
    runs: Vec<Run>,
    width: u32,
    height: u32,
    /// Colors are linearized for sRGB targets.
    linear: bool,
}

impl QuadBatch {
    pub(crate) fn begin(&mut self, width: u32, height: u32, linear: bool) {
        self.instances.clear();
        self.runs.clear();
        self.width = width;
        self.height = height;
        self.linear = linear;
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    #[inline]
    pub(super) fn instances(&self) -> &[QuadInstance] {
        &self.instances
    }

    #[inline]
    pub(super) fn runs(&self) -> &[Run] {
        &self.runs
    }

    fn color(&self, rgba: u32) -> Color {
        Color::from_rgba(rgba, self.linear)
    }

    fn push(&mut self, instance: QuadInstance, scissor: Scissor) {
        let index = self.instances.len() as u32;
        self.instances.push(instance);
        match self.runs.last_mut() {
            Some(run) if run.scissor == scissor && run.end == index => run.end += 1,
            _ => self.runs.push(Run {
                scissor,
                start: index,
                end: index + 1,
            }),
        }
    }

    /// Adds cell backgrounds then glyphs of the debug text grid.
    pub(crate) fn push_debug_text(&mut self, text: &DebugText, glyphs: &mut dyn GlyphLookup) {
        let Some(scissor) = clip_to_scissor(None, self.width, self.height) else {
            return;
        };
        let (cw, ch) = (CELL_WIDTH as f32, CELL_HEIGHT as f32);

        for (col, row, cell) in text.visible_cells() {
            let bg = self.color(cell.background());
            if !bg.is_transparent() {
                let rect = Rect::new(f32::from(col) * cw, f32::from(row) * ch, cw, ch);
                self.push(QuadInstance::solid(rect, bg), scissor);
            }
        }

        for (col, row, cell) in text.visible_cells() {
            let fg = self.color(cell.foreground());
            if fg.is_transparent() {
                continue;
            }
            if let Some(glyph) = glyphs.glyph(cell.ch) {
                let (x, y) = (f32::from(col) * cw, f32::from(row) * ch);
                self.push(QuadInstance::glyph(x, y, &glyph, fg), scissor);
            }
        }
    }

    /// Adds overlay commands in recording order. Text advances one debug
    /// cell per character.
    pub(crate) fn push_draw_list(&mut self, list: &DrawList, glyphs: &mut dyn GlyphLookup) {
        for item in list.items() {
            let Some(scissor) = clip_to_scissor(item.clip, self.width, self.height) else {
                continue;
            };

            match &item.cmd {
                DrawCmd::Rect { rect, rgba } => {
                    let color = self.color(*rgba);
                    if !rect.is_empty() && !color.is_transparent() {
                        self.push(QuadInstance::solid(*rect, color), scissor);
                    }
                }
                DrawCmd::Text { origin, text, rgba } => {
                    let color = self.color(*rgba);
                    if color.is_transparent() {
                        continue;
                    }
                    let mut x = origin.x;
                    for ch in text.chars() {
                        if let Some(glyph) = glyphs.glyph(ch) {
                            self.push(QuadInstance::glyph(x, origin.y, &glyph, color), scissor);
                        }
                        x += CELL_WIDTH as f32;
                    }
                }
            }
        }
    }
}
