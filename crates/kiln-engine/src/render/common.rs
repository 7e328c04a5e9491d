//! Shared GPU types and helpers.

use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

// ── unit quad ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── scissor ───────────────────────────────────────────────────────────────

/// Scissor rectangle `[x, y, w, h]` in target pixels.
pub(crate) type Scissor = [u32; 4];

/// Converts a clip rect to scissor arguments clamped to a `width x height`
/// target.
///
/// `None` clip means the full target. Returns `None` when the visible area is
/// empty and the draw should be skipped.
pub(super) fn clip_to_scissor(clip: Option<Rect>, width: u32, height: u32) -> Option<Scissor> {
    let (w, h) = (width.max(1), height.max(1));
    let [x, y, sw, sh] = match clip {
        None => [0, 0, w, h],
        Some(r) => {
            let x0 = (r.origin.x.max(0.0) as u32).min(w);
            let y0 = (r.origin.y.max(0.0) as u32).min(h);
            let x1 = ((r.origin.x + r.size.x).max(0.0) as u32).min(w);
            let y1 = ((r.origin.y + r.size.y).max(0.0) as u32).min(h);
            [x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0)]
        }
    };
    (sw > 0 && sh > 0).then_some([x, y, sw, sh])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_clip_covers_target() {
        assert_eq!(clip_to_scissor(None, 640, 480), Some([0, 0, 640, 480]));
    }

    #[test]
    fn clip_is_clamped_to_target() {
        let clip = Rect::new(-10.0, 400.0, 100.0, 200.0);
        assert_eq!(clip_to_scissor(Some(clip), 640, 480), Some([0, 400, 90, 80]));
    }

    #[test]
    fn offscreen_clip_is_skipped() {
        let clip = Rect::new(700.0, 0.0, 50.0, 50.0);
        assert_eq!(clip_to_scissor(Some(clip), 640, 480), None);
    }
}
