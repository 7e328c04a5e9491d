use anyhow::{Context, Result};
use kiln_engine::gfx::{DynamicIndexBufferHandle, DynamicVertexBufferHandle, Gfx};

use crate::vertex::Vertex;

/// Host-side vertex and index data, re-uploaded in full every frame.
///
/// Indices stay zero; the buffers exist to exercise resizing and upload.
#[derive(Debug, Default)]
pub struct GeometryBuffers {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl GeometryBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes both sequences exactly `len` long, keeping the prefix and
    /// default-filling new elements.
    pub fn resize(&mut self, len: usize) {
        self.vertices.resize(len, Vertex::default());
        self.indices.resize(len, 0);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Replaces both GPU buffers from offset 0 with the current contents.
    pub fn upload(
        &self,
        gfx: &mut dyn Gfx,
        vbh: DynamicVertexBufferHandle,
        ibh: DynamicIndexBufferHandle,
    ) -> Result<()> {
        gfx.update_dynamic_vertex_buffer(vbh, 0, bytemuck::cast_slice(&self.vertices))
            .context("vertex upload failed")?;
        gfx.update_dynamic_index_buffer(ibh, 0, bytemuck::cast_slice(&self.indices))
            .context("index upload failed")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingGfx};

    fn handles() -> (DynamicVertexBufferHandle, DynamicIndexBufferHandle) {
        (
            DynamicVertexBufferHandle::from_raw(0),
            DynamicIndexBufferHandle::from_raw(0),
        )
    }

    // ── resize ───────────────────────────────────────────────────────────

    #[test]
    fn resize_sets_both_lengths() {
        let mut geo = GeometryBuffers::new();
        for count in [53_000usize, 54_321, 55_000] {
            geo.resize(3 * count);
            assert_eq!(geo.vertices.len(), 3 * count);
            assert_eq!(geo.indices.len(), 3 * count);
        }
    }

    #[test]
    fn shrink_keeps_prefix() {
        let mut geo = GeometryBuffers::new();
        geo.resize(4);
        geo.vertices[1].x = 2.5;
        geo.indices[2] = 9;

        geo.resize(3);
        assert_eq!(geo.len(), 3);
        assert_eq!(geo.vertices[1].x, 2.5);
        assert_eq!(geo.indices, [0, 0, 9]);
    }

    #[test]
    fn growth_default_fills() {
        let mut geo = GeometryBuffers::new();
        geo.resize(2);
        geo.vertices[0].color = 0xffff_ffff;
        geo.resize(5);
        assert_eq!(geo.vertices[0].color, 0xffff_ffff);
        assert!(geo.vertices[2..].iter().all(|v| *v == Vertex::default()));
        assert!(geo.indices.iter().all(|&i| i == 0));
    }

    // ── upload ───────────────────────────────────────────────────────────

    #[test]
    fn upload_writes_whole_buffers_at_offset_zero() {
        let mut geo = GeometryBuffers::new();
        geo.resize(3 * 53_001);
        let (vbh, ibh) = handles();

        let mut gfx = RecordingGfx::default();
        geo.upload(&mut gfx, vbh, ibh).unwrap();

        assert_eq!(
            gfx.calls,
            vec![
                Call::UpdateVertex { start: 0, bytes: 159_003 * 20 },
                Call::UpdateIndex { start: 0, bytes: 159_003 * 4 },
            ]
        );
    }

    #[test]
    fn upload_propagates_library_errors() {
        let geo = GeometryBuffers::new();
        let (vbh, ibh) = handles();
        let mut gfx = RecordingGfx::failing_updates();
        assert!(geo.upload(&mut gfx, vbh, ibh).is_err());
    }
}
