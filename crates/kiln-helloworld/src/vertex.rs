use bytemuck::{Pod, Zeroable};
use kiln_engine::gfx::{Attrib, AttribType, VertexLayout};

/// Position, packed color and texture coordinate; 20 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    /// Packed RGBA8, normalized in the shader.
    pub color: u32,
    pub tex_x: f32,
    pub tex_y: f32,
}

impl Vertex {
    pub fn layout() -> VertexLayout {
        VertexLayout::begin()
            .add(Attrib::Position, 2, AttribType::Float, false)
            .add(Attrib::Color0, 4, AttribType::Uint8, true)
            .add(Attrib::TexCoord0, 2, AttribType::Float, false)
            .end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_struct() {
        let layout = Vertex::layout();
        assert!(layout.is_finished());
        assert_eq!(usize::from(layout.stride()), std::mem::size_of::<Vertex>());
        assert_eq!(layout.stride(), 20);
        assert_eq!(layout.offset(Attrib::Position), Some(0));
        assert_eq!(layout.offset(Attrib::Color0), Some(8));
        assert_eq!(layout.offset(Attrib::TexCoord0), Some(12));
    }

    #[test]
    fn default_is_all_zero() {
        assert_eq!(bytemuck::bytes_of(&Vertex::default()), &[0u8; 20]);
    }
}
