use super::GfxError;

/// Semantic of a vertex attribute. Each maps to a fixed shader location.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Attrib {
    Position,
    Normal,
    Tangent,
    Bitangent,
    Color0,
    Color1,
    Color2,
    Color3,
    Indices,
    Weight,
    TexCoord0,
    TexCoord1,
    TexCoord2,
    TexCoord3,
    TexCoord4,
    TexCoord5,
    TexCoord6,
    TexCoord7,
}

impl Attrib {
    /// Shader location the attribute is bound to.
    #[inline]
    pub const fn location(self) -> u32 {
        self as u32
    }
}

/// Component type of a vertex attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AttribType {
    Uint8,
    Int16,
    Half,
    Float,
}

impl AttribType {
    /// Size of one component in bytes.
    #[inline]
    pub const fn size(self) -> u16 {
        match self {
            AttribType::Uint8 => 1,
            AttribType::Int16 | AttribType::Half => 2,
            AttribType::Float => 4,
        }
    }
}

/// One attribute entry of a finished layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexAttribute {
    pub attrib: Attrib,
    /// Component count, 1..=4.
    pub num: u8,
    pub ty: AttribType,
    /// Integer components are mapped to `[0, 1]` (or `[-1, 1]`) in the shader.
    pub normalized: bool,
    /// Byte offset from the start of the vertex.
    pub offset: u16,
}

/// Describes how the fields of one vertex record are packed.
///
/// Built with `begin() / add() / end()`. Offsets are assigned in `add` order
/// with no implicit padding; `skip` inserts explicit padding.
///
/// ```ignore
/// let layout = VertexLayout::begin()
///     .add(Attrib::Position, 2, AttribType::Float, false)
///     .add(Attrib::Color0, 4, AttribType::Uint8, true)
///     .end();
/// assert_eq!(layout.stride(), 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: u16,
    finished: bool,
}

impl VertexLayout {
    /// Starts a new, empty layout.
    pub fn begin() -> Self {
        Self::default()
    }

    /// Appends an attribute at the current end of the record.
    pub fn add(mut self, attrib: Attrib, num: u8, ty: AttribType, normalized: bool) -> Self {
        debug_assert!(!self.finished, "VertexLayout::add after end()");
        self.attributes.push(VertexAttribute {
            attrib,
            num,
            ty,
            normalized,
            offset: self.stride,
        });
        self.stride += u16::from(num) * ty.size();
        self
    }

    /// Inserts `bytes` of padding.
    pub fn skip(mut self, bytes: u16) -> Self {
        self.stride += bytes;
        self
    }

    /// Finishes the layout.
    pub fn end(mut self) -> Self {
        self.finished = true;
        self
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Size of one vertex in bytes.
    #[inline]
    pub fn stride(&self) -> u16 {
        self.stride
    }

    #[inline]
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn offset(&self, attrib: Attrib) -> Option<u16> {
        self.attributes
            .iter()
            .find(|a| a.attrib == attrib)
            .map(|a| a.offset)
    }

    /// Converts the layout into wgpu vertex attributes.
    ///
    /// Fails for unfinished layouts, duplicate semantics and component
    /// combinations wgpu has no vertex format for.
    pub(crate) fn to_wgpu(&self) -> Result<Vec<wgpu::VertexAttribute>, GfxError> {
        if !self.finished {
            return Err(GfxError::InvalidLayout("layout was not finished with end()".into()));
        }
        if self.stride == 0 {
            return Err(GfxError::InvalidLayout("layout has zero stride".into()));
        }

        let mut out = Vec::with_capacity(self.attributes.len());
        for (i, a) in self.attributes.iter().enumerate() {
            if self.attributes[..i].iter().any(|prev| prev.attrib == a.attrib) {
                return Err(GfxError::InvalidLayout(format!("{:?} declared twice", a.attrib)));
            }
            let format = vertex_format(a.ty, a.num, a.normalized).ok_or_else(|| {
                GfxError::InvalidLayout(format!(
                    "{:?}: {} x {:?} (normalized: {}) has no vertex format",
                    a.attrib, a.num, a.ty, a.normalized
                ))
            })?;
            out.push(wgpu::VertexAttribute {
                format,
                offset: u64::from(a.offset),
                shader_location: a.attrib.location(),
            });
        }
        Ok(out)
    }
}

fn vertex_format(ty: AttribType, num: u8, normalized: bool) -> Option<wgpu::VertexFormat> {
    use wgpu::VertexFormat as F;

    let format = match (ty, num, normalized) {
        (AttribType::Uint8, 1, false) => F::Uint8,
        (AttribType::Uint8, 2, false) => F::Uint8x2,
        (AttribType::Uint8, 4, false) => F::Uint8x4,
        (AttribType::Uint8, 1, true) => F::Unorm8,
        (AttribType::Uint8, 2, true) => F::Unorm8x2,
        (AttribType::Uint8, 4, true) => F::Unorm8x4,

        (AttribType::Int16, 1, false) => F::Sint16,
        (AttribType::Int16, 2, false) => F::Sint16x2,
        (AttribType::Int16, 4, false) => F::Sint16x4,
        (AttribType::Int16, 1, true) => F::Snorm16,
        (AttribType::Int16, 2, true) => F::Snorm16x2,
        (AttribType::Int16, 4, true) => F::Snorm16x4,

        (AttribType::Half, 1, _) => F::Float16,
        (AttribType::Half, 2, _) => F::Float16x2,
        (AttribType::Half, 4, _) => F::Float16x4,

        (AttribType::Float, 1, _) => F::Float32,
        (AttribType::Float, 2, _) => F::Float32x2,
        (AttribType::Float, 3, _) => F::Float32x3,
        (AttribType::Float, 4, _) => F::Float32x4,

        _ => return None,
    };
    Some(format)
}
